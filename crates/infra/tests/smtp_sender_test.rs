//! SmtpNotificationSender 統合テスト
//!
//! ローカルの TCP リスナーを相手に、トランスポート障害が
//! `NotificationError::SendFailed` に変換されることを確認する。
//! 外部の SMTP サーバーには接続しない。
//!
//! 実行方法:
//! ```bash
//! cargo test -p cinotify-infra --test smtp_sender_test
//! ```

use std::time::Duration;

use cinotify_domain::{
    notification::{EmailMessage, NotificationError},
    password::SmtpPassword,
};
use cinotify_infra::{NotificationSender, SmtpNotificationSender, SmtpSettings};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
};

fn make_sender(port: u16) -> SmtpNotificationSender {
    SmtpNotificationSender::new(SmtpSettings {
        host: "localhost".to_string(),
        port,
        from_address: "ci@example.com".to_string(),
        password: SmtpPassword::new("secret"),
        timeout: Some(Duration::from_secs(5)),
    })
    .expect("トランスポート構築に失敗")
}

fn make_email() -> EmailMessage {
    EmailMessage {
        to:        "dev@example.com".to_string(),
        subject:   "❌ Workflow Failed - octo/app".to_string(),
        html_body: "<p>failed</p>".to_string(),
        text_body: "failed".to_string(),
    }
}

/// 接続を受け付けないポート番号を取得する
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// STARTTLS を広告しない SMTP サーバーを 1 接続分だけ起動する
async fn spawn_plaintext_only_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        if writer.write_all(b"220 fake.example ESMTP\r\n").await.is_err() {
            return;
        }

        while let Ok(Some(line)) = lines.next_line().await {
            let command = line.to_ascii_uppercase();
            let reply: &[u8] = if command.starts_with("EHLO") {
                b"250-fake.example\r\n250 AUTH PLAIN LOGIN\r\n"
            } else if command.starts_with("QUIT") {
                b"221 bye\r\n"
            } else {
                b"250 OK\r\n"
            };
            if writer.write_all(reply).await.is_err() || command.starts_with("QUIT") {
                break;
            }
        }
    });

    port
}

#[tokio::test]
async fn 接続拒否された場合はsend_failedを返す() {
    let sender = make_sender(closed_port().await);

    let result = sender.send_email(&make_email()).await;

    assert!(matches!(result, Err(NotificationError::SendFailed(_))));
}

#[tokio::test]
async fn starttls非対応サーバーには平文で送信しない() {
    let sender = make_sender(spawn_plaintext_only_server().await);

    let result = sender.send_email(&make_email()).await;

    match result {
        Err(NotificationError::SendFailed(message)) => {
            assert!(message.contains("SMTP 送信失敗"));
        }
        other => panic!("SendFailed を期待したが {other:?} だった"),
    }
}
