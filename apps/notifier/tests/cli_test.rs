//! send-notification バイナリの統合テスト
//!
//! 環境変数をクリアした子プロセスとしてバイナリを起動し、
//! 終了コードと標準出力のステータス行を検証する。
//! 外部の SMTP サーバーには接続しない。
//!
//! 実行方法:
//! ```bash
//! cargo test -p cinotify-notifier --test cli_test
//! ```

use std::{
    net::TcpListener,
    process::{Command, Output},
};

use pretty_assertions::assert_eq;

const BIN: &str = env!("CARGO_BIN_EXE_send-notification");

fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(BIN)
        .args(args)
        .env_clear()
        .env("RUST_LOG", "off")
        .envs(envs.iter().copied())
        .output()
        .expect("バイナリの起動に失敗")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// 接続を受け付けないポート番号を取得する
fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port.to_string()
}

#[test]
fn 認証情報が未設定の場合は終了コード1で終了する() {
    let output = run(&["success"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(
        "❌ ERROR: SENDER_EMAIL or SENDER_PASSWORD not found in environment variables"
    ));
}

#[test]
fn パスワードのみ未設定の場合も終了コード1で終了する() {
    let output = run(&["failed"], &[("SENDER_EMAIL", "ci@example.com")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Error sending email"));
}

#[test]
fn 設定値が不正な場合は接続前に終了コード1で終了する() {
    let output = run(
        &["failed"],
        &[
            ("SENDER_EMAIL", "ci@example.com"),
            ("SENDER_PASSWORD", "app-password"),
            ("SMTP_PORT", "not-a-port"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("SMTP_PORT"));
}

#[test]
fn 宛先未設定の場合は送信元アドレスに送る() {
    let output = run(
        &["success", "https://app.example.com/"],
        &[
            ("SENDER_EMAIL", "ci@example.com"),
            ("SENDER_PASSWORD", "app-password"),
            ("NOTIFICATION_BACKEND", "noop"),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Dry run: email to ci@example.com was not sent"));
}

#[test]
fn ドライランでは送信成功のステータス行を出さない() {
    let output = run(
        &["--fail-on-error", "success", "my-app.vercel.app"],
        &[
            ("SENDER_EMAIL", "ci@example.com"),
            ("SENDER_PASSWORD", "app-password"),
            ("RECEIVER_EMAIL", "dev@example.com"),
            ("NOTIFICATION_BACKEND", "noop"),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("Dry run: email to dev@example.com was not sent"));
    assert!(!stdout.contains("Email sent successfully"));
}

#[test]
fn 送信失敗してもプロセスは終了コード0で終了する() {
    let port = closed_port();
    let output = run(
        &["failed"],
        &[
            ("SENDER_EMAIL", "ci@example.com"),
            ("SENDER_PASSWORD", "app-password"),
            ("RECEIVER_EMAIL", "dev@example.com"),
            ("SMTP_HOST", "localhost"),
            ("SMTP_PORT", port.as_str()),
            ("SMTP_TIMEOUT_SECS", "5"),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("❌ Error sending email"));
}

#[test]
fn fail_on_error指定時は送信失敗で終了コード1になる() {
    let port = closed_port();
    let output = run(
        &["--fail-on-error", "failed"],
        &[
            ("SENDER_EMAIL", "ci@example.com"),
            ("SENDER_PASSWORD", "app-password"),
            ("SMTP_HOST", "localhost"),
            ("SMTP_PORT", port.as_str()),
            ("SMTP_TIMEOUT_SECS", "5"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("❌ Error sending email"));
}
