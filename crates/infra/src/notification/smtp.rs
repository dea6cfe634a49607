//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 接続後に STARTTLS で暗号化へ昇格し、送信元アカウントで認証する。

use std::time::Duration;

use async_trait::async_trait;
use cinotify_domain::{
    notification::{DeliveryOutcome, EmailMessage, NotificationError},
    password::SmtpPassword,
};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// SMTP 接続設定
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    pub host:         String,
    /// SMTP サーバーのポート番号（例: 587 for STARTTLS）
    pub port:         u16,
    /// 送信元メールアドレス（SMTP AUTH のユーザー名を兼ねる）
    pub from_address: String,
    /// SMTP AUTH のパスワード
    pub password:     SmtpPassword,
    /// コマンドタイムアウト（`None` の場合は lettre のデフォルト）
    pub timeout:      Option<Duration>,
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// STARTTLS を必須とし、サーバーが対応していない場合は平文で送らずに失敗する。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// トランスポートの構築のみ行い、この時点ではサーバーに接続しない。
    pub fn new(settings: SmtpSettings) -> Result<Self, NotificationError> {
        let SmtpSettings {
            host,
            port,
            from_address,
            password,
            timeout,
        } = settings;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .map_err(|e| NotificationError::SendFailed(format!("SMTP トランスポート構築失敗: {e}")))?
            .port(port)
            .credentials(Credentials::new(
                from_address.clone(),
                password.into_string(),
            ));

        if timeout.is_some() {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(%host, port, "SMTP トランスポートを構築しました");

        Ok(Self {
            transport: builder.build(),
            from_address,
        })
    }

    /// lettre のメッセージを組み立てる
    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let from: Mailbox = self
            .from_address
            .parse()
            .map_err(|e| NotificationError::InvalidAddress(format!("送信元アドレス不正: {e}")))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::InvalidAddress(format!("宛先アドレス不正: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(DeliveryOutcome::Sent)
    }
}
