//! # テスト用モック送信
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! cinotify-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cinotify_domain::notification::{DeliveryOutcome, EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// [`failing`](MockNotificationSender::failing) で作成した場合は、
/// トランスポート障害を模して常に `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:      Arc<Mutex<Vec<EmailMessage>>>,
    fail_with: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗するモックを作成する
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent:      Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(reason.into()),
        }
    }

    /// 送信に成功したメールの一覧を返す
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError> {
        if let Some(reason) = &self.fail_with {
            return Err(NotificationError::SendFailed(reason.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(DeliveryOutcome::Sent)
    }
}
