//! # cinotify インフラ層
//!
//! 外部システムとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはメール送信の具体的な実装を提供する。SMTP の詳細を
//! カプセル化し、通知ユースケースをトランスポートの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信トレイトと SMTP / Noop 実装
//! - `mock` - テスト用モック（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{NotificationSender, SmtpNotificationSender, SmtpSettings};
