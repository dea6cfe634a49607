//! # cinotify ドメイン層
//!
//! CI/CD ワークフローの結果通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: ステータス、実行 ID、デプロイ URL を型で表現する
//! - **純粋性**: SMTP やテンプレートエンジンなどの外部要素には依存しない
//! - **決定性**: ログ URL の導出などはすべて入力のみから決まる
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//!     ↘                ↑
//!       ───────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - 通知イベント、メールメッセージ、通知エラー
//! - [`password`] - SMTP 認証情報（Debug 出力はマスク）
//!
//! ## 使用例
//!
//! ```rust
//! use cinotify_domain::notification::{RunId, WorkflowRun, WorkflowStatus};
//!
//! let run = WorkflowRun {
//!     status:         WorkflowStatus::Failed,
//!     workflow_name:  "CI".to_string(),
//!     repo_name:      "octo/app".to_string(),
//!     run_id:         RunId::new("42"),
//!     deployment_url: None,
//! };
//!
//! let server_url = url::Url::parse("https://github.com").unwrap();
//! let log_url = run.log_url(&server_url).unwrap().unwrap();
//! assert_eq!(log_url.as_str(), "https://github.com/octo/app/actions/runs/42");
//! ```

pub mod notification;
pub mod password;

pub use notification::{NotificationError, WorkflowRun, WorkflowStatus};
