//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → 結果報告を統合するサービス。
//!
//! ## 設計方針
//!
//! - **bool で結果を返す**: `notify()` は送信失敗してもエラーを返さない
//! - **再送しない**: 1 回の SMTP セッションで送信し、失敗はそのまま報告する
//! - **結果報告**: 標準出力にステータス行を、トレーシングにビジネスイベントを出力する
//! - **ドライラン**: 送信実装がスキップした場合は送信成功とは別のステータス行を出す
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::sync::Arc;

use cinotify_domain::notification::{DeliveryOutcome, WorkflowRun};
use cinotify_infra::NotificationSender;
use cinotify_shared::{
    event_log::{error, event},
    log_business_event,
};
use url::Url;

use super::TemplateRenderer;

/// 通知サービス
///
/// ワークフロー結果通知の全体フローを統合する。
/// `notify()` は送信失敗してもエラーを返さず、成否を bool で返す。
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    server_url:        Url,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        server_url: Url,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            server_url,
        }
    }

    /// 通知を送信する
    ///
    /// テンプレートレンダリング → メール送信を行い、送信できた場合のみ `true` を返す。
    /// ドライランでスキップした場合も失敗ではないため `true` を返す。
    /// いずれのステップで失敗してもパニックやエラーにはしない（ログ出力のみ）。
    pub async fn notify(&self, run: &WorkflowRun, recipient: &str) -> bool {
        let status: &str = run.status.into();

        // テンプレートレンダリング
        let email = match self
            .template_renderer
            .render(run, recipient, &self.server_url)
        {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::CONFIGURATION,
                    error.kind = error::kind::TEMPLATE,
                    error = %e,
                    notification.status = status,
                    notification.run_id = %run.run_id,
                    "通知テンプレートのレンダリングに失敗"
                );
                println!("❌ Error sending email: {e}");
                return false;
            }
        };

        // メール送信
        match self.sender.send_email(&email).await {
            Ok(DeliveryOutcome::Sent) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::SUCCESS,
                    notification.status = status,
                    notification.run_id = %run.run_id,
                    notification.recipient = %recipient,
                    notification.subject = %email.subject,
                    "通知メール送信成功"
                );
                println!("✅ Email sent successfully to {recipient}");
                true
            }
            Ok(DeliveryOutcome::Skipped) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SKIPPED,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::SUCCESS,
                    notification.status = status,
                    notification.run_id = %run.run_id,
                    notification.recipient = %recipient,
                    notification.subject = %email.subject,
                    "ドライランのため通知メールを送信しませんでした"
                );
                println!("⏭️ Dry run: email to {recipient} was not sent");
                true
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::SMTP,
                    notification.status = status,
                    notification.run_id = %run.run_id,
                    notification.recipient = %recipient,
                    error = %e,
                    "通知メール送信失敗"
                );
                println!("❌ Error sending email: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cinotify_domain::notification::{DeploymentUrl, RunId, WorkflowStatus};
    use cinotify_infra::{mock::MockNotificationSender, notification::NoopNotificationSender};
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_service(sender: impl NotificationSender + 'static) -> NotificationService {
        let template_renderer = TemplateRenderer::new().unwrap();
        NotificationService::new(
            Arc::new(sender),
            template_renderer,
            Url::parse("https://github.com").unwrap(),
        )
    }

    fn make_run(status: WorkflowStatus) -> WorkflowRun {
        WorkflowRun {
            status,
            workflow_name: "CI/CD Pipeline".to_string(),
            repo_name: "octo/app".to_string(),
            run_id: RunId::new("987654"),
            deployment_url: Some(DeploymentUrl::new("https://app.example.com/")),
        }
    }

    #[tokio::test]
    async fn 送信成功時にtrueを返す() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone());

        let delivered = service
            .notify(&make_run(WorkflowStatus::Success), "dev@example.com")
            .await;

        assert!(delivered);
        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "dev@example.com");
        assert_eq!(sent[0].subject, "✅ Deployment Successful - octo/app");
        assert!(sent[0].text_body.contains("https://app.example.com/"));
    }

    #[tokio::test]
    async fn 失敗通知はログリンク付きで送信される() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone());

        let delivered = service
            .notify(&make_run(WorkflowStatus::Failed), "dev@example.com")
            .await;

        assert!(delivered);
        let sent = sender.sent_emails();
        assert_eq!(sent[0].subject, "❌ Workflow Failed - octo/app");
        assert!(
            sent[0]
                .text_body
                .contains("https://github.com/octo/app/actions/runs/987654")
        );
    }

    #[tokio::test]
    async fn 送信失敗時はfalseを返しパニックしない() {
        let sender = MockNotificationSender::failing("connection refused");
        let service = make_service(sender.clone());

        let delivered = service
            .notify(&make_run(WorkflowStatus::Failed), "dev@example.com")
            .await;

        assert!(!delivered);
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn ドライランでスキップされた場合もtrueを返す() {
        let service = make_service(NoopNotificationSender);

        let delivered = service
            .notify(&make_run(WorkflowStatus::Success), "dev@example.com")
            .await;

        assert!(delivered);
    }
}
