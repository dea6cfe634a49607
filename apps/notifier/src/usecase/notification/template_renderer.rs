//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `✅ Deployment Successful - {repo}` / `❌ Workflow Failed - {repo}`
//! - **ログリンク**: 失敗時のみ `{server_url}/{repo}/actions/runs/{run_id}` をテンプレートに渡す
//! - **コンテキスト**: `WorkflowRun` をシリアライズしてそのままテンプレートに渡す
//! - **HTML の自動エスケープ**: `.html` テンプレートは tera が自動エスケープする。
//!   URL は `url` クレートでパース済みの値のみ `safe` で出力する

use cinotify_domain::notification::{
    EmailMessage,
    NotificationError,
    WorkflowRun,
    WorkflowStatus,
};
use tera::{Context, Tera};
use url::Url;

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`WorkflowRun` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "deployment_succeeded.html",
                    include_str!("../../../templates/notifications/deployment_succeeded.html"),
                ),
                (
                    "deployment_succeeded.txt",
                    include_str!("../../../templates/notifications/deployment_succeeded.txt"),
                ),
                (
                    "workflow_failed.html",
                    include_str!("../../../templates/notifications/workflow_failed.html"),
                ),
                (
                    "workflow_failed.txt",
                    include_str!("../../../templates/notifications/workflow_failed.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// ワークフロー実行からメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `run`: 通知対象のワークフロー実行
    /// - `recipient`: 宛先メールアドレス
    /// - `server_url`: ログ URL のベース（例: `https://github.com`）
    pub fn render(
        &self,
        run: &WorkflowRun,
        recipient: &str,
        server_url: &Url,
    ) -> Result<EmailMessage, NotificationError> {
        let (template_name, subject, context) = self.build_template_params(run, server_url)?;

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: recipient.to_string(),
            subject,
            html_body,
            text_body,
        })
    }

    /// テンプレート名、件名、コンテキストを構築する
    fn build_template_params(
        &self,
        run: &WorkflowRun,
        server_url: &Url,
    ) -> Result<(&'static str, String, Context), NotificationError> {
        let repo_name = &run.repo_name;

        let mut context = Context::from_serialize(run)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let (template_name, subject) = match run.status {
            WorkflowStatus::Success => (
                "deployment_succeeded",
                format!("✅ Deployment Successful - {repo_name}"),
            ),
            WorkflowStatus::Failed => {
                let log_url = run.log_url(server_url).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "ログ URL を導出できないため案内文のみ表示します");
                    None
                });
                context.insert("log_url", &log_url.as_ref().map(Url::as_str));
                ("workflow_failed", format!("❌ Workflow Failed - {repo_name}"))
            }
        };

        Ok((template_name, subject, context))
    }
}
