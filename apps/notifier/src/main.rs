//! # send-notification
//!
//! CI/CD ワークフローの成否をメールで 1 通だけ通知するコマンド。
//!
//! ## 処理の流れ
//!
//! ```text
//! 設定読み込み → ステータスで分岐 → 本文生成（plain / HTML）
//!     → SMTP 接続 → STARTTLS → 認証 → 送信 → 切断 → 結果報告
//! ```
//!
//! ## 終了コード
//!
//! | 状況 | 終了コード |
//! |------|-----------|
//! | 送信元アドレス・パスワード未設定などの設定エラー | 1（接続前に終了） |
//! | 送信成功 | 0 |
//! | 送信失敗 | 0（`--fail-on-error` 指定時は 1） |
//!
//! ## 起動方法
//!
//! ```bash
//! SENDER_EMAIL=ci@example.com SENDER_PASSWORD=... \
//!   cargo run -p cinotify-notifier -- success https://app.example.com
//! ```
//!
//! 環境変数の一覧は [`cinotify_notifier::config`] を参照。

use std::{process::ExitCode, sync::Arc};

use anyhow::Context as _;
use cinotify_domain::notification::NotificationError;
use cinotify_infra::{
    NotificationSender,
    SmtpNotificationSender,
    notification::NoopNotificationSender,
};
use cinotify_notifier::{
    cli::Cli,
    config::{NotificationBackend, NotifierConfig},
    usecase::{NotificationService, TemplateRenderer},
};
use cinotify_shared::{
    event_log::error,
    observability::{LogFormat, init_tracing},
};
use clap::Parser;
use tracing::Instrument as _;

const SERVICE_NAME: &str = "send-notification";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();

    run(cli)
        .instrument(tracing::info_span!("app", service = SERVICE_NAME))
        .await
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // 設定読み込み（失敗時は接続前に終了）
    let config = match NotifierConfig::from_env(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                error.category = error::category::CONFIGURATION,
                error.kind = e.log_kind(),
                error = %e,
                "設定の読み込みに失敗しました"
            );
            println!("❌ ERROR: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!(
        status = %config.run.status,
        repo = %config.run.repo_name,
        backend = %config.notification.backend,
        "ワークフロー結果を通知します"
    );

    let template_renderer =
        TemplateRenderer::new().context("通知テンプレートの読み込みに失敗しました")?;

    let delivered = match build_sender(&config) {
        Ok(sender) => {
            let service =
                NotificationService::new(sender, template_renderer, config.server_url.clone());
            service.notify(&config.run, &config.receiver).await
        }
        Err(e) => {
            tracing::error!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::SMTP,
                error = %e,
                "送信実装の初期化に失敗しました"
            );
            println!("❌ Error sending email: {e}");
            false
        }
    };

    if !delivered && cli.fail_on_error {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// 設定に応じた送信実装を作成する
fn build_sender(config: &NotifierConfig) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    let sender: Arc<dyn NotificationSender> = match config.notification.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(config.smtp_settings())?),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    };
    Ok(sender)
}
