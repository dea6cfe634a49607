//! # Notifier 設定
//!
//! 環境変数と CLI 引数から通知 1 通分の設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SENDER_EMAIL` | **Yes** | 送信元アドレス（SMTP AUTH のユーザー名） |
//! | `SENDER_PASSWORD` | **Yes** | SMTP AUTH のパスワード |
//! | `RECEIVER_EMAIL` | No | 宛先（デフォルト: `SENDER_EMAIL`） |
//! | `STATUS` | No | ワークフロー結果（デフォルト: `failed`） |
//! | `WORKFLOW_NAME` | No | ワークフロー名（デフォルト: `CI/CD Pipeline`） |
//! | `REPO_NAME` | No | リポジトリ名（デフォルト: `React-ci-cd-setup`） |
//! | `WORKFLOW_RUN_ID` | No | 実行 ID（デフォルト: `N/A`） |
//! | `DEPLOYMENT_URL` | No | デプロイ URL |
//! | `GITHUB_SERVER_URL` | No | ログ URL のベース（デフォルト: `https://github.com`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `smtp.gmail.com`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `587`） |
//! | `SMTP_TIMEOUT_SECS` | No | SMTP コマンドタイムアウト秒 |
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `smtp`） |
//!
//! 空文字列の環境変数は未設定として扱う。

use std::{env, str::FromStr, time::Duration};

use cinotify_domain::{
    notification::{DeploymentUrl, RunId, WorkflowRun, WorkflowStatus},
    password::SmtpPassword,
};
use cinotify_infra::SmtpSettings;
use url::Url;

use crate::{cli::Cli, error::ConfigError};

const DEFAULT_WORKFLOW_NAME: &str = "CI/CD Pipeline";
const DEFAULT_REPO_NAME: &str = "React-ci-cd-setup";
const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Notifier の設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// 送信元アカウント
    pub sender:       SenderConfig,
    /// 宛先メールアドレス
    pub receiver:     String,
    /// 通知対象のワークフロー実行
    pub run:          WorkflowRun,
    /// ログ URL のベース
    pub server_url:   Url,
    /// 送信設定
    pub notification: NotificationConfig,
}

/// 送信元アカウント
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub address:  String,
    pub password: SmtpPassword,
}

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    /// SMTP サーバー経由で送信
    #[default]
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知送信の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: SMTP サーバー経由で送信（STARTTLS 必須）
/// - `noop`: 送信しない（ドライラン）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      NotificationBackend,
    /// SMTP ホスト
    pub smtp_host:    String,
    /// SMTP ポート
    pub smtp_port:    u16,
    /// SMTP コマンドタイムアウト
    pub smtp_timeout: Option<Duration>,
}

impl NotifierConfig {
    /// 環境変数と CLI 引数から設定を読み込む
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 位置引数は環境変数より優先する。
    ///
    /// # エラー
    ///
    /// - `SENDER_EMAIL` / `SENDER_PASSWORD` が未設定: [`ConfigError::MissingCredentials`]
    /// - 数値・URL・バックエンド名が不正: 対応する [`ConfigError`]
    pub fn from_lookup(
        cli: &Cli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (Some(address), Some(password)) = (var("SENDER_EMAIL"), var("SENDER_PASSWORD")) else {
            return Err(ConfigError::MissingCredentials);
        };
        let receiver = var("RECEIVER_EMAIL").unwrap_or_else(|| address.clone());

        let status = parse_status(
            cli.status
                .clone()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| var("STATUS")),
        );
        let deployment_url = parse_deployment_url(
            cli.deployment_url
                .clone()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| var("DEPLOYMENT_URL")),
        );

        let run = WorkflowRun {
            status,
            workflow_name: var("WORKFLOW_NAME").unwrap_or_else(|| DEFAULT_WORKFLOW_NAME.to_string()),
            repo_name: var("REPO_NAME").unwrap_or_else(|| DEFAULT_REPO_NAME.to_string()),
            run_id: var("WORKFLOW_RUN_ID").map(RunId::new).unwrap_or_default(),
            deployment_url,
        };

        let server_url_raw =
            var("GITHUB_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url = Url::parse(&server_url_raw).map_err(|_| ConfigError::InvalidUrl {
            name:  "GITHUB_SERVER_URL",
            value: server_url_raw.clone(),
        })?;

        let notification = NotificationConfig {
            backend:      match var("NOTIFICATION_BACKEND") {
                Some(value) => NotificationBackend::from_str(&value)
                    .map_err(|_| ConfigError::UnknownBackend(value))?,
                None => NotificationBackend::default(),
            },
            smtp_host:    var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port:    match var("SMTP_PORT") {
                Some(value) => parse_number("SMTP_PORT", value)?,
                None => DEFAULT_SMTP_PORT,
            },
            smtp_timeout: var("SMTP_TIMEOUT_SECS")
                .map(|value| parse_number("SMTP_TIMEOUT_SECS", value).map(Duration::from_secs))
                .transpose()?,
        };

        Ok(Self {
            sender: SenderConfig {
                address,
                password: SmtpPassword::new(password),
            },
            receiver,
            run,
            server_url,
            notification,
        })
    }

    /// SMTP 送信実装に渡す設定を組み立てる
    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host:         self.notification.smtp_host.clone(),
            port:         self.notification.smtp_port,
            from_address: self.sender.address.clone(),
            password:     self.sender.password.clone(),
            timeout:      self.notification.smtp_timeout,
        }
    }
}

/// ワークフロー結果を解釈する
///
/// `success` 以外はすべて失敗として扱う。未知の値は警告を出す。
fn parse_status(value: Option<String>) -> WorkflowStatus {
    let Some(value) = value else {
        return WorkflowStatus::default();
    };

    WorkflowStatus::from_str(value.trim()).unwrap_or_else(|_| {
        tracing::warn!(status = %value, "未知のステータスのため failed として扱います");
        WorkflowStatus::Failed
    })
}

/// デプロイ URL を解釈する
///
/// http/https の URL として解釈できない値もテキストとして本文に残し、警告を出す。
fn parse_deployment_url(value: Option<String>) -> Option<DeploymentUrl> {
    let url = DeploymentUrl::new(&value?);

    if url.link().is_none() {
        tracing::warn!(
            deployment_url = %url,
            "デプロイ URL を http/https の URL として解釈できないため、リンクにせずテキストで表示します"
        );
    }
    Some(url)
}

fn parse_number<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
