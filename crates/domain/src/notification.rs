//! # 通知
//!
//! CI/CD ワークフロー結果通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`WorkflowStatus`] | ワークフロー結果 | 成功 / 失敗 の 2 種類 |
//! | [`RunId`] | 実行 ID | GitHub Actions の run ID。`N/A` は不明を表す |
//! | [`DeploymentUrl`] | デプロイ URL | 成功時のみ本文に含める任意項目 |
//! | [`WorkflowRun`] | ワークフロー実行 | 通知 1 通分の入力 |
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//! | [`DeliveryOutcome`] | 送信結果 | 実際に送ったか、ドライランでスキップしたか |
//!
//! ## 設計方針
//!
//! - **任意項目は条件付き表示**: デプロイ URL や実行 ID が無くてもエラーにしない
//! - **ログ URL の決定的導出**: リポジトリ名と実行 ID のみから組み立てる
//! - **テンプレート分離**: 通知内容とメール生成は分離（TemplateRenderer は notifier）

use derive_more::Display;
use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;
use url::Url;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// メールアドレスが不正
    #[error("メールアドレスが不正: {0}")]
    InvalidAddress(String),

    /// URL が不正
    #[error("URL が不正: {0}")]
    InvalidUrl(String),
}

/// ワークフロー結果
///
/// snake_case でシリアライズされる（`"success"` / `"failed"`）。
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowStatus {
    /// 成功: デプロイ完了通知を送る
    Success,
    /// 失敗: ワークフロー失敗通知を送る
    #[default]
    Failed,
}

/// 実行 ID（値オブジェクト）
///
/// GitHub Actions の run ID をラップする。
/// [`RunId::UNKNOWN`]（`"N/A"`）は実行 ID 不明を表し、ログ URL は導出されない。
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// 実行 ID 不明を表す番兵値
    pub const UNKNOWN: &'static str = "N/A";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 実行 ID 不明の値を作成する
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ログ URL を導出できる実行 ID かどうか
    pub fn is_known(&self) -> bool {
        let trimmed = self.0.trim();
        !trimmed.is_empty() && trimmed != Self::UNKNOWN
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::unknown()
    }
}

/// デプロイ URL（値オブジェクト）
///
/// CI から渡された文字列をそのまま保持する。`my-app.vercel.app` のような
/// スキームなしの値も本文には表示する。
///
/// # 不変条件
///
/// - `link` は `http` または `https` スキームの絶対 URL としてパースできた場合のみ `Some`
///
/// `link` は `url` クレートでパース済みのため `"` `<` `>` を含まず、
/// HTML テンプレートの href 属性にそのまま埋め込める。`text` は自動エスケープして表示する。
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[display("{text}")]
pub struct DeploymentUrl {
    text: String,
    link: Option<Url>,
}

impl DeploymentUrl {
    /// 文字列からデプロイ URL を作成する
    ///
    /// http/https の絶対 URL として解釈できない値もテキストとして保持する。
    pub fn new(value: &str) -> Self {
        let text = value.trim().to_string();
        let link = Url::parse(&text)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"));

        Self { text, link }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// リンクとして埋め込める URL
    pub fn link(&self) -> Option<&Url> {
        self.link.as_ref()
    }
}

/// ワークフロー実行
///
/// 通知 1 通分の入力。設定から 1 対 1 で組み立てられる。
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRun {
    /// ワークフロー結果
    pub status:         WorkflowStatus,
    /// ワークフロー名
    pub workflow_name:  String,
    /// リポジトリ名（`owner/name` 形式）
    pub repo_name:      String,
    /// 実行 ID
    pub run_id:         RunId,
    /// デプロイ URL（成功時のみ表示）
    pub deployment_url: Option<DeploymentUrl>,
}

impl WorkflowRun {
    /// ワークフロー実行ログの URL を導出する
    ///
    /// `{server_url}/{repo_name}/actions/runs/{run_id}` を返す。
    /// 実行 ID が不明（[`RunId::UNKNOWN`]）の場合は `Ok(None)`。
    ///
    /// # エラー
    ///
    /// `server_url` がパスを持てない URL（`mailto:` など）の場合は
    /// `NotificationError::InvalidUrl` を返す。
    pub fn log_url(&self, server_url: &Url) -> Result<Option<Url>, NotificationError> {
        if !self.run_id.is_known() {
            return Ok(None);
        }

        let mut url = server_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                NotificationError::InvalidUrl(format!("{server_url}: ログ URL のベースにできません"))
            })?
            .pop_if_empty()
            .extend(self.repo_name.split('/').map(str::trim).filter(|s| !s.is_empty()))
            .extend(["actions", "runs", self.run_id.as_str().trim()]);

        Ok(Some(url))
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 送信結果
///
/// 送信実装がエラーなく終わった場合の結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// SMTP サーバーが受け付けた
    Sent,
    /// ドライランのため送信しなかった
    Skipped,
}
