//! # コマンドライン引数
//!
//! 位置引数でワークフロー結果とデプロイ URL を受け取る。
//! どちらも省略時は環境変数（`STATUS` / `DEPLOYMENT_URL`）にフォールバックする。
//!
//! ```bash
//! send-notification success https://app.example.com
//! send-notification failed
//! ```

use clap::Parser;

/// CI/CD ワークフローの結果をメールで通知する
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "send-notification", version)]
pub struct Cli {
    /// ワークフロー結果（"success" | "failed"）。省略時は $STATUS、未設定なら "failed"
    pub status: Option<String>,

    /// デプロイ URL（成功通知に含める）。省略時は $DEPLOYMENT_URL
    pub deployment_url: Option<String>,

    /// 送信失敗時に終了コード 1 で終了する
    #[arg(long)]
    pub fail_on_error: bool,
}
