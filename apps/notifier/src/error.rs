//! # Notifier エラー定義
//!
//! 設定読み込み時に発生するエラーを定義する。
//! いずれもネットワーク接続前に検出され、プロセスは終了コード 1 で終了する。
//!
//! メッセージは CI ログにそのまま出力されるため英語で記述する。

use cinotify_shared::event_log::error::kind;
use thiserror::Error;

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 送信元アドレスまたはパスワードが未設定
    #[error("SENDER_EMAIL or SENDER_PASSWORD not found in environment variables")]
    MissingCredentials,

    /// 数値として解釈できない環境変数
    #[error("{name} must be a valid number (got {value:?})")]
    InvalidNumber { name: &'static str, value: String },

    /// URL として解釈できない環境変数
    #[error("{name} must be a valid URL (got {value:?})")]
    InvalidUrl { name: &'static str, value: String },

    /// 未知の送信バックエンド
    #[error("NOTIFICATION_BACKEND must be \"smtp\" or \"noop\" (got {0:?})")]
    UnknownBackend(String),
}

impl ConfigError {
    /// ログの `error.kind` フィールドに出力する値
    pub fn log_kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => kind::MISSING_CREDENTIALS,
            Self::InvalidNumber { .. } | Self::InvalidUrl { .. } | Self::UnknownBackend(_) => {
                kind::INVALID_VALUE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_認証情報不足のメッセージは環境変数名を含む() {
        assert_eq!(
            ConfigError::MissingCredentials.to_string(),
            "SENDER_EMAIL or SENDER_PASSWORD not found in environment variables"
        );
    }

    #[test]
    fn test_数値エラーのメッセージは変数名と値を含む() {
        let error = ConfigError::InvalidNumber {
            name:  "SMTP_PORT",
            value: "abc".to_string(),
        };

        assert_eq!(error.to_string(), "SMTP_PORT must be a valid number (got \"abc\")");
        assert_eq!(error.log_kind(), kind::INVALID_VALUE);
    }
}
