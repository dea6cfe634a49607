//! # Observability 基盤
//!
//! send-notification のトレーシング初期化を提供する。
//!
//! 標準出力は CI ログに残るステータス行（`✅ Email sent ...` など）専用とし、
//! トレーシングはすべて stderr に出力する。`LOG_FORMAT=json` で JSON 出力に切り替わる。

/// `RUST_LOG` 未設定時のフィルタ
///
/// lettre などの依存クレートは警告以上のみ、cinotify の各クレートは info 以上を出す。
pub const DEFAULT_FILTER: &str = "warn,cinotify_notifier=info,cinotify_infra=info";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（`jq` でビジネスイベントを抽出する用途）
    Json,
    /// 人間が読みやすい形式（CI コンソール向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値からログ形式を決める
    ///
    /// 未設定・空文字列は [`Pretty`](LogFormat::Pretty)。
    /// 不正な値も [`Pretty`](LogFormat::Pretty) にフォールバックし、stderr に警告を出す
    /// （トレーシング初期化前のため `eprintln!` を使う）。
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::default(),
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` でログレベルを制御できる。未設定の場合は [`DEFAULT_FILTER`]。
///
/// JSON モードでは `app` スパン（`service` フィールド）を `span.service` として出力する。
#[cfg(feature = "observability")]
pub fn init_tracing(log_format: LogFormat) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let fmt_layer = match log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("json"), LogFormat::Json)]
    #[case(Some(" json "), LogFormat::Json)]
    #[case(Some("pretty"), LogFormat::Pretty)]
    #[case(None, LogFormat::Pretty)]
    #[case(Some(""), LogFormat::Pretty)]
    fn test_log_formatの値を解釈できる(
        #[case] value: Option<&str>,
        #[case] expected: LogFormat,
    ) {
        assert_eq!(LogFormat::from_value(value), expected);
    }

    #[rstest]
    #[case("JSON")]
    #[case("text")]
    fn test_不正なlog_formatはprettyにフォールバックする(#[case] value: &str) {
        assert_eq!(LogFormat::from_value(Some(value)), LogFormat::Pretty);
    }

    #[test]
    fn test_デフォルトフィルタは依存クレートのログを抑える() {
        let directives: Vec<&str> = DEFAULT_FILTER.split(',').collect();

        assert_eq!(directives[0], "warn");
        assert!(directives.contains(&"cinotify_notifier=info"));
        assert!(directives.contains(&"cinotify_infra=info"));
    }
}
