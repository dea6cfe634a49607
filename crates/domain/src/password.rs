//! # SMTP 認証情報
//!
//! 送信元アカウントの認証に使う値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`SmtpPassword`] | SMTP パスワード | SMTP AUTH に渡す資格情報（アプリパスワード等） |

/// SMTP パスワード
///
/// 環境変数 `SENDER_PASSWORD` から読み込んだ値をラップする。
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct SmtpPassword(String);

impl std::fmt::Debug for SmtpPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SmtpPassword").field(&"[REDACTED]").finish()
    }
}

impl SmtpPassword {
    /// パスワードを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_smtpパスワードを作成できる() {
        let password = SmtpPassword::new("app-password");
        assert_eq!(password.as_str(), "app-password");
    }

    #[rstest]
    fn test_smtpパスワードのdebug出力はマスクされる() {
        let password = SmtpPassword::new("app-password");
        let debug = format!("{password:?}");

        assert!(!debug.contains("app-password"));
        assert!(debug.contains("[REDACTED]"));
    }
}
