//! # cinotify 共有ユーティリティ
//!
//! このクレートは、cinotify
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notifier）から依存可能
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は `observability` feature の背後に置く

pub mod event_log;
pub mod observability;
