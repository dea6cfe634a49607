//! # ユースケース層
//!
//! Notifier のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信実装を `Arc<dyn NotificationSender>` で外部から注入
//! - **薄い main**: `main` は設定読み込みと組み立てに徹し、処理はユースケースに集約
//!
//! ## モジュール構成
//!
//! - `notification`: ワークフロー結果通知のユースケース

pub mod notification;

pub use notification::{NotificationService, TemplateRenderer};
