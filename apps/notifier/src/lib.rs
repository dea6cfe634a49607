//! # Notifier ライブラリ
//!
//! CI/CD ワークフロー結果のメール通知を構成するモジュールを公開する。
//! バイナリ `send-notification` とテストから利用される。

pub mod cli;
pub mod config;
pub mod error;
pub mod usecase;
