//! # SkillForge 通知サービス ライブラリ
//!
//! ハンドラ、ユースケース、ルーター構築を公開する。
//! main.rs と統合テスト（`tests/`）の両方から利用する。

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
