//! # SkillForge 共有ユーティリティ
//!
//! 通知サービスとパッケージ群（domain, infra）で共通して使うユーティリティ。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は各アプリの責務）
//! - トレーシング初期化など重い依存は `observability` feature の背後に置く

pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
