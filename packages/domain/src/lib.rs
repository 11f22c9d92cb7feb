//! # SkillForge ドメイン層
//!
//! 通知サービスの中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! notification-service → infra → domain
//! ```
//!
//! ドメイン層はネットワークやディスクに一切触れない。レンダリング対象の
//! 通知モデル、入力検証、配信結果の値オブジェクトだけを持つ。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ（テストで固定時刻を注入するため）
//! - [`email`] - メールアドレス値オブジェクト
//! - [`error`] - ドメイン層のエラー
//! - [`notification`] - 通知種別、ペイロード、レンダリング結果、配信結果

pub mod clock;
pub mod email;
pub mod error;
pub mod notification;

pub use error::DomainError;
