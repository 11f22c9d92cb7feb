//! # SkillForge インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **メール送信**: SMTP リレー（STARTTLS + 認証）への送信
//! - **通知ログ**: SMTP 未設定時に通知を構造化ログとして記録する
//!
//! ## 依存関係
//!
//! ```text
//! notification-service → infra → domain
//!                          ↘
//!                            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - `NotificationSender` トレイト、SMTP 実装、送信設定
//! - [`notification_log`] - ログ記録モードの記録先
//! - `mock` - テスト用のインメモリ実装（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod notification_log;

pub use notification::{NotificationSender, SmtpNotificationSender, TransportConfig};
pub use notification_log::{NotificationLog, NotificationLogSink, TracingNotificationLogSink};
