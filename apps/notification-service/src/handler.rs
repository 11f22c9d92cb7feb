//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ディスパッチはユースケース層に委譲

pub mod agent;
pub mod health;
pub mod notification;

pub use agent::{AgentState, relay_agent_operation};
pub use health::health_check;
pub use notification::{NotificationState, send_connection_notification, send_password_reset};
