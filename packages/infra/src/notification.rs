//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **送信ごとに接続**: コネクションプールは持たず、1 回の送信で接続・認証・送信・切断を行う
//! - **設定は不変**: [`TransportConfig`] は起動時に一度だけ組み立て、`Arc` で共有する

mod smtp;
mod transport_config;

use async_trait::async_trait;
use skillforge_domain::notification::{NotificationError, RenderedNotification};
pub use smtp::SmtpNotificationSender;
pub use transport_config::{
    DEFAULT_SEND_TIMEOUT,
    SMTP_RELAY_HOST,
    SMTP_RELAY_PORT,
    TransportConfig,
};

/// メール送信トレイト
///
/// ディスパッチャは送信者の認証情報が設定されている場合にのみ呼び出す。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// レンダリング済み通知を 1 件送信する
    async fn send_email(&self, email: &RenderedNotification) -> Result<(), NotificationError>;
}
