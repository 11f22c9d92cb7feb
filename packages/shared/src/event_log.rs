//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` で効率的に調査できるよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
        /// SMTP 未設定時のログ記録（送信なし）
        pub const NOTIFICATION_LOGGED: &str = "notification.logged";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const NOTIFICATION_LOG: &str = "notification_log";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（SMTP リレー、エージェントバックエンド）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// 入力値の不備
        pub const VALIDATION: &str = "validation";
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        pub const SMTP: &str = "smtp";
        pub const TEMPLATE: &str = "template";
        pub const NOTIFICATION_LOG: &str = "notification_log";
        pub const AGENT_BACKEND: &str = "agent_backend";
        pub const PAYLOAD: &str = "payload";
    }
}
