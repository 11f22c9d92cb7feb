//! # 通知ログ
//!
//! SMTP 未設定（ログ記録モード）のときに、送信の代わりに通知を記録する。
//!
//! 本番実装 [`TracingNotificationLogSink`] は `notification.logged` ビジネスイベントとして
//! 構造化ログに書き出す。JSON ログを収集すれば `jq` で後から追跡できる。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skillforge_domain::{
    email::Email,
    notification::{NotificationError, NotificationKind, NotificationLogId},
};
use skillforge_shared::{
    event_log::event,
    log_business_event,
};

/// 通知ログ（ログ記録モードで書き出すレコード）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLog {
    pub id:              NotificationLogId,
    pub kind:            NotificationKind,
    pub recipient_email: Email,
    pub subject:         String,
    /// ペイロードの要約（`Notification::summary`）
    pub summary:         String,
    pub logged_at:       DateTime<Utc>,
}

/// 通知ログの記録先トレイト
#[async_trait]
pub trait NotificationLogSink: Send + Sync {
    /// 通知ログを記録する
    async fn record(&self, log: &NotificationLog) -> Result<(), NotificationError>;
}

/// `tracing` のビジネスイベントとして記録する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationLogSink;

#[async_trait]
impl NotificationLogSink for TracingNotificationLogSink {
    async fn record(&self, log: &NotificationLog) -> Result<(), NotificationError> {
        let kind: &'static str = log.kind.into();
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_LOGGED,
            event.entity_type = event::entity_type::NOTIFICATION_LOG,
            event.entity_id = %log.id,
            event.result = event::result::SUCCESS,
            notification.kind = kind,
            notification.recipient = %log.recipient_email,
            notification.subject = %log.subject,
            notification.summary = %log.summary,
            notification.logged_at = %log.logged_at.to_rfc3339(),
            "SMTP 未設定のため通知をログに記録（送信なし）"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[tokio::test]
    async fn tracingへの記録は常に成功する() {
        let log = NotificationLog {
            id:              NotificationLogId::new(),
            kind:            NotificationKind::PasswordReset,
            recipient_email: Email::new("bob@example.com").unwrap(),
            subject:         "Password Reset - SkillForge Navigator".to_string(),
            summary:         "user: Bob, temporary password: Xy9Zq1".to_string(),
            logged_at:       Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 0).unwrap(),
        };

        let result = TracingNotificationLogSink.record(&log).await;

        assert!(result.is_ok());
    }
}
