//! # 通知サービス（ディスパッチャ）
//!
//! テンプレートレンダリング → メール送信またはログ記録 → 結果の組み立てを統合する。
//!
//! ## 設計方針
//!
//! - **失敗は値で返す**: `dispatch()` はエラーを返さず、失敗も [`DispatchResult`] に載せる
//! - **劣化モード**: 送信者の認証情報が無ければ送信せず、通知ログに記録して成功扱いにする
//! - **リトライなし**: 送信失敗時にログ記録へフォールバックもしない
//! - **依存性注入**: `NotificationSender`、`NotificationLogSink`、`Clock` は trait で抽象化

use std::sync::Arc;

use skillforge_domain::{
    clock::Clock,
    notification::{
        DispatchResult,
        Notification,
        NotificationError,
        NotificationKind,
        NotificationLogId,
        NotificationPayload,
    },
};
use skillforge_infra::{
    notification::{NotificationSender, TransportConfig},
    notification_log::{NotificationLog, NotificationLogSink},
};
use skillforge_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::TemplateRenderer;

/// 通知サービス
///
/// 1 回の `dispatch` が 1 件の宛先への 1 回の配信（またはログ記録）に対応する。
/// 呼び出し間で状態を持たない。
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    log_sink:          Arc<dyn NotificationLogSink>,
    transport_config:  Arc<TransportConfig>,
    clock:             Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        log_sink: Arc<dyn NotificationLogSink>,
        transport_config: Arc<TransportConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            log_sink,
            transport_config,
            clock,
        }
    }

    /// 通知種別とペイロードから通知を 1 件ディスパッチする
    ///
    /// ペイロードが不正な場合は送信を試みずに失敗結果を返す。
    pub async fn dispatch(
        &self,
        kind: NotificationKind,
        payload: &NotificationPayload,
    ) -> DispatchResult {
        match Notification::from_payload(kind, payload) {
            Ok(notification) => self.dispatch_notification(&notification).await,
            Err(e) => failed(kind, "-", error::kind::PAYLOAD, &e),
        }
    }

    /// 検証済みの通知を 1 件ディスパッチする
    pub async fn dispatch_notification(&self, notification: &Notification) -> DispatchResult {
        let kind = notification.kind();
        let recipient = notification.recipient_email().as_str();
        let rendered_at = self.clock.now();

        let rendered = match self
            .template_renderer
            .render_notification(notification, rendered_at)
        {
            Ok(rendered) => rendered,
            Err(e) => return failed(kind, recipient, error::kind::TEMPLATE, &e),
        };

        if !self.transport_config.is_configured() {
            let log = NotificationLog {
                id: NotificationLogId::new(),
                kind,
                recipient_email: rendered.to().clone(),
                subject: rendered.subject().to_string(),
                summary: notification.summary(),
                logged_at: rendered_at,
            };
            return match self.log_sink.record(&log).await {
                Ok(()) => DispatchResult::logged(kind),
                Err(e) => failed(kind, recipient, error::kind::NOTIFICATION_LOG, &e),
            };
        }

        match self.sender.send_email(&rendered).await {
            Ok(()) => {
                let kind_str: &'static str = kind.into();
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.kind = kind_str,
                    notification.recipient = recipient,
                    "通知メール送信成功"
                );
                DispatchResult::sent(kind)
            }
            Err(e) => failed(kind, recipient, error::kind::SMTP, &e),
        }
    }
}

/// 失敗イベントを出力して失敗結果を返す
fn failed(
    kind: NotificationKind,
    recipient: &str,
    error_kind: &'static str,
    err: &NotificationError,
) -> DispatchResult {
    let kind_str: &'static str = kind.into();
    let error_category = match err {
        NotificationError::Validation(_) => error::category::VALIDATION,
        NotificationError::TemplateFailed(_) | NotificationError::LogFailed(_) => {
            error::category::INTERNAL
        }
        NotificationError::SendFailed(_) | NotificationError::Timeout { .. } => {
            error::category::EXTERNAL_SERVICE
        }
    };
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_FAILED,
        event.result = event::result::FAILURE,
        notification.kind = kind_str,
        notification.recipient = recipient,
        error.category = error_category,
        error.kind = error_kind,
        error = %err,
        "通知のディスパッチに失敗"
    );
    DispatchResult::failed(err.to_string())
}
