//! ディスパッチ結果

use serde::{Deserialize, Serialize};

use super::NotificationKind;

/// ログ記録モードのメッセージに含まれるマーカー
const LOGGED_MARKER: &str = "logged";

/// 配信モード
///
/// [`DispatchResult`] には保持されず、成功時のメッセージから推定される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryMode {
    /// SMTP リレー経由で送信した
    Sent,
    /// SMTP 未設定のため運用ログに記録した
    Logged,
}

/// ディスパッチ結果
///
/// 1 回のディスパッチの結果。呼び出し元にそのまま返され、永続化はされない。
/// JSON 形状は `{"success": bool, "message": string}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
}

impl DispatchResult {
    /// SMTP 送信成功
    pub fn sent(kind: NotificationKind) -> Self {
        Self {
            success: true,
            message: format!("{} sent", kind.label()),
        }
    }

    /// SMTP 未設定のためログに記録（成功扱い）
    pub fn logged(kind: NotificationKind) -> Self {
        Self {
            success: true,
            message: format!(
                "{} {LOGGED_MARKER}, not sent (SMTP not configured)",
                kind.label()
            ),
        }
    }

    /// 失敗。`message` にはエラー内容をそのまま入れる
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// メッセージから配信モードを推定する。失敗時は `None`
    pub fn delivery_mode(&self) -> Option<DeliveryMode> {
        if !self.success {
            return None;
        }
        if self.message.contains(LOGGED_MARKER) {
            Some(DeliveryMode::Logged)
        } else {
            Some(DeliveryMode::Sent)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sentとloggedのメッセージ() {
        assert_eq!(
            DispatchResult::sent(NotificationKind::MentorAlert).message,
            "Mentor notification sent"
        );
        assert_eq!(
            DispatchResult::logged(NotificationKind::PasswordReset).message,
            "Password reset email logged, not sent (SMTP not configured)"
        );
    }

    #[test]
    fn delivery_modeはメッセージから推定される() {
        assert_eq!(
            DispatchResult::sent(NotificationKind::UserConfirmation).delivery_mode(),
            Some(DeliveryMode::Sent)
        );
        assert_eq!(
            DispatchResult::logged(NotificationKind::UserConfirmation).delivery_mode(),
            Some(DeliveryMode::Logged)
        );
        assert_eq!(DispatchResult::failed("boom").delivery_mode(), None);
    }

    #[test]
    fn jsonはsuccessとmessageのみ() {
        let json = serde_json::to_value(DispatchResult::failed("SMTP down")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "SMTP down" })
        );
    }
}
