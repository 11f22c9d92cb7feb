//! # 通知
//!
//! メンターシップ接続リクエストとパスワードリセットのメール通知に関する
//! ドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`NotificationKind`] | 通知種別（テンプレートと必須フィールドを決める） |
//! | [`NotificationPayload`] | 通知ペイロード（フィールド名 → 文字列/数値） |
//! | [`Notification`] | 検証済みの通知（種別ごとの型付きフィールド） |
//! | [`RenderedNotification`] | レンダリング済み通知（件名・本文・宛先） |
//! | [`DispatchResult`] | 1 回のディスパッチの結果 |
//!
//! ## 設計方針
//!
//! - **送信保証なし**: リトライ・キュー・冪等キーは持たない
//! - **入力検証はドメインで**: ペイロードから [`Notification`] への変換で
//!   必須フィールド・型・空文字・アドレス形式を検証する
//! - **テンプレート分離**: 通知とメール生成は分離（TemplateRenderer は notification-service）

mod dispatch_result;
mod payload;
mod rendered;

use derive_more::Display;
pub use dispatch_result::{DeliveryMode, DispatchResult};
pub use payload::{NotificationPayload, PayloadValue, field};
pub use rendered::RenderedNotification;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;
use uuid::Uuid;

use crate::{DomainError, email::Email};

/// 通知ログ ID（UUID v7）
///
/// ログ記録モードで書き出すレコードの識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct NotificationLogId(Uuid);

impl NotificationLogId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotificationLogId {
    fn default() -> Self {
        Self::new()
    }
}

/// 通知エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// ペイロードの検証に失敗（必須フィールドの欠落、型違い、空文字、不正なアドレス）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// メール送信がタイムアウト
    #[error("メール送信がタイムアウトしました（{seconds} 秒）")]
    Timeout { seconds: u64 },

    /// 通知ログの記録に失敗
    #[error("通知ログの記録に失敗: {0}")]
    LogFailed(String),
}

/// 通知種別
///
/// ログには snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// メンターへの接続リクエスト通知
    MentorAlert,
    /// リクエスト送信者への確認メール
    UserConfirmation,
    /// パスワードリセットメール
    PasswordReset,
}

impl NotificationKind {
    /// 結果メッセージに使う表示名
    pub fn label(self) -> &'static str {
        match self {
            Self::MentorAlert => "Mentor notification",
            Self::UserConfirmation => "Confirmation email",
            Self::PasswordReset => "Password reset email",
        }
    }
}

/// 検証済みの通知
///
/// [`Notification::from_payload`] を通してのみ生成され、必須フィールドが
/// 揃っていることを型で保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// メンターへの接続リクエスト通知
    MentorAlert {
        recipient_email: Email,
        requester_name:  String,
        requester_email: Email,
        message:         String,
    },
    /// リクエスト送信者への確認メール
    UserConfirmation {
        recipient_email: Email,
        requester_name:  String,
        mentor_name:     String,
    },
    /// パスワードリセットメール
    PasswordReset {
        recipient_email: Email,
        user_name:       String,
        temp_password:   String,
    },
}

impl Notification {
    /// ペイロードを種別ごとのスキーマで検証して通知を生成する
    ///
    /// 種別に関係しない余分なフィールドは無視する。
    pub fn from_payload(
        kind: NotificationKind,
        payload: &NotificationPayload,
    ) -> Result<Self, NotificationError> {
        let notification = match kind {
            NotificationKind::MentorAlert => Self::MentorAlert {
                recipient_email: require_email(payload, field::RECIPIENT_EMAIL)?,
                requester_name:  require_text(payload, field::REQUESTER_NAME)?,
                requester_email: require_email(payload, field::REQUESTER_EMAIL)?,
                message:         require_text(payload, field::MESSAGE)?,
            },
            NotificationKind::UserConfirmation => Self::UserConfirmation {
                recipient_email: require_email(payload, field::RECIPIENT_EMAIL)?,
                requester_name:  require_text(payload, field::REQUESTER_NAME)?,
                mentor_name:     require_text(payload, field::MENTOR_NAME)?,
            },
            NotificationKind::PasswordReset => Self::PasswordReset {
                recipient_email: require_email(payload, field::RECIPIENT_EMAIL)?,
                user_name:       require_text(payload, field::USER_NAME)?,
                temp_password:   require_text_or_number(payload, field::TEMP_PASSWORD)?,
            },
        };
        Ok(notification)
    }

    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::MentorAlert { .. } => NotificationKind::MentorAlert,
            Self::UserConfirmation { .. } => NotificationKind::UserConfirmation,
            Self::PasswordReset { .. } => NotificationKind::PasswordReset,
        }
    }

    /// 受信者のメールアドレスを返す
    pub fn recipient_email(&self) -> &Email {
        match self {
            Self::MentorAlert {
                recipient_email, ..
            }
            | Self::UserConfirmation {
                recipient_email, ..
            }
            | Self::PasswordReset {
                recipient_email, ..
            } => recipient_email,
        }
    }

    /// ログ記録モードで残すペイロードの要約
    pub fn summary(&self) -> String {
        match self {
            Self::MentorAlert {
                requester_name,
                requester_email,
                message,
                ..
            } => format!("from: {requester_name} ({requester_email}), message: {message}"),
            Self::UserConfirmation {
                requester_name,
                mentor_name,
                ..
            } => format!("user: {requester_name}, mentor: {mentor_name}"),
            Self::PasswordReset {
                user_name,
                temp_password,
                ..
            } => format!("user: {user_name}, temporary password: {temp_password}"),
        }
    }
}

fn require_value<'a>(
    payload: &'a NotificationPayload,
    key: &str,
) -> Result<&'a PayloadValue, NotificationError> {
    payload
        .get(key)
        .ok_or_else(|| NotificationError::Validation(format!("{key} は必須です")))
}

fn non_blank(key: &str, value: &str) -> Result<String, NotificationError> {
    if value.trim().is_empty() {
        return Err(NotificationError::Validation(format!(
            "{key} は空にできません"
        )));
    }
    Ok(value.to_string())
}

fn require_text(payload: &NotificationPayload, key: &str) -> Result<String, NotificationError> {
    match require_value(payload, key)? {
        PayloadValue::Text(value) => non_blank(key, value),
        PayloadValue::Number(_) => Err(NotificationError::Validation(format!(
            "{key} は文字列である必要があります"
        ))),
    }
}

fn require_text_or_number(
    payload: &NotificationPayload,
    key: &str,
) -> Result<String, NotificationError> {
    match require_value(payload, key)? {
        PayloadValue::Text(value) => non_blank(key, value),
        PayloadValue::Number(number) => Ok(number.to_string()),
    }
}

fn require_email(payload: &NotificationPayload, key: &str) -> Result<Email, NotificationError> {
    let value = require_text(payload, key)?;
    Email::new(value).map_err(|e| match e {
        DomainError::Validation(msg) => NotificationError::Validation(format!("{key}: {msg}")),
    })
}
