//! # 通知 API ハンドラ
//!
//! 接続リクエスト通知とパスワードリセット通知のエンドポイントを実装する。
//!
//! 入力検証の失敗は 400 で返し、ディスパッチは一度も呼ばない。
//! 送信そのものの失敗は HTTP 200 の本文内の `DispatchResult` で返す。

use std::sync::Arc;

use axum::{
   Json,
   extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use skillforge_domain::notification::{
   DispatchResult,
   Notification,
   NotificationKind,
   NotificationPayload,
   PayloadValue,
   field,
};
use tokio::task::JoinError;

use crate::{error::ServiceError, usecase::NotificationService};

/// 接続リクエストの状態（通知時点では常に保留中）
const CONNECTION_STATUS_PENDING: &str = "pending";

/// パスワードリセット API の応答メッセージ
const PASSWORD_RESET_PROCESSED: &str = "Password reset request processed";

/// 通知ハンドラーの State
pub struct NotificationState {
   pub service: Arc<NotificationService>,
}

/// 接続リクエスト通知のリクエストボディ
#[derive(Debug, Deserialize)]
pub struct ConnectionNotificationRequest {
   pub user_name:    String,
   pub user_email:   String,
   pub mentor_name:  String,
   pub mentor_email: String,
   pub message:      String,
}

/// 入力のエコー
#[derive(Debug, Serialize)]
pub struct ConnectionDataDto {
   pub user_name:    String,
   pub user_email:   String,
   pub mentor_name:  String,
   pub mentor_email: String,
   pub status:       &'static str,
}

/// 接続リクエスト通知のレスポンス
#[derive(Debug, Serialize)]
pub struct ConnectionNotificationResponse {
   pub success:             bool,
   pub mentor_notification: DispatchResult,
   pub user_confirmation:   DispatchResult,
   pub connection_data:     ConnectionDataDto,
}

/// パスワードリセット通知のリクエストボディ
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
   pub email:         String,
   pub name:          String,
   /// 文字列または数値
   pub temp_password: PayloadValue,
}

/// パスワードリセット通知のレスポンス
#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
   pub success:      bool,
   pub email_result: DispatchResult,
   pub message:      &'static str,
}

impl ConnectionNotificationRequest {
   fn mentor_alert_payload(&self) -> NotificationPayload {
      NotificationPayload::new()
         .with(field::RECIPIENT_EMAIL, self.mentor_email.as_str())
         .with(field::REQUESTER_NAME, self.user_name.as_str())
         .with(field::REQUESTER_EMAIL, self.user_email.as_str())
         .with(field::MESSAGE, self.message.as_str())
   }

   fn user_confirmation_payload(&self) -> NotificationPayload {
      NotificationPayload::new()
         .with(field::RECIPIENT_EMAIL, self.user_email.as_str())
         .with(field::REQUESTER_NAME, self.user_name.as_str())
         .with(field::MENTOR_NAME, self.mentor_name.as_str())
   }

   fn into_connection_data(self) -> ConnectionDataDto {
      ConnectionDataDto {
         user_name:    self.user_name,
         user_email:   self.user_email,
         mentor_name:  self.mentor_name,
         mentor_email: self.mentor_email,
         status:       CONNECTION_STATUS_PENDING,
      }
   }
}

impl PasswordResetRequest {
   fn payload(&self) -> NotificationPayload {
      NotificationPayload::new()
         .with(field::RECIPIENT_EMAIL, self.email.as_str())
         .with(field::USER_NAME, self.name.as_str())
         .with(field::TEMP_PASSWORD, self.temp_password.clone())
   }
}

/// POST /send-connection-notification
///
/// メンターへの通知とリクエスト送信者への確認メールを独立にディスパッチする。
/// 両方のペイロードを検証してから、2 つのディスパッチを別々のタスクで並行実行する。
/// クライアントが切断してもタスクは最後まで実行される。
#[tracing::instrument(skip_all)]
pub async fn send_connection_notification(
   State(state): State<Arc<NotificationState>>,
   request: Result<Json<ConnectionNotificationRequest>, JsonRejection>,
) -> Result<Json<ConnectionNotificationResponse>, ServiceError> {
   let Json(request) = request?;

   let mentor_alert =
      Notification::from_payload(NotificationKind::MentorAlert, &request.mentor_alert_payload())?;
   let user_confirmation = Notification::from_payload(
      NotificationKind::UserConfirmation,
      &request.user_confirmation_payload(),
   )?;

   let mentor_task = tokio::spawn({
      let service = Arc::clone(&state.service);
      async move { service.dispatch_notification(&mentor_alert).await }
   });
   let confirmation_task = tokio::spawn({
      let service = Arc::clone(&state.service);
      async move { service.dispatch_notification(&user_confirmation).await }
   });

   let (mentor_notification, user_confirmation) = tokio::join!(mentor_task, confirmation_task);

   Ok(Json(ConnectionNotificationResponse {
      success:             true,
      mentor_notification: mentor_notification.map_err(dispatch_task_failed)?,
      user_confirmation:   user_confirmation.map_err(dispatch_task_failed)?,
      connection_data:     request.into_connection_data(),
   }))
}

/// POST /send-password-reset
#[tracing::instrument(skip_all)]
pub async fn send_password_reset(
   State(state): State<Arc<NotificationState>>,
   request: Result<Json<PasswordResetRequest>, JsonRejection>,
) -> Result<Json<PasswordResetResponse>, ServiceError> {
   let Json(request) = request?;

   let notification =
      Notification::from_payload(NotificationKind::PasswordReset, &request.payload())?;
   let email_result = state.service.dispatch_notification(&notification).await;

   Ok(Json(PasswordResetResponse {
      success: true,
      email_result,
      message: PASSWORD_RESET_PROCESSED,
   }))
}

fn dispatch_task_failed(err: JoinError) -> ServiceError {
   ServiceError::Internal(format!("ディスパッチタスクが異常終了しました: {err}"))
}
