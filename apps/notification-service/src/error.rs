//! # 通知サービス エラー定義
//!
//! HTTP ハンドラで発生するエラーと、RFC 9457 Problem Details レスポンスへの変換を定義する。
//!
//! 送信失敗はここには含まれない。送信失敗は `DispatchResult` として HTTP 200 の本文に載る。

use axum::{
   Json,
   extract::rejection::JsonRejection,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use skillforge_domain::notification::NotificationError;
use skillforge_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

use crate::client::AgentBackendError;

/// 通知サービスで発生するエラー
#[derive(Debug, Error)]
pub enum ServiceError {
   /// 不正なリクエスト（JSON 構文エラー、必須フィールド欠落）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 値の検証エラー（空文字、不正なアドレス）
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// 未知のエージェント操作
   #[error("未知のエージェント操作: {0}")]
   UnknownOperation(String),

   /// エージェントバックエンドの呼び出しに失敗
   #[error(transparent)]
   AgentBackend(#[from] AgentBackendError),

   /// 内部エラー（ディスパッチタスクの panic など）
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl From<JsonRejection> for ServiceError {
   fn from(rejection: JsonRejection) -> Self {
      Self::BadRequest(rejection.body_text())
   }
}

impl From<NotificationError> for ServiceError {
   fn from(err: NotificationError) -> Self {
      match err {
         NotificationError::Validation(msg) => Self::Validation(msg),
         other => Self::Internal(other.to_string()),
      }
   }
}

impl IntoResponse for ServiceError {
   fn into_response(self) -> Response {
      let body = match &self {
         ServiceError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
         ServiceError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
         ServiceError::UnknownOperation(operation) => ErrorResponse::new(
            "unknown-operation",
            "Bad Request",
            StatusCode::BAD_REQUEST.as_u16(),
            format!("未知のエージェント操作です: {operation}"),
         ),
         ServiceError::AgentBackend(e @ AgentBackendError::Network(_)) => {
            tracing::warn!(
               error.category = error::category::EXTERNAL_SERVICE,
               error.kind = error::kind::AGENT_BACKEND,
               error = %e,
               "エージェントバックエンドに接続できません"
            );
            ErrorResponse::service_unavailable(e.to_string())
         }
         ServiceError::AgentBackend(e) => {
            tracing::warn!(
               error.category = error::category::EXTERNAL_SERVICE,
               error.kind = error::kind::AGENT_BACKEND,
               error = %e,
               "エージェントバックエンドが不正な応答を返しました"
            );
            ErrorResponse::bad_gateway(e.to_string())
         }
         ServiceError::Internal(msg) => {
            tracing::error!(error.category = error::category::INTERNAL, "内部エラー: {}", msg);
            ErrorResponse::internal_error(msg.clone())
         }
      };

      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case(ServiceError::BadRequest("missing field".to_string()), StatusCode::BAD_REQUEST)]
   #[case(ServiceError::Validation("blank".to_string()), StatusCode::BAD_REQUEST)]
   #[case(ServiceError::UnknownOperation("drop_tables".to_string()), StatusCode::BAD_REQUEST)]
   #[case(
      ServiceError::AgentBackend(AgentBackendError::Network("refused".to_string())),
      StatusCode::SERVICE_UNAVAILABLE
   )]
   #[case(
      ServiceError::AgentBackend(AgentBackendError::InvalidResponse("not json".to_string())),
      StatusCode::BAD_GATEWAY
   )]
   #[case(ServiceError::Internal("task panicked".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
   fn エラーごとのステータスコード(#[case] error: ServiceError, #[case] expected: StatusCode) {
      let response = error.into_response();

      assert_eq!(response.status(), expected);
   }

   #[test]
   fn 通知の検証エラーはvalidationに変換される() {
      let error = ServiceError::from(NotificationError::Validation("message は空にできません".to_string()));

      assert!(matches!(error, ServiceError::Validation(msg) if msg == "message は空にできません"));
   }
}
