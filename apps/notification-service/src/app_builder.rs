//! # ルーター構築
//!
//! main.rs と統合テストで同じルーター・レイヤー構成を使うため、構築をここに集約する。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use skillforge_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   cors::CorsLayer,
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{
   AgentState,
   NotificationState,
   health_check,
   relay_agent_operation,
   send_connection_notification,
   send_password_reset,
};

/// アプリケーションのルーターを構築する
pub fn build_router(notification_state: Arc<NotificationState>, agent_state: Arc<AgentState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route(
         "/send-connection-notification",
         post(send_connection_notification),
      )
      .route("/send-password-reset", post(send_password_reset))
      .with_state(notification_state)
      .route("/agents/{operation}", post(relay_agent_operation))
      .with_state(agent_state)
      // Request ID + TraceLayer の構成:
      // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
      // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
      // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
      .layer(CorsLayer::permissive())
}
