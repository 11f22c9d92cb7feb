//! # SkillForge 通知サービス
//!
//! メンターシップ接続リクエストとパスワードリセットのメール通知を配信する HTTP サービス。
//!
//! ## 役割
//!
//! - **通知ディスパッチ**: テンプレートをレンダリングし、SMTP リレー経由で送信する
//! - **ログ記録モード**: `SMTP_PASSWORD` が未設定なら送信せず、通知を構造化ログに記録する
//! - **エージェント中継**: 上流エージェントバックエンドの呼び出しとエンベロープ展開
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | GET | `/health` | ヘルスチェック |
//! | POST | `/send-connection-notification` | メンター通知 + 確認メール |
//! | POST | `/send-password-reset` | パスワードリセットメール |
//! | POST | `/agents/{operation}` | エージェントバックエンド中継 |
//!
//! 環境変数は [`config`](skillforge_notification_service::config) を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # ログ記録モード（SMTP 未設定）
//! cargo run -p skillforge-notification-service
//!
//! # SMTP 送信あり
//! SMTP_EMAIL=you@gmail.com SMTP_PASSWORD=app-password cargo run -p skillforge-notification-service --release
//! ```

use std::sync::Arc;

use skillforge_domain::clock::SystemClock;
use skillforge_infra::{
   notification::SmtpNotificationSender,
   notification_log::TracingNotificationLogSink,
};
use skillforge_notification_service::{
   app_builder::build_router,
   client::AgentBackendClientImpl,
   config::{LISTEN_ADDR, SERVICE_NAME, ServiceConfig},
   handler::{AgentState, NotificationState},
   usecase::{NotificationService, TemplateRenderer},
};
use skillforge_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// 通知サービスのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(TracingConfig::from_env(SERVICE_NAME));
   let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

   let config = ServiceConfig::from_env()?;
   tracing::debug!(?config, "設定を読み込みました");

   if !config.transport.is_configured() {
      tracing::warn!("SMTP_PASSWORD が未設定のため、通知は送信せずログに記録します");
   }

   // 通知ディスパッチの依存コンポーネント
   let transport_config = Arc::new(config.transport.clone());
   let notification_service = NotificationService::new(
      Arc::new(SmtpNotificationSender::new(Arc::clone(&transport_config))),
      TemplateRenderer::new()?,
      Arc::new(TracingNotificationLogSink),
      transport_config,
      Arc::new(SystemClock),
   );
   let notification_state = Arc::new(NotificationState {
      service: Arc::new(notification_service),
   });

   // エージェントバックエンド中継
   let agent_client =
      AgentBackendClientImpl::new(&config.agent_backend.base_url, config.agent_backend.timeout)?;
   let agent_state = Arc::new(AgentState {
      client: Arc::new(agent_client),
   });

   let app = build_router(notification_state, agent_state);

   let listener = TcpListener::bind(LISTEN_ADDR).await?;
   tracing::info!("通知サービスを起動しました: {}", LISTEN_ADDR);

   axum::serve(listener, app).await?;

   Ok(())
}
