//! # エージェントバックエンドクライアント
//!
//! キャリア診断・学習パスなどを提供する上流のエージェントバックエンドを呼び出す。
//!
//! 上流は `POST {base_url}/walker/{operation}` で呼び出し、応答は生の JSON 値か
//! `{"status": ..., "reports": [...]}` のエンベロープのどちらかで返る。
//! エンベロープの展開は [`unwrap_reports`] だけが行う。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// エージェント操作
///
/// パスパラメータとして snake_case で受け付け、そのまま上流の walker 名になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AgentOperation {
   CareerReadinessAgent,
   LearningPathAgent,
   GetSkillGraph,
   ContentCuratorAgent,
   EvaluationAgent,
   MentorMatchAgent,
}

/// エージェントバックエンドクライアントエラー
#[derive(Debug, Clone, Error)]
pub enum AgentBackendError {
   /// ネットワークエラー（接続失敗、タイムアウト）
   #[error("エージェントバックエンドへのネットワークエラー: {0}")]
   Network(String),

   /// 上流が 2xx 以外を返した
   #[error("エージェントバックエンドがステータス {status} を返しました: {body}")]
   Upstream { status: u16, body: String },

   /// 上流の応答が JSON として読めない
   #[error("エージェントバックエンドの応答が不正です: {0}")]
   InvalidResponse(String),
}

impl From<reqwest::Error> for AgentBackendError {
   fn from(err: reqwest::Error) -> Self {
      AgentBackendError::Network(err.to_string())
   }
}

/// エージェントバックエンドクライアントトレイト
#[async_trait]
pub trait AgentBackendClient: Send + Sync {
   /// エージェント操作を呼び出し、エンベロープを展開した値を返す
   async fn invoke(
      &self,
      operation: AgentOperation,
      payload: &Value,
   ) -> Result<Value, AgentBackendError>;
}

/// エージェントバックエンドクライアント実装
#[derive(Clone)]
pub struct AgentBackendClientImpl {
   base_url: String,
   client:   reqwest::Client,
}

impl AgentBackendClientImpl {
   /// 新しいクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: エージェントバックエンドのベース URL（例: `http://localhost:8000`）
   /// - `timeout`: 1 リクエストあたりのタイムアウト
   pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
      Ok(Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         client:   reqwest::Client::builder().timeout(timeout).build()?,
      })
   }
}

#[async_trait]
impl AgentBackendClient for AgentBackendClientImpl {
   async fn invoke(
      &self,
      operation: AgentOperation,
      payload: &Value,
   ) -> Result<Value, AgentBackendError> {
      let url = format!("{}/walker/{operation}", self.base_url);

      let response = self.client.post(&url).json(payload).send().await?;

      handle_response(response).await
   }
}

/// 上流レスポンスの共通ハンドリング
///
/// 2xx なら JSON として読んでエンベロープを展開する。それ以外は `Upstream` を返す。
async fn handle_response(response: reqwest::Response) -> Result<Value, AgentBackendError> {
   let status = response.status();

   if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(AgentBackendError::Upstream {
         status: status.as_u16(),
         body,
      });
   }

   let body = response
      .json::<Value>()
      .await
      .map_err(|e| AgentBackendError::InvalidResponse(e.to_string()))?;

   Ok(unwrap_reports(body))
}

/// `reports` が空でない配列ならその先頭要素を、そうでなければ値そのものを返す
pub fn unwrap_reports(value: Value) -> Value {
   if let Some(first) = value
      .get("reports")
      .and_then(Value::as_array)
      .and_then(|reports| reports.first())
   {
      return first.clone();
   }
   value
}
