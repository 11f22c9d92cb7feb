//! # エージェントバックエンド中継ハンドラ
//!
//! ```text
//! POST /agents/{operation}
//! ```
//!
//! 受け取った JSON をそのまま上流の walker に転送し、エンベロープを展開した値を返す。

use std::{str::FromStr, sync::Arc};

use axum::{
   Json,
   body::Bytes,
   extract::{Path, State},
};
use serde_json::Value;

use crate::{
   client::{AgentBackendClient, AgentOperation},
   error::ServiceError,
};

/// エージェント中継ハンドラーの State
pub struct AgentState {
   pub client: Arc<dyn AgentBackendClient>,
}

/// POST /agents/{operation}
///
/// ボディが空の場合は `{}` を転送する。
#[tracing::instrument(skip_all)]
pub async fn relay_agent_operation(
   State(state): State<Arc<AgentState>>,
   Path(operation): Path<String>,
   body: Bytes,
) -> Result<Json<Value>, ServiceError> {
   let operation = AgentOperation::from_str(&operation)
      .map_err(|_| ServiceError::UnknownOperation(operation.clone()))?;
   tracing::debug!(%operation, "エージェント操作を中継");

   let payload = if body.is_empty() {
      Value::Object(serde_json::Map::new())
   } else {
      serde_json::from_slice(&body)
         .map_err(|e| ServiceError::BadRequest(format!("JSON の解析に失敗しました: {e}")))?
   };

   let value = state.client.invoke(operation, &payload).await?;

   Ok(Json(value))
}
