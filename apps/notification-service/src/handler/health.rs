//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! 副作用はなく、常に `{"status": "healthy"}` を返す。

use axum::Json;
use skillforge_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn healthyを返す() {
        let Json(response) = health_check().await;

        assert_eq!(response.status, "healthy");
    }
}
