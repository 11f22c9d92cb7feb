//! # ヘルスチェック共通型

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// 既存クライアントとの互換性のため `{"status": "healthy"}` のみを返す。
///
/// ## 使用例
///
/// ```
/// use skillforge_shared::HealthResponse;
///
/// let response = HealthResponse::healthy();
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"`）
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
