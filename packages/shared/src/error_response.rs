//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! HTTP API で共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はアプリ側の責務
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://skillforge.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// `type` フィールドは URI で問題の種類を識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// `error_type_suffix` はベース URI に付加される（例: `"unknown-operation"`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
      }
   }

   /// 400 Bad Request（JSON 構文エラー、必須フィールド欠落）
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new("bad-request", "Bad Request", 400, detail)
   }

   /// 400 Validation Error（値の意味的な不正）
   pub fn validation_error(detail: impl Into<String>) -> Self {
      Self::new("validation-error", "Validation Error", 400, detail)
   }

   /// 500 Internal Server Error
   ///
   /// 呼び出し側がエラーメッセージを把握できるよう detail をそのまま返す。
   pub fn internal_error(detail: impl Into<String>) -> Self {
      Self::new("internal-error", "Internal Server Error", 500, detail)
   }

   /// 502 Bad Gateway
   pub fn bad_gateway(detail: impl Into<String>) -> Self {
      Self::new("bad-gateway", "Bad Gateway", 502, detail)
   }

   /// 503 Service Unavailable
   pub fn service_unavailable(detail: impl Into<String>) -> Self {
      Self::new("service-unavailable", "Service Unavailable", 503, detail)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_new_で全フィールドが正しく設定される() {
      let error = ErrorResponse::new("unknown-operation", "Unknown Operation", 400, "不明な操作");

      assert_eq!(
         error.error_type,
         "https://skillforge.example.com/errors/unknown-operation"
      );
      assert_eq!(error.title, "Unknown Operation");
      assert_eq!(error.status, 400);
      assert_eq!(error.detail, "不明な操作");
   }

   #[test]
   fn test_internal_error_はdetailをそのまま保持する() {
      let error = ErrorResponse::internal_error("dispatch task panicked");

      assert_eq!(
         error.error_type,
         "https://skillforge.example.com/errors/internal-error"
      );
      assert_eq!(error.status, 500);
      assert_eq!(error.detail, "dispatch task panicked");
   }

   #[test]
   fn test_jsonシリアライズでtypeフィールド名が正しい() {
      let error = ErrorResponse::validation_error("メールアドレスの形式が不正です");
      let json = serde_json::to_value(&error).unwrap();

      assert_eq!(
         json["type"],
         "https://skillforge.example.com/errors/validation-error"
      );
      assert_eq!(json["title"], "Validation Error");
      assert_eq!(json["status"], 400);
      assert!(json.get("error_type").is_none());
   }

   #[test]
   fn test_全便利コンストラクタのstatusが正しい() {
      assert_eq!(ErrorResponse::bad_request("").status, 400);
      assert_eq!(ErrorResponse::validation_error("").status, 400);
      assert_eq!(ErrorResponse::internal_error("").status, 500);
      assert_eq!(ErrorResponse::bad_gateway("").status, 502);
      assert_eq!(ErrorResponse::service_unavailable("").status, 503);
   }
}
