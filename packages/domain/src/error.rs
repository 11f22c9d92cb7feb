//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に発生する入力値違反を表現する。
//! 通知フロー固有のエラーは [`crate::notification::NotificationError`] を参照。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが空
    /// - 不正なフォーマット
    /// - 文字数制限の超過
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
