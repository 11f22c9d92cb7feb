//! # メールアドレス値オブジェクト
//!
//! 通知の宛先・送信者情報として使うメールアドレス。
//! 構造検証のみを行い、実在確認（MX 検索など）はしない。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// メールアドレスの最大長
const MAX_LENGTH: usize = 255;

/// ローカル部に使える記号（RFC 5322 の atext と `.`）
const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// メールアドレス（値オブジェクト）
///
/// 生成時に検証済みであることを型で保証する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 前後の空白を除いて空文字列ではない
    /// - `local@domain` の形式であり、`@` はちょうど 1 つ
    /// - ローカル部は英数字と atext 記号のみ（引用符付きの形式は受け付けない）
    /// - ドメイン部は英数字とハイフンからなるラベルを `.` で区切ったもの
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(format!(
                "メールアドレスの形式が不正です: {value}"
            )));
        };

        if !is_valid_local_part(local) || !is_valid_domain(domain) {
            return Err(DomainError::Validation(format!(
                "メールアドレスの形式が不正です: {value}"
            )));
        }

        if value.len() > MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは{MAX_LENGTH}文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ドット区切りの各要素が空でないこと（先頭・末尾・連続したドットを拒否する）
fn is_valid_local_part(local: &str) -> bool {
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
    })
}

fn is_valid_domain(domain: &str) -> bool {
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
