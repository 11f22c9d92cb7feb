//! 通知ペイロード（フィールド名 → 値のマップ）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ペイロードのフィールド名
pub mod field {
    pub const RECIPIENT_EMAIL: &str = "recipient_email";
    pub const REQUESTER_NAME: &str = "requester_name";
    pub const REQUESTER_EMAIL: &str = "requester_email";
    pub const MESSAGE: &str = "message";
    pub const MENTOR_NAME: &str = "mentor_name";
    pub const USER_NAME: &str = "user_name";
    pub const TEMP_PASSWORD: &str = "temp_password";
}

/// ペイロードの値
///
/// JSON では文字列または数値としてそのまま表現される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for PayloadValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// 通知ペイロード
///
/// 種別ごとの必須フィールドはここでは検証しない。検証は
/// [`Notification::from_payload`](super::Notification::from_payload) が行う。
/// キー順が安定するよう `BTreeMap` で保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPayload(BTreeMap<String, PayloadValue>);

impl NotificationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加した新しいペイロードを返す
    pub fn with(mut self, key: &str, value: impl Into<PayloadValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// フィールドを取り除いた新しいペイロードを返す
    pub fn without(mut self, key: &str) -> Self {
        self.0.remove(key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
