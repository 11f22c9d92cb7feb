//! # テスト用モック
//!
//! ディスパッチャや HTTP ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! skillforge-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skillforge_domain::notification::{NotificationError, RenderedNotification};

use crate::{
   notification::NotificationSender,
   notification_log::{NotificationLog, NotificationLogSink},
};

// ===== MockNotificationSender =====

/// 送信内容を記録するモック。`failing` で常に失敗させられる
#[derive(Clone, Default)]
pub struct MockNotificationSender {
   sent:    Arc<Mutex<Vec<RenderedNotification>>>,
   failure: Option<NotificationError>,
}

impl MockNotificationSender {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn failing(error: NotificationError) -> Self {
      Self {
         sent:    Arc::new(Mutex::new(Vec::new())),
         failure: Some(error),
      }
   }

   pub fn sent(&self) -> Vec<RenderedNotification> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
   async fn send_email(&self, email: &RenderedNotification) -> Result<(), NotificationError> {
      self.sent.lock().unwrap().push(email.clone());
      match &self.failure {
         Some(error) => Err(error.clone()),
         None => Ok(()),
      }
   }
}

// ===== UnreachableNotificationSender =====

/// 呼ばれたら panic する送信実装（ログ記録モードで送信しないことの検証用）
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableNotificationSender;

#[async_trait]
impl NotificationSender for UnreachableNotificationSender {
   async fn send_email(&self, email: &RenderedNotification) -> Result<(), NotificationError> {
      panic!("ログ記録モードで送信が呼ばれた: to={}", email.to());
   }
}

// ===== MockNotificationLogSink =====

/// 記録された通知ログを保持するモック
#[derive(Clone, Default)]
pub struct MockNotificationLogSink {
   records: Arc<Mutex<Vec<NotificationLog>>>,
   failure: Option<NotificationError>,
}

impl MockNotificationLogSink {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn failing(error: NotificationError) -> Self {
      Self {
         records: Arc::new(Mutex::new(Vec::new())),
         failure: Some(error),
      }
   }

   pub fn records(&self) -> Vec<NotificationLog> {
      self.records.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationLogSink for MockNotificationLogSink {
   async fn record(&self, log: &NotificationLog) -> Result<(), NotificationError> {
      if let Some(error) = &self.failure {
         return Err(error.clone());
      }
      self.records.lock().unwrap().push(log.clone());
      Ok(())
   }
}
