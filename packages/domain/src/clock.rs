//! # Clock（時刻プロバイダ）
//!
//! 通知本文に埋め込む日時をディスパッチャから注入するための抽象化。
//! レンダラーは自分で現在時刻を読まないため、固定時刻を渡せば出力は決定的になる。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返す実装（テスト、再現性が必要な呼び出し元向け）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
