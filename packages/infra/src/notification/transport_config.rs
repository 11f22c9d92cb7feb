//! SMTP 送信設定

use std::{fmt, time::Duration};

use skillforge_domain::email::Email;

/// SMTP リレーのホスト
pub const SMTP_RELAY_HOST: &str = "smtp.gmail.com";

/// SMTP リレーのポート（STARTTLS）
pub const SMTP_RELAY_PORT: u16 = 587;

/// 1 回の送信（接続からメッセージ転送まで）のデフォルトタイムアウト
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP 送信設定
///
/// プロセス起動時に一度だけ組み立てる。認証情報が無い場合は
/// 「未設定」としてログ記録モードで動作する。
#[derive(Clone)]
pub struct TransportConfig {
    relay_host:     String,
    relay_port:     u16,
    sender_address: Email,
    credential:     Option<String>,
    send_timeout:   Duration,
}

impl TransportConfig {
    /// 空白のみの認証情報は未設定として扱う。
    pub fn new(sender_address: Email, credential: Option<String>) -> Self {
        Self {
            relay_host: SMTP_RELAY_HOST.to_string(),
            relay_port: SMTP_RELAY_PORT,
            sender_address,
            credential: credential.filter(|c| !c.trim().is_empty()),
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// 接続先リレーを差し替える（ローカルの待ち受けに向けるテスト用）
    #[cfg(test)]
    pub(crate) fn with_relay(mut self, host: &str, port: u16) -> Self {
        self.relay_host = host.to_string();
        self.relay_port = port;
        self
    }

    /// 送信者の認証情報が設定されているか
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    pub fn relay_host(&self) -> &str {
        &self.relay_host
    }

    pub fn relay_port(&self) -> u16 {
        self.relay_port
    }

    pub fn sender_address(&self) -> &Email {
        &self.sender_address
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("relay_host", &self.relay_host)
            .field("relay_port", &self.relay_port)
            .field("sender_address", &self.sender_address.as_str())
            .field(
                "credential",
                &self.credential.as_ref().map(|_| "[REDACTED]"),
            )
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}
