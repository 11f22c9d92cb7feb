//! # 通知サービス設定
//!
//! 環境変数から通知サービスの設定を読み込む。起動時に一度だけ読み、以降は不変。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `SMTP_EMAIL` | `noreply@skillforge.ai` | 送信元アドレス |
//! | `SMTP_PASSWORD` | なし | 送信者の認証情報（未設定・空ならログ記録モード） |
//! | `SMTP_TIMEOUT_SECS` | `10` | 1 回の送信のタイムアウト（秒） |
//! | `AGENT_BACKEND_URL` | `http://localhost:8000` | エージェントバックエンドのベース URL |
//! | `JAC_SERVER_URL` | なし | `AGENT_BACKEND_URL` 未設定時に使う旧名 |
//! | `AGENT_BACKEND_TIMEOUT_SECS` | `30` | エージェント呼び出しのタイムアウト（秒） |

use std::{env, time::Duration};

use skillforge_domain::email::Email;
use skillforge_infra::notification::{DEFAULT_SEND_TIMEOUT, TransportConfig};
use thiserror::Error;

/// 待ち受けアドレス
pub const LISTEN_ADDR: &str = "0.0.0.0:8001";

/// ログに出すサービス名
pub const SERVICE_NAME: &str = "notification-service";

const DEFAULT_SENDER_ADDRESS: &str = "noreply@skillforge.ai";
const DEFAULT_AGENT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_AGENT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   /// 数値として解釈できない
   #[error("{key} は正の整数である必要があります: {value:?}")]
   InvalidNumber { key: &'static str, value: String },

   /// 送信元アドレスが不正
   #[error("SMTP_EMAIL が不正です: {0}")]
   InvalidSenderAddress(String),
}

/// 通知サービスの設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
   /// SMTP 送信設定（Debug 出力では認証情報が伏せられる）
   pub transport:     TransportConfig,
   /// エージェントバックエンド設定
   pub agent_backend: AgentBackendConfig,
}

/// エージェントバックエンドの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentBackendConfig {
   pub base_url: String,
   pub timeout:  Duration,
}

impl ServiceConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_source(|key| env::var(key).ok())
   }

   /// 任意のキー → 値の取得関数から設定を読み込む
   pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let sender_address = get("SMTP_EMAIL").unwrap_or_else(|| DEFAULT_SENDER_ADDRESS.to_string());
      let sender_address = Email::new(sender_address)
         .map_err(|e| ConfigError::InvalidSenderAddress(e.to_string()))?;

      let send_timeout = read_secs(&get, "SMTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_SEND_TIMEOUT);
      let transport =
         TransportConfig::new(sender_address, get("SMTP_PASSWORD")).with_send_timeout(send_timeout);

      let agent_backend = AgentBackendConfig {
         base_url: get("AGENT_BACKEND_URL")
            .or_else(|| get("JAC_SERVER_URL"))
            .unwrap_or_else(|| DEFAULT_AGENT_BACKEND_URL.to_string()),
         timeout:  read_secs(&get, "AGENT_BACKEND_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_AGENT_BACKEND_TIMEOUT),
      };

      Ok(Self {
         transport,
         agent_backend,
      })
   }
}

/// 秒数の環境変数を読む。未設定なら `None`、0 や数値以外はエラー
fn read_secs(
   get: &impl Fn(&str) -> Option<String>,
   key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
   let Some(value) = get(key) else {
      return Ok(None);
   };
   match value.trim().parse::<u64>() {
      Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
      _ => Err(ConfigError::InvalidNumber { key, value }),
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
      let vars: HashMap<String, String> = vars
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      ServiceConfig::from_source(|key| vars.get(key).cloned())
   }

   #[test]
   fn 未設定ならデフォルト値でログ記録モードになる() {
      let config = load(&[]).unwrap();

      assert_eq!(config.transport.sender_address().as_str(), "noreply@skillforge.ai");
      assert!(!config.transport.is_configured());
      assert_eq!(config.transport.send_timeout(), Duration::from_secs(10));
      assert_eq!(
         config.agent_backend,
         AgentBackendConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout:  Duration::from_secs(30),
         }
      );
   }

   #[test]
   fn 環境変数の値が反映される() {
      let config = load(&[
         ("SMTP_EMAIL", "mentors@skillforge.ai"),
         ("SMTP_PASSWORD", "app-password"),
         ("SMTP_TIMEOUT_SECS", "5"),
         ("AGENT_BACKEND_URL", "http://agents:8000"),
         ("AGENT_BACKEND_TIMEOUT_SECS", "60"),
      ])
      .unwrap();

      assert_eq!(config.transport.sender_address().as_str(), "mentors@skillforge.ai");
      assert!(config.transport.is_configured());
      assert_eq!(config.transport.send_timeout(), Duration::from_secs(5));
      assert_eq!(config.agent_backend.base_url, "http://agents:8000");
      assert_eq!(config.agent_backend.timeout, Duration::from_secs(60));
   }

   #[test]
   fn jac_server_urlはagent_backend_url未設定時のみ使われる() {
      let legacy = load(&[("JAC_SERVER_URL", "http://jac:8000")]).unwrap();
      assert_eq!(legacy.agent_backend.base_url, "http://jac:8000");

      let both = load(&[
         ("AGENT_BACKEND_URL", "http://agents:8000"),
         ("JAC_SERVER_URL", "http://jac:8000"),
      ])
      .unwrap();
      assert_eq!(both.agent_backend.base_url, "http://agents:8000");
   }

   #[test]
   fn 空のパスワードは未設定扱い() {
      let config = load(&[("SMTP_PASSWORD", "")]).unwrap();

      assert!(!config.transport.is_configured());
   }

   #[test]
   fn 数値でないタイムアウトはエラー() {
      let result = load(&[("SMTP_TIMEOUT_SECS", "ten")]);

      assert!(matches!(
         result,
         Err(ConfigError::InvalidNumber { key: "SMTP_TIMEOUT_SECS", .. })
      ));
   }

   #[test]
   fn 不正な送信元アドレスはエラー() {
      let result = load(&[("SMTP_EMAIL", "not-an-address")]);

      assert!(matches!(result, Err(ConfigError::InvalidSenderAddress(_))));
   }

   #[test]
   fn debug出力にパスワードを含まない() {
      let config = load(&[("SMTP_PASSWORD", "super-secret")]).unwrap();

      assert!(!format!("{config:?}").contains("super-secret"));
   }
}
