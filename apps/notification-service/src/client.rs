//! # 外部サービスクライアント

pub mod agent_backend;

pub use agent_backend::{
   AgentBackendClient,
   AgentBackendClientImpl,
   AgentBackendError,
   AgentOperation,
   unwrap_reports,
};
