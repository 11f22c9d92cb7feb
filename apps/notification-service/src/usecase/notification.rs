//! # 通知ユースケース
//!
//! 通知のレンダリングとディスパッチを提供する。

mod service;
mod template_renderer;

pub use service::NotificationService;
pub use template_renderer::TemplateRenderer;
