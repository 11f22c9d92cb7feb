//! # ユースケース層

pub mod notification;

pub use notification::{NotificationService, TemplateRenderer};
