//! レンダリング済み通知

use crate::email::Email;

/// レンダリング済み通知
///
/// テンプレートレンダリングの出力で、`NotificationSender` に渡される。
/// 生成後は変更できない。宛先は常に 1 件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    to:        Email,
    subject:   String,
    html_body: String,
    text_body: String,
}

impl RenderedNotification {
    /// 件名の制御文字（改行を含む）は空白に置き換えられる。
    pub fn new(to: Email, subject: &str, html_body: String, text_body: String) -> Self {
        Self {
            to,
            subject: sanitize_subject(subject),
            html_body,
            text_body,
        }
    }

    pub fn to(&self) -> &Email {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    pub fn text_body(&self) -> &str {
        &self.text_body
    }
}

/// 件名をヘッダーに安全な 1 行へ正規化する
fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_email() -> Email {
        Email::new("alice@example.com").unwrap()
    }

    #[test]
    fn 件名の改行と制御文字は空白になる() {
        let rendered = RenderedNotification::new(
            make_email(),
            "Hello\r\nBcc: victim@example.com\u{7}",
            String::new(),
            String::new(),
        );

        assert_eq!(rendered.subject(), "Hello  Bcc: victim@example.com");
        assert!(!rendered.subject().chars().any(char::is_control));
    }

    #[test]
    fn 本文はそのまま保持される() {
        let rendered = RenderedNotification::new(
            make_email(),
            "件名",
            "<p>本文</p>\n".to_string(),
            "本文\n".to_string(),
        );

        assert_eq!(rendered.to().as_str(), "alice@example.com");
        assert_eq!(rendered.html_body(), "<p>本文</p>\n");
        assert_eq!(rendered.text_body(), "本文\n");
    }
}
