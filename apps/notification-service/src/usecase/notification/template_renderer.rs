//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **副作用なし**: 現在時刻は読まず、呼び出し元から `rendered_at` を受け取る
//! - **HTML のみエスケープ**: `.html` テンプレートは tera の自動エスケープ対象、`.txt` は対象外

use chrono::{DateTime, Utc};
use skillforge_domain::notification::{
    Notification,
    NotificationError,
    NotificationKind,
    NotificationPayload,
    RenderedNotification,
};
use tera::{Context, Tera};

/// メンター通知本文の日時書式（例: `March 14, 2025 at 09:26 AM UTC`）
const REQUESTED_AT_FORMAT: &str = "%B %d, %Y at %I:%M %p UTC";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、通知種別とペイロードから
/// `RenderedNotification` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "mentor_alert.html",
                    include_str!("../../../templates/notifications/mentor_alert.html"),
                ),
                (
                    "mentor_alert.txt",
                    include_str!("../../../templates/notifications/mentor_alert.txt"),
                ),
                (
                    "user_confirmation.html",
                    include_str!("../../../templates/notifications/user_confirmation.html"),
                ),
                (
                    "user_confirmation.txt",
                    include_str!("../../../templates/notifications/user_confirmation.txt"),
                ),
                (
                    "password_reset.html",
                    include_str!("../../../templates/notifications/password_reset.html"),
                ),
                (
                    "password_reset.txt",
                    include_str!("../../../templates/notifications/password_reset.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知種別とペイロードからメールを生成する
    ///
    /// 必須フィールドの欠落・型違いは `NotificationError::Validation` になる。
    pub fn render(
        &self,
        kind: NotificationKind,
        payload: &NotificationPayload,
        rendered_at: DateTime<Utc>,
    ) -> Result<RenderedNotification, NotificationError> {
        let notification = Notification::from_payload(kind, payload)?;
        self.render_notification(&notification, rendered_at)
    }

    /// 検証済みの通知からメールを生成する
    pub fn render_notification(
        &self,
        notification: &Notification,
        rendered_at: DateTime<Utc>,
    ) -> Result<RenderedNotification, NotificationError> {
        let (template_name, subject, context) = build_template_params(notification, rendered_at);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(RenderedNotification::new(
            notification.recipient_email().clone(),
            &subject,
            html_body,
            text_body,
        ))
    }
}

/// テンプレート名、件名、コンテキストを構築する
fn build_template_params(
    notification: &Notification,
    rendered_at: DateTime<Utc>,
) -> (&'static str, String, Context) {
    let template_name: &'static str = notification.kind().into();
    let mut context = Context::new();

    let subject = match notification {
        Notification::MentorAlert {
            requester_name,
            requester_email,
            message,
            ..
        } => {
            context.insert("requester_name", requester_name);
            context.insert("requester_email", requester_email.as_str());
            context.insert("message", message);
            context.insert(
                "requested_at",
                &rendered_at.format(REQUESTED_AT_FORMAT).to_string(),
            );
            format!("New Mentorship Connection Request from {requester_name}")
        }
        Notification::UserConfirmation {
            requester_name,
            mentor_name,
            ..
        } => {
            context.insert("requester_name", requester_name);
            context.insert("mentor_name", mentor_name);
            format!("Connection Request Sent to {mentor_name}")
        }
        Notification::PasswordReset {
            user_name,
            temp_password,
            ..
        } => {
            context.insert("user_name", user_name);
            context.insert("temp_password", temp_password);
            "Password Reset - SkillForge Navigator".to_string()
        }
    };

    (template_name, subject, context)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use skillforge_domain::notification::field;

    use super::*;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new().unwrap()
    }

    fn rendered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 0).unwrap()
    }

    fn mentor_alert_payload() -> NotificationPayload {
        NotificationPayload::new()
            .with(field::RECIPIENT_EMAIL, "sarah@example.com")
            .with(field::REQUESTER_NAME, "Alice")
            .with(field::REQUESTER_EMAIL, "alice@example.com")
            .with(field::MESSAGE, "Hi")
    }

    fn user_confirmation_payload() -> NotificationPayload {
        NotificationPayload::new()
            .with(field::RECIPIENT_EMAIL, "alice@example.com")
            .with(field::REQUESTER_NAME, "Alice")
            .with(field::MENTOR_NAME, "Dr. Sarah Johnson")
    }

    fn password_reset_payload() -> NotificationPayload {
        NotificationPayload::new()
            .with(field::RECIPIENT_EMAIL, "bob@example.com")
            .with(field::USER_NAME, "Bob")
            .with(field::TEMP_PASSWORD, "Xy9Zq1")
    }

    #[test]
    fn テンプレートがすべて登録できる() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[rstest]
    #[case(
        NotificationKind::MentorAlert,
        mentor_alert_payload(),
        "sarah@example.com",
        "New Mentorship Connection Request from Alice"
    )]
    #[case(
        NotificationKind::UserConfirmation,
        user_confirmation_payload(),
        "alice@example.com",
        "Connection Request Sent to Dr. Sarah Johnson"
    )]
    #[case(
        NotificationKind::PasswordReset,
        password_reset_payload(),
        "bob@example.com",
        "Password Reset - SkillForge Navigator"
    )]
    fn 種別ごとの件名と宛先(
        #[case] kind: NotificationKind,
        #[case] payload: NotificationPayload,
        #[case] to: &str,
        #[case] subject: &str,
    ) {
        let rendered = renderer().render(kind, &payload, rendered_at()).unwrap();

        assert_eq!(rendered.to().as_str(), to);
        assert_eq!(rendered.subject(), subject);
    }

    #[test]
    fn メンター通知の本文に送信者情報と日時が含まれる() {
        let rendered = renderer()
            .render(
                NotificationKind::MentorAlert,
                &mentor_alert_payload(),
                rendered_at(),
            )
            .unwrap();

        assert!(rendered.html_body().contains("Alice"));
        assert!(rendered.html_body().contains("mailto:alice@example.com"));
        assert!(rendered.html_body().contains("March 14, 2025 at 09:26 AM UTC"));
        assert!(rendered.text_body().contains("Message: Hi"));
        assert!(rendered.text_body().contains("Date: March 14, 2025 at 09:26 AM UTC"));
    }

    #[test]
    fn パスワードリセットの本文に一時パスワードが含まれる() {
        let rendered = renderer()
            .render(
                NotificationKind::PasswordReset,
                &password_reset_payload(),
                rendered_at(),
            )
            .unwrap();

        assert!(rendered.html_body().contains("Xy9Zq1"));
        assert!(rendered.text_body().contains("Your Temporary Password: Xy9Zq1"));
    }

    #[test]
    fn 同じ入力と時刻なら出力は同一() {
        let renderer = renderer();

        let first = renderer
            .render(
                NotificationKind::MentorAlert,
                &mentor_alert_payload(),
                rendered_at(),
            )
            .unwrap();
        let second = renderer
            .render(
                NotificationKind::MentorAlert,
                &mentor_alert_payload(),
                rendered_at(),
            )
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn html本文はペイロードのマークアップをエスケープする() {
        let payload = mentor_alert_payload().with(field::MESSAGE, "<script>alert(1)</script>");

        let rendered = renderer()
            .render(NotificationKind::MentorAlert, &payload, rendered_at())
            .unwrap();

        assert!(!rendered.html_body().contains("<script>"));
        assert!(rendered.html_body().contains("&lt;script&gt;"));
        assert!(rendered.text_body().contains("<script>alert(1)</script>"));
    }

    #[test]
    fn 件名に改行を含む名前は1行に正規化される() {
        let payload = mentor_alert_payload().with(field::REQUESTER_NAME, "Eve\r\nBcc: x@example.com");

        let rendered = renderer()
            .render(NotificationKind::MentorAlert, &payload, rendered_at())
            .unwrap();

        assert!(!rendered.subject().chars().any(char::is_control));
    }

    #[test]
    fn 必須フィールドが欠けるとバリデーションエラー() {
        let payload = password_reset_payload().without(field::TEMP_PASSWORD);

        let result = renderer().render(NotificationKind::PasswordReset, &payload, rendered_at());

        assert!(matches!(result, Err(NotificationError::Validation(_))));
    }
}
