//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用して SMTP リレーへ STARTTLS で接続し、
//! 送信者の認証情報でログインしてから送信する。

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use skillforge_domain::{
    email::Email,
    notification::{NotificationError, RenderedNotification},
};

use super::{NotificationSender, TransportConfig};

/// SMTP 通知送信
///
/// 送信のたびにトランスポートを組み立てるため、接続は送信ごとに独立する。
pub struct SmtpNotificationSender {
    config: Arc<TransportConfig>,
}

impl SmtpNotificationSender {
    pub fn new(config: Arc<TransportConfig>) -> Self {
        Self { config }
    }

    fn transport(
        &self,
        credential: &str,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(self.config.relay_host())
                .map_err(|e| NotificationError::SendFailed(format!("SMTP リレー設定失敗: {e}")))?
                .port(self.config.relay_port())
                .credentials(Credentials::new(
                    self.config.sender_address().to_string(),
                    credential.to_string(),
                ))
                .timeout(Some(self.config.send_timeout()))
                .build();
        Ok(transport)
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &RenderedNotification) -> Result<(), NotificationError> {
        let Some(credential) = self.config.credential() else {
            return Err(NotificationError::SendFailed(
                "SMTP 認証情報が設定されていません".to_string(),
            ));
        };

        let message = build_message(self.config.sender_address(), email)?;
        let transport = self.transport(credential)?;
        let send_timeout = self.config.send_timeout();

        match tokio::time::timeout(send_timeout, transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(NotificationError::SendFailed(format!("SMTP 送信失敗: {e}"))),
            Err(_) => Err(NotificationError::Timeout {
                seconds: send_timeout.as_secs(),
            }),
        }
    }
}

fn parse_mailbox(address: &Email, role: &str) -> Result<Mailbox, NotificationError> {
    address
        .as_str()
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("{role}アドレス不正: {e}")))
}

/// テキストと HTML の `multipart/alternative` メッセージを組み立てる
fn build_message(from: &Email, email: &RenderedNotification) -> Result<Message, NotificationError> {
    Message::builder()
        .from(parse_mailbox(from, "送信元")?)
        .to(parse_mailbox(email.to(), "宛先")?)
        .subject(email.subject())
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body().to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body().to_string()),
                ),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::rstest;
    use tokio::net::TcpListener;

    use super::*;

    fn sender() -> Email {
        Email::new("noreply@skillforge.ai").unwrap()
    }

    fn rendered() -> RenderedNotification {
        RenderedNotification::new(
            Email::new("bob@example.com").unwrap(),
            "Password Reset - SkillForge Navigator",
            "<p>Your temporary password</p>".to_string(),
            "Your temporary password".to_string(),
        )
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpNotificationSender>();
    }

    #[test]
    fn メッセージはテキストとhtmlのmultipart_alternative() {
        let message = build_message(&sender(), &rendered()).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Subject: Password Reset - SkillForge Navigator"));
        assert!(formatted.contains("bob@example.com"));
        assert!(formatted.contains("noreply@skillforge.ai"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("text/html"));
    }

    #[tokio::test]
    async fn 認証情報なしで呼ばれると送信せずにエラーを返す() {
        let config = Arc::new(TransportConfig::new(sender(), None));
        let smtp_sender = SmtpNotificationSender::new(config);

        let result = smtp_sender.send_email(&rendered()).await;

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }

    #[rstest]
    #[case("bob@example.com")]
    #[case("first.last@example.com")]
    #[case("user+tag@sub.example.co.jp")]
    #[case("o'brien@example.com")]
    #[case("user@localhost")]
    fn 検証済みのアドレスはすべてmailboxとして解釈できる(#[case] raw: &str) {
        let address = Email::new(raw).unwrap();

        assert!(parse_mailbox(&address, "宛先").is_ok());
    }

    #[tokio::test]
    async fn 応答しないリレーへの送信はタイムアウトで打ち切られる() {
        // 接続は受け付けるが SMTP グリーティングを返さないリレー
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let relay = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = TransportConfig::new(sender(), Some("app-password".to_string()))
            .with_relay("127.0.0.1", port)
            .with_send_timeout(Duration::from_millis(200));
        let smtp_sender = SmtpNotificationSender::new(Arc::new(config));

        let started = Instant::now();
        let result = smtp_sender.send_email(&rendered()).await;

        assert!(
            matches!(
                result,
                Err(NotificationError::Timeout { .. } | NotificationError::SendFailed(_))
            ),
            "{result:?}"
        );
        assert!(started.elapsed() < Duration::from_secs(5));
        relay.abort();
    }
}
