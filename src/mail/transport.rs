use std::error::Error as _;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, error};

use crate::config::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("이메일 인증에 실패했습니다. 발신자 계정 정보 또는 앱 비밀번호를 확인해주세요.")]
    Authentication,

    #[error("SMTP 서버에 연결할 수 없습니다. 서버 주소({host})와 포트({port})를 확인해주세요.")]
    Connection { host: String, port: u16 },

    #[error("이메일 전송 중 오류가 발생했습니다: {0}")]
    Other(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), MailError>;
}

/// Authenticated STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: config.sender.clone(),
            host: config.host.clone(),
            port: config.port,
        })
    }

    fn classify(&self, err: SmtpError) -> MailError {
        if is_auth_rejection(&err) {
            return MailError::Authentication;
        }
        if err.is_timeout() || err.is_tls() || has_io_source(&err) {
            return MailError::Connection {
                host: self.host.clone(),
                port: self.port,
            };
        }
        MailError::Other(err.to_string())
    }
}

/// 530/534/535 replies: authentication required, mechanism too weak, bad credentials.
fn is_auth_rejection(err: &SmtpError) -> bool {
    err.status()
        .map(|code| code.to_string().starts_with("53"))
        .unwrap_or(false)
}

fn has_io_source(err: &SmtpError) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e| MailError::Other(format!("sender address: {e}")))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| MailError::Other(format!("recipient address: {e}")))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| MailError::Other(e.to_string()))?;

        debug!(host = %self.host, port = self.port, "sending mail");
        self.transport.send(message).await.map_err(|e| {
            error!(error = %e, host = %self.host, port = self.port, "smtp send failed");
            self.classify(e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: u16) -> MailConfig {
        MailConfig {
            sender: "sender@example.com".into(),
            password: "app-password".into(),
            host: "127.0.0.1".into(),
            port,
        }
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_connection_error() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mailer = SmtpMailer::new(&config(port)).unwrap();
        let err = mailer
            .send_html("recipient@example.com", "subject", "<p>hi</p>".into())
            .await
            .unwrap_err();

        match err {
            MailError::Connection { host, port: p } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_recipient_is_reported_before_sending() {
        let mailer = SmtpMailer::new(&config(1)).unwrap();
        let err = mailer
            .send_html("not an address", "subject", String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::Other(msg) if msg.starts_with("recipient address")));
    }

    #[test]
    fn messages_are_distinct() {
        let auth = MailError::Authentication.to_string();
        let conn = MailError::Connection {
            host: "smtp.example.com".into(),
            port: 587,
        }
        .to_string();
        let other = MailError::Other("boom".into()).to_string();
        assert!(conn.contains("smtp.example.com") && conn.contains("587"));
        assert!(other.ends_with("boom"));
        assert_ne!(auth, conn);
    }
}
