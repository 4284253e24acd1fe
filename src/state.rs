use crate::codes::repo;
use crate::config::AppConfig;
use crate::llm::{GeminiClient, TextGenerator};
use crate::mail::{Mailer, SmtpMailer};
use anyhow::Context;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub llm: Arc<dyn TextGenerator>,
    /// Absent when mail settings are incomplete.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = crate::db::connect(&config.database_url).await?;
        repo::ensure_schema(&db).await.context("create codes table")?;

        let llm = Arc::new(GeminiClient::new(config.gemini.clone())) as Arc<dyn TextGenerator>;

        let mailer = match &config.mail {
            Some(mail) => {
                Some(Arc::new(SmtpMailer::new(mail).context("build smtp transport")?) as Arc<dyn Mailer>)
            }
            None => {
                tracing::warn!(
                    "EMAIL_ADDRESS, EMAIL_PASSWORD or SMTP_SERVER is not set; /send-email will fail"
                );
                None
            }
        };

        Ok(Self::from_parts(db, config, llm, mailer))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        llm: Arc<dyn TextGenerator>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            db,
            config,
            llm,
            mailer,
        }
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use crate::config::{GeminiConfig, MailConfig};
    use crate::llm::LlmError;
    use crate::mail::MailError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed text, or fails when `reply` is `None`.
    pub struct FakeGenerator {
        pub reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| LlmError::Api("quota exceeded".into()))
        }
    }

    #[derive(Debug, Clone)]
    pub struct SentMail {
        pub to: String,
        pub subject: String,
        pub html: String,
    }

    /// Records messages instead of talking to a relay.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<SentMail>>,
        pub fail_with: Option<fn() -> MailError>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
            if let Some(make_err) = self.fail_with {
                return Err(make_err());
            }
            self.sent.lock().unwrap().push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                html,
            });
            Ok(())
        }
    }

    pub fn test_config(with_mail: bool) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            gemini: GeminiConfig {
                api_key: "test".into(),
                model: "test-model".into(),
                base_url: "http://fake.local".into(),
            },
            mail: with_mail.then(|| MailConfig {
                sender: "sender@example.com".into(),
                password: "test".into(),
                host: "smtp.fake.local".into(),
                port: 587,
            }),
            cors_origins: vec!["http://localhost".into()],
        }
    }

    /// In-memory store with the schema in place.
    pub async fn fake_state(
        llm: Arc<dyn TextGenerator>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> AppState {
        let db = crate::db::connect_in_memory().await;
        repo::ensure_schema(&db).await.expect("schema");
        AppState::from_parts(db, Arc::new(test_config(mailer.is_some())), llm, mailer)
    }
}
