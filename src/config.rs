use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Origins the web client is served from during local development.
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:8000",
    "http://localhost:3000",
    "http://127.0.0.1",
    "http://127.0.0.1:8000",
    "http://127.0.0.1:5501",
    "http://127.0.0.1:5500",
    "null",
];

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub sender: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub gemini: GeminiConfig,
    /// `None` when any of the sender address, password or relay host is unset.
    pub mail: Option<MailConfig>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| "sqlite://codes.db".into());

        let gemini = GeminiConfig {
            api_key: var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY environment variable is not set")?,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
        };

        let port = match var("SMTP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("SMTP_PORT is not a valid port: {v}"))?,
            None => DEFAULT_SMTP_PORT,
        };
        let mail = match (var("EMAIL_ADDRESS"), var("EMAIL_PASSWORD"), var("SMTP_SERVER")) {
            (Some(sender), Some(password), Some(host)) => Some(MailConfig {
                sender,
                password,
                host,
                port,
            }),
            _ => None,
        };

        let cors_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            database_url,
            gemini,
            mail,
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
