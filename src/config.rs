use std::env;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub smtp: Option<SmtpConfig>,
    pub contact_recipient: String,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "[::]".to_string(),
            port: 8080,
            database_url: None,
            database_max_connections: 10,
            smtp: None,
            contact_recipient: "contact@localhost".to_string(),
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn init() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let smtp = match (
            non_empty("SMTP_SERVER"),
            non_empty("SMTP_USERNAME"),
            non_empty("SMTP_PASSWORD"),
        ) {
            (Some(server), Some(username), Some(password)) => Some(SmtpConfig {
                server,
                port: parsed("SMTP_PORT", 587),
                username,
                password,
            }),
            _ => None,
        };

        let contact_recipient = non_empty("CONTACT_RECIPIENT")
            .or_else(|| smtp.as_ref().map(|s| s.username.clone()))
            .unwrap_or(defaults.contact_recipient);

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port),
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: parsed(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            smtp,
            contact_recipient,
            cors_origin: non_empty("CORS_ORIGIN"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match non_empty(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "Invalid numeric setting, using default");
            default
        }),
        None => default,
    }
}
