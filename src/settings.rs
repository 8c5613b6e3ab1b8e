use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{env, fmt, str::FromStr};
use url::Url;

use crate::entities::contact::EMAIL_PATTERN;

static TABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("table name pattern compiles")
});

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,

    #[serde(default = "default_db_connect_retries")]
    pub db_connect_retries: u32,

    #[serde(default = "default_db_connect_backoff")]
    pub db_connect_backoff_secs: u64,

    #[serde(default = "default_contacts_table")]
    pub contacts_table: String,

    #[serde(default = "default_education_table")]
    pub education_table: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    #[serde(default)]
    pub mail_relay_url: Option<Url>,

    #[serde(default)]
    pub mail_api_token: String,

    #[serde(default)]
    pub mail_from: String,

    #[serde(default)]
    pub operator_email: String,

    #[serde(default = "default_mail_timeout")]
    pub mail_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Contact-API".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_storage_backend() -> StorageBackend {
    StorageBackend::Postgres
}
fn default_max_db_connections() -> u32 {
    10
}
fn default_db_connect_retries() -> u32 {
    5
}
fn default_db_connect_backoff() -> u64 {
    2
}
fn default_contacts_table() -> String {
    "contacts".to_string()
}
fn default_education_table() -> String {
    "education".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_mail_timeout() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            storage_backend: default_storage_backend(),
            database_url: String::new(),
            max_db_connections: default_max_db_connections(),
            db_connect_retries: default_db_connect_retries(),
            db_connect_backoff_secs: default_db_connect_backoff(),
            contacts_table: default_contacts_table(),
            education_table: default_education_table(),
            cors_allowed_origins: default_cors_origins(),
            trust_x_forwarded_for: false,
            mail_relay_url: None,
            mail_api_token: String::new(),
            mail_from: String::new(),
            operator_email: String::new(),
            mail_timeout_secs: default_mail_timeout(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if config.storage_backend == StorageBackend::Postgres {
            config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.storage_backend == StorageBackend::Postgres && self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty".to_string());
        }
        for (key, table) in [("CONTACTS_TABLE", &self.contacts_table), ("EDUCATION_TABLE", &self.education_table)] {
            if !TABLE_NAME.is_match(table) {
                errors.push(format!("{key} must be a plain SQL identifier, got `{table}`"));
            }
        }
        if self.mail_relay_url.is_some() {
            if self.mail_api_token.trim().is_empty() {
                errors.push("MAIL_API_TOKEN is required when MAIL_RELAY_URL is set".to_string());
            }
            if !EMAIL_PATTERN.is_match(&self.mail_from) {
                errors.push("MAIL_FROM must be an email address".to_string());
            }
            if !EMAIL_PATTERN.is_match(&self.operator_email) {
                errors.push("OPERATOR_EMAIL must be an email address".to_string());
            }
        }
        if self.max_db_connections == 0 {
            errors.push("MAX_DB_CONNECTIONS must be greater than zero".to_string());
        }
        if self.mail_timeout_secs == 0 {
            errors.push("MAIL_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("APP_{env_key} or {env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("storage_backend", &self.storage_backend)
            .field("database_url", &self.database_url.redact())
            .field("max_db_connections", &self.max_db_connections)
            .field("db_connect_retries", &self.db_connect_retries)
            .field("db_connect_backoff_secs", &self.db_connect_backoff_secs)
            .field("contacts_table", &self.contacts_table)
            .field("education_table", &self.education_table)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("mail_relay_url", &self.mail_relay_url.as_ref().map(Url::as_str))
            .field("mail_api_token", &self.mail_api_token.redact())
            .field("mail_from", &self.mail_from)
            .field("operator_email", &self.operator_email)
            .field("mail_timeout_secs", &self.mail_timeout_secs)
            .finish()
    }
}
