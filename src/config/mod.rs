use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key the bearer credential is persisted under
    pub credential_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency: String,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CREDENTIAL_KEY: &str = "auth_token";

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("HALLS_API_BASE_URL") {
            let trimmed = v.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                self.api.base_url = trimmed.to_string();
            }
        }
        if let Ok(v) = env::var("HALLS_USER_AGENT") {
            self.api.user_agent = v;
        }

        if let Ok(v) = env::var("HALLS_CREDENTIAL_KEY") {
            if !v.trim().is_empty() {
                self.session.credential_key = v.trim().to_string();
            }
        }

        if let Ok(v) = env::var("HALLS_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = env::var("HALLS_REQUEST_LOGGING") {
            self.logging.enable_request_logging = v.parse().unwrap_or(self.logging.enable_request_logging);
        }

        if let Ok(v) = env::var("HALLS_CURRENCY") {
            self.display.currency = v;
        }

        self
    }

    fn base(environment: Environment, base_url: &str, level: &str, request_logging: bool) -> Self {
        Self {
            environment,
            api: ApiConfig {
                base_url: base_url.to_string(),
                user_agent: format!("halls/{}", env!("CARGO_PKG_VERSION")),
            },
            session: SessionConfig {
                credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            },
            logging: LoggingConfig {
                level: level.to_string(),
                enable_request_logging: request_logging,
            },
            display: DisplayConfig {
                currency: "PKR".to_string(),
            },
        }
    }

    pub fn development() -> Self {
        Self::base(Environment::Development, DEFAULT_API_BASE_URL, "debug", true)
    }

    pub fn staging() -> Self {
        Self::base(Environment::Staging, "https://staging-api.hallsbooking.pk", "info", true)
    }

    pub fn production() -> Self {
        Self::base(Environment::Production, "https://api.hallsbooking.pk", "warn", false)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
