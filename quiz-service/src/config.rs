use std::{env::var, fmt, sync::Arc};

use sentry::types::Dsn;
use tracing::{error, warn};

use crate::gemini::TextGenerator;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub env_vars: EnvVars,
}

#[derive(Clone)]
pub struct EnvVars {
    pub environment: Environment,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub port: u16,
    pub request_body_size_limit: usize,
    pub sentry_dsn: Option<String>,
}

impl fmt::Debug for EnvVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVars")
            .field("environment", &self.environment)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("port", &self.port)
            .field("request_body_size_limit", &self.request_body_size_limit)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                warn!(
                    "ENVIRONMENT value '{}' is not valid. Defaulting to 'production'.",
                    other
                );
                Environment::Production
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} required")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_BODY_SIZE_LIMIT: usize = 64 * 1024;

impl EnvVars {
    /// Reads the process environment.
    ///
    /// Panics if the configuration is invalid, so a misconfigured service never starts.
    pub fn new() -> Self {
        match Self::try_from_lookup(|name| var(name).ok()) {
            Ok(env_vars) => env_vars,
            Err(e) => {
                error!("{e}");
                panic!("invalid configuration: {e}");
            }
        }
    }

    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(gemini_api_key) = lookup("GOOGLE_API_KEY") else {
            return Err(ConfigError::Missing("GOOGLE_API_KEY"));
        };
        if gemini_api_key.trim().is_empty() {
            return Err(ConfigError::Empty("GOOGLE_API_KEY"));
        }

        let gemini_model = match lookup("GEMINI_MODEL") {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_GEMINI_MODEL.to_string(),
        };

        let gemini_base_url = match lookup("GEMINI_BASE_URL") {
            Some(s) if !s.is_empty() => s.trim_end_matches('/').to_string(),
            _ => DEFAULT_GEMINI_BASE_URL.to_string(),
        };

        let port = match lookup("PORT") {
            Some(s) => parse("PORT", s)?,
            None => {
                warn!("PORT not set. Defaulting to {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let request_body_size_limit = match lookup("REQUEST_BODY_SIZE_LIMIT") {
            Some(s) => parse("REQUEST_BODY_SIZE_LIMIT", s)?,
            None => {
                warn!(
                    "REQUEST_BODY_SIZE_LIMIT not set. Defaulting to {DEFAULT_REQUEST_BODY_SIZE_LIMIT}"
                );
                DEFAULT_REQUEST_BODY_SIZE_LIMIT
            }
        };

        let sentry_dsn = match lookup("SENTRY_DSN") {
            Some(dsn) if !dsn.is_empty() => {
                if !valid_sentry_dsn(&dsn) {
                    return Err(ConfigError::Invalid {
                        name: "SENTRY_DSN",
                        value: dsn,
                    });
                }
                Some(dsn)
            }
            _ => {
                warn!("SENTRY_DSN not set.");
                None
            }
        };

        let environment = match lookup("ENVIRONMENT") {
            Some(v) => v.into(),
            None => {
                warn!("ENVIRONMENT not set. Defaulting to 'production'.");
                Environment::Production
            }
        };

        Ok(Self {
            environment,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            port,
            request_body_size_limit,
            sentry_dsn,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn valid_sentry_dsn(url: &str) -> bool {
    url.parse::<Dsn>().is_ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_vars(pairs: &[(&str, &str)]) -> Result<EnvVars, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvVars::try_from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn api_key_is_required() {
        assert_eq!(
            env_vars(&[]).unwrap_err(),
            ConfigError::Missing("GOOGLE_API_KEY")
        );
        assert_eq!(
            env_vars(&[("GOOGLE_API_KEY", "  ")]).unwrap_err(),
            ConfigError::Empty("GOOGLE_API_KEY")
        );
    }

    #[test]
    fn defaults_apply() {
        let env_vars = env_vars(&[("GOOGLE_API_KEY", "secret")]).unwrap();
        assert_eq!(env_vars.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(env_vars.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(env_vars.port, DEFAULT_PORT);
        assert_eq!(env_vars.request_body_size_limit, DEFAULT_REQUEST_BODY_SIZE_LIMIT);
        assert_eq!(env_vars.sentry_dsn, None);
        assert_eq!(env_vars.environment, Environment::Production);
    }

    #[test]
    fn values_are_read() {
        let env_vars = env_vars(&[
            ("GOOGLE_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9000/"),
            ("PORT", "8080"),
            ("REQUEST_BODY_SIZE_LIMIT", "1024"),
            ("ENVIRONMENT", "Development"),
        ])
        .unwrap();
        assert_eq!(env_vars.gemini_model, "gemini-2.0-flash");
        assert_eq!(env_vars.gemini_base_url, "http://127.0.0.1:9000");
        assert_eq!(env_vars.port, 8080);
        assert_eq!(env_vars.request_body_size_limit, 1024);
        assert_eq!(env_vars.environment, Environment::Development);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert_eq!(
            env_vars(&[("GOOGLE_API_KEY", "secret"), ("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn invalid_sentry_dsn_is_rejected() {
        let err =
            env_vars(&[("GOOGLE_API_KEY", "secret"), ("SENTRY_DSN", "not a dsn")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SENTRY_DSN", .. }));
    }

    #[test]
    fn api_key_is_not_printed() {
        let env_vars = env_vars(&[("GOOGLE_API_KEY", "super-secret")]).unwrap();
        assert!(!format!("{env_vars:?}").contains("super-secret"));
    }
}
