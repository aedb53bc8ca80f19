use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// GitHub API token; `None` means unauthenticated requests
    pub github_token: Option<String>,
    /// Whether result pages are cached in-process
    pub cache_enabled: bool,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        // An exported-but-empty token counts as unset.
        let github_token = env::var("GITHUB_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let cache_enabled = match env::var("CACHE_ENABLE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("CACHE_ENABLE"))?,
            Err(_) => false,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            github_token,
            cache_enabled,
            log_level,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_truthy_and_falsy_forms() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
    }

    #[test]
    fn parse_bool_rejects_garbage() {
        assert_eq!(parse_bool("maybe"), None);
    }
}
