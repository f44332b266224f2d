/// Configuration management for Board Service
///
/// This module handles loading configuration from environment variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Document store configuration
    pub search: SearchConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Which document store implementation backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    Elasticsearch,
    Memory,
}

impl std::str::FromStr for SearchBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elasticsearch" | "es" => Ok(SearchBackend::Elasticsearch),
            "memory" | "in-memory" => Ok(SearchBackend::Memory),
            other => Err(format!("unknown SEARCH_BACKEND '{}'", other)),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub backend: SearchBackend,
    /// Elasticsearch URL
    pub url: String,
    pub post_index: String,
    pub comment_index: String,
    /// Per-request timeout applied to the transport
    pub request_timeout_ms: u64,
    /// Wait for an index refresh after every write
    pub refresh_on_write: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BOARD_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BOARD_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            search: SearchConfig {
                backend: match std::env::var("SEARCH_BACKEND") {
                    Ok(value) => value.parse()?,
                    Err(_) => SearchBackend::Elasticsearch,
                },
                url: std::env::var("ELASTICSEARCH_URL")
                    .unwrap_or_else(|_| "http://localhost:9200".to_string()),
                post_index: std::env::var("ELASTICSEARCH_POST_INDEX")
                    .unwrap_or_else(|_| "posts".to_string()),
                comment_index: std::env::var("ELASTICSEARCH_COMMENT_INDEX")
                    .unwrap_or_else(|_| "comments".to_string()),
                request_timeout_ms: std::env::var("ELASTICSEARCH_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5_000),
                refresh_on_write: std::env::var("ELASTICSEARCH_REFRESH_ON_WRITE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "BOARD_SERVICE_HOST",
        "BOARD_SERVICE_PORT",
        "CORS_ALLOWED_ORIGINS",
        "SEARCH_BACKEND",
        "ELASTICSEARCH_URL",
        "ELASTICSEARCH_POST_INDEX",
        "ELASTICSEARCH_COMMENT_INDEX",
        "ELASTICSEARCH_REQUEST_TIMEOUT_MS",
        "ELASTICSEARCH_REFRESH_ON_WRITE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.search.backend, SearchBackend::Elasticsearch);
        assert_eq!(config.search.url, "http://localhost:9200");
        assert_eq!(config.search.post_index, "posts");
        assert_eq!(config.search.comment_index, "comments");
        assert_eq!(config.search.request_timeout_ms, 5_000);
        assert!(!config.search.refresh_on_write);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        std::env::set_var("BOARD_SERVICE_PORT", "9090");
        std::env::set_var("SEARCH_BACKEND", "memory");
        std::env::set_var("ELASTICSEARCH_POST_INDEX", "board-posts");
        std::env::set_var("ELASTICSEARCH_REFRESH_ON_WRITE", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.search.backend, SearchBackend::Memory);
        assert_eq!(config.search.post_index, "board-posts");
        assert!(config.search.refresh_on_write);
        clear_env();
    }

    #[test]
    #[serial]
    fn rejects_unknown_backend() {
        clear_env();
        std::env::set_var("SEARCH_BACKEND", "sqlite");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn production_requires_explicit_cors() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        assert!(Config::from_env().is_err());

        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        assert!(Config::from_env().is_err());

        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://board.example");
        assert!(Config::from_env().is_ok());
        clear_env();
    }
}
