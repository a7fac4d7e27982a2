use anyhow::{Context, Result};

const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub max_file_size_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_file_size_mb: optional_env("MAX_FILE_SIZE_MB")?
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB),
        })
    }

    /// Upload ceiling in bytes, applied to request bodies and PDF fields.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

fn optional_env(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' must be a positive integer")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_upload_limit_is_ten_megabytes() {
        assert_eq!(Config::default().max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_optional_env_missing_is_none() {
        assert_eq!(
            optional_env("APP_EXTRACTOR_TEST_SURELY_UNSET").unwrap(),
            None
        );
    }
}
