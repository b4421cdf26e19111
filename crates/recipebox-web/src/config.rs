//! Web front-end configuration from environment variables.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Base URL of the recipe API, e.g. `http://localhost:8000/`.
    pub api_base_url: String,
    pub bind_host: String,
    pub port: u16,
}

impl WebConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/".to_string()),
            bind_host: std::env::var("WEB_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid WEB_PORT")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-mutating tests to avoid races.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in ["API_BASE_URL", "WEB_BIND", "WEB_PORT"] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn from_env_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = WebConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/");
        assert_eq!(config.addr(), "0.0.0.0:3000");

        clear_env();
    }

    #[test]
    fn from_env_with_all_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        unsafe {
            std::env::set_var("API_BASE_URL", "https://my-api.com:8000/");
            std::env::set_var("WEB_BIND", "127.0.0.1");
            std::env::set_var("WEB_PORT", "8080");
        }

        let config = WebConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://my-api.com:8000/");
        assert_eq!(config.port, 8080);
        assert_eq!(config.addr(), "127.0.0.1:8080");

        clear_env();
    }

    #[test]
    fn from_env_invalid_port() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        unsafe {
            std::env::set_var("WEB_PORT", "not-a-number");
        }

        assert!(WebConfig::from_env().is_err());

        clear_env();
    }
}
