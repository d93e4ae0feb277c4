//! Environment configuration for the bundled metadata source

use anyhow::{bail, Result};

pub const DEFAULT_API_HOST: &str = "https://api.qase.io";

#[derive(Debug, Clone)]
pub struct QaseConfig {
    pub api_token: String,
    /// Overrides the default API host; a bare hostname gets an https scheme.
    pub api_host: Option<String>,
}

impl QaseConfig {
    /// Reads `QASE_API_TOKEN` (required) and `QASE_API_HOST` (optional).
    pub fn from_env() -> Result<Self> {
        let api_token = match std::env::var("QASE_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ => bail!(
                "QASE_API_TOKEN environment variable is required. \
                 Please set it before creating the metadata source."
            ),
        };
        let api_host = std::env::var("QASE_API_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty());
        Ok(Self {
            api_token,
            api_host,
        })
    }

    pub fn base_url(&self) -> String {
        match self.api_host.as_deref() {
            None => DEFAULT_API_HOST.to_string(),
            Some(host) if host.starts_with("http") => host.to_string(),
            Some(host) => format!("https://{}", host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: Option<&str>) -> QaseConfig {
        QaseConfig {
            api_token: "token".to_string(),
            api_host: host.map(str::to_string),
        }
    }

    #[test]
    fn test_base_url_defaults_to_cloud_host() {
        assert_eq!(config(None).base_url(), DEFAULT_API_HOST);
    }

    #[test]
    fn test_base_url_keeps_explicit_scheme() {
        assert_eq!(
            config(Some("http://qase.internal:8080")).base_url(),
            "http://qase.internal:8080"
        );
    }

    #[test]
    fn test_base_url_prefixes_bare_host() {
        assert_eq!(
            config(Some("qase.example.com")).base_url(),
            "https://qase.example.com"
        );
    }
}
