//! Policy service configuration from TOML (`[policy]` section)

use serde::{Deserialize, Serialize};

/// Pangea AuthZ connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    /// Pangea API domain; the service lives at `https://authz.<domain>`
    pub domain: String,
    /// Full base URL, overriding `domain` (useful for proxies and tests)
    pub base_url: Option<String>,
    /// Environment variable holding the API token
    pub token_env: String,
    /// Bound on a single check; expiry counts as a deny
    pub timeout_seconds: u64,
}

impl Default for FilePolicyConfig {
    fn default() -> Self {
        Self {
            domain: "aws.us.pangea.cloud".to_string(),
            base_url: None,
            token_env: "PANGEA_AUTHZ_TOKEN".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl FilePolicyConfig {
    /// Resolved service base URL, without trailing slash
    pub fn service_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://authz.{}", self.domain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url_from_domain() {
        assert_eq!(
            FilePolicyConfig::default().service_url(),
            "https://authz.aws.us.pangea.cloud"
        );
    }

    #[test]
    fn test_base_url_overrides_domain() {
        let config = FilePolicyConfig {
            base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.service_url(), "http://127.0.0.1:9000");
    }
}
