//! Vendor endpoint configuration.

use std::env;

/// Login endpoint of the Drivvo API.
pub const LOGIN_URL: &str = "https://api.drivvo.com/autenticacao/login_v2";

/// Root of the Drivvo REST API; resource paths are appended to it.
pub const BASE_URL: &str = "https://api.drivvo.com";

/// Configuration for [`DrivvoClient`](crate::DrivvoClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrivvoConfig {
    /// Full URL the credentials are posted to
    pub login_url: String,
    /// API root, stored without a trailing slash
    pub base_url: String,
}

impl DrivvoConfig {
    pub fn new(login_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build from `DRIVVO_LOGIN_URL` / `DRIVVO_BASE_URL`, falling back to the
    /// vendor's public endpoints.
    pub fn from_env() -> Self {
        Self::new(
            env::var("DRIVVO_LOGIN_URL").unwrap_or_else(|_| LOGIN_URL.to_string()),
            env::var("DRIVVO_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string()),
        )
    }

    /// Join a resource path onto the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for DrivvoConfig {
    fn default() -> Self {
        Self::new(LOGIN_URL, BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_vendor() {
        let config = DrivvoConfig::default();
        assert_eq!(config.login_url, LOGIN_URL);
        assert_eq!(config.endpoint("veiculo/web"), "https://api.drivvo.com/veiculo/web");
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let config = DrivvoConfig::new("http://localhost/login", "http://localhost:8080/");
        assert_eq!(config.endpoint("/veiculo/7"), "http://localhost:8080/veiculo/7");
    }
}
