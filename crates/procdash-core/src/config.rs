use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DashError, Result};
use crate::guard::GuardConfig;

/// Root configuration for procdash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashConfig {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Supervisor backend the API proxy forwards to.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Route guard configuration.
    #[serde(default)]
    pub guard: GuardConfig,
}

impl DashConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DashError::Config(format!("Failed to read config file: {}", e)))?;

        tracing::debug!("loaded configuration from {}", path.as_ref().display());
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| DashError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    #[serde(default = "default_project_name")]
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
        }
    }
}

fn default_project_name() -> String {
    "procdash".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS.
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_enabled: default_true(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// Supervisor backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the supervisor API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Substitute `${VAR_NAME}` patterns with environment variable values.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:3001");
        assert_eq!(config.guard.login_path, "/auth/login");
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [upstream]
            base_url = "http://pm2-api.internal:4000"
        "#;
        let config = DashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.upstream.base_url, "http://pm2-api.internal:4000");
        // Everything else falls back to defaults.
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.guard.cookie_name, "admincookie");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [project]
            name = "ops-dash"

            [server]
            port = 9090
            cors_enabled = false

            [upstream]
            base_url = "http://10.0.0.5:3001"
            timeout_secs = 10

            [guard]
            cookie_name = "admincookie"
            login_path = "/auth/login"
            public_paths = ["/auth/login", "/"]
            skip_prefixes = ["/assets/", "/api/", "/favicon.ico"]
        "#;
        let config = DashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.project.name, "ops-dash");
        assert_eq!(config.server.port, 9090);
        assert!(!config.server.cors_enabled);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.guard.skip_prefixes.len(), 3);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROCDASH_TEST_UPSTREAM", "http://from-env:3001");
        let toml = r#"
            [upstream]
            base_url = "${PROCDASH_TEST_UPSTREAM}"
        "#;
        let config = DashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.upstream.base_url, "http://from-env:3001");
        std::env::remove_var("PROCDASH_TEST_UPSTREAM");
    }

    #[test]
    fn test_missing_env_var_left_as_is() {
        let toml = r#"
            [upstream]
            base_url = "${PROCDASH_TEST_DOES_NOT_EXIST}"
        "#;
        let config = DashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.upstream.base_url, "${PROCDASH_TEST_DOES_NOT_EXIST}");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = DashConfig::parse_toml("not valid toml [");
        assert!(matches!(result, Err(DashError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procdash.toml");
        std::fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let config = DashConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 7000);

        let missing = DashConfig::from_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(DashError::Config(_))));
    }
}
