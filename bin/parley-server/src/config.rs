//! Server configuration, loaded from environment variables at startup.

use thiserror::Error;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The model-backend credential is absent; the process must not start.
    #[error("OPENAI_API_KEY is missing. Set the 'OPENAI_API_KEY' environment variable.")]
    MissingApiKey,
}

/// Runtime configuration for parley-server.
///
/// Apart from the required API credential, every field has a sensible
/// default so the server works out-of-the-box without any environment
/// variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// Credential for the model backend. Required; startup fails without it.
    pub api_key: String,

    /// Base URL of the OpenAI-compatible backend
    /// (default: `"https://api.openai.com/v1"`).
    pub openai_base_url: String,

    /// Model identifier sent with every completion request.
    pub model: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Serve Swagger UI at `/swagger-ui` (default: `true`).
    pub enable_swagger: bool,

    /// Comma-separated allowed CORS origins; `None` means wildcard.
    pub cors_allowed_origins: Option<String>,

    /// Maximum accepted upload size in mebibytes (default: 20).
    pub max_upload_mb: usize,

    /// Request timeout toward the model backend, in seconds (default: 120).
    pub gateway_timeout_secs: u64,
}

impl Config {
    /// Build [`Config`] from environment variables.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] when the credential is
    /// absent or empty; everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            bind_address: env_or("PARLEY_BIND", "0.0.0.0:8000"),
            api_key,
            openai_base_url: env_or("PARLEY_OPENAI_BASE_URL", "https://api.openai.com/v1"),
            model: env_or("PARLEY_MODEL", "gpt-3.5-turbo"),
            log_level: env_or("PARLEY_LOG", "info"),
            log_json: std::env::var("PARLEY_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            enable_swagger: std::env::var("PARLEY_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            cors_allowed_origins: std::env::var("PARLEY_CORS_ORIGINS").ok(),
            max_upload_mb: parse_env("PARLEY_MAX_UPLOAD_MB", 20),
            gateway_timeout_secs: parse_env("PARLEY_GATEWAY_TIMEOUT_SECS", 120),
        })
    }

    /// Host portion of [`Config::openai_base_url`], used for the proxy
    /// bypass at startup.
    pub fn backend_host(&self) -> &str {
        host_of(&self.openai_base_url)
    }
}

/// Make sure `host` is exempt from any configured HTTP proxy.
///
/// Appends `host` to both `NO_PROXY` and `no_proxy` when it is not already
/// listed. Idempotent. Must run before the gateway client is built:
/// `reqwest` snapshots the proxy environment at client construction, and
/// nothing else may touch these variables concurrently.
pub fn ensure_proxy_bypass(host: &str) {
    for key in ["NO_PROXY", "no_proxy"] {
        let current = std::env::var(key).unwrap_or_default();
        if let Some(updated) = appended_no_proxy(&current, host) {
            // `set_var` is unsafe in edition 2024; see the constraint above.
            unsafe { std::env::set_var(key, updated) };
        }
    }
}

/// Value to store for a proxy-exemption variable, or `None` when `host`
/// is already listed.
fn appended_no_proxy(current: &str, host: &str) -> Option<String> {
    if current.split(',').any(|entry| entry.trim() == host) {
        return None;
    }
    if current.is_empty() {
        Some(host.to_owned())
    } else {
        Some(format!("{current},{host}"))
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Host part of a URL, without scheme, port, or path.
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['/', '?']).next().unwrap_or(rest);
    rest.split(':').next().unwrap_or(rest)
}

#[cfg(test)]
impl Config {
    /// A fully populated config for handler tests; never reads the
    /// environment.
    pub(crate) fn test_default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_owned(),
            api_key: "test-key".to_owned(),
            openai_base_url: "https://api.openai.com/v1".to_owned(),
            model: "gpt-3.5-turbo".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            enable_swagger: false,
            cors_allowed_origins: None,
            max_upload_mb: 20,
            gateway_timeout_secs: 120,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn host_of_strips_scheme_port_and_path() {
        assert_eq!(host_of("https://api.openai.com/v1"), "api.openai.com");
        assert_eq!(host_of("http://localhost:8080/v1"), "localhost");
        assert_eq!(host_of("api.openai.com"), "api.openai.com");
    }

    #[test]
    fn proxy_exemption_is_appended_once() {
        assert_eq!(
            appended_no_proxy("", "api.openai.com"),
            Some("api.openai.com".to_owned())
        );
        assert_eq!(
            appended_no_proxy("internal.corp", "api.openai.com"),
            Some("internal.corp,api.openai.com".to_owned())
        );
        assert_eq!(appended_no_proxy("api.openai.com", "api.openai.com"), None);
        assert_eq!(
            appended_no_proxy("internal.corp, api.openai.com", "api.openai.com"),
            None
        );
    }
}
