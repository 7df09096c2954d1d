//! Startup configuration parsed from environment variables.
//!
//! Values are read through a lookup closure so parsing stays independent of
//! the process environment; `from_env` binds it to `std::env::var`.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DEV_EMAIL: &str = "dev@localhost";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required env var {var}")]
    Missing { var: String },

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without a trailing slash.
    pub url: String,
    pub api_key: String,
    pub timeouts: BackendTimeouts,
}

/// Seed data for the in-memory backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySeed {
    /// Catalog skill names.
    pub skills: Vec<String>,
    /// Access token that signs in as the dev user.
    pub dev_token: Option<String>,
    pub dev_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    Rest(BackendConfig),
    Memory(MemorySeed),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub backend: BackendMode,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `WAITLIST_BACKEND`: `rest` (default) or `memory`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// Required for `rest`:
    /// - `BACKEND_URL`
    /// - `BACKEND_API_KEY_ENV` (names the env var containing the project key)
    ///
    /// Optional for `memory`:
    /// - `WAITLIST_SEED_SKILLS`: comma-separated catalog skill names
    /// - `WAITLIST_DEV_TOKEN`: access token accepted as the dev user
    /// - `WAITLIST_DEV_EMAIL`: dev user email, default `dev@localhost`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let backend = match lookup("WAITLIST_BACKEND").as_deref().unwrap_or("rest") {
            "rest" => BackendMode::Rest(backend_config(&lookup)?),
            "memory" => BackendMode::Memory(memory_seed(&lookup)),
            other => {
                return Err(ConfigError::Invalid {
                    var: "WAITLIST_BACKEND".into(),
                    reason: format!("unknown backend '{other}' (expected 'rest' or 'memory')"),
                });
            }
        };
        Ok(Self { port, backend })
    }
}

fn backend_config<F>(lookup: &F) -> Result<BackendConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = required(lookup, "BACKEND_URL")?
        .trim_end_matches('/')
        .to_string();
    let key_var = required(lookup, "BACKEND_API_KEY_ENV")?;
    let api_key = required(lookup, &key_var)?;
    let timeouts = BackendTimeouts {
        request_secs: parse_or(
            "BACKEND_REQUEST_TIMEOUT_SECS",
            lookup("BACKEND_REQUEST_TIMEOUT_SECS"),
            DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
        )?,
        connect_secs: parse_or(
            "BACKEND_CONNECT_TIMEOUT_SECS",
            lookup("BACKEND_CONNECT_TIMEOUT_SECS"),
            DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
        )?,
    };
    Ok(BackendConfig { url, api_key, timeouts })
}

fn memory_seed<F>(lookup: &F) -> MemorySeed
where
    F: Fn(&str) -> Option<String>,
{
    let skills = lookup("WAITLIST_SEED_SKILLS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let dev_token = lookup("WAITLIST_DEV_TOKEN").filter(|t| !t.trim().is_empty());
    let dev_email = lookup("WAITLIST_DEV_EMAIL").unwrap_or_else(|| DEFAULT_DEV_EMAIL.to_owned());
    MemorySeed { skills, dev_token, dev_email }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing { var: var.to_owned() })
}

fn parse_or<T>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid { var: var.to_owned(), reason: e.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
