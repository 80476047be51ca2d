//! Startup configuration.
//!
//! The API key is looked up once, in order:
//!
//! 1. `OPENAI_API_KEY` in the process environment (after `.env` is loaded),
//! 2. `OPENAI_API_KEY` in the secrets file (`MEALPICK_SECRETS_PATH`, default
//!    `.mealpick/secrets.toml`).
//!
//! If neither yields a non-empty value the process must not start serving.

use std::{
    env, fs, io,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const SECRETS_PATH_VAR: &str = "MEALPICK_SECRETS_PATH";
pub const ADDR_VAR: &str = "MEALPICK_ADDR";
pub const SESSION_IDLE_VAR: &str = "MEALPICK_SESSION_IDLE_SECS";

pub const DEFAULT_SECRETS_PATH: &str = ".mealpick/secrets.toml";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OPENAI_API_KEY가 설정되어 있지 않습니다. .env 파일 또는 secrets 파일({})을 확인해주세요. \
         (OPENAI_API_KEY is not set in the environment, .env or {})",
        .secrets_path.display(),
        .secrets_path.display()
    )]
    MissingApiKey { secrets_path: PathBuf },

    #[error("failed to read secrets file {}: {source}", .path.display())]
    ReadSecrets {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("secrets file {} is not valid TOML: {source}", .path.display())]
    InvalidSecrets {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{var} must be a socket address like 127.0.0.1:8501, got `{value}`")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a whole number of seconds, got `{value}`")]
    InvalidDuration { var: &'static str, value: String },
}

/// Where the API key came from. Logged at startup; the key itself never is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    SecretsFile(PathBuf),
}

#[derive(Deserialize)]
struct SecretsFile {
    #[serde(rename = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub credential_source: CredentialSource,
    pub base_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub session_idle: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("credential_source", &self.credential_source)
            .field("base_url", &self.base_url)
            .field("bind_addr", &self.bind_addr)
            .field("session_idle", &self.session_idle)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load `.env` (if any) and resolve the configuration from the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(%err, "ignoring unreadable .env"),
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secrets_path = lookup(SECRETS_PATH_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH));

        let (api_key, credential_source) = resolve_api_key(&lookup, &secrets_path)?;

        let bind_addr: SocketAddr = match lookup(ADDR_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value,
            })?,
            None => DEFAULT_ADDR.parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: DEFAULT_ADDR.to_owned(),
            })?,
        };

        let session_idle = match lookup(SESSION_IDLE_VAR) {
            Some(value) => value
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidDuration {
                    var: SESSION_IDLE_VAR,
                    value,
                })?,
            None => DEFAULT_SESSION_IDLE,
        };

        Ok(Self {
            api_key,
            credential_source,
            base_url: lookup(BASE_URL_VAR).filter(|value| !value.is_empty()),
            bind_addr,
            session_idle,
        })
    }
}

fn resolve_api_key(
    lookup: &impl Fn(&str) -> Option<String>,
    secrets_path: &Path,
) -> Result<(String, CredentialSource), ConfigError> {
    if let Some(key) = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty()) {
        return Ok((key, CredentialSource::Environment));
    }

    if let Some(key) = read_secrets(secrets_path)? {
        return Ok((key, CredentialSource::SecretsFile(secrets_path.to_owned())));
    }

    Err(ConfigError::MissingApiKey {
        secrets_path: secrets_path.to_owned(),
    })
}

/// A missing secrets file is not an error; an unreadable or malformed one is.
fn read_secrets(path: &Path) -> Result<Option<String>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::ReadSecrets {
                path: path.to_owned(),
                source,
            });
        }
    };

    let secrets: SecretsFile = toml::from_str(&raw).map_err(|source| ConfigError::InvalidSecrets {
        path: path.to_owned(),
        source,
    })?;

    Ok(secrets
        .openai_api_key
        .filter(|key| !key.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn secrets_dir(contents: &str) -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn environment_key_wins() {
        let (_dir, path) = secrets_dir(r#"OPENAI_API_KEY = "sk-from-file""#);

        let config =
            AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "sk-env"), (SECRETS_PATH_VAR, path.as_str())]))
                .unwrap();

        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.credential_source, CredentialSource::Environment);
    }

    #[test]
    fn falls_back_to_secrets_file() {
        let (_dir, path) = secrets_dir(r#"OPENAI_API_KEY = "sk-from-file""#);

        let config = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, ""), (SECRETS_PATH_VAR, path.as_str())]))
            .unwrap();

        assert_eq!(config.api_key, "sk-from-file");
        assert_eq!(
            config.credential_source,
            CredentialSource::SecretsFile(PathBuf::from(&path))
        );
    }

    #[test]
    fn missing_everywhere_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = AppConfig::from_lookup(lookup(&[(SECRETS_PATH_VAR, path.to_str().unwrap())]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn startup_report_states_the_missing_key_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = AppConfig::from_lookup(lookup(&[(SECRETS_PATH_VAR, path.to_str().unwrap())]))
            .unwrap_err();

        // `main` returns this through anyhow, which prints it with `{:?}`.
        let report = format!("{:?}", anyhow::Error::from(err));

        assert_eq!(report.matches("OPENAI_API_KEY가 설정되어").count(), 1);
        assert!(!report.contains("Caused by"));
    }

    #[test]
    fn secrets_file_without_key_is_missing_key() {
        let (_dir, path) = secrets_dir("OTHER = 1\n");

        let err = AppConfig::from_lookup(lookup(&[(SECRETS_PATH_VAR, path.as_str())])).unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn malformed_secrets_file_is_reported() {
        let (_dir, path) = secrets_dir("OPENAI_API_KEY = ");

        let err = AppConfig::from_lookup(lookup(&[(SECRETS_PATH_VAR, path.as_str())])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSecrets { .. }));
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "sk-env")])).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.session_idle, DEFAULT_SESSION_IDLE);
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-env"),
            (ADDR_VAR, "0.0.0.0:9000"),
            (SESSION_IDLE_VAR, "60"),
            (BASE_URL_VAR, "http://proxy.local/v1"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.session_idle, Duration::from_secs(60));
        assert_eq!(config.base_url.as_deref(), Some("http://proxy.local/v1"));
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "sk-env"), (ADDR_VAR, "nowhere")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "sk-secret")])).unwrap();

        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
