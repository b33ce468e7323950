//! Runtime configuration: CLI flag, then `URLGUARD_*` environment variable, then default.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use urlguard::ArtifactPaths;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const ENV_HOME: &str = "URLGUARD_HOME";
pub const ENV_HOST: &str = "URLGUARD_HOST";
pub const ENV_PORT: &str = "URLGUARD_PORT";
pub const ENV_MODEL_DIR: &str = "URLGUARD_MODEL_DIR";
pub const ENV_CORS_ORIGINS: &str = "URLGUARD_CORS_ORIGINS";
pub const ENV_LOG_FORMAT: &str = "URLGUARD_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format {other:?} (expected text or json)"),
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub log_format: Option<LogFormat>,
}

/// Fully resolved settings for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub host: String,
    pub port: u16,
    pub model_dir: PathBuf,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl RuntimeConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let host = overrides
            .host
            .or_else(|| env(ENV_HOST))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port {
            Some(p) => p,
            None => match env(ENV_PORT) {
                Some(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("{ENV_PORT}={raw:?} is not a valid port"))?,
                None => DEFAULT_PORT,
            },
        };

        let model_dir = overrides
            .model_dir
            .or_else(|| env(ENV_MODEL_DIR).map(PathBuf::from))
            .unwrap_or_else(|| urlguard_home(&env).join("models"));

        let cors_origins = if overrides.cors_origins.is_empty() {
            env(ENV_CORS_ORIGINS)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        } else {
            overrides.cors_origins
        };

        let log_format = match overrides.log_format {
            Some(f) => f,
            None => match env(ENV_LOG_FORMAT) {
                Some(raw) => raw
                    .parse::<LogFormat>()
                    .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?,
                None => LogFormat::default(),
            },
        };

        Ok(Self {
            host,
            port,
            model_dir,
            cors_origins,
            log_format,
        })
    }

    /// Host and port in a form `TcpListener::bind` resolves.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.model_dir)
    }
}

/// `$URLGUARD_HOME`, or `~/.urlguard`.
fn urlguard_home(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(home) = env(ENV_HOME) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".urlguard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = RuntimeConfig::resolve_with(
            ConfigOverrides::default(),
            env_from(&[(ENV_HOME, "/srv/urlguard")]),
        )
        .unwrap();
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.model_dir, PathBuf::from("/srv/urlguard/models"));
        assert!(cfg.cors_origins.is_empty());
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(
            cfg.artifact_paths().model,
            PathBuf::from("/srv/urlguard/models/model.json")
        );
    }

    #[test]
    fn test_env_overrides_defaults() {
        let cfg = RuntimeConfig::resolve_with(
            ConfigOverrides::default(),
            env_from(&[
                (ENV_HOST, "0.0.0.0"),
                (ENV_PORT, "8080"),
                (ENV_MODEL_DIR, "/opt/models"),
                (ENV_CORS_ORIGINS, "https://a.example, https://b.example,"),
                (ENV_LOG_FORMAT, "JSON"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.listen_addr(), ("0.0.0.0", 8080));
        assert_eq!(cfg.model_dir, PathBuf::from("/opt/models"));
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn test_flags_beat_env() {
        let overrides = ConfigOverrides {
            port: Some(9000),
            model_dir: Some(PathBuf::from("./models")),
            cors_origins: vec!["https://ui.example".into()],
            log_format: Some(LogFormat::Text),
            ..Default::default()
        };
        let cfg = RuntimeConfig::resolve_with(
            overrides,
            env_from(&[
                (ENV_PORT, "8080"),
                (ENV_MODEL_DIR, "/opt/models"),
                (ENV_CORS_ORIGINS, "https://other.example"),
                (ENV_LOG_FORMAT, "json"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.model_dir, PathBuf::from("./models"));
        assert_eq!(cfg.cors_origins, vec!["https://ui.example"]);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = RuntimeConfig::resolve_with(
            ConfigOverrides::default(),
            env_from(&[(ENV_PORT, "eighty")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));

        assert!(RuntimeConfig::resolve_with(
            ConfigOverrides::default(),
            env_from(&[(ENV_LOG_FORMAT, "xml")]),
        )
        .is_err());
    }
}
