use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use eyre::{WrapErr, eyre};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sehatmitra.db";
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_BEDROCK_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Which generative model service answers assessment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProvider {
    Gemini,
    Bedrock,
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::Gemini => f.write_str("gemini"),
            ModelProvider::Bedrock => f.write_str("bedrock"),
        }
    }
}

/// `Production` serves the prebuilt front-end; `Development` serves the API
/// only, for use alongside a separately started front-end dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    pub model_id: String,
    pub api_key: Option<String>,
    /// `None` leaves model calls unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub mode: AppMode,
    pub static_dir: PathBuf,
    pub model: ModelConfig,
    pub log_json: bool,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Blank values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("SEHAT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .wrap_err("SEHAT_BIND_ADDR is not a valid socket address")?;

        let mode = match get("SEHAT_ENV").as_deref().map(str::to_ascii_lowercase) {
            None => AppMode::Development,
            Some(m) if m == "development" || m == "dev" => AppMode::Development,
            Some(m) if m == "production" || m == "prod" => AppMode::Production,
            Some(other) => return Err(eyre!("unknown SEHAT_ENV {other:?}")),
        };

        let provider = match get("SEHAT_MODEL_PROVIDER").as_deref().map(str::to_ascii_lowercase) {
            None => ModelProvider::Gemini,
            Some(p) if p == "gemini" => ModelProvider::Gemini,
            Some(p) if p == "bedrock" => ModelProvider::Bedrock,
            Some(other) => return Err(eyre!("unknown SEHAT_MODEL_PROVIDER {other:?}")),
        };

        let model_id = get("SEHAT_MODEL_ID").unwrap_or_else(|| match provider {
            ModelProvider::Gemini => sehat_assess::gemini::DEFAULT_MODEL_ID.to_string(),
            ModelProvider::Bedrock => DEFAULT_BEDROCK_MODEL_ID.to_string(),
        });

        let api_key = get("GEMINI_API_KEY");
        if provider == ModelProvider::Gemini && api_key.is_none() {
            return Err(eyre!("GEMINI_API_KEY must be set when using the gemini provider"));
        }

        let timeout = get("SEHAT_MODEL_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .wrap_err("SEHAT_MODEL_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?;

        Ok(Self {
            bind_addr,
            database_url: get("SEHAT_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            mode,
            static_dir: get("SEHAT_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            model: ModelConfig {
                provider,
                model_id,
                api_key,
                timeout,
            },
            log_json: get("SEHAT_LOG_JSON").is_some_and(|v| is_truthy(&v)),
        })
    }

    /// Directory to serve the front-end from, if this mode hosts it.
    pub fn frontend_dir(&self) -> Option<&std::path::Path> {
        match self.mode {
            AppMode::Production => Some(&self.static_dir),
            AppMode::Development => None,
        }
    }
}

/// Whether JSON log output is requested. Read before the rest of the config
/// so logging is up before config errors are reported.
pub fn log_json_from_env() -> bool {
    std::env::var("SEHAT_LOG_JSON").is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
