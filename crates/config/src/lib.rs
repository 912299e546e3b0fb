use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "eckokit.toml",
    "config/eckokit.toml",
    "crates/config/eckokit.toml",
    "eckokit.json",
    "config/eckokit.json",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub provider: VoiceProviderConfig,
    #[serde(default)]
    pub agents: AgentDefaultsConfig,
    #[serde(default)]
    pub protection: ProtectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://eckokit.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Cookie carrying the session token when no `Authorization` header is sent.
    #[serde(default = "AuthConfig::default_session_cookie")]
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
            session_cookie: Self::default_session_cookie(),
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        604_800
    }

    fn default_session_cookie() -> String {
        "eckokit.session_token".to_string()
    }
}

/// Connection settings for the hosted voice-agent platform (ElevenLabs).
///
/// ```
/// use eckokit_config::VoiceProviderConfig;
///
/// let provider = VoiceProviderConfig::default();
/// assert_eq!(provider.base_url, "https://api.elevenlabs.io");
/// assert_eq!(provider.request_timeout_seconds, 30);
/// assert!(provider.api_key.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "VoiceProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "VoiceProviderConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl VoiceProviderConfig {
    fn default_base_url() -> String {
        "https://api.elevenlabs.io".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl Default for VoiceProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Values stamped onto every agent created on the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefaultsConfig {
    #[serde(default = "AgentDefaultsConfig::default_product_tag")]
    pub product_tag: String,
    #[serde(default = "AgentDefaultsConfig::default_timezone")]
    pub timezone: String,
}

impl AgentDefaultsConfig {
    fn default_product_tag() -> String {
        "eckokit".to_string()
    }

    fn default_timezone() -> String {
        "Australia/Sydney".to_string()
    }
}

impl Default for AgentDefaultsConfig {
    fn default() -> Self {
        Self {
            product_tag: Self::default_product_tag(),
            timezone: Self::default_timezone(),
        }
    }
}

/// Sliding-window request protection applied in front of every procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionConfig {
    #[serde(default = "ProtectionConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "ProtectionConfig::default_window")]
    pub window_seconds: u64,
    #[serde(default = "ProtectionConfig::default_max_requests")]
    pub max_requests: u32,
}

impl ProtectionConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_window() -> u64 {
        60
    }

    const fn default_max_requests() -> u32 {
        60
    }
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            window_seconds: Self::default_window(),
            max_requests: Self::default_max_requests(),
        }
    }
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use eckokit_config::load;
///
/// std::env::remove_var("ECKOKIT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default(
            "auth.session_ttl_seconds",
            clamp_to_i64(defaults.auth.session_ttl_seconds),
        )?
        .set_default("auth.session_cookie", defaults.auth.session_cookie.clone())?
        .set_default("provider.base_url", defaults.provider.base_url.clone())?
        .set_default(
            "provider.request_timeout_seconds",
            clamp_to_i64(defaults.provider.request_timeout_seconds),
        )?
        .set_default("agents.product_tag", defaults.agents.product_tag.clone())?
        .set_default("agents.timezone", defaults.agents.timezone.clone())?
        .set_default("protection.enabled", defaults.protection.enabled)?
        .set_default(
            "protection.window_seconds",
            clamp_to_i64(defaults.protection.window_seconds),
        )?
        .set_default(
            "protection.max_requests",
            i64::from(defaults.protection.max_requests),
        )?;

    let environment_overrides = config::Environment::with_prefix("ECKOKIT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ECKOKIT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ECKOKIT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    if config.provider.api_key.is_none() {
        config.provider.api_key = std::env::var("ELEVENLABS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    debug!(
        http = ?config.http,
        database = ?config.database,
        provider_base_url = %config.provider.base_url,
        provider_key_present = config.provider.api_key.is_some(),
        "loaded backend configuration"
    );
    Ok(config)
}
