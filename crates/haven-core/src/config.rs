use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 18990;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Most recent turns kept per user. Oldest evicted first.
pub const MAX_HISTORY_TURNS: usize = 20;
/// Processed message IDs remembered per user for duplicate suppression.
pub const MAX_SEEN_MESSAGES: usize = 100;
/// Idle conversations older than this are discarded on next access.
pub const SESSION_TIMEOUT_SECS: i64 = 3600;
/// How much of a message is included in crisis detection log records.
pub const CRISIS_PREVIEW_CHARS: usize = 100;

/// Top-level config (haven.toml + HAVEN_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HavenConfig {
    #[serde(default)]
    pub bot: BotConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub crisis: CrisisConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Display name the bot uses to introduce itself.
    #[serde(default = "default_bot_name")]
    pub name: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Output token cap — short, punchy replies by design of the persona.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Emergency contact numbers injected into safety scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisConfig {
    #[serde(default = "default_hotline")]
    pub hotline: String,
    #[serde(default = "default_text_line")]
    pub text_line: String,
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            hotline: default_hotline(),
            text_line: default_text_line(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

fn default_bot_name() -> String {
    "Sage".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_model() -> String {
    "qwen/qwen3-32b".to_string()
}
fn default_max_tokens() -> u32 {
    150
}
fn default_temperature() -> f32 {
    0.8
}
fn default_hotline() -> String {
    "988".to_string()
}
fn default_text_line() -> String {
    "741741".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl HavenConfig {
    /// Load config from a TOML file with HAVEN_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. HAVEN_CONFIG env var
    ///   3. ~/.haven/haven.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("HAVEN_CONFIG").ok())
            .unwrap_or_else(default_config_path);

        // Double underscore separates nesting levels so field names that
        // contain underscores (api_key, max_tokens) stay addressable:
        // HAVEN_PROVIDER__API_KEY -> provider.api_key
        let config: HavenConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("HAVEN_").split("__"))
            .extract()
            .map_err(|e| crate::error::HavenError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot possibly work at runtime.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.provider.api_key.trim().is_empty() {
            return Err(crate::error::HavenError::Config(
                "provider.api_key is required — set it in haven.toml or HAVEN_PROVIDER__API_KEY"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.haven/haven.toml", home)
}
