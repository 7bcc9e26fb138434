use std::env;

use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
    /// OAuth client id; when set, the `aud` of verified credentials must match it.
    #[serde(default)]
    pub client_id: Option<String>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            tokeninfo_url: default_tokeninfo_url(),
            client_id: None,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_ttl_minutes() -> i64 {
    TokenSettings::DEFAULT_ACCESS_TTL_MINUTES
}

fn default_refresh_token_ttl_days() -> i64 {
    TokenSettings::DEFAULT_REFRESH_TTL_DAYS
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

impl JwtConfig {
    /// Token codec settings derived from this section.
    ///
    /// # Errors
    /// * `ConfigError::Message` - A lifetime does not fit a duration
    pub fn token_settings(&self) -> Result<TokenSettings, ConfigError> {
        let access_ttl = chrono::Duration::try_minutes(self.access_token_ttl_minutes)
            .ok_or_else(|| out_of_range("jwt.access_token_ttl_minutes"))?;
        let refresh_ttl = chrono::Duration::try_days(self.refresh_token_ttl_days)
            .ok_or_else(|| out_of_range("jwt.refresh_token_ttl_days"))?;

        Ok(TokenSettings {
            access_secret: self.access_secret.clone(),
            refresh_secret: self.refresh_secret.clone(),
            access_ttl,
            refresh_ttl,
        })
    }
}

fn out_of_range(key: &str) -> ConfigError {
    ConfigError::Message(format!("{} is out of range", key))
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__REFRESH_SECRET=... overrides jwt.refresh_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
