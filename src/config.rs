use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// TheMealDB endpoint settings
    #[serde(default = "default_meals")]
    pub meals: ApiConfig,
    /// TheCocktailDB endpoint settings
    #[serde(default = "default_drinks")]
    pub drinks: ApiConfig,
    /// Quiet period before a typed query is dispatched, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Endpoint settings for one recipe database
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL the `search.php`, `filter.php` and `list.php` paths hang off
    pub base_url: String,
    /// Prefix for ingredient thumbnails
    pub image_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            meals: default_meals(),
            drinks: default_drinks(),
            debounce_ms: default_debounce_ms(),
            timeout: default_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__MEALS__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// Default value functions
fn default_meals() -> ApiConfig {
    ApiConfig {
        base_url: "https://www.themealdb.com/api/json/v1/1".to_string(),
        image_base_url: "https://www.themealdb.com/images/ingredients/".to_string(),
    }
}

fn default_drinks() -> ApiConfig {
    ApiConfig {
        base_url: "https://www.thecocktaildb.com/api/json/v1/1".to_string(),
        image_base_url: "https://www.thecocktaildb.com/images/ingredients/".to_string(),
    }
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_timeout() -> u64 {
    30
}

/// Load configuration from an optional `config.toml` and `RECIPES__` environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPES__DRINKS__BASE_URL
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
