use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub justwatch: JustWatchConfig,
    #[serde(default)]
    pub imports: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustWatchConfig {
    /// ISO 3166-1 alpha-2 country the JustWatch account lives in
    #[serde(default = "default_country")]
    pub country: String,
    /// BCP-47 locale for localized titles (the API wants the primary
    /// subtag in search variables, e.g. "en" out of "en-US")
    #[serde(default = "default_language")]
    pub language: String,
    /// Pause between consecutive API calls
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Hard per-call timeout so a stalled connection can't hang the batch
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the IMDb exports (watchlist.csv, ratings.csv)
    #[serde(default = "default_exports_dir")]
    pub exports_dir: PathBuf,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_exports_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for JustWatchConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            language: default_language(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            exports_dir: default_exports_dir(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    /// The tool is expected to work with no config file at all.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.justwatch.country.len() != 2
            || !self.justwatch.country.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(anyhow::anyhow!(
                "country must be a two-letter code, got '{}'",
                self.justwatch.country
            ));
        }
        if self.justwatch.language.is_empty() {
            return Err(anyhow::anyhow!("language cannot be empty"));
        }
        if self.justwatch.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be nonzero"));
        }
        Ok(())
    }
}
