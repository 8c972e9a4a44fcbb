use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV: &str = "LISTING_SCOUT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/listing-scout.toml";

/// Runtime settings. Loaded from an optional TOML file, then overridden by
/// `LISTING_SCOUT_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// JSON catalog used when no API is configured
    pub store_path: PathBuf,
    /// Remote read-only catalog; takes precedence over `store_path` for reads
    pub api_url: Option<String>,
    pub cache_ttl_secs: u64,
    pub related_limit: usize,
    /// Public site root used for absolute URLs
    pub site_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/listings.json"),
            api_url: None,
            cache_ttl_secs: 300,
            related_limit: 4,
            site_url: "https://eltaiseer.com".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the config file:
    /// 1) `explicit` (from the command line)
    /// 2) $LISTING_SCOUT_CONFIG
    /// 3) config/listing-scout.toml, if present
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(p) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(p);
            if !path.exists() {
                return Err(anyhow!("{CONFIG_ENV} points to non-existent path"));
            }
            Self::from_file(&path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = get("LISTING_SCOUT_STORE_PATH") {
            self.store_path = PathBuf::from(v);
        }
        if let Some(v) = get("LISTING_SCOUT_API_URL") {
            self.api_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = get("LISTING_SCOUT_CACHE_TTL_SECS") {
            self.cache_ttl_secs = v
                .trim()
                .parse()
                .with_context(|| format!("LISTING_SCOUT_CACHE_TTL_SECS is not a number: {v}"))?;
        }
        if let Some(v) = get("LISTING_SCOUT_SITE_URL") {
            self.site_url = v;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.related_limit == 0 {
            return Err(anyhow!("related_limit must be positive"));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
