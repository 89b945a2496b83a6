//! Local data caching
//!
//! Caches solved chain sets locally to reduce API calls and enable offline
//! plotting.

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;

use crate::core::{ChainError, ChainResult, ChainSet, PriceMode};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

/// Data cache manager
pub struct DataCache {
    config: CacheConfig,
}

impl DataCache {
    pub fn new(config: CacheConfig) -> ChainResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir).map_err(ChainError::Io)?;
        }

        Ok(Self { config })
    }

    fn cache_key(&self, symbol: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_chains.json", symbol.to_lowercase()))
    }

    /// Check if a cached chain set exists and is not expired
    pub fn is_valid(&self, symbol: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(symbol);
        if !path.exists() {
            return false;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save a chain set to cache
    pub fn save_chains(&self, chains: &ChainSet) -> ChainResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(&chains.underlying);
        let json = serde_json::to_string_pretty(chains)
            .map_err(|e| ChainError::Serialization(e.to_string()))?;

        fs::write(&path, json).map_err(ChainError::Io)?;

        tracing::info!("Cached chains for {} at {:?}", chains.underlying, path);
        Ok(())
    }

    /// Load a chain set from cache
    pub fn load_chains(&self, symbol: &str) -> ChainResult<Option<ChainSet>> {
        if !self.config.enabled || !self.is_valid(symbol) {
            return Ok(None);
        }

        let path = self.cache_key(symbol);
        let json = fs::read_to_string(&path).map_err(ChainError::Io)?;

        let chains: ChainSet = serde_json::from_str(&json)
            .map_err(|e| ChainError::Serialization(e.to_string()))?;

        tracing::info!("Loaded chains for {} from cache", symbol);
        Ok(Some(chains))
    }

    /// Clear cache for a symbol
    pub fn clear(&self, symbol: &str) -> ChainResult<()> {
        let path = self.cache_key(symbol);
        if path.exists() {
            fs::remove_file(path).map_err(ChainError::Io)?;
        }
        Ok(())
    }
}

/// Cached data fetcher - combines cache with live fetching
pub struct CachedFetcher {
    cache: DataCache,
    price_mode: PriceMode,
    rate: f64,
}

impl CachedFetcher {
    pub fn new(config: CacheConfig, price_mode: PriceMode, rate: f64) -> ChainResult<Self> {
        Ok(Self {
            cache: DataCache::new(config)?,
            price_mode,
            rate,
        })
    }

    /// Get a solved chain set (from cache or fetched fresh)
    pub fn get_chains(&self, symbol: &str) -> ChainResult<ChainSet> {
        if let Some(chains) = self.cache.load_chains(symbol)? {
            // A cached set built under a different price mode is stale
            if chains.price_mode == self.price_mode {
                return Ok(chains);
            }
        }

        tracing::info!("Fetching fresh data for {}", symbol);
        let chains = super::yahoo::fetch_chain_set(symbol, self.price_mode, self.rate)?;

        self.cache.save_chains(&chains)?;

        Ok(chains)
    }

    /// Force refresh (bypass cache)
    pub fn refresh_chains(&self, symbol: &str) -> ChainResult<ChainSet> {
        self.cache.clear(symbol)?;
        self.get_chains(symbol)
    }
}
