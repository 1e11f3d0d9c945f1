//! Configuration service.
//!
//! Builds a [`BotConfig`] from environment variables. Lookups go through a
//! closure so tests can supply variables without touching the process
//! environment.

use std::time::Duration;

use almacen_core::config::{
    BotConfig, DEFAULT_DATABASE_PREFIX, DEFAULT_PORT, MaintenanceConfig, StoreBackend,
};
use almacen_core::error::{AlmacenError, Result};

pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
pub const MONGODB_URI: &str = "MONGODB_URI";
pub const PORT: &str = "PORT";
pub const DATABASE_PREFIX: &str = "DATABASE_PREFIX";
pub const AUTOSAVE_INTERVAL_SECS: &str = "AUTOSAVE_INTERVAL_SECS";
pub const SESSION_TTL_SECS: &str = "SESSION_TTL_SECS";
pub const SESSION_SWEEP_SECS: &str = "SESSION_SWEEP_SECS";
pub const ACTIVITY_CHECK_SECS: &str = "ACTIVITY_CHECK_SECS";
pub const IDLE_THRESHOLD_SECS: &str = "IDLE_THRESHOLD_SECS";
pub const KEEPALIVE_TTL_SECS: &str = "KEEPALIVE_TTL_SECS";

/// Loads the bot configuration.
pub struct ConfigService<F> {
    lookup: F,
}

impl ConfigService<fn(&str) -> Option<String>> {
    /// Reads from the process environment.
    pub fn from_env() -> Self {
        Self {
            lookup: |key| std::env::var(key).ok(),
        }
    }
}

impl<F> ConfigService<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    /// Resolves every setting.
    ///
    /// All missing required variables are reported together in one
    /// [`AlmacenError::Config`].
    pub fn load(&self) -> Result<BotConfig> {
        let token = self.get(DISCORD_TOKEN);
        let uri = self.get(MONGODB_URI);

        let missing: Vec<&str> = [(DISCORD_TOKEN, &token), (MONGODB_URI, &uri)]
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key)
            .collect();
        let (Some(discord_token), Some(uri)) = (token, uri) else {
            return Err(AlmacenError::config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let defaults = MaintenanceConfig::default();
        let maintenance = MaintenanceConfig {
            autosave_interval: self.seconds(AUTOSAVE_INTERVAL_SECS, defaults.autosave_interval)?,
            session_ttl: self.seconds(SESSION_TTL_SECS, defaults.session_ttl)?,
            session_sweep_interval: self
                .seconds(SESSION_SWEEP_SECS, defaults.session_sweep_interval)?,
            activity_check_interval: self
                .seconds(ACTIVITY_CHECK_SECS, defaults.activity_check_interval)?,
            idle_threshold: self.seconds(IDLE_THRESHOLD_SECS, defaults.idle_threshold)?,
            keepalive_ttl: self.seconds(KEEPALIVE_TTL_SECS, defaults.keepalive_ttl)?,
        };

        Ok(BotConfig {
            discord_token,
            store: StoreBackend::from_uri(&uri)?,
            port: self.parsed(PORT)?.unwrap_or(DEFAULT_PORT),
            database_prefix: self
                .get(DATABASE_PREFIX)
                .unwrap_or_else(|| DEFAULT_DATABASE_PREFIX.to_string()),
            maintenance,
        })
    }

    /// A trimmed, non-empty variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AlmacenError::config(format!("{key} has an invalid value '{raw}'"))),
        }
    }

    fn seconds(&self, key: &str, default: Duration) -> Result<Duration> {
        match self.parsed::<u64>(key)? {
            None => Ok(default),
            Some(0) => Err(AlmacenError::config(format!("{key} must be greater than 0"))),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }
}
