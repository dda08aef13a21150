//! Persisted filter settings.
//!
//! [`SettingsStore`] keeps a [`FilterConfig`] in a [`StoragePort`] as a
//! `postcard` blob under the `chordguard` namespace. Loading never fails
//! hard: a missing, unreadable, or out-of-range blob yields the defaults,
//! which keep the filter disabled until the device owner turns it on.
//!
//! [`MemoryStorage`] is the in-RAM backend used on the host.

use std::collections::HashMap;

use log::{info, warn};

use crate::config::FilterConfig;
use crate::control::ControlSurface;
use crate::error::{Error, StorageError};
use crate::ports::{Clock, StoragePort, ViolationSink};

const SETTINGS_NAMESPACE: &str = "chordguard";
const SETTINGS_KEY: &str = "filtercfg";

/// Upper bound on an encoded [`FilterConfig`].
const MAX_BLOB_SIZE: usize = 64;

/// Loads and saves the filter configuration.
pub struct SettingsStore<P> {
    storage: P,
}

impl<P: StoragePort> SettingsStore<P> {
    pub fn new(storage: P) -> Self {
        Self { storage }
    }

    /// Load the stored configuration, falling back to defaults.
    pub fn load_or_default(&self) -> FilterConfig {
        match self.load() {
            Ok(cfg) => {
                info!("chordguard: settings loaded (enabled={})", cfg.enabled);
                cfg
            }
            Err(Error::Storage(StorageError::NotFound)) => {
                info!("chordguard: no stored settings, using defaults");
                FilterConfig::default()
            }
            Err(e) => {
                warn!("chordguard: settings load failed ({e}), using defaults");
                FilterConfig::default()
            }
        }
    }

    pub fn load(&self) -> Result<FilterConfig, Error> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let len = self.storage.read(SETTINGS_NAMESPACE, SETTINGS_KEY, &mut buf)?;
        let cfg: FilterConfig =
            postcard::from_bytes(&buf[..len]).map_err(|_| StorageError::Corrupted)?;
        cfg.window.validate()?;
        Ok(cfg)
    }

    /// Validate and persist `cfg`.
    pub fn save(&mut self, cfg: &FilterConfig) -> Result<(), Error> {
        cfg.window.validate()?;
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let bytes = postcard::to_slice(cfg, &mut buf).map_err(|_| StorageError::Full)?;
        self.storage.write(SETTINGS_NAMESPACE, SETTINGS_KEY, bytes)?;
        Ok(())
    }

    /// Persist the live toggles of a running filter.
    pub fn save_from<C: Clock, S: ViolationSink>(
        &mut self,
        surface: &ControlSurface<'_, C, S>,
    ) -> Result<(), Error> {
        let snap = surface.snapshot();
        self.save(&FilterConfig {
            enabled: snap.enabled,
            log_violations: snap.log_violations,
            window: snap.window,
        })
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        self.storage.delete(SETTINGS_NAMESPACE, SETTINGS_KEY)?;
        Ok(())
    }

    pub fn storage(&self) -> &P {
        &self.storage
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory backend
// ───────────────────────────────────────────────────────────────

/// Volatile [`StoragePort`] for host builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{namespace}::{key}")
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let value = self
            .store
            .get(&Self::composite_key(namespace, key))
            .ok_or(StorageError::NotFound)?;
        if value.len() > buf.len() {
            return Err(StorageError::Full);
        }
        buf[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&Self::composite_key(namespace, key))
    }
}
