//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`StoragePort`] over the default ESP-IDF NVS partition.
//! Each namespace is opened on demand; ESP-IDF commits are atomic per
//! `set_raw`, so a power cut never leaves a half-written settings blob.

#![cfg(target_os = "espidf")]

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::{info, warn};

use crate::error::StorageError;
use crate::ports::StoragePort;

pub struct NvsStorage {
    partition: EspDefaultNvsPartition,
}

impl NvsStorage {
    /// Take the default NVS partition. Fails if it is already taken or the
    /// flash cannot be initialised.
    pub fn new() -> Result<Self, StorageError> {
        let partition = EspDefaultNvsPartition::take().map_err(|e| {
            warn!("NvsStorage: partition unavailable ({e})");
            StorageError::IoError
        })?;
        info!("NvsStorage: default partition ready");
        Ok(Self { partition })
    }

    fn open(&self, namespace: &str, write: bool) -> Result<EspNvs<NvsDefault>, StorageError> {
        EspNvs::new(self.partition.clone(), namespace, write).map_err(|_| StorageError::IoError)
    }
}

impl StoragePort for NvsStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let nvs = self.open(namespace, false)?;
        match nvs.get_raw(key, buf) {
            Ok(Some(value)) => Ok(value.len()),
            Ok(None) => Err(StorageError::NotFound),
            Err(_) => Err(StorageError::IoError),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let mut nvs = self.open(namespace, true)?;
        nvs.set_raw(key, data).map_err(|_| StorageError::Full)?;
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let mut nvs = self.open(namespace, true)?;
        nvs.remove(key).map_err(|_| StorageError::IoError)?;
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.open(namespace, false)
            .and_then(|nvs| nvs.contains(key).map_err(|_| StorageError::IoError))
            .unwrap_or(false)
    }
}
