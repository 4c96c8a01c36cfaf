// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replication settings
//!
//! Loaded from a TOML file; every field has a default so an empty file
//! (or no file at all) is a valid configuration.

use crate::replicator::DEFAULT_READ_BUFFER_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    pub binlog: BinLogConfig,
    pub store: StoreConfig,
    pub apply: ApplyConfig,
}

/// Rotating binlog settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinLogConfig {
    /// Directory holding `binlog.NNNNNNN` files
    pub dir: PathBuf,
    /// Size at which the active file is rotated (bytes)
    pub max_file_size: u64,
    /// Number of files kept after rotation; older ones are purged
    pub max_file_count: usize,
    /// fsync after every append
    pub sync_on_append: bool,
}

impl Default for BinLogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("binlog"),
            max_file_size: 1024 * 1024 * 1024,
            max_file_count: 10,
            sync_on_append: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON snapshot of the key space
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("store.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyConfig {
    /// Buffer size when applying from a file
    pub read_buffer_size: usize,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ReplConfig {
    /// Parse and validate a TOML document
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: ReplConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        Ok(match path.parent() {
            Some(base) => config.rebase(base),
            None => config,
        })
    }

    /// Resolve relative paths against `base`
    pub fn rebase(mut self, base: &Path) -> Self {
        if self.binlog.dir.is_relative() {
            self.binlog.dir = base.join(&self.binlog.dir);
        }
        if self.store.path.is_relative() {
            self.store.path = base.join(&self.store.path);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binlog.max_file_size == 0 {
            return Err(ConfigError::Invalid(
                "binlog.max_file_size must be at least 1".into(),
            ));
        }
        if self.binlog.max_file_count == 0 {
            return Err(ConfigError::Invalid(
                "binlog.max_file_count must be at least 1".into(),
            ));
        }
        if self.apply.read_buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "apply.read_buffer_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
