//! Configuration for qlvalue
//!
//! Centralized codec limits with sensible defaults.

use crate::codec::ClientProtocol;

/// Configuration for a [`WireCodec`](crate::codec::WireCodec)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Client protocol used when the caller does not negotiate one
    pub protocol: ClientProtocol,

    // -------------------------------------------------------------------------
    // Decode Limits
    // -------------------------------------------------------------------------
    /// Largest accepted length prefix for one text/binary/decimal/inet payload
    pub max_value_size: usize,

    /// Largest accepted element (or pair) count for one collection
    pub max_collection_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: ClientProtocol::V4,
            max_value_size: 256 * 1024 * 1024, // 256 MB
            max_collection_len: 64 * 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default client protocol
    pub fn protocol(mut self, protocol: ClientProtocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Set the largest accepted single payload (in bytes)
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.config.max_value_size = size;
        self
    }

    /// Set the largest accepted collection element count
    pub fn max_collection_len(mut self, len: usize) -> Self {
        self.config.max_collection_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
