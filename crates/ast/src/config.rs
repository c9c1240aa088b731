// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parser Configuration
//!
//! Settings that shape a [`crate::ParserContext`]. Usually loaded from the
//! JSON settings of the embedding tool; missing fields take their defaults.
//!
//! ```
//! use sqltree_ast::{Dialect, ParserConfig};
//!
//! let config = ParserConfig::from_json(r#"{ "dialect": "mysql" }"#).unwrap();
//! assert_eq!(config.dialect, Dialect::MySQL);
//! assert_eq!(config.max_copy_depth, ParserConfig::DEFAULT_MAX_COPY_DEPTH);
//! ```

use serde::{Deserialize, Serialize};

use crate::context::Dialect;
use crate::error::{NodeError, NodeResult};

/// Node layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// SQL dialect of the trees built under this configuration
    pub dialect: Dialect,

    /// Maximum nesting a deep copy will follow before failing
    pub max_copy_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_COPY_DEPTH: usize = 100;

    /// Parse a configuration from a JSON object
    pub fn from_json(json: &str) -> NodeResult<Self> {
        let config: ParserConfig =
            serde_json::from_str(json).map_err(|e| NodeError::InvalidConfig {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration values
    pub fn validate(&self) -> NodeResult<()> {
        if self.max_copy_depth == 0 {
            return Err(NodeError::InvalidConfig {
                message: "max_copy_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            max_copy_depth: Self::DEFAULT_MAX_COPY_DEPTH,
        }
    }
}
