// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Ambient parser state consulted while nodes are copied

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::NodeResult;

/// SQL dialect the tree was parsed for
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Generic => "generic",
            Dialect::MySQL => "mysql",
            Dialect::PostgreSQL => "postgresql",
        };
        f.write_str(name)
    }
}

/// Read-only session state shared by one compilation pipeline
///
/// Node operations only ever take `&ParserContext`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserContext {
    config: ParserConfig,
}

impl ParserContext {
    /// Build a context from a configuration, validating it first
    pub fn new(config: ParserConfig) -> NodeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Deepest subtree a deep copy may descend into
    pub fn max_copy_depth(&self) -> usize {
        self.config.max_copy_depth
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = ParserContext::default();
        assert_eq!(ctx.dialect(), Dialect::Generic);
        assert_eq!(ctx.max_copy_depth(), ParserConfig::DEFAULT_MAX_COPY_DEPTH);
    }

    #[test]
    fn test_context_from_config() {
        let ctx = ParserContext::new(ParserConfig {
            dialect: Dialect::PostgreSQL,
            max_copy_depth: 16,
        })
        .unwrap();
        assert_eq!(ctx.dialect(), Dialect::PostgreSQL);
        assert_eq!(ctx.max_copy_depth(), 16);
        assert_eq!(ctx.dialect().to_string(), "postgresql");
    }

    #[test]
    fn test_context_rejects_invalid_config() {
        let err = ParserContext::new(ParserConfig {
            dialect: Dialect::MySQL,
            max_copy_depth: 0,
        })
        .unwrap_err();
        assert!(matches!(err, crate::NodeError::InvalidConfig { .. }));
    }
}
