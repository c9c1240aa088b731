// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for node construction and deep copy

use serde::Serialize;

use crate::node::NodeKind;

/// Result type alias for node operations
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors raised by the node layer
///
/// Every variant is fail-fast: the node that raised it must be discarded by
/// the caller. Errors raised by a visitor are not wrapped here; they travel
/// through [`crate::ValueNode::accept`] as the visitor's own error type.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum NodeError {
    /// `copy_from` was given a peer of another concrete variant
    #[error("Cannot copy a {found} node into a {expected} node")]
    VariantMismatch { expected: NodeKind, found: NodeKind },

    /// Malformed initialization argument
    #[error("Invalid argument for {context}: {message}")]
    InvalidArgument { context: String, message: String },

    /// A unary operator other than the all-columns marker has no operand
    #[error("Operator '{operator}' requires an operand")]
    MissingOperand { operator: String },

    /// Deep copy nested deeper than the configured limit
    #[error("Copy depth limit exceeded (depth: {depth}, limit: {limit})")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// Parser configuration could not be loaded
    #[error("Invalid parser configuration: {message}")]
    InvalidConfig { message: String },
}

impl NodeError {
    pub(crate) fn invalid_argument(context: &str, message: impl Into<String>) -> Self {
        NodeError::InvalidArgument {
            context: context.to_string(),
            message: message.into(),
        }
    }

    /// Check if this error comes from building or filling a node
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            NodeError::VariantMismatch { .. }
                | NodeError::InvalidArgument { .. }
                | NodeError::MissingOperand { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variant_mismatch() {
        let err = NodeError::VariantMismatch {
            expected: NodeKind::UnaryOperator,
            found: NodeKind::ColumnReference,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("ColumnReference"));
        assert!(msg.contains("UnaryOperator"));
    }

    #[test]
    fn test_error_display_missing_operand() {
        let err = NodeError::MissingOperand {
            operator: "-".to_string(),
        };
        assert_eq!(err.to_string(), "Operator '-' requires an operand");
    }

    #[test]
    fn test_construction_errors() {
        assert!(
            NodeError::invalid_argument("UnaryOperatorNode", "empty operator").is_construction_error()
        );
        assert!(
            !NodeError::DepthLimitExceeded {
                depth: 11,
                limit: 10
            }
            .is_construction_error()
        );
        assert!(
            !NodeError::InvalidConfig {
                message: "bad".to_string()
            }
            .is_construction_error()
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = NodeError::VariantMismatch {
            expected: NodeKind::Constant,
            found: NodeKind::UnaryOperator,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["VariantMismatch"]["expected"], "Constant");
        assert_eq!(json["VariantMismatch"]["found"], "UnaryOperator");
    }
}
