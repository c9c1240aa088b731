// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Node Contract
//!
//! Every node of the expression tree satisfies [`QueryTreeNode`]: it reports
//! its variant, describes itself for tree dumps, fills itself from a peer of
//! the same variant and compares structurally against any other node.
//!
//! ## Expression Family
//!
//! [`ValueNode`] is the closed set of value-producing variants. Operands of
//! composite nodes are always `ValueNode`s, owned through a `Box`:
//!
//! ```text
//! ValueNode::UnaryOperator {
//!   operator: Not,
//!   operand: Box<ValueNode::UnaryOperator {
//!     operator: IsNull,
//!     operand: Box<ValueNode::ColumnReference("email")>
//!   }>
//! }
//! ```
//!
//! Represents: `NOT (email IS NULL)`
//!
//! ## Equality vs Equivalence
//!
//! The derived `PartialEq` compares every field, including source spans and
//! binding metadata. [`QueryTreeNode::is_equivalent`] compares only the
//! logical value of the tree and is what plan caching should use.
//!
//! ## Nesting Depth
//!
//! [`QueryTreeNode::is_equivalent`], [`ValueNode::depth`] and dropping a tree
//! walk operand chains iteratively. Traversal and deep copy stop with
//! `DepthLimitExceeded` at their configured limits. Tree printing, the
//! derived `PartialEq`/`Debug` and serde serialization still recurse once
//! per level and assume trees no deeper than those limits; `serde_json`
//! refuses to deserialize past 128 levels on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ParserContext;
use crate::error::{NodeError, NodeResult};
use crate::factory::NodeFactory;
use crate::leaf::{ColumnReference, Constant};
use crate::print::TreePrinter;
use crate::unary::UnaryOperatorNode;

/// Concrete node variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    ColumnReference,
    Constant,
    UnaryOperator,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::ColumnReference => "ColumnReference",
            NodeKind::Constant => "Constant",
            NodeKind::UnaryOperator => "UnaryOperator",
        };
        f.write_str(name)
    }
}

/// Byte range of a node in the SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub begin_offset: usize,
    pub end_offset: usize,
}

impl SourceSpan {
    pub fn new(begin_offset: usize, end_offset: usize) -> Self {
        Self {
            begin_offset,
            end_offset,
        }
    }
}

/// Capabilities shared by every tree node
pub trait QueryTreeNode {
    /// The concrete variant of this node
    fn kind(&self) -> NodeKind;

    /// Source position, if the parser recorded one
    fn span(&self) -> Option<SourceSpan>;

    /// Structural equality ignoring source positions and object identity
    fn is_equivalent(&self, other: &ValueNode) -> bool;

    /// This node's own fields, one `name: value` per line
    fn describe(&self) -> String;

    /// Print the children of this node below `depth`
    fn print_sub_nodes(&self, _depth: usize, _printer: &mut TreePrinter) {}

    /// Fill this node with a deep copy of `peer`
    ///
    /// Owned children are copied through `factory` so that the result never
    /// shares a subtree with `peer`.
    fn copy_from(
        &mut self,
        peer: &Self,
        factory: &dyn NodeFactory,
        ctx: &ParserContext,
    ) -> NodeResult<()>
    where
        Self: Sized;

    /// Render this node and its subtree starting at `depth`
    fn tree_print(&self, depth: usize) -> String {
        let mut printer = TreePrinter::new();
        printer.print_node(self, depth);
        printer.finish()
    }
}

/// A value-producing expression node
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum ValueNode {
    /// Column reference (e.g., `users.id`)
    ColumnReference(ColumnReference),

    /// Literal constant
    Constant(Constant),

    /// Unary operator application (e.g., `-x`, `NOT a`, `b IS NULL`)
    UnaryOperator(UnaryOperatorNode),
}

impl ValueNode {
    /// Allocate a blank node of the given variant, ready for `copy_from`
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::ColumnReference => ValueNode::ColumnReference(ColumnReference::default()),
            NodeKind::Constant => ValueNode::Constant(Constant::default()),
            NodeKind::UnaryOperator => ValueNode::UnaryOperator(UnaryOperatorNode::default()),
        }
    }

    /// Check if `other` is the same concrete variant
    pub fn same_kind(&self, other: &ValueNode) -> bool {
        self.kind() == other.kind()
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let Some(operand) = node.as_unary().and_then(UnaryOperatorNode::operand) {
            depth += 1;
            node = operand;
        }
        depth
    }

    pub fn as_unary(&self) -> Option<&UnaryOperatorNode> {
        match self {
            ValueNode::UnaryOperator(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_unary_mut(&mut self) -> Option<&mut UnaryOperatorNode> {
        match self {
            ValueNode::UnaryOperator(node) => Some(node),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn QueryTreeNode {
        match self {
            ValueNode::ColumnReference(node) => node,
            ValueNode::Constant(node) => node,
            ValueNode::UnaryOperator(node) => node,
        }
    }
}

impl QueryTreeNode for ValueNode {
    fn kind(&self) -> NodeKind {
        self.inner().kind()
    }

    fn span(&self) -> Option<SourceSpan> {
        self.inner().span()
    }

    fn is_equivalent(&self, other: &ValueNode) -> bool {
        std::ptr::eq(self, other) || self.inner().is_equivalent(other)
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }

    fn print_sub_nodes(&self, depth: usize, printer: &mut TreePrinter) {
        self.inner().print_sub_nodes(depth, printer)
    }

    fn copy_from(
        &mut self,
        peer: &ValueNode,
        factory: &dyn NodeFactory,
        ctx: &ParserContext,
    ) -> NodeResult<()> {
        match (self, peer) {
            (ValueNode::ColumnReference(dst), ValueNode::ColumnReference(src)) => {
                dst.copy_from(src, factory, ctx)
            }
            (ValueNode::Constant(dst), ValueNode::Constant(src)) => dst.copy_from(src, factory, ctx),
            (ValueNode::UnaryOperator(dst), ValueNode::UnaryOperator(src)) => {
                dst.copy_from(src, factory, ctx)
            }
            (dst, src) => Err(NodeError::VariantMismatch {
                expected: dst.kind(),
                found: src.kind(),
            }),
        }
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree_print(0))
    }
}

impl From<ColumnReference> for ValueNode {
    fn from(node: ColumnReference) -> Self {
        ValueNode::ColumnReference(node)
    }
}

impl From<Constant> for ValueNode {
    fn from(node: Constant) -> Self {
        ValueNode::Constant(node)
    }
}

impl From<UnaryOperatorNode> for ValueNode {
    fn from(node: UnaryOperatorNode) -> Self {
        ValueNode::UnaryOperator(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultNodeFactory;
    use crate::leaf::Literal;

    #[test]
    fn test_empty_matches_kind() {
        for kind in [
            NodeKind::ColumnReference,
            NodeKind::Constant,
            NodeKind::UnaryOperator,
        ] {
            assert_eq!(ValueNode::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn test_copy_from_variant_mismatch() {
        let factory = DefaultNodeFactory::new();
        let ctx = ParserContext::default();
        let source = ValueNode::from(ColumnReference::new("id"));
        let mut dest = ValueNode::empty(NodeKind::Constant);

        let err = dest.copy_from(&source, &factory, &ctx).unwrap_err();
        assert_eq!(
            err,
            NodeError::VariantMismatch {
                expected: NodeKind::Constant,
                found: NodeKind::ColumnReference,
            }
        );
        // untouched
        assert_eq!(dest, ValueNode::empty(NodeKind::Constant));
    }

    #[test]
    fn test_equivalence_across_variants() {
        let col = ValueNode::from(ColumnReference::new("id"));
        let lit = ValueNode::from(Constant::new(Literal::Integer(1)));
        assert!(col.is_equivalent(&col));
        assert!(!col.is_equivalent(&lit));
        assert!(!lit.is_equivalent(&col));
    }

    #[test]
    fn test_depth() {
        let col = ValueNode::from(ColumnReference::new("x"));
        assert_eq!(col.depth(), 1);

        let neg = UnaryOperatorNode::new(col, "-", "minus").unwrap();
        let not = UnaryOperatorNode::new(neg.into(), "not", "not").unwrap();
        assert_eq!(ValueNode::from(not).depth(), 3);
        assert_eq!(ValueNode::from(UnaryOperatorNode::all_columns()).depth(), 1);
    }

    #[test]
    fn test_display_uses_tree_print() {
        let node = ValueNode::from(Constant::new(Literal::String("a".to_string())));
        assert_eq!(node.to_string(), node.tree_print(0));
        assert!(node.to_string().starts_with("Constant\n"));
    }
}
