// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Visitor Protocol
//!
//! Traversal is driven by [`ValueNode::accept`]. Each call visits the node,
//! then its children, and returns the node that should occupy the position
//! afterwards. Parents store that return value in place of the child they
//! passed in, so a rewrite pass swaps a subtree simply by returning a
//! replacement from [`Visitor::visit`].
//!
//! ## Order
//!
//! Nodes are visited before their children (pre-order) unless
//! [`Visitor::visit_children_first`] asks for the opposite on a given node.
//!
//! ## Replacement
//!
//! A replacement returned by `visit` is installed as-is. Its subtree is not
//! traversed again, which keeps a visitor that wraps nodes
//! (`x` -> `NOT x`) from wrapping the same operand forever.
//!
//! This departs from "visit the node, then recurse into its children": once
//! a node is replaced, the children of the original node are not visited
//! either. The original is dropped unless the visitor moved it into the
//! replacement; a visitor that wants the old children walked calls `accept`
//! on them itself before building the replacement.
//!
//! ## Depth
//!
//! Nesting deeper than [`Visitor::max_depth`] fails with
//! [`NodeError::DepthLimitExceeded`], converted into the visitor's error
//! type, instead of exhausting the stack.
//!
//! ## Early Exit
//!
//! - [`Visitor::skip_children`]: do not descend below this node
//! - [`Visitor::stop_traversal`]: stop the whole walk; checked before the
//!   node is visited, before descending and after children return
//!
//! ## Example
//!
//! ```
//! use sqltree_ast::{ColumnReference, UnaryOperatorNode, ValueNode, Visitor};
//!
//! /// Rename every column to upper case
//! struct Upper;
//!
//! impl Visitor for Upper {
//!     type Error = sqltree_ast::NodeError;
//!
//!     fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
//!         if let ValueNode::ColumnReference(col) = node {
//!             col.column_name = col.column_name.to_uppercase();
//!         }
//!         Ok(None)
//!     }
//! }
//!
//! let tree: ValueNode = UnaryOperatorNode::new(ColumnReference::new("x").into(), "-", "minus")
//!     .unwrap()
//!     .into();
//! let tree = tree.accept(&mut Upper).unwrap();
//! let operand = tree.as_unary().and_then(|n| n.operand()).unwrap();
//! assert!(matches!(operand, ValueNode::ColumnReference(c) if c.column_name == "X"));
//! ```

use tracing::warn;

use crate::config::ParserConfig;
use crate::error::NodeError;
use crate::node::ValueNode;

/// Deepest nesting [`ValueNode::accept`] follows unless the visitor says otherwise
pub const DEFAULT_MAX_VISIT_DEPTH: usize = ParserConfig::DEFAULT_MAX_COPY_DEPTH;

/// Callbacks driving a tree walk
pub trait Visitor {
    /// Error type raised by `visit`; passed through `accept` unchanged
    ///
    /// Must absorb [`NodeError`] so that the depth guard can report through it.
    type Error: From<NodeError>;

    /// Process one node
    ///
    /// The node may be modified in place. Returning `Some(replacement)`
    /// puts `replacement` in the node's position instead.
    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error>;

    /// Do not descend into the children of `node`
    fn skip_children(&self, _node: &ValueNode) -> bool {
        false
    }

    /// Stop the whole traversal
    fn stop_traversal(&self) -> bool {
        false
    }

    /// Visit the children of `node` before `node` itself
    fn visit_children_first(&self, _node: &ValueNode) -> bool {
        false
    }

    /// Deepest nesting the walk may reach, the root being level 1
    fn max_depth(&self) -> usize {
        DEFAULT_MAX_VISIT_DEPTH
    }
}

impl ValueNode {
    /// Walk this subtree with `visitor`
    ///
    /// Returns the node that occupies this position after the walk: `self`
    /// (possibly modified) or the visitor's replacement.
    ///
    /// # Errors
    ///
    /// Whatever `visit` raises, or `DepthLimitExceeded` when the subtree is
    /// nested deeper than [`Visitor::max_depth`].
    pub fn accept<V>(self, visitor: &mut V) -> Result<ValueNode, V::Error>
    where
        V: Visitor + ?Sized,
    {
        self.accept_at(visitor, 1)
    }

    pub(crate) fn accept_at<V>(self, visitor: &mut V, depth: usize) -> Result<ValueNode, V::Error>
    where
        V: Visitor + ?Sized,
    {
        let mut node = self;
        if visitor.stop_traversal() {
            return Ok(node);
        }

        let limit = visitor.max_depth();
        if depth > limit {
            warn!(depth, limit, "visit depth limit exceeded");
            return Err(NodeError::DepthLimitExceeded { depth, limit }.into());
        }

        let skip_children = visitor.skip_children(&node);

        if visitor.visit_children_first(&node) {
            if !skip_children {
                node.accept_children(visitor, depth)?;
            }
            if visitor.stop_traversal() {
                return Ok(node);
            }
            return Ok(visitor.visit(&mut node)?.unwrap_or(node));
        }

        if let Some(replacement) = visitor.visit(&mut node)? {
            return Ok(replacement);
        }
        if !skip_children && !visitor.stop_traversal() {
            node.accept_children(visitor, depth)?;
        }
        Ok(node)
    }

    fn accept_children<V>(&mut self, visitor: &mut V, depth: usize) -> Result<(), V::Error>
    where
        V: Visitor + ?Sized,
    {
        match self {
            ValueNode::ColumnReference(_) | ValueNode::Constant(_) => Ok(()),
            ValueNode::UnaryOperator(node) => node.accept_children(visitor, depth),
        }
    }
}
