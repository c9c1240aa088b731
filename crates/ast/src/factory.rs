// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Deep Copy
//!
//! Copying is a two-step protocol:
//!
//! 1. allocate a blank node of the source's variant ([`ValueNode::empty`])
//! 2. fill it with [`QueryTreeNode::copy_from`], which copies owned children
//!    back through the factory
//!
//! The result shares nothing with the source.

use std::cell::Cell;

use tracing::{instrument, warn};

use crate::context::ParserContext;
use crate::error::{NodeError, NodeResult};
use crate::node::{QueryTreeNode, ValueNode};

/// Clone operation used by `copy_from` for owned children
pub trait NodeFactory {
    /// Return a deep, independent copy of `node`
    fn copy_node(&self, node: &ValueNode, ctx: &ParserContext) -> NodeResult<ValueNode>;
}

/// Allocate a node of `node`'s variant and fill it from `node`
///
/// Children are copied through `factory`, so wrappers that implement
/// [`NodeFactory`] on top of this function see every nested copy.
pub fn allocate_and_copy(
    factory: &dyn NodeFactory,
    node: &ValueNode,
    ctx: &ParserContext,
) -> NodeResult<ValueNode> {
    let mut copy = ValueNode::empty(node.kind());
    copy.copy_from(node, factory, ctx)?;
    Ok(copy)
}

/// Factory that bounds copy recursion by [`ParserContext::max_copy_depth`]
#[derive(Debug, Default)]
pub struct DefaultNodeFactory {
    depth: Cell<usize>,
}

impl DefaultNodeFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeFactory for DefaultNodeFactory {
    #[instrument(level = "trace", skip_all, fields(kind = %node.kind(), dialect = %ctx.dialect()))]
    fn copy_node(&self, node: &ValueNode, ctx: &ParserContext) -> NodeResult<ValueNode> {
        let depth = self.depth.get() + 1;
        let limit = ctx.max_copy_depth();
        if depth > limit {
            warn!(depth, limit, "copy depth limit exceeded");
            return Err(NodeError::DepthLimitExceeded { depth, limit });
        }

        self.depth.set(depth);
        let result = allocate_and_copy(self, node, ctx);
        self.depth.set(depth - 1);
        result
    }
}

impl ValueNode {
    /// Deep-copy this subtree with a fresh [`DefaultNodeFactory`]
    pub fn deep_copy(&self, ctx: &ParserContext) -> NodeResult<ValueNode> {
        DefaultNodeFactory::new().copy_node(self, ctx)
    }
}
