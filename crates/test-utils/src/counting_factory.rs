// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Factory that records every copy request

use std::cell::RefCell;

use sqltree_ast::{
    NodeFactory, NodeKind, NodeResult, ParserContext, QueryTreeNode, ValueNode, allocate_and_copy,
};

/// [`NodeFactory`] that logs the kind of every node it is asked to copy
#[derive(Debug, Default)]
pub struct CountingFactory {
    requests: RefCell<Vec<NodeKind>>,
}

impl CountingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `copy_node` calls so far, nested ones included
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Kinds in request order
    pub fn requests(&self) -> Vec<NodeKind> {
        self.requests.borrow().clone()
    }
}

impl NodeFactory for CountingFactory {
    fn copy_node(&self, node: &ValueNode, ctx: &ParserContext) -> NodeResult<ValueNode> {
        self.requests.borrow_mut().push(node.kind());
        allocate_and_copy(self, node, ctx)
    }
}
