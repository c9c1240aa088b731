// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Visitors with scripted behaviour for traversal tests

use sqltree_ast::{NodeError, NodeKind, QueryTreeNode, ValueNode, Visitor};

/// Records the kind of every visited node
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    pub visited: Vec<NodeKind>,
    skip: Option<NodeKind>,
    post_order: bool,
}

impl RecordingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not descend below nodes of `kind`
    pub fn skipping(kind: NodeKind) -> Self {
        Self {
            skip: Some(kind),
            ..Self::default()
        }
    }

    /// Visit children before their parent
    pub fn post_order() -> Self {
        Self {
            post_order: true,
            ..Self::default()
        }
    }
}

impl Visitor for RecordingVisitor {
    type Error = NodeError;

    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
        self.visited.push(node.kind());
        Ok(None)
    }

    fn skip_children(&self, node: &ValueNode) -> bool {
        self.skip == Some(node.kind())
    }

    fn visit_children_first(&self, _node: &ValueNode) -> bool {
        self.post_order
    }
}

/// Replaces every reference to one column with a fixed node
pub struct ReplaceColumnVisitor<F> {
    column: String,
    make_replacement: F,
    pub replaced: usize,
}

impl<F> ReplaceColumnVisitor<F>
where
    F: FnMut() -> ValueNode,
{
    pub fn new(column: impl Into<String>, make_replacement: F) -> Self {
        Self {
            column: column.into(),
            make_replacement,
            replaced: 0,
        }
    }
}

impl<F> Visitor for ReplaceColumnVisitor<F>
where
    F: FnMut() -> ValueNode,
{
    type Error = NodeError;

    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
        match node {
            ValueNode::ColumnReference(col) if col.column_name == self.column => {
                self.replaced += 1;
                Ok(Some((self.make_replacement)()))
            }
            _ => Ok(None),
        }
    }
}

/// Stops the traversal after a fixed number of visits
#[derive(Debug)]
pub struct StopAfterVisitor {
    limit: usize,
    pub visited: Vec<NodeKind>,
}

impl StopAfterVisitor {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            visited: Vec::new(),
        }
    }
}

impl Visitor for StopAfterVisitor {
    type Error = NodeError;

    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
        self.visited.push(node.kind());
        Ok(None)
    }

    fn stop_traversal(&self) -> bool {
        self.visited.len() >= self.limit
    }
}
