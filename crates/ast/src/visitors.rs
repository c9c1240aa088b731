// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Generic read-only visitors

use crate::error::NodeError;
use crate::node::{NodeKind, QueryTreeNode, SourceSpan, ValueNode};
use crate::visitor::Visitor;

/// Snapshot of a node seen by [`CollectNodesVisitor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedNode {
    pub kind: NodeKind,
    pub span: Option<SourceSpan>,
    pub description: String,
}

/// Collects every node of a given kind, in visiting order
#[derive(Debug)]
pub struct CollectNodesVisitor {
    kind: NodeKind,
    skip_over: Option<NodeKind>,
    collected: Vec<CollectedNode>,
}

impl CollectNodesVisitor {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            skip_over: None,
            collected: Vec::new(),
        }
    }

    /// Do not look below nodes of `kind`
    pub fn skip_over(mut self, kind: NodeKind) -> Self {
        self.skip_over = Some(kind);
        self
    }

    pub fn collected(&self) -> &[CollectedNode] {
        &self.collected
    }

    pub fn into_collected(self) -> Vec<CollectedNode> {
        self.collected
    }
}

impl Visitor for CollectNodesVisitor {
    type Error = NodeError;

    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
        if node.kind() == self.kind {
            self.collected.push(CollectedNode {
                kind: node.kind(),
                span: node.span(),
                description: node.describe(),
            });
        }
        Ok(None)
    }

    fn skip_children(&self, node: &ValueNode) -> bool {
        self.skip_over == Some(node.kind())
    }
}

/// Answers whether a subtree contains a node of a given kind
///
/// The traversal stops at the first match.
#[derive(Debug)]
pub struct HasNodeVisitor {
    kind: NodeKind,
    skip_over: Option<NodeKind>,
    found: bool,
}

impl HasNodeVisitor {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            skip_over: None,
            found: false,
        }
    }

    pub fn skip_over(mut self, kind: NodeKind) -> Self {
        self.skip_over = Some(kind);
        self
    }

    pub fn has_node(&self) -> bool {
        self.found
    }

    /// Forget a previous hit so the visitor can be reused
    pub fn reset(&mut self) {
        self.found = false;
    }
}

impl Visitor for HasNodeVisitor {
    type Error = NodeError;

    fn visit(&mut self, node: &mut ValueNode) -> Result<Option<ValueNode>, Self::Error> {
        if node.kind() == self.kind {
            self.found = true;
        }
        Ok(None)
    }

    fn skip_children(&self, node: &ValueNode) -> bool {
        self.skip_over == Some(node.kind())
    }

    fn stop_traversal(&self) -> bool {
        self.found
    }
}
