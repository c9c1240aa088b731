// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Indentation-based tree dumps for diagnostics
//!
//! The output is deterministic so it can be compared in tests, but it is
//! never consulted by equivalence.
//!
//! ```text
//! UnaryOperator
//! operator: -
//! methodName: minus
//! operand:
//!   ColumnReference
//!   tableName: null
//!   columnName: price
//! ```

use crate::node::QueryTreeNode;

const INDENT: &str = "  ";

/// Accumulates the text of a tree dump
#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a node header, its own fields, then its children
    pub fn print_node<N>(&mut self, node: &N, depth: usize)
    where
        N: QueryTreeNode + ?Sized,
    {
        self.line(depth, &node.kind().to_string());
        for field in node.describe().lines() {
            self.line(depth, field);
        }
        node.print_sub_nodes(depth, self);
    }

    /// Print the label that introduces a child subtree
    pub fn print_label(&mut self, depth: usize, label: &str) {
        self.line(depth, label);
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
