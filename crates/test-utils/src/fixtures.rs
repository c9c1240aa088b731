// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: small expression trees built the way the grammar would

use sqltree_ast::{
    ColumnReference, Constant, Literal, SourceSpan, UnaryOperatorNode, ValueNode,
};

/// Builders for sample nodes
///
/// Fixtures panic on construction errors; they only use valid arguments.
pub struct NodeFixtures;

impl NodeFixtures {
    // ===== Leaves =====

    pub fn column(name: &str) -> ValueNode {
        ColumnReference::new(name).into()
    }

    pub fn qualified_column(table: &str, name: &str) -> ValueNode {
        ColumnReference::new(name).with_table(table).into()
    }

    /// Column reference with a source span, for equivalence-vs-position checks
    pub fn column_at(name: &str, begin: usize) -> ValueNode {
        ColumnReference::new(name)
            .with_span(SourceSpan::new(begin, begin + name.len()))
            .into()
    }

    pub fn integer(value: i64) -> ValueNode {
        Constant::new(Literal::Integer(value)).into()
    }

    pub fn string(value: &str) -> ValueNode {
        Constant::new(Literal::String(value.to_string())).into()
    }

    // ===== Unary operators =====

    pub fn unary(operand: ValueNode, operator: &str, method_name: &str) -> ValueNode {
        UnaryOperatorNode::new(operand, operator, method_name)
            .expect("fixture arguments are valid")
            .into()
    }

    /// `-operand`
    pub fn negate(operand: ValueNode) -> ValueNode {
        Self::unary(operand, "-", "minus")
    }

    /// `NOT operand`
    pub fn not(operand: ValueNode) -> ValueNode {
        Self::unary(operand, "not", "not")
    }

    /// `operand IS NULL`
    pub fn is_null(operand: ValueNode) -> ValueNode {
        Self::unary(operand, "is null", "isNullOp")
    }

    /// `COUNT(*)`
    pub fn count_star() -> ValueNode {
        UnaryOperatorNode::all_columns().into()
    }

    /// Operand-only node awaiting overload resolution
    pub fn unbound(operand: ValueNode) -> ValueNode {
        UnaryOperatorNode::with_operand(operand).into()
    }

    // ===== Composite samples =====

    /// `NOT (email IS NULL)`
    pub fn not_is_null(column: &str) -> ValueNode {
        Self::not(Self::is_null(Self::column(column)))
    }

    /// `-(-(...(-x)))` with `depth` negations
    pub fn negation_chain(column: &str, depth: usize) -> ValueNode {
        let mut node = Self::column(column);
        for _ in 0..depth {
            node = Self::negate(node);
        }
        node
    }
}
