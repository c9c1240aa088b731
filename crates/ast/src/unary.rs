// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Unary Operators
//!
//! [`UnaryOperatorNode`] represents a built-in unary operator applied to one
//! operand: `+x`, `-x`, `NOT a`, `b IS NULL`, `~flags`, `EXISTS (...)`.
//!
//! ## Operator and Binding
//!
//! The node keeps the operator symbol separate from the name of the
//! operation it binds to. One symbol can bind to different implementations
//! depending on the operand type, so the binding phase fills
//! `method_name` (and the two type hints) after the tree is built.
//!
//! ## Construction Shapes
//!
//! - [`UnaryOperatorNode::new`]: operand, operator and binding known up front
//! - [`UnaryOperatorNode::with_operand`]: operand only, the operator is set
//!   later by overload resolution
//! - [`UnaryOperatorNode::all_columns`]: the `COUNT(*)` marker
//!
//! ## Absent Operand
//!
//! Only the all-columns marker may lack an operand. Copy, print, equivalence
//! and traversal all accept a missing operand; [`UnaryOperatorNode::validate`]
//! and [`UnaryOperatorNode::set_operator`] reject it for any other operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::context::ParserContext;
use crate::error::{NodeError, NodeResult};
use crate::factory::NodeFactory;
use crate::node::{NodeKind, QueryTreeNode, SourceSpan, ValueNode};
use crate::print::TreePrinter;
use crate::visitor::Visitor;

/// Unary operator symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `NOT x`
    Not,
    /// `x IS NULL`
    IsNull,
    /// `x IS NOT NULL`
    IsNotNull,
    /// `SQRT(x)`
    Sqrt,
    /// `ABS(x)`
    Abs,
    /// `~x`
    BitNot,
    /// `EXISTS (subquery)`
    Exists,
    /// Aggregate over all columns, `COUNT(*)`; the only operator without an operand
    AllColumns,
    /// Any other operator symbol, stored in lower case
    Other(String),
}

impl UnaryOperator {
    pub fn symbol(&self) -> &str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "not",
            UnaryOperator::IsNull => "is null",
            UnaryOperator::IsNotNull => "is not null",
            UnaryOperator::Sqrt => "sqrt",
            UnaryOperator::Abs => "abs",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Exists => "exists",
            UnaryOperator::AllColumns => "COUNT(*)",
            UnaryOperator::Other(symbol) => symbol,
        }
    }

    /// Operation the operator binds to when nothing more specific is known
    pub fn default_method_name(&self) -> Option<&'static str> {
        let name = match self {
            UnaryOperator::Plus => "plus",
            UnaryOperator::Minus => "minus",
            UnaryOperator::Not => "not",
            UnaryOperator::IsNull => "isNullOp",
            UnaryOperator::IsNotNull => "isNotNull",
            UnaryOperator::Sqrt => "sqrt",
            UnaryOperator::Abs => "absolute",
            UnaryOperator::BitNot => "bitNot",
            UnaryOperator::Exists => "exists",
            UnaryOperator::AllColumns => "countStar",
            UnaryOperator::Other(_) => return None,
        };
        Some(name)
    }

    pub fn requires_operand(&self) -> bool {
        !matches!(self, UnaryOperator::AllColumns)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnaryOperator {
    type Err = NodeError;

    /// Parse an operator symbol, ignoring case and repeated whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return Err(NodeError::invalid_argument(
                "unary operator",
                "operator symbol is empty",
            ));
        }

        let lowered = normalized.to_ascii_lowercase();
        let op = match lowered.as_str() {
            "+" => UnaryOperator::Plus,
            "-" => UnaryOperator::Minus,
            "not" => UnaryOperator::Not,
            "is null" => UnaryOperator::IsNull,
            "is not null" => UnaryOperator::IsNotNull,
            "sqrt" => UnaryOperator::Sqrt,
            "abs" | "absval" => UnaryOperator::Abs,
            "~" => UnaryOperator::BitNot,
            "exists" => UnaryOperator::Exists,
            "count(*)" => UnaryOperator::AllColumns,
            other => UnaryOperator::Other(other.to_string()),
        };
        Ok(op)
    }
}

/// A unary operator applied to an optional operand
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnaryOperatorNode {
    operator: Option<UnaryOperator>,
    method_name: Option<String>,
    result_type_hint: Option<String>,
    receiver_type_hint: Option<String>,
    operand: Option<Box<ValueNode>>,
    span: Option<SourceSpan>,
}

impl UnaryOperatorNode {
    /// Build a fully initialized node
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `operator` or `method_name` is blank.
    pub fn new(operand: ValueNode, operator: &str, method_name: &str) -> NodeResult<Self> {
        let operator = operator.parse::<UnaryOperator>()?;
        if method_name.trim().is_empty() {
            return Err(NodeError::invalid_argument(
                "UnaryOperatorNode",
                format!("operator '{}' has an empty method name", operator),
            ));
        }

        let mut node = Self::with_operand(operand);
        node.operator = Some(operator);
        node.method_name = Some(method_name.to_string());
        Ok(node)
    }

    /// Build a node whose operator is bound by a later pass
    pub fn with_operand(operand: ValueNode) -> Self {
        let mut node = Self::default();
        node.operand = Some(Box::new(operand));
        node
    }

    /// Build the `COUNT(*)` marker
    pub fn all_columns() -> Self {
        let operator = UnaryOperator::AllColumns;
        let mut node = Self::default();
        node.method_name = operator.default_method_name().map(str::to_string);
        node.operator = Some(operator);
        node
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn operator(&self) -> Option<&UnaryOperator> {
        self.operator.as_ref()
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    pub fn result_type_hint(&self) -> Option<&str> {
        self.result_type_hint.as_deref()
    }

    pub fn receiver_type_hint(&self) -> Option<&str> {
        self.receiver_type_hint.as_deref()
    }

    pub fn operand(&self) -> Option<&ValueNode> {
        self.operand.as_deref()
    }

    pub fn operand_mut(&mut self) -> Option<&mut ValueNode> {
        self.operand.as_deref_mut()
    }

    /// Change the operator, used by passes that normalize operators
    ///
    /// # Errors
    ///
    /// `MissingOperand` when the node has no operand and `operator` needs one.
    pub fn set_operator(&mut self, operator: UnaryOperator) -> NodeResult<()> {
        if self.operand.is_none() && operator.requires_operand() {
            return Err(NodeError::MissingOperand {
                operator: operator.to_string(),
            });
        }
        trace!(from = ?self.operator, to = %operator, "rebinding unary operator");
        self.operator = Some(operator);
        Ok(())
    }

    pub fn set_method_name(&mut self, method_name: impl Into<String>) {
        self.method_name = Some(method_name.into());
    }

    pub fn set_result_type_hint(&mut self, hint: impl Into<String>) {
        self.result_type_hint = Some(hint.into());
    }

    pub fn set_receiver_type_hint(&mut self, hint: impl Into<String>) {
        self.receiver_type_hint = Some(hint.into());
    }

    pub fn set_operand(&mut self, operand: ValueNode) {
        self.operand = Some(Box::new(operand));
    }

    /// Install a new operand and hand back the previous one
    pub fn replace_operand(&mut self, operand: ValueNode) -> Option<ValueNode> {
        trace!(kind = %operand.kind(), "replacing unary operand");
        self.operand.replace(Box::new(operand)).map(|old| *old)
    }

    pub fn set_span(&mut self, span: SourceSpan) {
        self.span = Some(span);
    }

    /// Fill in the operator's default binding if none is set
    ///
    /// Returns `true` when a binding was applied.
    pub fn bind_default_method(&mut self) -> bool {
        if self.method_name.is_some() {
            return false;
        }
        match self.operator.as_ref().and_then(UnaryOperator::default_method_name) {
            Some(name) => {
                self.method_name = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    /// Check the operand invariant
    pub fn validate(&self) -> NodeResult<()> {
        match (&self.operator, &self.operand) {
            (Some(op), None) if op.requires_operand() => Err(NodeError::MissingOperand {
                operator: op.to_string(),
            }),
            (None, None) => Err(NodeError::MissingOperand {
                operator: "null".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn accept_children<V>(
        &mut self,
        visitor: &mut V,
        depth: usize,
    ) -> Result<(), V::Error>
    where
        V: Visitor + ?Sized,
    {
        if let Some(operand) = self.operand.take() {
            self.operand = Some(Box::new((*operand).accept_at(visitor, depth + 1)?));
        }
        Ok(())
    }
}

impl Drop for UnaryOperatorNode {
    /// Unlink the operand chain one level at a time so that dropping a deeply
    /// nested tree does not recurse
    fn drop(&mut self) {
        let mut next = self.operand.take();
        while let Some(mut operand) = next {
            next = match operand.as_mut() {
                ValueNode::UnaryOperator(node) => node.operand.take(),
                _ => None,
            };
        }
    }
}

impl QueryTreeNode for UnaryOperatorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::UnaryOperator
    }

    fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// Walks chains of unary operators iteratively, so any nesting depth is
    /// safe to compare
    fn is_equivalent(&self, other: &ValueNode) -> bool {
        let ValueNode::UnaryOperator(other) = other else {
            return false;
        };

        let (mut mine, mut theirs) = (self, other);
        loop {
            if mine.operator != theirs.operator {
                return false;
            }
            match (mine.operand.as_deref(), theirs.operand.as_deref()) {
                (None, None) => return true,
                (Some(a), Some(b)) if std::ptr::eq(a, b) => return true,
                (Some(ValueNode::UnaryOperator(a)), Some(ValueNode::UnaryOperator(b))) => {
                    mine = a;
                    theirs = b;
                }
                (Some(a), Some(b)) => return a.is_equivalent(b),
                _ => return false,
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "operator: {}\nmethodName: {}\n",
            self.operator
                .as_ref()
                .map_or("null", UnaryOperator::symbol),
            self.method_name.as_deref().unwrap_or("null")
        )
    }

    fn print_sub_nodes(&self, depth: usize, printer: &mut TreePrinter) {
        if let Some(operand) = self.operand.as_deref() {
            printer.print_label(depth, "operand:");
            printer.print_node(operand, depth + 1);
        }
    }

    fn copy_from(
        &mut self,
        peer: &Self,
        factory: &dyn NodeFactory,
        ctx: &ParserContext,
    ) -> NodeResult<()> {
        // copy the child first so a failure leaves this node untouched
        let operand = match peer.operand.as_deref() {
            Some(operand) => Some(Box::new(factory.copy_node(operand, ctx)?)),
            None => None,
        };

        self.operator = peer.operator.clone();
        self.method_name = peer.method_name.clone();
        self.result_type_hint = peer.result_type_hint.clone();
        self.receiver_type_hint = peer.receiver_type_hint.clone();
        self.span = peer.span;
        self.operand = operand;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{ColumnReference, Constant, Literal};

    fn column(name: &str) -> ValueNode {
        ColumnReference::new(name).into()
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("-".parse::<UnaryOperator>().unwrap(), UnaryOperator::Minus);
        assert_eq!("NOT".parse::<UnaryOperator>().unwrap(), UnaryOperator::Not);
        assert_eq!(
            "IS  NOT\tNULL".parse::<UnaryOperator>().unwrap(),
            UnaryOperator::IsNotNull
        );
        assert_eq!(
            "count(*)".parse::<UnaryOperator>().unwrap(),
            UnaryOperator::AllColumns
        );
        assert_eq!(
            "|/".parse::<UnaryOperator>().unwrap(),
            UnaryOperator::Other("|/".to_string())
        );
        assert_eq!(
            "LN".parse::<UnaryOperator>().unwrap(),
            UnaryOperator::Other("ln".to_string())
        );
        assert!("   ".parse::<UnaryOperator>().is_err());
    }

    #[test]
    fn test_unknown_operator_case_does_not_affect_equivalence() {
        let upper = UnaryOperatorNode::new(column("x"), "LN", "ln").unwrap();
        let lower = ValueNode::from(UnaryOperatorNode::new(column("x"), "ln", "ln").unwrap());
        assert!(upper.is_equivalent(&lower));
    }

    fn deep_chain(levels: usize) -> ValueNode {
        let mut node = column("x");
        for _ in 0..levels {
            node = UnaryOperatorNode::new(node, "-", "minus").unwrap().into();
        }
        node
    }

    #[test]
    fn test_deep_chain_equivalence_and_drop() {
        let a = deep_chain(200_000);
        let b = deep_chain(200_000);
        assert!(a.is_equivalent(&b));

        let c = deep_chain(199_999);
        assert!(!a.is_equivalent(&c));

        drop(a);
        drop(b);
        drop(c);
    }

    #[test]
    fn test_symbol_round_trip() {
        for op in [
            UnaryOperator::Plus,
            UnaryOperator::Minus,
            UnaryOperator::Not,
            UnaryOperator::IsNull,
            UnaryOperator::IsNotNull,
            UnaryOperator::Sqrt,
            UnaryOperator::Abs,
            UnaryOperator::BitNot,
            UnaryOperator::Exists,
            UnaryOperator::AllColumns,
        ] {
            assert_eq!(op.symbol().parse::<UnaryOperator>().unwrap(), op);
        }
    }

    #[test]
    fn test_new_full_form() {
        let node = UnaryOperatorNode::new(column("x"), "-", "minus").unwrap();
        assert_eq!(node.operator(), Some(&UnaryOperator::Minus));
        assert_eq!(node.method_name(), Some("minus"));
        assert!(node.operand().is_some());
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_blank_arguments() {
        let err = UnaryOperatorNode::new(column("x"), "", "minus").unwrap_err();
        assert!(err.is_construction_error());

        let err = UnaryOperatorNode::new(column("x"), "-", " ").unwrap_err();
        assert!(matches!(err, NodeError::InvalidArgument { .. }));
    }

    #[test]
    fn test_operand_only_form_binds_later() {
        let mut node = UnaryOperatorNode::with_operand(column("flag"));
        assert!(node.operator().is_none());
        assert!(node.method_name().is_none());
        assert!(!node.bind_default_method());

        node.set_operator(UnaryOperator::Not).unwrap();
        assert!(node.bind_default_method());
        assert_eq!(node.method_name(), Some("not"));

        // an explicit binding is not overwritten
        node.set_method_name("negateBoolean");
        assert!(!node.bind_default_method());
        assert_eq!(node.method_name(), Some("negateBoolean"));
    }

    #[test]
    fn test_all_columns_has_no_operand() {
        let node = UnaryOperatorNode::all_columns();
        assert!(node.operand().is_none());
        assert_eq!(node.method_name(), Some("countStar"));
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_set_operator_keeps_operand_invariant() {
        let mut node = UnaryOperatorNode::all_columns();
        let err = node.set_operator(UnaryOperator::Minus).unwrap_err();
        assert_eq!(
            err,
            NodeError::MissingOperand {
                operator: "-".to_string()
            }
        );
        assert_eq!(node.operator(), Some(&UnaryOperator::AllColumns));

        node.set_operand(column("x"));
        assert!(node.set_operator(UnaryOperator::Minus).is_ok());
    }

    #[test]
    fn test_validate_rejects_unbound_without_operand() {
        assert!(UnaryOperatorNode::default().validate().is_err());
    }

    #[test]
    fn test_replace_operand_returns_previous() {
        let mut node = UnaryOperatorNode::new(column("a"), "-", "minus").unwrap();
        let old = node.replace_operand(Constant::new(Literal::Integer(3)).into());

        assert!(matches!(old, Some(ValueNode::ColumnReference(ref c)) if c.column_name == "a"));
        assert!(matches!(node.operand(), Some(ValueNode::Constant(_))));
    }

    #[test]
    fn test_equivalence_ignores_binding_metadata() {
        let mut a = UnaryOperatorNode::new(column("x"), "-", "minus").unwrap();
        a.set_result_type_hint("java.lang.Integer");
        let b = UnaryOperatorNode::new(column("x"), "-", "minusLong")
            .unwrap()
            .with_span(SourceSpan::new(3, 5));

        assert!(a.is_equivalent(&ValueNode::from(b)));
    }

    #[test]
    fn test_equivalence_operand_presence() {
        let star = UnaryOperatorNode::all_columns();
        let mut with_operand = UnaryOperatorNode::all_columns();
        with_operand.set_operand(column("x"));

        assert!(star.is_equivalent(&ValueNode::from(UnaryOperatorNode::all_columns())));
        assert!(!star.is_equivalent(&ValueNode::from(with_operand)));
    }

    #[test]
    fn test_describe_unbound() {
        let node = UnaryOperatorNode::with_operand(column("x"));
        assert_eq!(node.describe(), "operator: null\nmethodName: null\n");
    }

    #[test]
    fn test_tree_print_nests_operand() {
        let node = UnaryOperatorNode::new(column("price"), "-", "minus").unwrap();
        let expected = "\
UnaryOperator
operator: -
methodName: minus
operand:
  ColumnReference
  tableName: null
  columnName: price
";
        assert_eq!(node.tree_print(0), expected);
    }

    #[test]
    fn test_tree_print_without_operand() {
        let out = UnaryOperatorNode::all_columns().tree_print(1);
        assert_eq!(
            out,
            "  UnaryOperator\n  operator: COUNT(*)\n  methodName: countStar\n"
        );
    }
}
