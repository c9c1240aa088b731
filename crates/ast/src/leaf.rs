// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Leaf expression variants: column references and constants

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ParserContext;
use crate::error::NodeResult;
use crate::factory::NodeFactory;
use crate::node::{NodeKind, QueryTreeNode, SourceSpan, ValueNode};

/// Column reference
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReference {
    /// Optional table/alias name
    pub table_name: Option<String>,
    /// Column name
    pub column_name: String,
    pub span: Option<SourceSpan>,
}

impl ColumnReference {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            table_name: None,
            column_name: column_name.into(),
            span: None,
        }
    }

    pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn qualified(&self) -> String {
        match &self.table_name {
            Some(table) => format!("{}.{}", table, self.column_name),
            None => self.column_name.clone(),
        }
    }
}

impl QueryTreeNode for ColumnReference {
    fn kind(&self) -> NodeKind {
        NodeKind::ColumnReference
    }

    fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    fn is_equivalent(&self, other: &ValueNode) -> bool {
        match other {
            ValueNode::ColumnReference(other) => {
                self.table_name == other.table_name && self.column_name == other.column_name
            }
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!(
            "tableName: {}\ncolumnName: {}\n",
            self.table_name.as_deref().unwrap_or("null"),
            self.column_name
        )
    }

    fn copy_from(
        &mut self,
        peer: &Self,
        _factory: &dyn NodeFactory,
        _ctx: &ParserContext,
    ) -> NodeResult<()> {
        self.table_name = peer.table_name.clone();
        self.column_name = peer.column_name.clone();
        self.span = peer.span;
        Ok(())
    }
}

/// Literal value
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Literal {
    /// Value equality used by equivalence; floats compare by bit pattern so
    /// that a NaN constant is equivalent to itself
    fn same_value(&self, other: &Literal) -> bool {
        match (self, other) {
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("NULL"),
            Literal::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// Literal constant node
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub value: Literal,
    pub span: Option<SourceSpan>,
}

impl Constant {
    pub fn new(value: Literal) -> Self {
        Self { value, span: None }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }
}

impl QueryTreeNode for Constant {
    fn kind(&self) -> NodeKind {
        NodeKind::Constant
    }

    fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    fn is_equivalent(&self, other: &ValueNode) -> bool {
        match other {
            ValueNode::Constant(other) => self.value.same_value(&other.value),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("value: {}\n", self.value)
    }

    fn copy_from(
        &mut self,
        peer: &Self,
        _factory: &dyn NodeFactory,
        _ctx: &ParserContext,
    ) -> NodeResult<()> {
        self.value = peer.value.clone();
        self.span = peer.span;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ref() {
        let col = ColumnReference::new("id");
        assert_eq!(col.qualified(), "id");
        assert!(col.table_name.is_none());

        let qualified = col.with_table("users");
        assert_eq!(qualified.qualified(), "users.id");
        assert_eq!(qualified.table_name.as_deref(), Some("users"));
    }

    #[test]
    fn test_column_equivalence_ignores_span() {
        let a = ColumnReference::new("id").with_span(SourceSpan::new(0, 2));
        let b = ValueNode::from(ColumnReference::new("id").with_span(SourceSpan::new(40, 42)));
        assert!(a.is_equivalent(&b));

        let c = ValueNode::from(ColumnReference::new("id").with_table("users"));
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn test_constant_nan_is_equivalent_to_itself() {
        let nan = Constant::new(Literal::Float(f64::NAN));
        let other = ValueNode::from(Constant::new(Literal::Float(f64::NAN)));
        assert!(nan.is_equivalent(&other));
    }

    #[test]
    fn test_constant_equivalence_distinguishes_types() {
        let one = Constant::new(Literal::Integer(1));
        assert!(!one.is_equivalent(&ValueNode::from(Constant::new(Literal::Float(1.0)))));
        assert!(!one.is_equivalent(&ValueNode::from(Constant::new(Literal::Boolean(true)))));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Boolean(false).to_string(), "FALSE");
        assert_eq!(Literal::Integer(-7).to_string(), "-7");
        assert_eq!(Literal::String("it's".to_string()).to_string(), "'it''s'");
    }
}
