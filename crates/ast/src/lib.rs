// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqltree - Expression Nodes
//!
//! This crate provides the expression-node layer of the SQL front-end AST.
//! It is the substrate later phases build on:
//! - Binding fills operator bindings and type hints in place
//! - Rewrite passes walk and replace subtrees through [`Visitor`]
//! - Plan caching compares trees with [`QueryTreeNode::is_equivalent`]
//! - Plan cloning copies trees through a [`NodeFactory`]
//!
//! ## Pipeline
//!
//! ```text
//! Grammar → Node construction → Binding → Rewrite passes → Code generation
//! ```
//!
//! ## Usage
//!
//! ```
//! use sqltree_ast::{
//!     ColumnReference, ParserContext, QueryTreeNode, UnaryOperatorNode, ValueNode,
//! };
//!
//! let ctx = ParserContext::default();
//! let neg: ValueNode = UnaryOperatorNode::new(ColumnReference::new("price").into(), "-", "minus")
//!     .unwrap()
//!     .into();
//!
//! let copy = neg.deep_copy(&ctx).unwrap();
//! assert!(copy.is_equivalent(&neg));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod leaf;
pub mod node;
pub mod print;
pub mod unary;
pub mod visitor;
pub mod visitors;

// Re-export commonly used types
pub use config::ParserConfig;
pub use context::{Dialect, ParserContext};
pub use error::{NodeError, NodeResult};
pub use factory::{DefaultNodeFactory, NodeFactory, allocate_and_copy};
pub use leaf::{ColumnReference, Constant, Literal};
pub use node::{NodeKind, QueryTreeNode, SourceSpan, ValueNode};
pub use print::TreePrinter;
pub use unary::{UnaryOperator, UnaryOperatorNode};
pub use visitor::Visitor;
pub use visitors::{CollectNodesVisitor, CollectedNode, HasNodeVisitor};
