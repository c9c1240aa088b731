// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Node-specific test helpers and custom assertions

use sqltree_ast::{QueryTreeNode, UnaryOperator, ValueNode};

/// Custom assertion helpers for node testing
pub struct NodeAssertions;

impl NodeAssertions {
    /// Assert that two trees are structurally equivalent
    pub fn assert_equivalent(left: &ValueNode, right: &ValueNode) {
        assert!(
            left.is_equivalent(right),
            "Expected equivalent trees:\n{}\n---\n{}",
            left,
            right
        );
    }

    /// Assert that two trees are not structurally equivalent
    pub fn assert_not_equivalent(left: &ValueNode, right: &ValueNode) {
        assert!(
            !left.is_equivalent(right),
            "Expected different trees, both are:\n{}",
            left
        );
    }

    /// Assert that `copy` is an equivalent tree sharing no node with `original`
    pub fn assert_independent_copy(original: &ValueNode, copy: &ValueNode) {
        Self::assert_equivalent(original, copy);

        let mut left = Some(original);
        let mut right = Some(copy);
        while let (Some(l), Some(r)) = (left, right) {
            assert!(
                !std::ptr::eq(l, r),
                "Copy shares a {} node with the original",
                l.kind()
            );
            left = l.as_unary().and_then(|n| n.operand());
            right = r.as_unary().and_then(|n| n.operand());
        }
    }

    /// Assert that a node is a unary operator with the given operator
    pub fn assert_unary(node: &ValueNode, operator: UnaryOperator) {
        match node {
            ValueNode::UnaryOperator(unary) => {
                assert_eq!(
                    unary.operator(),
                    Some(&operator),
                    "Unary operator mismatch"
                );
            }
            _ => panic!("Expected UnaryOperator node, found {:?}", node),
        }
    }

    /// Assert that a node is a column reference with the given name
    pub fn assert_column_ref(node: &ValueNode, name: &str) {
        match node {
            ValueNode::ColumnReference(col) => {
                assert_eq!(
                    col.column_name, name,
                    "Expected column '{}', found '{}'",
                    name, col.column_name
                );
            }
            _ => panic!("Expected ColumnReference node, found {:?}", node),
        }
    }

    /// Assert that a tree survives a JSON round trip unchanged
    pub fn assert_json_round_trip(node: &ValueNode) {
        let json = serde_json::to_string(node).expect("node serializes");
        let back: ValueNode = serde_json::from_str(&json).expect("node deserializes");
        assert_eq!(&back, node, "JSON round trip changed the tree");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::NodeFixtures;

    #[test]
    fn test_assert_column_ref() {
        NodeAssertions::assert_column_ref(&NodeFixtures::column("user_id"), "user_id");
    }

    #[test]
    #[should_panic(expected = "Expected ColumnReference node")]
    fn test_assert_column_ref_fails() {
        NodeAssertions::assert_column_ref(&NodeFixtures::integer(42), "user_id");
    }

    #[test]
    fn test_assert_unary() {
        NodeAssertions::assert_unary(
            &NodeFixtures::negate(NodeFixtures::column("x")),
            UnaryOperator::Minus,
        );
    }

    #[test]
    #[should_panic(expected = "Expected equivalent trees")]
    fn test_assert_equivalent_fails() {
        NodeAssertions::assert_equivalent(&NodeFixtures::column("a"), &NodeFixtures::column("b"));
    }

    #[test]
    fn test_json_round_trip() {
        NodeAssertions::assert_json_round_trip(&NodeFixtures::not_is_null("email"));
    }
}
