// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqltree
//!
//! This crate provides common testing components including:
//! - Node fixtures for building small expression trees
//! - Equivalence and independence assertions
//! - Scripted visitors and a factory that counts copies

pub mod assertions;
pub mod counting_factory;
pub mod fixtures;
pub mod scripted_visitors;

// Re-exports for convenience
pub use assertions::NodeAssertions;
pub use counting_factory::CountingFactory;
pub use fixtures::NodeFixtures;
pub use scripted_visitors::{RecordingVisitor, ReplaceColumnVisitor, StopAfterVisitor};

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
