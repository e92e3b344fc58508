//! Common test utilities for loan-ledger contract and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus a CLI runner
//! - Fixtures: Reusable applications and config snippets

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
