//! Fixture contracts
//!
//! Each fixture must keep reproducing its seeded defect with the exact
//! observable values external tooling is calibrated against.

#[path = "../common/mod.rs"]
mod common;

mod average_age;
mod closures;
mod pipeline;
mod processors;
mod registry;
mod transfer;
mod tree;
