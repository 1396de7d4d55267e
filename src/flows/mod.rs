//! Flows module - Multi-step operations built on the backends
//!
//! Provides:
//! - port: Copy, rewrite and verify the tree in one run
//! - report: Diff commands printed after a run

pub mod port;
pub mod report;
