//! Backends module - File operations behind a port run
//!
//! Provides:
//! - copy: Fresh recursive copy of the source tree
//! - rewrite: Token substitution with atomic replace
//! - verify: Content check of the files left untouched

pub mod copy;
pub mod rewrite;
pub mod verify;
