//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Run options and per-file outcome model
//! - Typed errors for the port run
//! - Path normalization utilities
//! - Content hashing
//! - Rendering of per-file outcomes

pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
