//! # tw-core
//!
//! Core types, traits, and utilities for Tenderwatch.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type aliases
//! - Core traits (Record, Identifiable)
//! - Field values exposed by records to the query engine
//! - Pagination types
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod pagination;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
pub use pagination::*;
