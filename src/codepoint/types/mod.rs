//! Foundational data structures, error types, layout and codelist conventions.

pub mod conventions;
pub mod error;
pub mod layout;
pub mod models;
