//! # tm-core
//!
//! Core types and validation shared across all taskmaster crates:
//! - Entity structs for users, tasks, and assignments
//! - Input drafts (`NewUser`, `NewTask`) and the rules that validate them
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod inputs;
pub mod validation;
