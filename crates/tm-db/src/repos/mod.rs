//! Repository modules implementing CRUD operations for taskmaster entities.
//!
//! Each module adds methods to `TmService` via `impl TmService` blocks. The
//! `pub(crate)` free functions take a bare connection (or transaction) and
//! never touch the access gate, so they compose inside one locked operation.

pub mod assignment;
pub mod task;
pub mod token;
pub mod user;
