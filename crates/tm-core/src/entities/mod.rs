//! Entity structs for all taskmaster domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema validation.

mod assignment;
mod task;
mod user;

pub use assignment::Assignment;
pub use task::Task;
pub use user::User;
