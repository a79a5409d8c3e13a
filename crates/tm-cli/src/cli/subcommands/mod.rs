mod assign;
mod task;
mod user;

pub use assign::AssignCommands;
pub use task::TaskCommands;
pub use user::UserCommands;
