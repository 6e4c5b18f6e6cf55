// CLI module - argument parsing and per-machine operations
pub mod backup;
pub mod options;
pub mod provision;
pub mod restore;

pub use options::{Invocation, Options, RunMode, RunScope};
