//! Command implementations for forge-cli

pub mod create;
pub mod destroy;
pub mod info;
pub mod push;

pub use create::{run_create, run_fork};
pub use destroy::run_destroy;
pub use info::{run_info, run_list};
pub use push::run_push;
