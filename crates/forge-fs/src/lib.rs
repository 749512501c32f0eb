//! Filesystem layer for Project Forge
//!
//! Provides normalized path handling, path-segment validation, the fixed
//! on-disk layout names, and safe removal/locking primitives.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod lock;
pub mod path;

pub use config::{ConfigFormat, load_config};
pub use constants::ForgePath;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use lock::LockFile;
pub use path::{NormalizedPath, validate_segment};
