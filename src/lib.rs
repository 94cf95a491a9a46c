pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod narrative;

pub use error::{NarrateError, Result};
pub use narrative::{Converter, convert};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
