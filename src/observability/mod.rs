//! Structured logging setup.
//!
//! The crate logs through `tracing` macros everywhere; this module only
//! installs the subscriber that decides what is printed.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`crate::Config`]
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
