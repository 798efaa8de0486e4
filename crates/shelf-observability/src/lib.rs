//! Observability setup for the Bookshelf storefront tools.
//!
//! This crate provides:
//! - `LogFormat` - Human or JSON log output
//! - `LogLevel` - Default verbosity when `RUST_LOG` is unset
//! - `init_tracing` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
