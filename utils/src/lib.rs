//! Shared utilities for the Vapor adapter.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat, LoggingError};
