//! Command-line front end for the finproj projection engine
//!
//! Loads a model from YAML or JSON, then validates it, prints its
//! evaluation log, or prints chart series, all as JSON.

pub mod commands;
pub mod logging;
pub mod storage;

#[cfg(test)]
mod tests;

pub use commands::ChartOptions;
pub use logging::{LogTarget, init_logging};
pub use storage::{ModelFormat, StorageError, load_model};
