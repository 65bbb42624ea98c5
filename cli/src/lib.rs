//! DB Studio command-line caller
//!
//! This crate drives the in-memory tabular store from the command line,
//! standing in for the panel pages: it builds a store from configuration,
//! runs operations against it and renders the outcomes as JSON.

// Error types and result
pub mod error;
pub use error::{CliError, Result};

// Command-line arguments and configuration resolution
pub mod args;
pub use args::{Args, Command};

// Logger setup
pub mod logging;
pub use logging::logger_builder;

// Store operations
pub mod operation;
pub use operation::{execute, load_script, run_script, Operation, ScriptReport};
