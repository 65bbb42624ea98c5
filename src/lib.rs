/// DB Studio - tabular data service behind the administration panel
///
/// This is the root crate that provides workspace-level documentation.
/// Actual implementation is in the subcrates:
/// - `db-studio-core`: Table/row model and the in-memory tabular store
/// - `db-studio-cli`: Command-line caller that drives the store and prints JSON

pub use db_studio_core::{Row, TableSchema, TableStore, Value};

/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
