pub mod errors;

pub use errors::{ExportError, ExportResult};

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod errors_tests;
