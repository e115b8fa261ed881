pub mod formatter;

pub use formatter::{OutputFormat, TripleFormatter};
