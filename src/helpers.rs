/// Helper file format and parameter spec parsing.
///
/// A helper file is a small TOML document naming the helper, the extension
/// it wraps, and how each extension parameter is filled.
pub mod config;

/// Discovery, validation and registration of helper files.
pub mod loader;

pub use loader::load_helpers;
