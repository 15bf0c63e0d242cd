use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading helper definitions.
pub enum HelperError {
    /// The helper directory could not be listed.
    #[error("Failed to read helper directory: {0}")]
    Walk(#[from] walkdir::Error),
    /// A helper file could not be read.
    #[error("Failed to read helper file '{path}': {source}")]
    Io {
        /// The helper file.
        path:   PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// A helper file is not valid TOML or has fields of the wrong shape.
    #[error("Invalid helper file '{path}': {source}")]
    Toml {
        /// The helper file.
        path:   PathBuf,
        /// The underlying parse error.
        source: toml::de::Error,
    },
    /// A required key is absent or empty.
    #[error("Helper file '{path}' is missing '{field}'.")]
    MissingField {
        /// The helper file.
        path:  PathBuf,
        /// The missing key.
        field: &'static str,
    },
    /// A `<type>` parameter names an unknown type.
    #[error("Helper file '{path}': unknown parameter type in '{spec}'.")]
    UnknownType {
        /// The helper file.
        path: PathBuf,
        /// The parameter spec as written.
        spec: String,
    },
    /// A default or fixed value is neither a literal nor a known constant.
    #[error("Helper file '{path}': cannot resolve value '{spec}'.")]
    UnresolvedValue {
        /// The helper file.
        path: PathBuf,
        /// The parameter spec as written.
        spec: String,
    },
    /// A required parameter follows an optional one.
    #[error("Helper file '{path}': required parameter '{spec}' follows an optional parameter.")]
    RequiredAfterOptional {
        /// The helper file.
        path: PathBuf,
        /// The parameter spec as written.
        spec: String,
    },
    /// The wrapped extension is not registered.
    #[error("Helper file '{path}': unknown extension '{extension}'.")]
    UnknownExtension {
        /// The helper file.
        path:      PathBuf,
        /// The extension name.
        extension: String,
    },
    /// The helper name is already taken by a native function or helper.
    #[error("Helper file '{path}': function '{name}' is already registered.")]
    DuplicateHelper {
        /// The helper file.
        path: PathBuf,
        /// The helper name.
        name: String,
    },
}
