//! Errors raised while reading definition files

use std::path::PathBuf;

use thiserror::Error;

/// A definition file could not be turned into definition records
///
/// Every variant carries the offending file.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed XML: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{}:{line}:{column}: {message}", path.display())]
    Invalid {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    #[error("{}: file name is not a hexadecimal template id", path.display())]
    FileName { path: PathBuf },
}
