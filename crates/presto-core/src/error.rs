use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the Presto native worker.
#[derive(Error, Debug)]
pub enum PrestoError {
    // ── Property file loading ──────────────────────────────────
    #[error("cannot read property file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed property file {}, line {line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("property store already initialized from {}", .path.display())]
    AlreadyInitialized { path: PathBuf },

    // ── Property lookup ────────────────────────────────────────
    #[error("{name} is required in the {} file", display_source(.path))]
    MissingRequiredProperty {
        name: String,
        /// `None` when the store was never initialized.
        path: Option<PathBuf>,
    },

    #[error("invalid value for {name}: cannot convert {value:?} to {target}")]
    TypeConversion {
        name: String,
        value: String,
        target: &'static str,
    },
}

impl PrestoError {
    /// True for errors raised while reading a property file, as opposed to
    /// errors raised by a getter afterwards.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            PrestoError::FileAccess { .. }
                | PrestoError::Parse { .. }
                | PrestoError::AlreadyInitialized { .. }
        )
    }
}

fn display_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<uninitialized>".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, PrestoError>;
