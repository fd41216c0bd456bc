use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};

use presto_core::{PrestoError, Result};
use tracing::{debug, info, trace};

use crate::properties;
use crate::value::{self, PropertyValue};

static NO_VALUES: LazyLock<HashMap<String, String>> = LazyLock::new(HashMap::new);

#[derive(Debug)]
struct Loaded {
    path: PathBuf,
    values: HashMap<String, String>,
}

/// Immutable key-value snapshot of one property file.
///
/// A store starts empty and is filled exactly once by [`PropertyStore::initialize`].
/// After that it never changes, so any number of threads may read it without
/// locking. Reads before initialization see an empty file: optional lookups
/// return `None` and required lookups fail.
#[derive(Debug)]
pub struct PropertyStore {
    loaded: OnceLock<Loaded>,
}

impl PropertyStore {
    /// Create an empty, uninitialized store.
    pub const fn new() -> Self {
        Self {
            loaded: OnceLock::new(),
        }
    }

    /// Create a store that is already populated with `values`, as if they had
    /// been read from `path`.
    pub fn from_values(path: impl Into<PathBuf>, values: HashMap<String, String>) -> Self {
        let store = Self::new();
        let _ = store.loaded.set(Loaded {
            path: path.into(),
            values,
        });
        store
    }

    /// Read the property file at `path` into this store.
    ///
    /// Must be called once, before any getter. Fails if the file cannot be read,
    /// is malformed, or if the store was already initialized. A failed call
    /// leaves the store untouched.
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(existing) = self.loaded.get() {
            return Err(PrestoError::AlreadyInitialized {
                path: existing.path.clone(),
            });
        }

        let values = properties::read_file(path)?;
        for (key, value) in &values {
            debug!(file = %path.display(), %key, "loaded property");
            trace!(%key, %value, "property value");
        }
        let count = values.len();

        self.loaded
            .set(Loaded {
                path: path.to_path_buf(),
                values,
            })
            .map_err(|rejected| PrestoError::AlreadyInitialized {
                path: self
                    .file_path()
                    .map(Path::to_path_buf)
                    .unwrap_or(rejected.path),
            })?;

        info!(file = %path.display(), properties = count, "loaded property file");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// Path the store was loaded from, if initialized.
    pub fn file_path(&self) -> Option<&Path> {
        self.loaded.get().map(|l| l.path.as_path())
    }

    /// Every property exactly as read from the file.
    pub fn values(&self) -> &HashMap<String, String> {
        self.loaded.get().map(|l| &l.values).unwrap_or(&NO_VALUES)
    }

    /// Look up `name` and convert it to `T`.
    ///
    /// Fails with [`PrestoError::MissingRequiredProperty`] if absent and with
    /// [`PrestoError::TypeConversion`] if the value is not a valid `T`.
    pub fn required_property<T: PropertyValue>(&self, name: &str) -> Result<T> {
        match self.raw(name) {
            Some(raw) => value::convert(name, raw),
            None => Err(self.missing(name)),
        }
    }

    /// Raw string value of a required property.
    pub fn required_string(&self, name: &str) -> Result<String> {
        self.raw(name)
            .map(str::to_string)
            .ok_or_else(|| self.missing(name))
    }

    /// Look up `name` and convert it to `T`, returning `None` if absent.
    ///
    /// A present but malformed value is still an error; it is never reported
    /// as absent.
    pub fn optional_property<T: PropertyValue>(&self, name: &str) -> Result<Option<T>> {
        self.raw(name)
            .map(|raw| value::convert(name, raw))
            .transpose()
    }

    /// Raw string value of an optional property.
    pub fn optional_string(&self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_string)
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.values().get(name).map(String::as_str)
    }

    /// Error for a required property `name` that this store does not have.
    pub(crate) fn missing(&self, name: &str) -> PrestoError {
        PrestoError::MissingRequiredProperty {
            name: name.to_string(),
            path: self.file_path().map(Path::to_path_buf),
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}
