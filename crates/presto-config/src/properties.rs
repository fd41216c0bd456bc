//! Reader for flat `key=value` property files.
//!
//! Surrounding whitespace is trimmed from every line, key and value. Blank
//! lines and lines starting with `#` or `!` are comments. A leading UTF-8
//! byte-order mark is ignored. The first `=`
//! separates key from value, so values may contain `=` themselves.

use std::collections::HashMap;
use std::path::Path;

use presto_core::{PrestoError, Result};

/// Read and parse the property file at `path`.
pub(crate) fn read_file(path: &Path) -> Result<HashMap<String, String>> {
    let bytes = std::fs::read(path).map_err(|source| PrestoError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| PrestoError::Parse {
        path: path.to_path_buf(),
        line: 0,
        reason: format!("file is not valid UTF-8: {e}"),
    })?;
    parse(path, &text)
}

/// Parse property text. `path` is only used for error reporting.
pub(crate) fn parse(path: &Path, text: &str) -> Result<HashMap<String, String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut values = HashMap::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let parse_error = |reason: String| PrestoError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason,
        };

        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_error(format!("expected key=value, found {line:?}")));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(parse_error("empty property name".to_string()));
        }
        if values.contains_key(key) {
            return Err(parse_error(format!("duplicate property {key}")));
        }
        values.insert(key.to_string(), value.trim().to_string());
    }

    Ok(values)
}
