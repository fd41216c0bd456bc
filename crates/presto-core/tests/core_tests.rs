#[cfg(test)]
mod tests {
    use presto_core::*;
    use std::path::PathBuf;

    // ── Error display tests ────────────────────────────────────

    #[test]
    fn test_error_missing_required_names_key_and_file() {
        let err = PrestoError::MissingRequiredProperty {
            name: "presto.version".into(),
            path: Some(PathBuf::from("/etc/presto/config.properties")),
        };
        assert_eq!(
            err.to_string(),
            "presto.version is required in the /etc/presto/config.properties file"
        );
    }

    #[test]
    fn test_error_missing_required_before_initialize() {
        let err = PrestoError::MissingRequiredProperty {
            name: "node.id".into(),
            path: None,
        };
        assert_eq!(err.to_string(), "node.id is required in the <uninitialized> file");
    }

    #[test]
    fn test_error_type_conversion() {
        let err = PrestoError::TypeConversion {
            name: "use-mmap-arena".into(),
            value: "maybe".into(),
            target: "bool",
        };
        let s = err.to_string();
        assert!(s.contains("use-mmap-arena"));
        assert!(s.contains("\"maybe\""));
        assert!(s.contains("bool"));
    }

    #[test]
    fn test_error_parse_reports_line() {
        let err = PrestoError::Parse {
            path: PathBuf::from("node.properties"),
            line: 7,
            reason: "missing '='".into(),
        };
        let s = err.to_string();
        assert!(s.contains("node.properties"));
        assert!(s.contains("line 7"));
        assert!(s.contains("missing '='"));
    }

    #[test]
    fn test_error_file_access_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PrestoError::FileAccess {
            path: PathBuf::from("/nonexistent/config.properties"),
            source: io,
        };
        assert!(err.to_string().contains("/nonexistent/config.properties"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_is_load_error() {
        let load = PrestoError::AlreadyInitialized {
            path: PathBuf::from("config.properties"),
        };
        let lookup = PrestoError::MissingRequiredProperty {
            name: "node.id".into(),
            path: Some(PathBuf::from("node.properties")),
        };
        assert!(load.is_load_error());
        assert!(!lookup.is_load_error());
    }
}
