use thiserror::Error;

/// Failure to load or validate `ChamberConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file, env var, or `--set` override could not be merged or read.
    #[error("failed to load chamber config: {0}")]
    Figment(#[from] figment::Error),

    #[error("config value '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::ConfigError;

    #[test]
    fn invalid_value_names_the_dotted_field() {
        let err = ConfigError::InvalidValue {
            field: "directory.first_row".into(),
            reason: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "config value 'directory.first_row' is invalid: must be at least 1"
        );
    }
}
