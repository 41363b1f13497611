//! Error types for environment variable resolution

/// Errors that can occur while resolving or registering environment variables.
///
/// None of these ever reach the caller of a typed accessor: a missing or
/// malformed value always resolves to the registered default. They surface
/// through diagnostics and through [`Registry::try_get_or_register`].
///
/// [`Registry::try_get_or_register`]: crate::Registry::try_get_or_register
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// Environment variable is not set, or is set to an empty string.
    #[error("Environment variable '{name}' is not set")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// Environment variable is set but its value is not valid unicode.
    #[error("Environment variable '{name}' is not valid unicode: {value:?}")]
    NotUnicode {
        /// Name of the environment variable
        name: String,
        /// Lossy rendering of the raw value
        value: String,
    },

    /// Failed to convert the environment variable value into the target type.
    #[error("Failed to parse environment variable '{name}' as {type_name}: {message}")]
    Parse {
        /// Name of the environment variable being parsed
        name: String,
        /// Fully qualified type name that parsing was attempted for
        type_name: String,
        /// Error message from the converter
        message: String,
    },

    /// The name is already registered with a different value type, or as a
    /// bare reload callback.
    #[error(
        "Environment variable '{name}' is already registered with a type other than {expected}"
    )]
    TypeMismatch {
        /// Name of the environment variable
        name: String,
        /// Type name requested by the conflicting lookup
        expected: String,
    },
}

impl EnvError {
    /// Create a parse error for target type `T`
    pub fn parse_error<T>(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    pub(crate) fn type_mismatch<T>(name: impl Into<String>) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: std::any::type_name::<T>().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_contains_type_info() {
        let err = EnvError::parse_error::<u32>("PORT", "invalid digit found in string");
        match &err {
            EnvError::Parse {
                name, type_name, ..
            } => {
                assert_eq!(name, "PORT");
                assert!(type_name.contains("u32"));
            }
            _ => panic!("Expected Parse error"),
        }
        assert_eq!(
            err.to_string(),
            "Failed to parse environment variable 'PORT' as u32: invalid digit found in string"
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = EnvError::type_mismatch::<bool>("DEBUG");
        assert!(err.to_string().contains("'DEBUG'"));
        assert!(err.to_string().contains("bool"));
    }

    #[test]
    fn test_not_unicode_message() {
        let err = EnvError::NotUnicode {
            name: "LANG_BYTES".to_string(),
            value: "a\u{fffd}".to_string(),
        };
        assert!(err.to_string().contains("'LANG_BYTES'"));
        assert!(err.to_string().contains("not valid unicode"));
    }
}
