//! Resolution of environment variables into typed values

use crate::error::EnvError;
use std::env::{self, VarError};
use std::fmt::{Debug, Display};

/// Get the raw value of an environment variable
///
/// Unset and empty values are reported as [`EnvError::Missing`]. A value
/// that is set but not valid unicode is [`EnvError::NotUnicode`].
pub fn get_env_value(env_name: &str) -> Result<String, EnvError> {
    match env::var(env_name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(VarError::NotPresent) => Err(EnvError::missing(env_name)),
        Err(VarError::NotUnicode(raw)) => Err(EnvError::NotUnicode {
            name: env_name.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Convert the current value of `env_name`, reporting failures
///
/// Unlike [`resolve_with_default`], a conversion failure is returned as
/// [`EnvError::Parse`] instead of being absorbed.
pub fn deserialize_with<T, F, E>(env_name: &str, converter: &F) -> Result<T, EnvError>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    let value = get_env_value(env_name)?;
    converter(&value).map_err(|e| EnvError::parse_error::<T>(env_name, e))
}

/// Resolve `env_name` with `converter`, falling back to `default`
///
/// An absent variable resolves to `default` silently. A malformed or
/// non-unicode value resolves to `default` and emits a warning.
pub fn resolve_with_default<T, F, E>(env_name: &str, default: &T, converter: &F) -> T
where
    T: Clone + Debug,
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    match deserialize_with(env_name, converter) {
        Ok(value) => value,
        Err(EnvError::Missing { .. }) => default.clone(),
        Err(err) => {
            tracing::warn!(
                env = env_name,
                error = %err,
                default = ?default,
                "Invalid environment variable value, using default"
            );
            default.clone()
        }
    }
}
