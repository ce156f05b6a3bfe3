use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// An environment variable is set but its value could not be parsed.
#[derive(Debug, Error)]
#[error("Invalid value {value:?} for environment variable {name}: {message}")]
pub struct InvalidEnvVarError {
    pub name: String,
    pub value: String,
    pub message: String,
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads and parses an optional environment variable.
///
/// Returns `default` when the variable is unset. A set but unparsable value is
/// reported instead of being silently replaced by the default.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
/// * `default` - The value used when the variable is not set.
pub fn get_env_or<T>(name: &str, default: T) -> Result<T, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(value) => parse_value(name, value),
        Err(_) => Ok(default),
    }
}

/// Reads and parses an environment variable that has no default.
///
/// Unset and blank values both yield `None`.
pub fn get_env_opt<T>(name: &str) -> Result<Option<T>, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => parse_value(name, value).map(Some),
        _ => Ok(None),
    }
}

fn parse_value<T>(name: &str, value: String) -> Result<T, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    let parsed: Result<T, T::Err> = value.trim().parse();
    parsed.map_err(|e| InvalidEnvVarError {
        name: name.to_string(),
        value,
        message: e.to_string(),
    })
}
