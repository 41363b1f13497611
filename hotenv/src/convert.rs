//! Built-in converters from raw environment strings to typed values
//!
//! A converter is any `Fn(&str) -> Result<T, E>` where `E: Display`. The
//! functions here cover the common scalar types and their comma-separated
//! sequence forms; anything else can be plugged in through
//! [`get_with`](crate::get_with).
//!
//! Sequence converters split on every `,` without trimming or skipping empty
//! elements, so `"1,2,"` yields a trailing empty element and fails to convert
//! as a list of integers.

use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::str::FromStr;

/// Error returned by [`bool`] for values outside the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean '{0}'")]
pub struct ParseBoolError(String);

/// Identity converter
pub fn string(s: &str) -> Result<String, Infallible> {
    Ok(s.to_string())
}

/// Parse a signed 64-bit integer
pub fn int(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
}

/// Parse a 64-bit float
pub fn float(s: &str) -> Result<f64, std::num::ParseFloatError> {
    s.parse()
}

/// Parse a boolean
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`,
/// `FALSE`, `false`, `False`.
pub fn bool(s: &str) -> Result<bool, ParseBoolError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError(s.to_string())),
    }
}

/// Parse any `FromStr` type
pub fn from_str<T: FromStr>(s: &str) -> Result<T, T::Err> {
    s.parse()
}

/// Deserialize a JSON document
pub fn json<T: DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s)
}

/// Lift an element converter into a comma-separated sequence converter
///
/// The first element that fails aborts the whole conversion.
pub fn split<T, E, F>(converter: F) -> impl Fn(&str) -> Result<Vec<T>, E>
where
    F: Fn(&str) -> Result<T, E>,
{
    move |s: &str| s.split(',').map(&converter).collect()
}

pub fn string_slice(s: &str) -> Result<Vec<String>, Infallible> {
    split(string)(s)
}

pub fn int_slice(s: &str) -> Result<Vec<i64>, std::num::ParseIntError> {
    split(int)(s)
}

pub fn float_slice(s: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    split(float)(s)
}

pub fn bool_slice(s: &str) -> Result<Vec<bool>, ParseBoolError> {
    split(bool)(s)
}

/// Types with a canonical environment converter
///
/// Used by `#[derive(HotEnv)]` for fields without an explicit
/// `converter`. Sequences use comma splitting on the element converter.
pub trait FromEnv: Sized {
    type Err: std::fmt::Display;

    fn from_env_str(s: &str) -> Result<Self, Self::Err>;
}

macro_rules! impl_from_env_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnv for $ty {
                type Err = <$ty as FromStr>::Err;

                fn from_env_str(s: &str) -> Result<Self, Self::Err> {
                    s.parse()
                }
            }
        )*
    };
}

impl_from_env_via_from_str!(
    String, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    std::net::IpAddr, std::net::SocketAddr, std::path::PathBuf,
);

impl FromEnv for bool {
    type Err = ParseBoolError;

    fn from_env_str(s: &str) -> Result<Self, Self::Err> {
        self::bool(s)
    }
}

impl<T: FromEnv> FromEnv for Vec<T> {
    type Err = T::Err;

    fn from_env_str(s: &str) -> Result<Self, Self::Err> {
        split(T::from_env_str)(s)
    }
}
