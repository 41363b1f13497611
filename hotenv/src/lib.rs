//! Typed, cached, hot-reloadable environment variables
//!
//! This library hands out typed handles to environment variables. The first
//! lookup of a name parses the variable once and caches it; every later
//! lookup of the same name returns a handle to the same cell. Calling
//! [`reload_env`] re-parses every registered variable in place, and every
//! handle already held observes the new value without being fetched again.
//!
//! # Features
//!
//! - **Stable handles**: one cell per name for the life of the process
//! - **Hot reload**: [`reload_env`] refreshes every cell at once
//! - **Never fails**: absent or malformed values resolve to the default
//! - **Lock-free reads**: cells are published through atomic pointer swaps
//! - **Pluggable converters**: any `Fn(&str) -> Result<T, E>` works
//! - **Declarative**: `#[derive(HotEnv)]` builds a struct of handles
//!
//! # Value Parsing
//!
//! - Unset and empty variables both resolve to the default, silently
//! - Malformed values resolve to the default and emit a `tracing` warning
//! - Slices split on `,` without trimming: `PORTS=80,443`
//! - Booleans accept `1 t T TRUE true True` and `0 f F FALSE false False`
//!
//! # Example
//!
//! ```rust
//! # std::env::remove_var("PORT");
//! let port = hotenv::get_int("PORT", 8080);
//! assert_eq!(port.value(), 8080);
//!
//! std::env::set_var("PORT", "9090");
//! hotenv::reload_env();
//! assert_eq!(port.value(), 9090);
//!
//! // Same name, same cell: the second default is ignored
//! let again = hotenv::get_int("PORT", 1);
//! assert!(again.ptr_eq(&port));
//! # std::env::remove_var("PORT");
//! ```
//!
//! # Derive
//!
//! ```rust
//! use hotenv::{EnvRef, HotEnv};
//!
//! #[derive(Debug, HotEnv)]
//! #[env(prefix = "DOC_")]
//! struct Config {
//!     #[env(default = "127.0.0.1:8080".to_string())]
//!     pub server_addr: EnvRef<String>,
//!
//!     #[env(default = 10)]
//!     pub max_connections: EnvRef<u32>,
//!
//!     // Default::default() when unset
//!     pub debug_mode: EnvRef<bool>,
//! }
//!
//! # std::env::remove_var("DOC_MAX_CONNECTIONS");
//! let config = Config::from_env();
//! assert_eq!(config.max_connections.value(), 10);
//! assert!(!config.debug_mode.value());
//! ```
//!
//! # Reload callbacks
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let reloads = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&reloads);
//! hotenv::register_reload_callback("DOC_RELOAD_COUNTER", move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! hotenv::reload_env();
//! hotenv::unregister_reload_callback("DOC_RELOAD_COUNTER");
//! hotenv::reload_env();
//! assert_eq!(reloads.load(Ordering::SeqCst), 1);
//! ```

pub mod convert;
#[doc(hidden)]
pub mod de;
mod error;
mod handle;
mod registry;

pub use convert::FromEnv;
pub use error::EnvError;
pub use handle::EnvRef;
pub use hotenv_derive::HotEnv;
pub use registry::Registry;

use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Get a handle to `name`, converted with `converter`
///
/// See [`Registry::get_or_register`].
///
/// # Panics
///
/// Panics if `name` was registered earlier with a different value type.
pub fn get_with<T, F, E>(name: &str, default: T, converter: F) -> EnvRef<T>
where
    T: Clone + Debug + Send + Sync + 'static,
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: Display,
{
    Registry::global().get_or_register(name, default, converter)
}

/// Get a handle to `name`, parsed with `FromStr`
pub fn get<T>(name: &str, default: T) -> EnvRef<T>
where
    T: FromStr + Clone + Debug + Send + Sync + 'static,
    T::Err: Display,
{
    get_with(name, default, convert::from_str::<T>)
}

pub fn get_string(name: &str, default: impl Into<String>) -> EnvRef<String> {
    get_with(name, default.into(), convert::string)
}

pub fn get_int(name: &str, default: i64) -> EnvRef<i64> {
    get_with(name, default, convert::int)
}

pub fn get_float(name: &str, default: f64) -> EnvRef<f64> {
    get_with(name, default, convert::float)
}

pub fn get_bool(name: &str, default: bool) -> EnvRef<bool> {
    get_with(name, default, convert::bool)
}

/// Get a handle to a comma-separated list of strings
pub fn get_string_slice<S: Into<String>>(
    name: &str,
    default: impl IntoIterator<Item = S>,
) -> EnvRef<Vec<String>> {
    let default: Vec<String> = default.into_iter().map(Into::into).collect();
    get_with(name, default, convert::string_slice)
}

/// Get a handle to a comma-separated list of integers
///
/// If any element fails to parse, the whole list resolves to `default`.
pub fn get_int_slice(name: &str, default: Vec<i64>) -> EnvRef<Vec<i64>> {
    get_with(name, default, convert::int_slice)
}

pub fn get_float_slice(name: &str, default: Vec<f64>) -> EnvRef<Vec<f64>> {
    get_with(name, default, convert::float_slice)
}

pub fn get_bool_slice(name: &str, default: Vec<bool>) -> EnvRef<Vec<bool>> {
    get_with(name, default, convert::bool_slice)
}

/// Re-parse every registered variable and run every reload callback
pub fn reload_env() {
    Registry::global().reload();
}

/// Run `callback` on every [`reload_env`] until it is unregistered
///
/// See [`Registry::register_callback`] for the locking constraints.
pub fn register_reload_callback<F>(name: &str, callback: F)
where
    F: Fn() + Send + Sync + 'static,
{
    Registry::global().register_callback(name, callback);
}

/// Remove the entry registered under `name`
///
/// Typed variables and callbacks share one namespace, so this also detaches
/// a typed variable registered under `name`.
pub fn unregister_reload_callback(name: &str) -> bool {
    Registry::global().unregister(name)
}
