//! Process-wide registry of cached environment values
//!
//! The registry maps each variable name to an entry pairing a recompute
//! closure with an optional, type-erased cell. Typed entries own a cell that
//! their closure rewrites on every reload; callback entries only run their
//! closure. Typed entries and callbacks share one namespace.
//!
//! All mutation (registration, reload, unregistration) happens while the
//! registry lock is held for the full duration of the operation. Reading a
//! cell through [`EnvRef`] never takes the lock.

use crate::de;
use crate::error::EnvError;
use crate::handle::{Cell, EnvRef};
use arc_swap::ArcSwap;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

type Recompute = Box<dyn Fn() + Send + Sync>;
type ErasedCell = Arc<dyn Any + Send + Sync>;

struct Entry {
    recompute: Recompute,
    cell: Option<ErasedCell>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Registry of environment variables and reload callbacks.
///
/// Most code uses the process-wide instance through the free functions in
/// the crate root. Separate instances are independent namespaces with their
/// own lock.
#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<String, Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    // Entries are only inserted after their initial compute finishes, so the
    // map is consistent even if a callback panicked while the lock was held.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cell registered under `name`, registering it first if needed
    ///
    /// On first registration the current value of `name` is converted with
    /// `converter` (falling back to `default` when absent or malformed) while
    /// the lock is held. Later calls with the same name return the same cell
    /// and ignore their `default` and `converter`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered with a value type other than
    /// `T`, or as a bare reload callback. Use
    /// [`try_get_or_register`](Self::try_get_or_register) to handle that case.
    pub fn get_or_register<T, F, E>(&self, name: &str, default: T, converter: F) -> EnvRef<T>
    where
        T: Clone + fmt::Debug + Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        match self.try_get_or_register(name, default, converter) {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`get_or_register`](Self::get_or_register)
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::TypeMismatch`] if `name` is already registered with
    /// a value type other than `T`, or as a bare reload callback.
    pub fn try_get_or_register<T, F, E>(
        &self,
        name: &str,
        default: T,
        converter: F,
    ) -> Result<EnvRef<T>, EnvError>
    where
        T: Clone + fmt::Debug + Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let mut entries = self.lock();

        if let Some(entry) = entries.get(name) {
            return entry
                .cell
                .clone()
                .and_then(|cell| cell.downcast::<Cell<T>>().ok())
                .map(EnvRef::from_cell)
                .ok_or_else(|| EnvError::type_mismatch::<T>(name));
        }

        let initial = de::resolve_with_default(name, &default, &converter);
        let cell = Arc::new(ArcSwap::from_pointee(initial));

        let recompute: Recompute = {
            let name = name.to_string();
            let cell = Arc::clone(&cell);
            Box::new(move || {
                let value = de::resolve_with_default(&name, &default, &converter);
                cell.store(Arc::new(value));
            })
        };

        entries.insert(
            name.to_string(),
            Entry {
                recompute,
                cell: Some(Arc::clone(&cell) as ErasedCell),
            },
        );
        tracing::debug!(env = name, "Registered environment variable");

        Ok(EnvRef::from_cell(cell))
    }

    /// Register a callback invoked on every [`reload`](Self::reload)
    ///
    /// The callback is not invoked at registration. Any existing entry under
    /// `name`, typed or not, is replaced.
    ///
    /// Callbacks run while the registry lock is held: they may read any
    /// [`EnvRef`] but must not call any other method of the same registry
    /// (registration, [`unregister`](Self::unregister), `reload`,
    /// [`contains`](Self::contains), [`len`](Self::len),
    /// [`is_empty`](Self::is_empty), or its `Debug` impl), since each of
    /// them takes the lock.
    pub fn register_callback<F>(&self, name: &str, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let previous = self.lock().insert(
            name.to_string(),
            Entry {
                recompute: Box::new(callback),
                cell: None,
            },
        );
        tracing::debug!(
            env = name,
            replaced = previous.is_some(),
            "Registered reload callback"
        );
    }

    /// Remove the entry registered under `name`
    ///
    /// Handles already obtained for a removed typed entry keep their last
    /// value but are no longer updated by reloads. Returns whether an entry
    /// was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.lock().remove(name).is_some();
        if removed {
            tracing::debug!(env = name, "Unregistered environment entry");
        }
        removed
    }

    /// Re-run every registered entry against the current environment
    ///
    /// Entries run in unspecified order. A malformed value only resets its
    /// own cell to the default; it never stops the remaining entries.
    pub fn reload(&self) {
        let entries = self.lock();
        tracing::debug!(entries = entries.len(), "Reloading environment");
        for entry in entries.values() {
            (entry.recompute)();
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        let mut names: Vec<&str> = entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("entries", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use serial_test::serial;
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    #[serial]
    fn test_same_name_returns_same_cell() {
        let registry = Registry::new();
        env::remove_var("REG_SAME");

        let first = registry.get_or_register("REG_SAME", 1, convert::int);
        let second = registry.get_or_register("REG_SAME", 2, convert::int);

        assert!(first.ptr_eq(&second));
        assert_eq!(second.value(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[serial]
    fn test_first_converter_wins() {
        let registry = Registry::new();
        env::set_var("REG_FIRST_CONVERTER", "7");

        let first = registry.get_or_register("REG_FIRST_CONVERTER", 0, convert::int);
        let second = registry.get_or_register("REG_FIRST_CONVERTER", 0, |_: &str| {
            Ok::<i64, String>(99)
        });

        assert_eq!(first.value(), 7);
        assert_eq!(second.value(), 7);

        env::set_var("REG_FIRST_CONVERTER", "8");
        registry.reload();
        assert_eq!(second.value(), 8);

        env::remove_var("REG_FIRST_CONVERTER");
    }

    #[test]
    #[serial]
    fn test_reload_updates_existing_handles() {
        let registry = Registry::new();
        env::remove_var("PORT");

        let port = registry.get_or_register("PORT", 8080, convert::int);
        assert_eq!(port.value(), 8080);

        env::set_var("PORT", "9090");
        assert_eq!(port.value(), 8080);
        registry.reload();
        assert_eq!(port.value(), 9090);

        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_reload_malformed_resets_to_default() {
        let registry = Registry::new();
        env::set_var("REG_MALFORMED", "10");
        env::set_var("REG_MALFORMED_OTHER", "a");

        let value = registry.get_or_register("REG_MALFORMED", 1, convert::int);
        let other =
            registry.get_or_register("REG_MALFORMED_OTHER", "z".to_string(), convert::string);
        assert_eq!(value.value(), 10);

        env::set_var("REG_MALFORMED", "ten");
        env::set_var("REG_MALFORMED_OTHER", "b");
        registry.reload();
        assert_eq!(value.value(), 1);
        assert_eq!(other.value(), "b");

        env::remove_var("REG_MALFORMED");
        env::remove_var("REG_MALFORMED_OTHER");
    }

    #[test]
    #[serial]
    fn test_type_mismatch() {
        let registry = Registry::new();
        env::remove_var("REG_MISMATCH");

        registry.get_or_register("REG_MISMATCH", 1, convert::int);
        let result = registry.try_get_or_register("REG_MISMATCH", false, convert::bool);
        assert!(matches!(result, Err(EnvError::TypeMismatch { .. })));
    }

    #[test]
    #[serial]
    #[should_panic(expected = "REG_MISMATCH_PANIC")]
    fn test_type_mismatch_panics() {
        let registry = Registry::new();
        env::remove_var("REG_MISMATCH_PANIC");

        registry.get_or_register("REG_MISMATCH_PANIC", 1, convert::int);
        registry.get_or_register("REG_MISMATCH_PANIC", 1.0, convert::float);
    }

    #[test]
    fn test_callback_counts_reloads() {
        let registry = Registry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        registry.register_callback("REG_CALLBACK", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        registry.reload();
        registry.reload();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(registry.unregister("REG_CALLBACK"));
        registry.reload();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!registry.unregister("REG_CALLBACK"));

        let counter = Arc::clone(&calls);
        registry.register_callback("REG_CALLBACK", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        registry.reload();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    #[serial]
    fn test_unregister_detaches_typed_cell() {
        let registry = Registry::new();
        env::set_var("REG_UNREGISTER", "1");

        let old = registry.get_or_register("REG_UNREGISTER", 0, convert::int);
        assert!(registry.unregister("REG_UNREGISTER"));

        env::set_var("REG_UNREGISTER", "2");
        registry.reload();
        assert_eq!(old.value(), 1);

        let fresh = registry.get_or_register("REG_UNREGISTER", 0, convert::int);
        assert!(!fresh.ptr_eq(&old));
        assert_eq!(fresh.value(), 2);

        env::remove_var("REG_UNREGISTER");
    }

    #[test]
    #[serial]
    fn test_callback_replaces_typed_entry() {
        let registry = Registry::new();
        env::remove_var("REG_SHARED_NAME");

        registry.get_or_register("REG_SHARED_NAME", 1, convert::int);
        registry.register_callback("REG_SHARED_NAME", || {});

        assert_eq!(registry.len(), 1);
        let result = registry.try_get_or_register("REG_SHARED_NAME", 1, convert::int);
        assert!(matches!(result, Err(EnvError::TypeMismatch { .. })));
    }

    #[test]
    #[serial]
    fn test_concurrent_registration_yields_one_cell() {
        let registry = Arc::new(Registry::new());
        env::set_var("REG_CONCURRENT", "3");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.get_or_register("REG_CONCURRENT", i, convert::int))
            })
            .collect();
        let refs: Vec<EnvRef<i64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(refs.iter().all(|r| r.ptr_eq(&refs[0])));
        assert!(refs.iter().all(|r| r.value() == 3));
        assert_eq!(registry.len(), 1);

        env::remove_var("REG_CONCURRENT");
    }

    #[test]
    #[serial]
    fn test_callback_reads_handles_during_reload() {
        let registry = Registry::new();
        env::set_var("REG_CALLBACK_READ", "1");
        let handle = registry.get_or_register("REG_CALLBACK_READ", 0, convert::int);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let (reader, sink) = (handle.clone(), Arc::clone(&seen));
        registry.register_callback("REG_CALLBACK_READER", move || {
            sink.lock().unwrap().push(reader.value());
        });

        registry.reload();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(registry.len(), 2);

        env::remove_var("REG_CALLBACK_READ");
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = Registry::new();
        registry.register_callback("B", || {});
        registry.register_callback("A", || {});
        assert_eq!(format!("{registry:?}"), r#"Registry { entries: ["A", "B"] }"#);
    }
}
