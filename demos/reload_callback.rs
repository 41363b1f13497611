//! Reload callback example

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new("debug"))
        .init();

    let log_level = hotenv::get_string("LOG_LEVEL", "info");
    let reloads = Arc::new(AtomicUsize::new(0));

    // Callbacks may read handles, but must not register or reload
    let level = log_level.clone();
    let counter = Arc::clone(&reloads);
    hotenv::register_reload_callback("log-level-watcher", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        println!("  Reload observed, LOG_LEVEL is now {}", level.value());
    });

    for value in ["debug", "trace"] {
        std::env::set_var("LOG_LEVEL", value);
        hotenv::reload_env();
    }

    hotenv::unregister_reload_callback("log-level-watcher");
    hotenv::reload_env();

    println!("Callback ran {} times", reloads.load(Ordering::SeqCst));
    Ok(())
}
