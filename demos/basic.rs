//! Basic usage example

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::env::remove_var("PORT");
    std::env::set_var("SERVER_NAME", "demo");

    // First lookup parses and caches the value
    let port = hotenv::get_int("PORT", 8080);
    let name = hotenv::get_string("SERVER_NAME", "unnamed");
    let debug = hotenv::get_bool("DEBUG", false);

    println!("Before reload:");
    println!("  Port: {}", port.value());
    println!("  Server Name: {}", name.value());
    println!("  Debug: {}", debug.value());

    std::env::set_var("PORT", "9090");
    std::env::set_var("DEBUG", "not-a-bool");

    // Existing handles see the new values; DEBUG falls back with a warning
    hotenv::reload_env();

    println!("After reload:");
    println!("  Port: {}", port.value());
    println!("  Server Name: {}", name.value());
    println!("  Debug: {}", debug.value());

    Ok(())
}
