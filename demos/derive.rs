//! Derive macro example

use hotenv::{EnvRef, HotEnv};

#[derive(Debug, HotEnv)]
#[env(prefix = "APP_")]
struct Config {
    // Loaded from APP_DATABASE_URL
    #[env(default = "postgres://localhost/app".to_string())]
    pub database_url: EnvRef<String>,

    // Loaded from APP_WORKERS, defaults to 4
    #[env(default = 4)]
    pub workers: EnvRef<usize>,

    // Loaded from APP_PORTS as a comma-separated list
    #[env(default = vec![8080])]
    pub ports: EnvRef<Vec<u16>>,

    // Loaded from APP_FEATURE_FLAGS: the prefix applies to custom names too
    #[env(name = "FEATURE_FLAGS", converter = "hotenv::convert::json")]
    pub feature_flags: EnvRef<Vec<String>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    std::env::set_var("APP_WORKERS", "8");
    std::env::set_var("APP_FEATURE_FLAGS", r#"["beta"]"#);

    let config = Config::from_env();
    println!("Configuration loaded: {:#?}", config);

    std::env::set_var("APP_PORTS", "80,443");
    hotenv::reload_env();
    println!("Ports after reload: {:?}", config.ports.value());

    Ok(())
}
