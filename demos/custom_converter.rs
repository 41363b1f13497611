//! Custom converter example

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
struct Limits {
    requests_per_second: u32,
    burst: u32,
}

fn parse_duration_secs(s: &str) -> Result<Duration, String> {
    s.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| format!("Failed to parse: {}", e))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    std::env::set_var("REQUEST_TIMEOUT", "30");
    std::env::set_var("RATE_LIMITS", r#"{"requests_per_second":50,"burst":100}"#);

    let timeout = hotenv::get_with("REQUEST_TIMEOUT", Duration::from_secs(60), parse_duration_secs);
    let limits = hotenv::get_with("RATE_LIMITS", Limits::default(), hotenv::convert::json);

    println!("Request Timeout: {:?}", timeout.value());
    println!("Rate Limits: {:?}", limits.value());

    Ok(())
}
