//! Comma-separated list example

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new("warn"))
        .init();

    std::env::set_var("ALLOWED_HOSTS", "localhost,example.com");
    std::env::set_var("RETRY_DELAYS_MS", "100,200,400");
    std::env::set_var("SAMPLE_RATES", "0.5,1.0");

    let hosts = hotenv::get_string_slice("ALLOWED_HOSTS", ["localhost"]);
    let delays = hotenv::get_int_slice("RETRY_DELAYS_MS", vec![1000]);
    let rates = hotenv::get_float_slice("SAMPLE_RATES", vec![1.0]);

    println!("Allowed Hosts: {:?}", hosts.value());
    println!("Retry Delays: {:?}", delays.value());
    println!("Sample Rates: {:?}", rates.value());

    // One bad element invalidates the whole list
    std::env::set_var("RETRY_DELAYS_MS", "100,200,soon");
    hotenv::reload_env();
    println!("Retry Delays after bad reload: {:?}", delays.value());

    Ok(())
}
