//! Lists the disabled parking spots of the City of Zurich.
//!
//! Set `ZURICH_REQUEST_TIMEOUT` (seconds, also read from `.env`) to override the
//! default request timeout.

use odp_zurich::{ZurichClient, ZurichError};
use std::collections::HashSet;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), ZurichError> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut builder = ZurichClient::builder();
    if let Some(secs) = std::env::var("ZURICH_REQUEST_TIMEOUT")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs > 0.0)
    {
        builder = builder.request_timeout(Duration::from_secs_f64(secs));
    }
    let client = builder.build()?;

    let disabled_parkings = client.disabled_parkings().await?;
    for item in &disabled_parkings {
        println!("{:?}", item);
    }

    let unique: HashSet<String> = disabled_parkings
        .iter()
        .map(|item| item.spot_id().to_string())
        .collect();

    println!("__________________________");
    println!("Total locations found: {}", disabled_parkings.len());
    println!("Unique ID values: {}", unique.len());
    Ok(())
}
