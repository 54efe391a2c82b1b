// src/bin/check_upstreams.rs
use chrono::{Datelike, Utc};
use dotenv::dotenv;
use log::{error, info};

use grocery_price_tracker::config::AppConfig;
use grocery_price_tracker::services::prices::PriceService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let service = PriceService::new(AppConfig::from_env()?)?;
    info!("Fetching every tracked BLS series and USDA commodity...");

    let snapshot = service.fetch_all().await;
    for (category, response) in &snapshot.primary_index {
        println!("BLS  {:<32} {:<20} {}", category.display_name(), response.provenance.as_str(), category.series_id());
    }
    for (commodity, response) in &snapshot.commodity {
        println!("USDA {:<32} {:<20} {} records", commodity.code(), response.provenance.as_str(), response.payload.data.len());
    }

    let multipliers = snapshot.multipliers(Utc::now().year());
    println!("Index multipliers:     {:?}", multipliers.primary_by_name());
    println!("Commodity multipliers: {:?}", multipliers.commodity_by_code());

    if snapshot.live_count() == 0 {
        error!("No upstream answered; the dashboard would be served fallback data");
        std::process::exit(1);
    }
    Ok(())
}
