use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use grocery_price_tracker::config::AppConfig;
use grocery_price_tracker::routes;
use grocery_price_tracker::services::prices::PriceService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env()?;
    info!(
        "Using PORT: {}, upstream timeout: {:?}, mock mode: {}",
        config.port, config.upstream.timeout, config.mock_mode
    );

    // Bind to 0.0.0.0 so the dashboard can reach us from outside the container
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let service = Arc::new(PriceService::new(config)?);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(service).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
