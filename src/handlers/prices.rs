// src/handlers/prices.rs
use log::{debug, info};
use std::sync::Arc;
use warp::Rejection;

use crate::services::prices::PriceService;

pub const PROVENANCE_HEADER: &str = "x-price-provenance";

pub async fn get_prices(service: Arc<PriceService>) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request to get price list");

    let list = service.get_price_list().await;
    debug!("Returning {} items with provenance {}", list.items.len(), list.provenance);

    Ok(warp::reply::with_header(
        warp::reply::json(&list.items),
        PROVENANCE_HEADER,
        list.provenance.as_str(),
    ))
}
