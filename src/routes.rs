// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::prices::get_prices;
use crate::handlers::upstream::{get_bls_series, get_usda_commodity, CommodityQuery, SeriesQuery};
use crate::services::prices::PriceService;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(service: Arc<PriceService>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let service_filter = warp::any().map(move || service.clone());

    let prices_route = warp::path!("api" / "v1" / "prices")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(get_prices);

    let bls_route = warp::path!("api" / "v1" / "bls")
        .and(warp::get())
        .and(warp::query::<SeriesQuery>())
        .and(service_filter.clone())
        .and_then(get_bls_series);

    let usda_route = warp::path!("api" / "v1" / "usda")
        .and(warp::get())
        .and(warp::query::<CommodityQuery>())
        .and(service_filter.clone())
        .and_then(get_usda_commodity);

    info!("All routes configured successfully.");

    prices_route
        .or(bls_route)
        .or(usda_route)
        .recover(handle_rejection)
}
