// src/handlers/upstream.rs
use log::info;
use serde::Deserialize;
use std::sync::Arc;
use warp::Rejection;

use super::prices::PROVENANCE_HEADER;
use crate::services::bls::DEFAULT_SERIES;
use crate::services::nass::DEFAULT_COMMODITY;
use crate::services::prices::PriceService;

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub series: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommodityQuery {
    pub commodity: Option<String>,
}

// Blank keys fall back to the default; anything else is passed to the upstream as is.
fn key_or_default(raw: Option<String>, default: &str) -> String {
    raw.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// BLS series passthrough; answers with the synthetic series when BLS is unreachable.
pub async fn get_bls_series(
    query: SeriesQuery,
    service: Arc<PriceService>,
) -> Result<impl warp::Reply, Rejection> {
    let series_id = key_or_default(query.series, DEFAULT_SERIES);
    info!("Handling request for BLS series {}", series_id);

    let response = service.primary_index_series(&series_id).await;
    Ok(warp::reply::with_header(
        warp::reply::json(&response.payload),
        PROVENANCE_HEADER,
        response.provenance.as_str(),
    ))
}

/// USDA NASS passthrough; answers with the synthetic pair when NASS is unreachable.
pub async fn get_usda_commodity(
    query: CommodityQuery,
    service: Arc<PriceService>,
) -> Result<impl warp::Reply, Rejection> {
    let commodity = key_or_default(query.commodity, DEFAULT_COMMODITY);
    info!("Handling request for USDA commodity {}", commodity);

    let response = service.commodity_price(&commodity).await;
    Ok(warp::reply::with_header(
        warp::reply::json(&response.payload),
        PROVENANCE_HEADER,
        response.provenance.as_str(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_use_the_default() {
        assert_eq!(key_or_default(None, DEFAULT_COMMODITY), "MILK");
        assert_eq!(key_or_default(Some(String::new()), DEFAULT_COMMODITY), "MILK");
        assert_eq!(key_or_default(Some("   ".to_string()), DEFAULT_SERIES), "CUUR0000SAF11");
    }

    #[test]
    fn other_keys_pass_through_trimmed() {
        assert_eq!(key_or_default(Some(" EGGS ".to_string()), DEFAULT_COMMODITY), "EGGS");
        let long = "X".repeat(200);
        assert_eq!(key_or_default(Some(long.clone()), DEFAULT_COMMODITY), long);
    }
}
