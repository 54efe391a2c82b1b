mod common;

use serde_json::Value;
use std::sync::Arc;
use warp::http::StatusCode;

use grocery_price_tracker::routes::routes;
use grocery_price_tracker::services::prices::PriceService;

fn offline_service(mock_mode: bool) -> Arc<PriceService> {
    let mut config = common::config_for(common::dead_url(), common::dead_url());
    config.mock_mode = mock_mode;
    Arc::new(PriceService::new(config).unwrap())
}

#[tokio::test]
async fn prices_route_returns_catalog_with_provenance_header() {
    let api = routes(offline_service(true));

    let res = warp::test::request().method("GET").path("/api/v1/prices").reply(&api).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-price-provenance"], "fallback-baseline");
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 250);
    assert_eq!(items[0]["id"], "1");
    assert!(items[0]["priceHistory"]["daily"].as_array().unwrap().len() == 91);
    assert_eq!(items[0]["priceHistory"]["all"], items[0]["priceHistory"]["daily"]);
}

#[tokio::test]
async fn bls_route_defaults_to_food_at_home() {
    let api = routes(offline_service(false));

    let res = warp::test::request().method("GET").path("/api/v1/bls").reply(&api).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-price-provenance"], "fallback-synthetic");
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["status"], "REQUEST_SUCCEEDED");
    assert_eq!(body["Results"]["series"][0]["seriesID"], "CUUR0000SAF11");
}

#[tokio::test]
async fn usda_route_uses_requested_commodity() {
    let api = routes(offline_service(false));

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/usda?commodity=CATTLE")
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["data"][0]["commodity_desc"], "CATTLE");
    assert_eq!(body["data"][0]["value"], "45.80");
}

#[tokio::test]
async fn blank_commodity_uses_milk() {
    let api = routes(offline_service(false));

    for path in ["/api/v1/usda?commodity=", "/api/v1/usda?commodity=%20"] {
        let res = warp::test::request().method("GET").path(path).reply(&api).await;

        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["data"][0]["commodity_desc"], "MILK");
        assert_eq!(body["data"][0]["value"], "21.50");
    }
}

#[tokio::test]
async fn blank_series_uses_food_at_home() {
    let api = routes(offline_service(false));

    let res = warp::test::request().method("GET").path("/api/v1/bls?series=").reply(&api).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["Results"]["series"][0]["seriesID"], "CUUR0000SAF11");
}

#[tokio::test]
async fn odd_commodity_gets_synthetic_payload() {
    let api = routes(offline_service(false));
    let path = format!("/api/v1/usda?commodity={}", "Z".repeat(100));

    let res = warp::test::request().method("GET").path(&path).reply(&api).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-price-provenance"], "fallback-synthetic");
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["data"][0]["value"], "45.80");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let api = routes(offline_service(true));

    let res = warp::test::request().method("GET").path("/api/v1/cart").reply(&api).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "Not Found");
}
