// In-process stand-ins for the BLS and USDA NASS endpoints.
#![allow(dead_code)]

use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::http::StatusCode;
use warp::Filter;

use grocery_price_tracker::config::{AppConfig, UpstreamConfig};

pub type Recorded<T> = Arc<Mutex<Vec<T>>>;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A local URL nothing listens on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}/", addr)
}

pub fn url(addr: SocketAddr) -> String {
    format!("http://{}/", addr)
}

pub fn config_for(bls_url: String, nass_url: String) -> AppConfig {
    AppConfig {
        port: 0,
        upstream: UpstreamConfig {
            bls_url,
            bls_key: None,
            nass_url,
            nass_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(5),
        },
        aggregation_timeout: Duration::from_secs(10),
        mock_mode: false,
    }
}

pub fn bls_body(series_id: &str, latest: &str, previous: &str) -> Value {
    let year = current_year().to_string();
    json!({
        "status": "REQUEST_SUCCEEDED",
        "responseTime": 31,
        "message": [],
        "Results": {"series": [{"seriesID": series_id, "data": [
            {"year": year, "period": "M05", "periodName": "May", "latest": "true", "value": latest, "footnotes": [{}]},
            {"year": year, "period": "M04", "periodName": "April", "value": previous, "footnotes": [{}]}
        ]}]}
    })
}

pub fn nass_body(commodity: &str, current: &str, previous: &str) -> Value {
    let year = current_year();
    json!({"data": [
        {"commodity_desc": commodity, "statisticcat_desc": "PRICE RECEIVED", "unit_desc": "$ / CWT", "year": year, "value": current},
        {"commodity_desc": commodity, "statisticcat_desc": "PRICE RECEIVED", "unit_desc": "$ / CWT", "year": year - 1, "value": previous}
    ]})
}

/// BLS stand-in answering every POST with `respond(request_body)`.
pub fn spawn_bls<F>(respond: F) -> (SocketAddr, Recorded<Value>)
where
    F: Fn(&Value) -> (StatusCode, Value) + Clone + Send + Sync + 'static,
{
    let recorded: Recorded<Value> = Arc::new(Mutex::new(Vec::new()));
    let sink = recorded.clone();
    let route = warp::post()
        .and(warp::body::json())
        .map(move |request: Value| {
            let (status, body) = respond(&request);
            sink.lock().unwrap().push(request);
            warp::reply::with_status(warp::reply::json(&body), status)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, recorded)
}

/// NASS stand-in answering every GET with `respond(query)`.
pub fn spawn_nass<F>(respond: F) -> (SocketAddr, Recorded<HashMap<String, String>>)
where
    F: Fn(&HashMap<String, String>) -> (StatusCode, Value) + Clone + Send + Sync + 'static,
{
    let recorded: Recorded<HashMap<String, String>> = Arc::new(Mutex::new(Vec::new()));
    let sink = recorded.clone();
    let route = warp::get()
        .and(warp::query::<HashMap<String, String>>())
        .map(move |query: HashMap<String, String>| {
            let (status, body) = respond(&query);
            sink.lock().unwrap().push(query);
            warp::reply::with_status(warp::reply::json(&body), status)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, recorded)
}

/// Stand-in that answers only after `delay`.
pub fn spawn_slow(delay: Duration) -> SocketAddr {
    let route = warp::any().and_then(move || async move {
        tokio::time::sleep(delay).await;
        Ok::<_, warp::Rejection>(warp::reply::json(&json!({})))
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}
