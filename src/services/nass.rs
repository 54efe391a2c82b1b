// src/services/nass.rs
use chrono::{Datelike, Utc};
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::config::UpstreamConfig;
use crate::error::{Result, UpstreamError};
use crate::models::Sourced;

const SOURCE_NAME: &str = "USDA";
pub const DEFAULT_COMMODITY: &str = "MILK";

/// Commodities whose price-received statistic is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Commodity {
    Milk,
    Cattle,
    Hogs,
    Chickens,
    Eggs,
    Corn,
    Soybeans,
    Wheat,
}

impl Commodity {
    pub const TRACKED: [Commodity; 8] = [
        Commodity::Milk,
        Commodity::Cattle,
        Commodity::Hogs,
        Commodity::Chickens,
        Commodity::Eggs,
        Commodity::Corn,
        Commodity::Soybeans,
        Commodity::Wheat,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Commodity::Milk => "MILK",
            Commodity::Cattle => "CATTLE",
            Commodity::Hogs => "HOGS",
            Commodity::Chickens => "CHICKENS",
            Commodity::Eggs => "EGGS",
            Commodity::Corn => "CORN",
            Commodity::Soybeans => "SOYBEANS",
            Commodity::Wheat => "WHEAT",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Commodity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Commodity::TRACKED
            .iter()
            .copied()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| format!("untracked commodity '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NassResponse {
    #[serde(default)]
    pub data: Vec<NassRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NassRecord {
    pub commodity_desc: String,
    #[serde(default)]
    pub class_desc: String,
    #[serde(default)]
    pub util_practice_desc: String,
    #[serde(default)]
    pub statisticcat_desc: String,
    #[serde(default)]
    pub unit_desc: String,
    #[serde(default)]
    pub reference_period_desc: String,
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub year: i32,
    pub value: String,
}

impl NassResponse {
    /// First record for `year`, if any.
    pub fn record_for_year(&self, year: i32) -> Option<&NassRecord> {
        self.data.iter().find(|record| record.year == year)
    }
}

/// NASS values are strings such as `"1,234.5"`; suppressed cells like `"(D)"` yield `None`.
pub fn parse_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// Quick Stats reports `year` as a number; older payloads and our fallback may carry a string.
fn year_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("year out of range: {}", n))),
        Value::String(s) => s.trim().parse::<i32>().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("unexpected year: {}", other))),
    }
}

/// Fetch the current calendar year's price-received survey statistic.
pub async fn fetch_commodity_price(
    client: &Client,
    config: &UpstreamConfig,
    commodity: &str,
) -> Result<NassResponse> {
    let year = Utc::now().year().to_string();
    let mut query: Vec<(&str, &str)> = vec![
        ("commodity_desc", commodity),
        ("year", &year),
        ("statisticcat_desc", "PRICE RECEIVED"),
        ("format", "JSON"),
        ("source_desc", "SURVEY"),
    ];
    if let Some(key) = config.nass_key.as_deref() {
        query.push(("key", key));
    }
    info!("Fetching USDA NASS price for {} ({})", commodity, year);

    let response = client
        .get(&config.nass_url)
        .timeout(config.timeout)
        .query(&query)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status { source_name: SOURCE_NAME, status });
    }

    let body = response.text().await?;
    let parsed: NassResponse = serde_json::from_str(&body)?;

    if let Some(err) = &parsed.error {
        return Err(UpstreamError::Rejected {
            source_name: SOURCE_NAME,
            message: err.to_string(),
        });
    }

    debug!("USDA NASS returned {} records for {}", parsed.data.len(), commodity);
    Ok(parsed)
}

/// Hard-coded current/previous year pair: MILK 21.50/22.10, everything else 45.80/44.20.
pub fn fallback_price(commodity: &str, current_year: i32) -> NassResponse {
    let (current, previous) = if commodity == DEFAULT_COMMODITY {
        ("21.50", "22.10")
    } else {
        ("45.80", "44.20")
    };

    NassResponse {
        data: vec![
            fallback_record(commodity, current_year, current),
            fallback_record(commodity, current_year - 1, previous),
        ],
        error: None,
    }
}

fn fallback_record(commodity: &str, year: i32, value: &str) -> NassRecord {
    NassRecord {
        commodity_desc: commodity.to_string(),
        class_desc: "ALL CLASSES".to_string(),
        util_practice_desc: "ALL UTILIZATION PRACTICES".to_string(),
        statisticcat_desc: "PRICE RECEIVED".to_string(),
        unit_desc: "$ / CWT".to_string(),
        reference_period_desc: "MARKETING YEAR".to_string(),
        year,
        value: value.to_string(),
    }
}

/// Never fails: any upstream error is logged and replaced by `fallback_price`.
pub async fn commodity_price_or_fallback(
    client: &Client,
    config: &UpstreamConfig,
    commodity: &str,
) -> Sourced<NassResponse> {
    match fetch_commodity_price(client, config, commodity).await {
        Ok(response) => Sourced::live(response),
        Err(e) => {
            error!("USDA API Error for {}: {}", commodity, e);
            Sourced::fallback(fallback_price(commodity, Utc::now().year()))
        }
    }
}
