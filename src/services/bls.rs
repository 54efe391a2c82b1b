// src/services/bls.rs
use chrono::{Datelike, Month, Months, NaiveDate, Utc};
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;
use crate::error::{Result, UpstreamError};
use crate::models::Sourced;

const SOURCE_NAME: &str = "BLS";
pub const REQUEST_SUCCEEDED: &str = "REQUEST_SUCCEEDED";
pub const DEFAULT_SERIES: &str = "CUUR0000SAF11";

const FALLBACK_LATEST: &str = "315.826";
const FALLBACK_PREVIOUS: &str = "314.312";

/// CPI food categories tracked by the dashboard, one BLS series each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndexCategory {
    FoodAtHome,
    CerealsAndBakery,
    MeatsPoultryFishEggs,
    Dairy,
    FruitsAndVegetables,
    OtherFoodAtHome,
}

impl IndexCategory {
    pub const TRACKED: [IndexCategory; 6] = [
        IndexCategory::FoodAtHome,
        IndexCategory::CerealsAndBakery,
        IndexCategory::MeatsPoultryFishEggs,
        IndexCategory::Dairy,
        IndexCategory::FruitsAndVegetables,
        IndexCategory::OtherFoodAtHome,
    ];

    pub fn series_id(&self) -> &'static str {
        match self {
            IndexCategory::FoodAtHome => "CUUR0000SAF11",
            IndexCategory::CerealsAndBakery => "CUUR0000SAF111",
            IndexCategory::MeatsPoultryFishEggs => "CUUR0000SAF112",
            IndexCategory::Dairy => "CUUR0000SAF113",
            IndexCategory::FruitsAndVegetables => "CUUR0000SAF114",
            IndexCategory::OtherFoodAtHome => "CUUR0000SAF115",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IndexCategory::FoodAtHome => "Food at home",
            IndexCategory::CerealsAndBakery => "Cereals and bakery products",
            IndexCategory::MeatsPoultryFishEggs => "Meats, poultry, fish, and eggs",
            IndexCategory::Dairy => "Dairy and related products",
            IndexCategory::FruitsAndVegetables => "Fruits and vegetables",
            IndexCategory::OtherFoodAtHome => "Other food at home",
        }
    }
}

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    seriesid: [&'a str; 1],
    startyear: String,
    endyear: String,
    calculations: bool,
    annualaverage: bool,
    catalog: bool,
    latest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrationkey: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlsResponse {
    pub status: String,
    #[serde(rename = "responseTime", default)]
    pub response_time: u64,
    #[serde(default)]
    pub message: Vec<String>,
    #[serde(rename = "Results", default, skip_serializing_if = "Option::is_none")]
    pub results: Option<BlsResults>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlsResults {
    #[serde(default)]
    pub series: Vec<BlsSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlsSeries {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<BlsDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlsDataPoint {
    pub year: String,
    pub period: String,
    #[serde(rename = "periodName", default)]
    pub period_name: String,
    pub value: String,
}

impl BlsResponse {
    /// Data points of the first series, newest first.
    pub fn first_series_data(&self) -> Option<&[BlsDataPoint]> {
        self.results
            .as_ref()
            .and_then(|results| results.series.first())
            .map(|series| series.data.as_slice())
    }
}

/// Fetch one CPI series covering the previous and current calendar year.
pub async fn fetch_primary_index_series(
    client: &Client,
    config: &UpstreamConfig,
    series_id: &str,
) -> Result<BlsResponse> {
    let year = Utc::now().year();
    let request = SeriesRequest {
        seriesid: [series_id],
        startyear: (year - 1).to_string(),
        endyear: year.to_string(),
        calculations: true,
        annualaverage: false,
        catalog: false,
        latest: true,
        registrationkey: config.bls_key.as_deref(),
    };
    info!("Fetching BLS series {} from {}", series_id, config.bls_url);

    let response = client
        .post(&config.bls_url)
        .timeout(config.timeout)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status { source_name: SOURCE_NAME, status });
    }

    let body = response.text().await?;
    let parsed: BlsResponse = serde_json::from_str(&body)?;

    if parsed.status != REQUEST_SUCCEEDED {
        let message = if parsed.message.is_empty() {
            "Unknown error".to_string()
        } else {
            parsed.message.join("; ")
        };
        return Err(UpstreamError::Rejected { source_name: SOURCE_NAME, message });
    }

    debug!("BLS series {} returned status {}", series_id, parsed.status);
    Ok(parsed)
}

/// Hard-coded two-point series labeled with the current and previous month.
pub fn fallback_series(series_id: &str, today: NaiveDate) -> BlsResponse {
    let previous = today.checked_sub_months(Months::new(1)).unwrap_or(today);

    BlsResponse {
        status: REQUEST_SUCCEEDED.to_string(),
        response_time: 0,
        message: Vec::new(),
        results: Some(BlsResults {
            series: vec![BlsSeries {
                series_id: series_id.to_string(),
                data: vec![
                    fallback_point(today, FALLBACK_LATEST),
                    fallback_point(previous, FALLBACK_PREVIOUS),
                ],
            }],
        }),
    }
}

fn fallback_point(date: NaiveDate, value: &str) -> BlsDataPoint {
    let period_name = u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    BlsDataPoint {
        year: date.year().to_string(),
        period: format!("M{:02}", date.month()),
        period_name,
        value: value.to_string(),
    }
}

/// Never fails: any upstream error is logged and replaced by `fallback_series`.
pub async fn primary_index_series_or_fallback(
    client: &Client,
    config: &UpstreamConfig,
    series_id: &str,
) -> Sourced<BlsResponse> {
    match fetch_primary_index_series(client, config, series_id).await {
        Ok(response) => Sourced::live(response),
        Err(e) => {
            error!("BLS API Error for {}: {}", series_id, e);
            Sourced::fallback(fallback_series(series_id, Utc::now().date_naive()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_labels_current_and_previous_month() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 18).unwrap();
        let response = fallback_series("CUUR0000SAF113", today);
        let data = response.first_series_data().unwrap();

        assert_eq!(response.status, REQUEST_SUCCEEDED);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].period, "M07");
        assert_eq!(data[0].period_name, "July");
        assert_eq!(data[0].value, "315.826");
        assert_eq!(data[1].period, "M06");
        assert_eq!(data[1].value, "314.312");
    }

    #[test]
    fn fallback_in_january_wraps_to_december() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let response = fallback_series(DEFAULT_SERIES, today);
        let data = response.first_series_data().unwrap();

        assert_eq!((data[0].year.as_str(), data[0].period.as_str()), ("2025", "M01"));
        assert_eq!((data[1].year.as_str(), data[1].period.as_str()), ("2024", "M12"));
        assert_eq!(data[1].period_name, "December");
    }

    #[test]
    fn request_body_matches_bls_contract() {
        let request = SeriesRequest {
            seriesid: ["CUUR0000SAF11"],
            startyear: "2023".into(),
            endyear: "2024".into(),
            calculations: true,
            annualaverage: false,
            catalog: false,
            latest: true,
            registrationkey: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["seriesid"][0], "CUUR0000SAF11");
        assert_eq!(json["latest"], true);
        assert_eq!(json["annualaverage"], false);
        assert!(json.get("registrationkey").is_none());
    }

    #[test]
    fn parses_real_response_shape() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 92,
            "message": [],
            "Results": {"series": [{"seriesID": "CUUR0000SAF11", "data": [
                {"year": "2024", "period": "M05", "periodName": "May", "latest": "true",
                 "value": "310.111", "footnotes": [{}], "calculations": {}}
            ]}]}
        }"#;
        let parsed: BlsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.first_series_data().unwrap()[0].value, "310.111");
    }

    #[test]
    fn every_tracked_series_is_distinct() {
        let ids: std::collections::HashSet<_> =
            IndexCategory::TRACKED.iter().map(|c| c.series_id()).collect();
        assert_eq!(ids.len(), IndexCategory::TRACKED.len());
        assert_eq!(IndexCategory::FoodAtHome.series_id(), DEFAULT_SERIES);
    }
}
