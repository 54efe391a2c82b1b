// src/services/prices.rs
use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use futures::future::join_all;
use log::{error, info, warn};
use reqwest::Client;

use crate::config::AppConfig;
use crate::error::AggregationError;
use crate::models::{PriceList, PricedItem, Provenance, Sourced};
use crate::services::bls::{self, BlsResponse, IndexCategory};
use crate::services::catalog;
use crate::services::nass::{self, Commodity, NassResponse};
use crate::services::reconcile::{self, MarketMultipliers};

/// Adapter results for every tracked key of one request.
#[derive(Debug, Clone)]
pub struct UpstreamSnapshot {
    pub primary_index: Vec<(IndexCategory, Sourced<BlsResponse>)>,
    pub commodity: Vec<(Commodity, Sourced<NassResponse>)>,
}

impl UpstreamSnapshot {
    pub fn live_count(&self) -> usize {
        self.primary_index.iter().filter(|(_, r)| r.is_live()).count()
            + self.commodity.iter().filter(|(_, r)| r.is_live()).count()
    }

    /// `Live` when any key was answered by its upstream.
    pub fn provenance(&self) -> Provenance {
        if self.live_count() > 0 {
            Provenance::Live
        } else {
            Provenance::FallbackSynthetic
        }
    }

    pub fn multipliers(&self, current_year: i32) -> MarketMultipliers {
        MarketMultipliers::from_responses(
            self.primary_index
                .iter()
                .map(|(category, response)| (*category, Some(&response.payload))),
            self.commodity
                .iter()
                .map(|(commodity, response)| (*commodity, Some(&response.payload))),
            current_year,
        )
    }
}

/// Assembles the dashboard's price list. Holds one pooled HTTP client; no
/// other state survives between requests.
pub struct PriceService {
    client: Client,
    config: AppConfig,
}

impl PriceService {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let report = reconcile::validate_mappings(catalog::entries())
            .context("catalog failed startup validation")?;
        info!(
            "Catalog validated: {} items, {} commodity-survey items without a commodity keyword",
            catalog::entries().len(),
            report.unmatched_survey_items.len()
        );

        let client = Client::builder()
            .timeout(config.upstream.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(PriceService { client, config })
    }

    /// Never fails. Degrades from reconciled live data to the catalog baseline.
    pub async fn get_price_list(&self) -> PriceList {
        let today = Utc::now().date_naive();

        if self.config.mock_mode {
            info!("Mock mode enabled, serving catalog baseline");
            return baseline(today);
        }

        info!("Fetching price data from BLS and USDA APIs...");
        let deadline = self.config.aggregation_timeout;
        let outcome = match tokio::time::timeout(deadline, self.assemble(today)).await {
            Ok(result) => result,
            Err(_) => Err(AggregationError::Timeout(deadline)),
        };

        match outcome {
            Ok(list) => {
                info!("Price data processed for {} items ({})", list.items.len(), list.provenance);
                list
            }
            Err(e) => {
                error!("Error fetching price data: {}", e);
                warn!("Falling back to catalog baseline");
                baseline(today)
            }
        }
    }

    async fn assemble(&self, today: NaiveDate) -> Result<PriceList, AggregationError> {
        let snapshot = self.fetch_all().await;
        info!(
            "BLS data received: {} series, USDA data received: {} commodities, {} live",
            snapshot.primary_index.len(),
            snapshot.commodity.len(),
            snapshot.live_count()
        );
        reconcile_snapshot(&snapshot, today)
    }

    /// Fans out to every tracked series and commodity at once.
    pub async fn fetch_all(&self) -> UpstreamSnapshot {
        let primary = join_all(IndexCategory::TRACKED.into_iter().map(|category| async move {
            (category, self.primary_index_series(category.series_id()).await)
        }));
        let commodity = join_all(Commodity::TRACKED.into_iter().map(|commodity| async move {
            (commodity, self.commodity_price(commodity.code()).await)
        }));

        let (primary_index, commodity) = tokio::join!(primary, commodity);
        UpstreamSnapshot { primary_index, commodity }
    }

    pub async fn primary_index_series(&self, series_id: &str) -> Sourced<BlsResponse> {
        bls::primary_index_series_or_fallback(&self.client, &self.config.upstream, series_id).await
    }

    pub async fn commodity_price(&self, commodity: &str) -> Sourced<NassResponse> {
        nass::commodity_price_or_fallback(&self.client, &self.config.upstream, commodity).await
    }
}

/// Catalog baseline tagged as such.
pub fn baseline(today: NaiveDate) -> PriceList {
    let mut rng = rand::thread_rng();
    PriceList {
        provenance: Provenance::FallbackBaseline,
        items: catalog::build_baseline(&mut rng, today),
    }
}

/// Reconciles fetched responses into a price list. Kept synchronous so the
/// thread-local RNG never lives across an await point.
pub fn reconcile_snapshot(snapshot: &UpstreamSnapshot, today: NaiveDate) -> Result<PriceList, AggregationError> {
    let multipliers = snapshot.multipliers(today.year());
    let provenance = if multipliers.is_empty() {
        Provenance::FallbackBaseline
    } else {
        snapshot.provenance()
    };

    let mut rng = rand::thread_rng();
    let items: Vec<PricedItem> = reconcile::reconcile(catalog::entries(), &multipliers, &mut rng, today)?;
    Ok(PriceList { provenance, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn fallback_snapshot() -> UpstreamSnapshot {
        UpstreamSnapshot {
            primary_index: IndexCategory::TRACKED
                .iter()
                .map(|c| (*c, Sourced::fallback(bls::fallback_series(c.series_id(), today()))))
                .collect(),
            commodity: Commodity::TRACKED
                .iter()
                .map(|c| (*c, Sourced::fallback(nass::fallback_price(c.code(), 2024))))
                .collect(),
        }
    }

    #[test]
    fn synthetic_snapshot_is_tagged_fallback() {
        let snapshot = fallback_snapshot();
        assert_eq!(snapshot.live_count(), 0);

        let list = reconcile_snapshot(&snapshot, today()).unwrap();
        assert_eq!(list.provenance, Provenance::FallbackSynthetic);
        assert_eq!(list.items.len(), catalog::CATALOG_SIZE);
    }

    #[test]
    fn one_live_key_makes_the_list_live() {
        let mut snapshot = fallback_snapshot();
        let live = snapshot.commodity[0].1.payload.clone();
        snapshot.commodity[0].1 = Sourced::live(live);

        assert_eq!(snapshot.provenance(), Provenance::Live);
    }

    #[test]
    fn unusable_live_data_degrades_to_baseline() {
        let mut snapshot = fallback_snapshot();
        for (_, response) in snapshot.primary_index.iter_mut() {
            *response = Sourced::live(BlsResponse {
                status: bls::REQUEST_SUCCEEDED.to_string(),
                response_time: 0,
                message: vec![],
                results: None,
            });
        }
        for (_, response) in snapshot.commodity.iter_mut() {
            *response = Sourced::live(NassResponse { data: vec![], error: None });
        }

        let list = reconcile_snapshot(&snapshot, today()).unwrap();
        assert_eq!(list.provenance, Provenance::FallbackBaseline);
        for (item, entry) in list.items.iter().zip(catalog::entries()) {
            assert_eq!(item.id, entry.id);
            assert_eq!(item.source, entry.source);
        }
    }

    #[test]
    fn baseline_is_tagged() {
        let list = baseline(today());
        assert_eq!(list.provenance, Provenance::FallbackBaseline);
        assert_eq!(list.items.len(), catalog::CATALOG_SIZE);
    }
}
