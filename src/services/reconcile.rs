// src/services/reconcile.rs
use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

use crate::error::AggregationError;
use crate::models::{Category, DataSource, PricedItem};
use crate::services::bls::{BlsResponse, IndexCategory};
use crate::services::catalog::{self, CatalogEntry, CATALOG_SIZE};
use crate::services::history::{self, noise};
use crate::services::nass::{self, Commodity, NassResponse};

pub const PRIMARY_INDEX_BOUNDS: (f64, f64) = (0.7, 1.4);
pub const COMMODITY_BOUNDS: (f64, f64) = (0.6, 1.6);

/// Width of today's market perturbation (±3 %).
const MARKET_VARIATION: f64 = 0.06;
/// Width of the simulated move since yesterday (±1.5 %).
const DAILY_VARIATION: f64 = 0.03;

/// Item-name keywords and the commodity whose survey price drives them.
/// Checked in order; the first keyword found in the lowercase name wins.
pub const COMMODITY_KEYWORDS: [(&str, Commodity); 6] = [
    ("milk", Commodity::Milk),
    ("beef", Commodity::Cattle),
    ("pork", Commodity::Hogs),
    ("chicken", Commodity::Chickens),
    ("eggs", Commodity::Eggs),
    ("turkey", Commodity::Chickens),
];

pub fn index_category_for(category: Category) -> IndexCategory {
    match category {
        Category::Meat | Category::Seafood => IndexCategory::MeatsPoultryFishEggs,
        Category::Dairy => IndexCategory::Dairy,
        Category::Produce => IndexCategory::FruitsAndVegetables,
        Category::Bakery | Category::Grains => IndexCategory::CerealsAndBakery,
        Category::Beverages
        | Category::Pantry
        | Category::Frozen
        | Category::Snacks
        | Category::Household
        | Category::PersonalCare => IndexCategory::OtherFoodAtHome,
    }
}

pub fn commodity_for_name(name: &str) -> Option<Commodity> {
    let lower = name.to_lowercase();
    COMMODITY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, commodity)| *commodity)
}

fn clamp_ratio(latest: f64, previous: f64, (low, high): (f64, f64)) -> Option<f64> {
    if !(latest.is_finite() && previous.is_finite()) || previous == 0.0 {
        return None;
    }
    let ratio = latest / previous;
    ratio.is_finite().then(|| ratio.clamp(low, high))
}

/// Latest over previous point of the first series. A lone point means no movement.
pub fn primary_index_ratio(response: &BlsResponse) -> Option<f64> {
    let data = response.first_series_data()?;
    let latest = data.first()?.value.trim().parse::<f64>().ok()?;
    let previous = data
        .get(1)
        .and_then(|point| point.value.trim().parse::<f64>().ok())
        .unwrap_or(latest);
    clamp_ratio(latest, previous, PRIMARY_INDEX_BOUNDS)
}

/// Current-year over previous-year survey value.
pub fn commodity_ratio(response: &NassResponse, current_year: i32) -> Option<f64> {
    let current = nass::parse_value(&response.record_for_year(current_year)?.value)?;
    let previous = nass::parse_value(&response.record_for_year(current_year - 1)?.value)?;
    clamp_ratio(current, previous, COMMODITY_BOUNDS)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketMultipliers {
    pub primary_index: HashMap<IndexCategory, f64>,
    pub commodity: HashMap<Commodity, f64>,
}

impl MarketMultipliers {
    pub fn from_responses<'a, B, N>(bls: B, nass: N, current_year: i32) -> Self
    where
        B: IntoIterator<Item = (IndexCategory, Option<&'a BlsResponse>)>,
        N: IntoIterator<Item = (Commodity, Option<&'a NassResponse>)>,
    {
        let mut multipliers = MarketMultipliers::default();

        for (category, response) in bls {
            match response.and_then(primary_index_ratio) {
                Some(ratio) => {
                    debug!("BLS {}: multiplier {:.4}", category.display_name(), ratio);
                    multipliers.primary_index.insert(category, ratio);
                }
                None => debug!("BLS {}: no usable data", category.display_name()),
            }
        }

        for (commodity, response) in nass {
            match response.and_then(|r| commodity_ratio(r, current_year)) {
                Some(ratio) => {
                    debug!("USDA {}: multiplier {:.4}", commodity, ratio);
                    multipliers.commodity.insert(commodity, ratio);
                }
                None => debug!("USDA {}: no usable data", commodity),
            }
        }

        multipliers
    }

    pub fn is_empty(&self) -> bool {
        self.primary_index.is_empty() && self.commodity.is_empty()
    }

    /// Multiplier and tagged source for one catalog entry, if any applies.
    pub fn for_entry(&self, entry: &CatalogEntry) -> Option<(f64, DataSource)> {
        match entry.source {
            DataSource::PrimaryIndex => self
                .primary_index
                .get(&index_category_for(entry.category))
                .map(|m| (*m, DataSource::PrimaryIndex)),
            DataSource::CommoditySurvey => commodity_for_name(entry.name)
                .and_then(|commodity| self.commodity.get(&commodity))
                .map(|m| (*m, DataSource::CommoditySurvey)),
        }
    }

    /// Primary-index multipliers keyed by category display name.
    pub fn primary_by_name(&self) -> BTreeMap<&'static str, f64> {
        self.primary_index
            .iter()
            .map(|(category, m)| (category.display_name(), *m))
            .collect()
    }

    /// Commodity multipliers keyed by commodity code.
    pub fn commodity_by_code(&self) -> BTreeMap<&'static str, f64> {
        self.commodity
            .iter()
            .map(|(commodity, m)| (commodity.code(), *m))
            .collect()
    }
}

pub fn reconcile_item<R: Rng + ?Sized>(
    entry: &CatalogEntry,
    multipliers: &MarketMultipliers,
    rng: &mut R,
    today: NaiveDate,
) -> Result<PricedItem, AggregationError> {
    let (adjusted, source) = match multipliers.for_entry(entry) {
        Some((multiplier, source)) => (entry.base_price * multiplier, source),
        None => (entry.base_price, entry.source),
    };

    let current = adjusted + noise(rng, MARKET_VARIATION * adjusted);
    let previous = current - noise(rng, DAILY_VARIATION * current);
    if !(current.is_finite() && previous.is_finite()) {
        return Err(AggregationError::Reconcile(format!(
            "item {} produced a non-finite price",
            entry.id
        )));
    }

    let history = history::generate(rng, current, entry.history_volatility(), today);
    Ok(PricedItem::new(
        entry.descriptor_with_source(source),
        current,
        previous,
        today,
        history,
    ))
}

/// Applies `multipliers` to every entry. With no multiplier at all the
/// unadjusted catalog baseline is returned instead.
pub fn reconcile<R: Rng + ?Sized>(
    entries: &[CatalogEntry],
    multipliers: &MarketMultipliers,
    rng: &mut R,
    today: NaiveDate,
) -> Result<Vec<PricedItem>, AggregationError> {
    if multipliers.is_empty() {
        warn!("No usable upstream data for any key; emitting catalog baseline");
        return Ok(entries
            .iter()
            .map(|entry| catalog::baseline_item(entry, rng, today))
            .collect());
    }

    info!(
        "Reconciling {} items with {} index and {} commodity multipliers",
        entries.len(),
        multipliers.primary_index.len(),
        multipliers.commodity.len()
    );
    entries
        .iter()
        .map(|entry| reconcile_item(entry, multipliers, rng, today))
        .collect()
}

/// Outcome of checking the mapping tables against the catalog.
#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    /// Commodity-survey items no keyword maps to; they always keep their base price.
    pub unmatched_survey_items: Vec<&'static str>,
    pub matched: HashMap<Commodity, usize>,
}

/// Startup check: the catalog is well formed and every keyword points at a
/// tracked commodity that at least one catalog item uses.
pub fn validate_mappings(entries: &'static [CatalogEntry]) -> Result<MappingReport, AggregationError> {
    catalog::validate(entries).map_err(AggregationError::Catalog)?;
    if entries.len() != CATALOG_SIZE {
        return Err(AggregationError::Catalog(format!(
            "expected {} catalog entries, found {}",
            CATALOG_SIZE,
            entries.len()
        )));
    }

    for (keyword, commodity) in COMMODITY_KEYWORDS {
        if !Commodity::TRACKED.contains(&commodity) {
            return Err(AggregationError::Catalog(format!(
                "keyword '{}' maps to untracked commodity {}",
                keyword, commodity
            )));
        }
        let used = entries.iter().any(|e| {
            e.source == DataSource::CommoditySurvey && commodity_for_name(e.name) == Some(commodity)
        });
        if !used {
            return Err(AggregationError::Catalog(format!(
                "keyword '{}' matches no commodity-survey item",
                keyword
            )));
        }
    }

    let mut report = MappingReport::default();
    for entry in entries.iter().filter(|e| e.source == DataSource::CommoditySurvey) {
        match commodity_for_name(entry.name) {
            Some(commodity) => *report.matched.entry(commodity).or_insert(0) += 1,
            None => report.unmatched_survey_items.push(entry.name),
        }
    }

    debug!(
        "{} commodity-survey items have no commodity keyword: {:?}",
        report.unmatched_survey_items.len(),
        report.unmatched_survey_items
    );
    Ok(report)
}
