// src/models.rs
use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Fixed set of catalog categories shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Meat,
    Dairy,
    Produce,
    Bakery,
    Grains,
    Seafood,
    Beverages,
    Pantry,
    Frozen,
    Snacks,
    Household,
    #[serde(rename = "Personal Care")]
    PersonalCare,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Meat,
        Category::Dairy,
        Category::Produce,
        Category::Bakery,
        Category::Grains,
        Category::Seafood,
        Category::Beverages,
        Category::Pantry,
        Category::Frozen,
        Category::Snacks,
        Category::Household,
        Category::PersonalCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Produce => "Produce",
            Category::Bakery => "Bakery",
            Category::Grains => "Grains",
            Category::Seafood => "Seafood",
            Category::Beverages => "Beverages",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
            Category::PersonalCare => "Personal Care",
        }
    }

    /// Volatility used for price histories when an entry carries no override.
    pub fn default_volatility(&self) -> f64 {
        match self {
            Category::Produce => 0.04,
            _ => 0.03,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which upstream statistic informs an item's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// BLS consumer price index (category level).
    #[serde(rename = "BLS")]
    PrimaryIndex,
    /// USDA NASS price-received survey (commodity level).
    #[serde(rename = "USDA")]
    CommoditySurvey,
}

/// Where a payload came from. Lets operators and tests see a degradation the
/// dashboard itself never shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Live,
    FallbackSynthetic,
    FallbackBaseline,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Live => "live",
            Provenance::FallbackSynthetic => "fallback-synthetic",
            Provenance::FallbackBaseline => "fallback-baseline",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payload tagged with its provenance.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub provenance: Provenance,
    pub payload: T,
}

impl<T> Sourced<T> {
    pub fn live(payload: T) -> Self {
        Sourced { provenance: Provenance::Live, payload }
    }

    pub fn fallback(payload: T) -> Self {
        Sourced { provenance: Provenance::FallbackSynthetic, payload }
    }

    pub fn is_live(&self) -> bool {
        self.provenance == Provenance::Live
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Daily,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub period: PeriodKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceHistoryBundle {
    pub daily: Vec<PricePoint>,
    pub monthly: Vec<PricePoint>,
    pub yearly: Vec<PricePoint>,
}

// Older dashboard builds read `all`, which mirrors the daily series.
impl Serialize for PriceHistoryBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PriceHistoryBundle", 4)?;
        state.serialize_field("daily", &self.daily)?;
        state.serialize_field("monthly", &self.monthly)?;
        state.serialize_field("yearly", &self.yearly)?;
        state.serialize_field("all", &self.daily)?;
        state.end()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub current_price: f64,
    pub previous_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub unit: String,
    pub source: DataSource,
    pub last_updated: NaiveDate,
    pub price_history: PriceHistoryBundle,
}

/// Everything about an item except the two prices and the derived change fields.
#[derive(Debug, Clone)]
pub struct ItemDescriptor<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: Category,
    pub unit: &'a str,
    pub source: DataSource,
}

impl PricedItem {
    /// Builds an item from raw prices. Prices are rounded and floored here, and
    /// `change`/`change_percent` are derived from the stored values only.
    pub fn new(
        descriptor: ItemDescriptor<'_>,
        current_price: f64,
        previous_price: f64,
        last_updated: NaiveDate,
        price_history: PriceHistoryBundle,
    ) -> Self {
        let current_price = floor_price(round2(current_price));
        let previous_price = floor_price(round2(previous_price));
        let change = round2(current_price - previous_price);
        let change_percent = round1(change / previous_price * 100.0);

        PricedItem {
            id: descriptor.id.to_string(),
            name: descriptor.name.to_string(),
            category: descriptor.category,
            current_price,
            previous_price,
            change,
            change_percent,
            unit: descriptor.unit.to_string(),
            source: descriptor.source,
            last_updated,
            price_history,
        }
    }
}

/// Result of one price-list request.
#[derive(Debug, Clone)]
pub struct PriceList {
    pub provenance: Provenance,
    pub items: Vec<PricedItem>,
}

pub const MIN_PRICE: f64 = 0.01;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn floor_price(value: f64) -> f64 {
    value.max(MIN_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_history() -> PriceHistoryBundle {
        PriceHistoryBundle { daily: vec![], monthly: vec![], yearly: vec![] }
    }

    fn descriptor() -> ItemDescriptor<'static> {
        ItemDescriptor {
            id: "31",
            name: "Whole Milk",
            category: Category::Dairy,
            unit: "gallon",
            source: DataSource::CommoditySurvey,
        }
    }

    #[test]
    fn change_fields_derive_from_rounded_prices() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let item = PricedItem::new(descriptor(), 3.894, 3.7549, today, empty_history());

        assert_eq!(item.current_price, 3.89);
        assert_eq!(item.previous_price, 3.75);
        assert_eq!(item.change, round2(3.89 - 3.75));
        assert_eq!(item.change_percent, round1(item.change / 3.75 * 100.0));
    }

    #[test]
    fn prices_are_floored_at_one_cent() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let item = PricedItem::new(descriptor(), -2.0, 0.001, today, empty_history());

        assert_eq!(item.current_price, MIN_PRICE);
        assert_eq!(item.previous_price, MIN_PRICE);
        assert_eq!(item.change, 0.0);
        assert_eq!(item.change_percent, 0.0);
    }

    #[test]
    fn item_serializes_with_dashboard_field_names() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let item = PricedItem::new(descriptor(), 3.89, 3.69, today, empty_history());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["currentPrice"], 3.89);
        assert_eq!(json["source"], "USDA");
        assert_eq!(json["category"], "Dairy");
        assert_eq!(json["lastUpdated"], "2024-05-10");
        assert!(json["priceHistory"]["all"].is_array());
    }

    #[test]
    fn personal_care_keeps_its_display_name() {
        let json = serde_json::to_value(Category::PersonalCare).unwrap();
        assert_eq!(json, "Personal Care");
        assert_eq!(Category::PersonalCare.to_string(), "Personal Care");
    }
}
