// src/services/catalog.rs
use chrono::NaiveDate;
use rand::Rng;
use std::collections::HashSet;

use crate::models::Category::{self, *};
use crate::models::{DataSource, ItemDescriptor, PricedItem};
use crate::services::history::{self, noise};

pub const CATALOG_SIZE: usize = 250;

/// Width of the random previous-price spread in the baseline (±10 %).
const BASELINE_VARIATION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub base_price: f64,
    pub unit: &'static str,
    pub source: DataSource,
    volatility_override: Option<f64>,
}

impl CatalogEntry {
    const fn new(
        id: &'static str,
        name: &'static str,
        category: Category,
        base_price: f64,
        unit: &'static str,
        source: DataSource,
    ) -> Self {
        CatalogEntry {
            id,
            name,
            category,
            base_price,
            unit,
            source,
            volatility_override: None,
        }
    }

    const fn volatility(mut self, volatility: f64) -> Self {
        self.volatility_override = Some(volatility);
        self
    }

    /// History volatility: the entry's own value, else its category default.
    pub fn history_volatility(&self) -> f64 {
        self.volatility_override
            .unwrap_or_else(|| self.category.default_volatility())
    }

    pub fn descriptor(&self) -> ItemDescriptor<'static> {
        self.descriptor_with_source(self.source)
    }

    pub fn descriptor_with_source(&self, source: DataSource) -> ItemDescriptor<'static> {
        ItemDescriptor {
            id: self.id,
            name: self.name,
            category: self.category,
            unit: self.unit,
            source,
        }
    }
}

const fn bls(id: &'static str, name: &'static str, category: Category, price: f64, unit: &'static str) -> CatalogEntry {
    CatalogEntry::new(id, name, category, price, unit, DataSource::PrimaryIndex)
}

const fn usda(id: &'static str, name: &'static str, category: Category, price: f64, unit: &'static str) -> CatalogEntry {
    CatalogEntry::new(id, name, category, price, unit, DataSource::CommoditySurvey)
}

pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

/// Baseline item: the base price stands as today's price and yesterday's is
/// drawn within ±10 % of it.
pub fn baseline_item<R: Rng + ?Sized>(entry: &CatalogEntry, rng: &mut R, today: NaiveDate) -> PricedItem {
    let current = entry.base_price;
    let previous = current - noise(rng, BASELINE_VARIATION * current);
    let history = history::generate(rng, current, entry.history_volatility(), today);
    PricedItem::new(entry.descriptor(), current, previous, today, history)
}

pub fn build_baseline<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<PricedItem> {
    entries()
        .iter()
        .map(|entry| baseline_item(entry, rng, today))
        .collect()
}

/// Structural checks on a catalog table: unique non-empty ids, positive
/// prices, sane volatilities.
pub fn validate(entries: &[CatalogEntry]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.id.is_empty() || entry.name.is_empty() {
            return Err(format!("entry '{}' has an empty id or name", entry.name));
        }
        if !seen.insert(entry.id) {
            return Err(format!("duplicate catalog id '{}'", entry.id));
        }
        if !(entry.base_price.is_finite() && entry.base_price > 0.0) {
            return Err(format!("item {} has non-positive base price {}", entry.id, entry.base_price));
        }
        let volatility = entry.history_volatility();
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(format!("item {} has invalid volatility {}", entry.id, volatility));
        }
    }
    Ok(())
}

static CATALOG: [CatalogEntry; CATALOG_SIZE] = [
    // Meat & poultry
    usda("1", "Ground Beef 80/20", Meat, 6.89, "lb"),
    usda("2", "Chicken Breast Boneless", Meat, 5.99, "lb"),
    usda("3", "Pork Chops Center Cut", Meat, 4.89, "lb"),
    usda("4", "Ground Turkey 93/7", Meat, 5.49, "lb"),
    usda("5", "Beef Chuck Roast", Meat, 7.99, "lb"),
    usda("6", "Chicken Thighs Bone-in", Meat, 2.99, "lb"),
    bls("7", "Bacon Regular", Meat, 6.49, "lb"),
    bls("8", "Ham Sliced Deli", Meat, 8.99, "lb"),
    usda("9", "Ground Pork", Meat, 4.29, "lb"),
    usda("10", "Beef Sirloin Steak", Meat, 9.99, "lb"),
    usda("11", "Chicken Wings", Meat, 3.99, "lb"),
    usda("12", "Turkey Breast Deli", Meat, 9.49, "lb"),
    usda("13", "Pork Shoulder", Meat, 3.79, "lb"),
    usda("14", "Beef Ribeye Steak", Meat, 14.99, "lb"),
    bls("15", "Hot Dogs Beef", Meat, 4.99, "lb"),
    usda("16", "Chicken Drumsticks", Meat, 1.99, "lb"),
    usda("17", "Pork Ribs Baby Back", Meat, 6.99, "lb"),
    usda("18", "Ground Beef 90/10", Meat, 7.99, "lb"),
    bls("19", "Sausage Italian", Meat, 5.99, "lb"),
    usda("20", "Beef Tenderloin", Meat, 19.99, "lb"),
    usda("21", "Turkey Ground 85/15", Meat, 4.99, "lb"),
    usda("22", "Chicken Whole", Meat, 1.79, "lb"),
    bls("23", "Lamb Chops", Meat, 12.99, "lb"),
    usda("24", "Beef Brisket", Meat, 8.99, "lb"),
    usda("25", "Pork Tenderloin", Meat, 6.99, "lb"),
    usda("26", "Turkey Whole", Meat, 2.49, "lb"),
    usda("27", "Beef Short Ribs", Meat, 11.99, "lb"),
    usda("28", "Chicken Tenders", Meat, 6.49, "lb"),
    usda("29", "Pork Loin Roast", Meat, 5.99, "lb"),
    bls("30", "Ground Lamb", Meat, 9.99, "lb"),

    // Dairy & eggs
    usda("31", "Whole Milk", Dairy, 3.89, "gallon"),
    usda("32", "Eggs Large Grade A", Dairy, 2.89, "dozen"),
    bls("33", "Cheddar Cheese Sharp", Dairy, 5.49, "lb"),
    bls("34", "Butter Unsalted", Dairy, 4.99, "lb"),
    bls("35", "Greek Yogurt Plain", Dairy, 5.99, "32 oz"),
    bls("36", "Cream Cheese", Dairy, 2.49, "8 oz"),
    bls("37", "Mozzarella Cheese", Dairy, 4.99, "lb"),
    usda("38", "2% Milk", Dairy, 3.69, "gallon"),
    bls("39", "Heavy Cream", Dairy, 3.99, "pint"),
    bls("40", "Swiss Cheese", Dairy, 6.99, "lb"),
    bls("41", "Cottage Cheese", Dairy, 3.49, "lb"),
    bls("42", "Sour Cream", Dairy, 2.99, "16 oz"),
    bls("43", "American Cheese", Dairy, 4.49, "lb"),
    usda("44", "Skim Milk", Dairy, 3.59, "gallon"),
    bls("45", "Parmesan Cheese", Dairy, 8.99, "lb"),
    usda("46", "Eggs Organic", Dairy, 4.99, "dozen"),
    bls("47", "Butter Salted", Dairy, 4.79, "lb"),
    bls("48", "Goat Cheese", Dairy, 7.99, "4 oz"),
    bls("49", "Feta Cheese", Dairy, 5.99, "8 oz"),
    bls("50", "Blue Cheese", Dairy, 8.49, "4 oz"),
    bls("51", "Almond Milk", Dairy, 3.49, "64 oz"),
    bls("52", "Oat Milk", Dairy, 4.99, "64 oz"),
    bls("53", "Ricotta Cheese", Dairy, 3.99, "15 oz"),
    bls("54", "Half and Half", Dairy, 2.99, "pint"),
    bls("55", "Buttermilk", Dairy, 2.49, "quart"),

    // Produce
    usda("56", "Bananas", Produce, 1.49, "lb"),
    usda("57", "Apples Red Delicious", Produce, 2.19, "lb").volatility(0.03),
    usda("58", "Potatoes Russet", Produce, 1.89, "lb").volatility(0.03),
    usda("59", "Tomatoes", Produce, 2.99, "lb"),
    usda("60", "Onions Yellow", Produce, 1.49, "lb").volatility(0.03),
    usda("61", "Carrots", Produce, 1.79, "lb").volatility(0.03),
    usda("62", "Lettuce Iceberg", Produce, 1.99, "head").volatility(0.05),
    usda("63", "Broccoli", Produce, 2.49, "lb"),
    usda("64", "Bell Peppers", Produce, 3.99, "lb"),
    usda("65", "Cucumbers", Produce, 1.99, "lb"),
    usda("66", "Oranges", Produce, 2.29, "lb").volatility(0.03),
    usda("67", "Strawberries", Produce, 4.99, "lb").volatility(0.06),
    usda("68", "Grapes", Produce, 3.99, "lb").volatility(0.05),
    usda("69", "Spinach Fresh", Produce, 3.49, "lb").volatility(0.05),
    usda("70", "Mushrooms White", Produce, 2.99, "lb"),
    usda("71", "Avocados", Produce, 1.99, "each").volatility(0.05),
    usda("72", "Limes", Produce, 3.99, "lb").volatility(0.05),
    usda("73", "Lemons", Produce, 2.99, "lb"),
    usda("74", "Celery", Produce, 1.79, "bunch"),
    usda("75", "Cauliflower", Produce, 2.99, "head").volatility(0.05),
    usda("76", "Sweet Potatoes", Produce, 1.99, "lb").volatility(0.03),
    usda("77", "Green Beans", Produce, 2.99, "lb"),
    usda("78", "Corn on the Cob", Produce, 0.79, "each").volatility(0.05),
    usda("79", "Blueberries", Produce, 5.99, "pint").volatility(0.06),
    usda("80", "Pears", Produce, 2.79, "lb").volatility(0.03),
    usda("81", "Apples Granny Smith", Produce, 2.49, "lb").volatility(0.03),
    usda("82", "Kiwi Fruit", Produce, 4.99, "lb").volatility(0.05),
    usda("83", "Pineapple", Produce, 2.99, "each"),
    usda("84", "Watermelon", Produce, 0.69, "lb").volatility(0.06),
    usda("85", "Cantaloupe", Produce, 1.99, "each").volatility(0.05),
    usda("86", "Asparagus", Produce, 4.99, "lb").volatility(0.06),
    usda("87", "Zucchini", Produce, 1.99, "lb"),
    usda("88", "Eggplant", Produce, 2.49, "lb"),
    usda("89", "Radishes", Produce, 1.49, "bunch").volatility(0.05),
    usda("90", "Cabbage", Produce, 1.29, "lb"),
    usda("91", "Brussels Sprouts", Produce, 3.99, "lb").volatility(0.05),
    usda("92", "Artichokes", Produce, 1.99, "each").volatility(0.05),
    usda("93", "Parsley", Produce, 1.99, "bunch").volatility(0.06),
    usda("94", "Cilantro", Produce, 1.49, "bunch").volatility(0.06),
    usda("95", "Ginger Root", Produce, 3.99, "lb"),

    // Grains & bread
    bls("96", "White Bread", Bakery, 3.29, "loaf"),
    bls("97", "Whole Wheat Bread", Bakery, 3.79, "loaf"),
    bls("98", "White Rice Long Grain", Grains, 2.45, "lb"),
    bls("99", "Brown Rice", Grains, 2.99, "lb"),
    bls("100", "Pasta Spaghetti", Grains, 1.99, "lb"),
    bls("101", "Oatmeal Old Fashioned", Grains, 3.49, "18 oz"),
    bls("102", "All-Purpose Flour", Grains, 2.99, "5 lb"),
    bls("103", "Quinoa", Grains, 5.99, "lb"),
    bls("104", "Bagels Everything", Bakery, 4.99, "6 pack"),
    bls("105", "Tortillas Flour", Bakery, 3.49, "10 count"),
    bls("106", "Cereal Cheerios", Grains, 4.99, "12 oz"),
    bls("107", "Granola Bars", Grains, 5.49, "box"),
    bls("108", "Crackers Saltine", Grains, 2.99, "16 oz"),
    bls("109", "Pasta Penne", Grains, 2.19, "lb"),
    bls("110", "English Muffins", Bakery, 2.99, "6 pack"),
    bls("111", "Sourdough Bread", Bakery, 4.49, "loaf"),
    bls("112", "Rye Bread", Bakery, 4.29, "loaf"),
    bls("113", "Corn Tortillas", Bakery, 2.99, "30 count"),
    bls("114", "Muffins Blueberry", Bakery, 5.99, "6 pack"),
    bls("115", "Croissants", Bakery, 4.99, "6 pack"),
    bls("116", "Barley Pearl", Grains, 2.49, "lb"),
    bls("117", "Wild Rice", Grains, 6.99, "lb"),
    bls("118", "Couscous", Grains, 3.49, "10 oz"),
    bls("119", "Whole Wheat Flour", Grains, 3.49, "5 lb"),
    bls("120", "Pasta Lasagna", Grains, 2.49, "lb"),

    // Seafood
    bls("121", "Salmon Atlantic", Seafood, 12.99, "lb"),
    bls("122", "Shrimp Large", Seafood, 8.99, "lb"),
    bls("123", "Cod Fillets", Seafood, 9.99, "lb"),
    bls("124", "Tuna Steaks", Seafood, 14.99, "lb"),
    bls("125", "Tilapia Fillets", Seafood, 7.99, "lb"),
    bls("126", "Crab Legs King", Seafood, 24.99, "lb"),
    bls("127", "Mahi Mahi", Seafood, 11.99, "lb"),
    bls("128", "Scallops Sea", Seafood, 19.99, "lb"),
    bls("129", "Lobster Tails", Seafood, 18.99, "lb"),
    bls("130", "Halibut Steaks", Seafood, 16.99, "lb"),
    bls("131", "Catfish Fillets", Seafood, 8.49, "lb"),
    bls("132", "Red Snapper", Seafood, 13.99, "lb"),
    bls("133", "Swordfish Steaks", Seafood, 15.99, "lb"),
    bls("134", "Mackerel", Seafood, 7.99, "lb"),
    bls("135", "Sardines Fresh", Seafood, 6.99, "lb"),
    bls("136", "Oysters Fresh", Seafood, 12.99, "dozen"),
    bls("137", "Mussels", Seafood, 5.99, "lb"),
    bls("138", "Clams", Seafood, 8.99, "lb"),
    bls("139", "Octopus", Seafood, 14.99, "lb"),
    bls("140", "Squid", Seafood, 9.99, "lb"),

    // Beverages
    bls("141", "Orange Juice 100%", Beverages, 4.99, "64 oz"),
    bls("142", "Coffee Ground", Beverages, 8.99, "12 oz"),
    bls("143", "Tea Bags Black", Beverages, 4.49, "100 count"),
    bls("144", "Soda Cola 12-pack", Beverages, 5.99, "12 pack"),
    bls("145", "Bottled Water", Beverages, 3.99, "24 pack"),
    bls("146", "Apple Juice", Beverages, 3.99, "64 oz"),
    bls("147", "Energy Drinks", Beverages, 8.99, "4 pack"),
    bls("148", "Sports Drink", Beverages, 4.99, "8 pack"),
    bls("149", "Wine Red Table", Beverages, 12.99, "bottle"),
    bls("150", "Beer Domestic", Beverages, 9.99, "12 pack"),
    bls("151", "Cranberry Juice", Beverages, 4.49, "64 oz"),
    bls("152", "Green Tea", Beverages, 5.99, "100 count"),
    bls("153", "Sparkling Water", Beverages, 4.99, "12 pack"),
    bls("154", "Lemonade", Beverages, 3.49, "64 oz"),
    bls("155", "Coconut Water", Beverages, 6.99, "4 pack"),
    bls("156", "Coffee Beans", Beverages, 12.99, "12 oz"),
    bls("157", "Wine White", Beverages, 11.99, "bottle"),
    bls("158", "Beer Craft", Beverages, 14.99, "6 pack"),
    bls("159", "Kombucha", Beverages, 8.99, "4 pack"),
    bls("160", "Protein Shake", Beverages, 7.99, "4 pack"),

    // Pantry & condiments
    bls("161", "Olive Oil Extra Virgin", Pantry, 7.99, "16.9 oz"),
    bls("162", "Salt Table", Pantry, 1.49, "26 oz"),
    bls("163", "Black Pepper Ground", Pantry, 3.99, "3 oz"),
    bls("164", "Ketchup", Pantry, 2.99, "32 oz"),
    bls("165", "Mustard Yellow", Pantry, 1.99, "14 oz"),
    bls("166", "Mayonnaise", Pantry, 4.49, "30 oz"),
    bls("167", "BBQ Sauce", Pantry, 2.99, "18 oz"),
    bls("168", "Honey Pure", Pantry, 5.99, "12 oz"),
    bls("169", "Peanut Butter", Pantry, 4.99, "18 oz"),
    bls("170", "Jam Strawberry", Pantry, 3.99, "18 oz"),
    bls("171", "Vanilla Extract", Pantry, 6.99, "4 oz"),
    bls("172", "Baking Soda", Pantry, 1.99, "16 oz"),
    bls("173", "Vinegar White", Pantry, 2.49, "32 oz"),
    bls("174", "Soy Sauce", Pantry, 3.49, "10 oz"),
    bls("175", "Hot Sauce", Pantry, 2.99, "5 oz"),
    bls("176", "Garlic Powder", Pantry, 2.99, "3 oz"),
    bls("177", "Onion Powder", Pantry, 2.79, "3 oz"),
    bls("178", "Paprika", Pantry, 3.49, "2.5 oz"),
    bls("179", "Cumin Ground", Pantry, 3.99, "2 oz"),
    bls("180", "Oregano Dried", Pantry, 2.99, "1 oz"),
    bls("181", "Basil Dried", Pantry, 3.49, "1 oz"),
    bls("182", "Cinnamon Ground", Pantry, 3.99, "2 oz"),
    bls("183", "Maple Syrup", Pantry, 8.99, "12 oz"),
    bls("184", "Coconut Oil", Pantry, 9.99, "14 oz"),
    bls("185", "Sesame Oil", Pantry, 5.99, "5 oz"),

    // Frozen
    bls("186", "Frozen Pizza", Frozen, 5.99, "each"),
    bls("187", "Ice Cream Vanilla", Frozen, 4.99, "half gallon"),
    bls("188", "Frozen Peas", Frozen, 2.49, "16 oz"),
    bls("189", "Frozen Corn", Frozen, 2.29, "16 oz"),
    bls("190", "Chicken Nuggets", Frozen, 6.99, "2 lb"),
    bls("191", "Frozen Berries Mix", Frozen, 4.99, "16 oz"),
    bls("192", "Waffles Frozen", Frozen, 3.99, "box"),
    bls("193", "French Fries", Frozen, 3.49, "2 lb"),
    bls("194", "Frozen Broccoli", Frozen, 2.99, "16 oz"),
    bls("195", "Ice Cream Chocolate", Frozen, 5.49, "half gallon"),
    bls("196", "Frozen Shrimp", Frozen, 9.99, "1 lb"),
    bls("197", "TV Dinner", Frozen, 4.49, "each"),
    bls("198", "Frozen Orange Juice", Frozen, 2.99, "12 oz"),
    bls("199", "Hash Browns", Frozen, 3.99, "2 lb"),
    bls("200", "Frozen Spinach", Frozen, 2.49, "10 oz"),
    bls("201", "Breakfast Burritos", Frozen, 5.99, "8 pack"),
    bls("202", "Frozen Yogurt", Frozen, 4.49, "pint"),
    bls("203", "Onion Rings", Frozen, 3.99, "22 oz"),
    bls("204", "Frozen Salmon", Frozen, 11.99, "1 lb"),
    bls("205", "Ice Cream Bars", Frozen, 6.99, "12 pack"),

    // Snacks & candy
    bls("206", "Potato Chips", Snacks, 3.99, "10 oz"),
    bls("207", "Chocolate Bar", Snacks, 2.49, "1.5 oz"),
    bls("208", "Nuts Mixed", Snacks, 7.99, "16 oz"),
    bls("209", "Popcorn Microwave", Snacks, 4.99, "6 pack"),
    bls("210", "Pretzels", Snacks, 3.49, "16 oz"),
    bls("211", "Gummy Bears", Snacks, 3.99, "5 oz"),
    bls("212", "Trail Mix", Snacks, 6.99, "14 oz"),
    bls("213", "Cookies Chocolate Chip", Snacks, 4.49, "18 oz"),
    bls("214", "Tortilla Chips", Snacks, 3.99, "13 oz"),
    bls("215", "Candy Mints", Snacks, 1.99, "1.5 oz"),
    bls("216", "Beef Jerky", Snacks, 8.99, "3 oz"),
    bls("217", "Almonds", Snacks, 8.99, "16 oz"),
    bls("218", "Raisins", Snacks, 3.99, "12 oz"),
    bls("219", "Granola", Snacks, 5.99, "12 oz"),
    bls("220", "Rice Cakes", Snacks, 3.49, "8.5 oz"),
    bls("221", "Peanuts Roasted", Snacks, 4.99, "16 oz"),
    bls("222", "Crackers Cheese", Snacks, 4.49, "12 oz"),
    bls("223", "Energy Bars", Snacks, 7.99, "6 pack"),
    bls("224", "Sunflower Seeds", Snacks, 2.99, "5 oz"),
    bls("225", "Fruit Snacks", Snacks, 3.99, "10 pack"),

    // Household & personal care
    bls("226", "Toilet Paper 12-roll", Household, 12.99, "12 pack"),
    bls("227", "Paper Towels", Household, 8.99, "6 pack"),
    bls("228", "Dish Soap", Household, 2.99, "25 oz"),
    bls("229", "Laundry Detergent", Household, 11.99, "100 oz"),
    bls("230", "Shampoo", PersonalCare, 5.99, "12 oz"),
    bls("231", "Toothpaste", PersonalCare, 3.99, "6 oz"),
    bls("232", "Deodorant", PersonalCare, 4.49, "2.6 oz"),
    bls("233", "Body Wash", PersonalCare, 4.99, "18 oz"),
    bls("234", "Hand Soap", Household, 2.99, "7.5 oz"),
    bls("235", "All-Purpose Cleaner", Household, 3.99, "32 oz"),
    bls("236", "Fabric Softener", Household, 4.99, "64 oz"),
    bls("237", "Bleach", Household, 2.49, "64 oz"),
    bls("238", "Glass Cleaner", Household, 3.49, "32 oz"),
    bls("239", "Trash Bags", Household, 8.99, "80 count"),
    bls("240", "Aluminum Foil", Household, 4.99, "75 sq ft"),
    bls("241", "Plastic Wrap", Household, 3.99, "100 sq ft"),
    bls("242", "Paper Plates", Household, 5.99, "100 count"),
    bls("243", "Conditioner", PersonalCare, 6.49, "12 oz"),
    bls("244", "Mouthwash", PersonalCare, 4.99, "16 oz"),
    bls("245", "Razors Disposable", PersonalCare, 7.99, "12 pack"),
    bls("246", "Lotion Body", PersonalCare, 5.99, "18 oz"),
    bls("247", "Tissues Facial", Household, 3.99, "6 pack"),
    bls("248", "Sponges Kitchen", Household, 4.99, "6 pack"),
    bls("249", "Air Freshener", Household, 3.49, "8.8 oz"),
    bls("250", "Batteries AA", Household, 8.99, "8 pack"),
];
