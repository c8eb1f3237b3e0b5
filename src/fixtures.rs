//! Menu fixtures
//!
//! Human-authored YAML catalogs under `fixtures/menu/<name>.yml`. Prices are
//! written as `"AMOUNT CURRENCY"` strings and every item on a menu must share
//! one currency.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::menu::{Category, Menu, MenuItem};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between menu items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Duplicate item id within one menu
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Item references a category the fixture never declares
    #[error("Item {0} references unknown category: {1}")]
    UnknownCategory(String, String),

    /// No items in the fixture
    #[error("No items in menu fixture")]
    NoItems,
}

/// Wrapper for a whole menu in YAML.
#[derive(Debug, Deserialize)]
struct MenuFixture {
    /// Declared categories.
    categories: Vec<CategoryFixture>,

    /// Menu items, in catalog order.
    items: Vec<MenuItemFixture>,
}

#[derive(Debug, Deserialize)]
struct CategoryFixture {
    id: String,
    name: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct MenuItemFixture {
    id: String,
    name: String,
    description: String,

    /// Price string (e.g., "12.99 USD")
    price: String,

    image: String,
    category: String,

    #[serde(default)]
    toppings: Vec<String>,

    #[serde(default)]
    vegetarian: bool,

    #[serde(default)]
    spicy: bool,

    #[serde(default)]
    popular: bool,

    #[serde(default)]
    rating: f32,

    #[serde(default)]
    rating_count: u32,
}

/// Parse a price string (e.g., "12.99 USD") into an amount and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a non-negative decimal, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(format!(
            "Negative price: {s}"
        )));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

/// Parse a YAML menu fixture into a validated [`Menu`].
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed, a price does not
/// parse, items mix currencies, an item id repeats, an item references an
/// undeclared category, or the fixture has no items.
pub fn parse_menu(yaml: &str) -> Result<Menu, FixtureError> {
    let fixture: MenuFixture = serde_norway::from_str(yaml)?;

    if fixture.items.is_empty() {
        return Err(FixtureError::NoItems);
    }

    let declared: FxHashSet<&str> = fixture
        .categories
        .iter()
        .map(|category| category.id.as_str())
        .collect();

    let mut seen_ids: FxHashSet<String> = FxHashSet::default();
    let mut menu_currency: Option<&'static Currency> = None;
    let mut items = Vec::with_capacity(fixture.items.len());

    for item in fixture.items {
        if !seen_ids.insert(item.id.clone()) {
            return Err(FixtureError::DuplicateItem(item.id));
        }

        if !declared.contains(item.category.as_str()) {
            return Err(FixtureError::UnknownCategory(item.id, item.category));
        }

        let (price, currency) = parse_price(&item.price)?;

        if let Some(existing) = menu_currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            menu_currency = Some(currency);
        }

        items.push(MenuItem {
            id: item.id,
            name: item.name,
            description: item.description,
            price,
            image: item.image,
            category: item.category,
            toppings: item.toppings,
            vegetarian: item.vegetarian,
            spicy: item.spicy,
            popular: item.popular,
            rating: item.rating,
            rating_count: item.rating_count,
        });
    }

    let categories = fixture
        .categories
        .into_iter()
        .map(|category| Category {
            id: category.id,
            name: category.name,
            description: category.description,
        })
        .collect();

    // The no-items case returned above, so a currency was always established.
    let currency = menu_currency.ok_or(FixtureError::NoItems)?;

    Ok(Menu::new(items, categories, currency))
}

/// Load a menu fixture by set name from the default `./fixtures` base path.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or fails validation.
pub fn load_menu(name: &str) -> Result<Menu, FixtureError> {
    load_menu_from("./fixtures", name)
}

/// Load a menu fixture by set name from a custom base path.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or fails validation.
pub fn load_menu_from(base_path: impl AsRef<Path>, name: &str) -> Result<Menu, FixtureError> {
    let file_path = base_path
        .as_ref()
        .join("menu")
        .join(format!("{name}.yml"));
    let contents = fs::read_to_string(&file_path)?;

    parse_menu(&contents)
}
