//! Menu

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::items::Item;

/// A full catalog record for one menu entry.
///
/// The cart never stores these directly; [`MenuItem::snapshot`] produces the
/// reduced, immutable copy that enters a cart line.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Stable catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Longer description shown on detail pages.
    pub description: String,

    /// Unit price in major units. Non-negative; the fixture loader enforces
    /// this for every item it emits.
    pub price: Decimal,

    /// Image URL.
    pub image: String,

    /// Id of the category this item belongs to.
    pub category: String,

    /// Toppings listed on receipts.
    pub toppings: Vec<String>,

    /// Whether the item is vegetarian.
    pub vegetarian: bool,

    /// Whether the item is spicy.
    pub spicy: bool,

    /// Whether the item is featured as a popular pick.
    pub popular: bool,

    /// Average customer rating.
    pub rating: f32,

    /// Number of ratings behind the average.
    pub rating_count: u32,
}

impl MenuItem {
    /// Captures the cart-insertable snapshot of this item's display fields.
    #[must_use]
    pub fn snapshot(&self) -> Item {
        Item::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.toppings.clone(),
        )
    }
}

/// A menu category.
#[derive(Debug, Clone)]
pub struct Category {
    /// Stable category identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description.
    pub description: String,
}

/// The read-only catalog: ordered items, their categories, and a single menu
/// currency.
#[derive(Debug)]
pub struct Menu {
    items: Vec<MenuItem>,
    categories: Vec<Category>,
    index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl Menu {
    /// Creates a menu from already-validated items and categories.
    #[must_use]
    pub fn new(
        items: Vec<MenuItem>,
        categories: Vec<Category>,
        currency: &'static Currency,
    ) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();

        Self {
            items,
            categories,
            index,
            currency,
        }
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.index.get(id).and_then(|idx| self.items.get(*idx))
    }

    /// Returns all items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Returns the declared categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the single currency every menu price is denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Returns the number of items on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filters the menu by category and search term.
    ///
    /// The term matches case-insensitively against name or description; an
    /// empty term matches everything. `None` for the category matches every
    /// category.
    #[must_use]
    pub fn search(&self, category: Option<&str>, term: &str) -> Vec<&MenuItem> {
        let term = term.to_lowercase();

        self.items
            .iter()
            .filter(|item| category.is_none_or(|cat| item.category == cat))
            .filter(|item| {
                term.is_empty()
                    || item.name.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Returns the items featured as popular picks, in catalog order.
    #[must_use]
    pub fn popular(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.popular).collect()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    fn pizza(id: &str, name: &str, category: &str, popular: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} with fresh tomato sauce"),
            price: Decimal::new(1299, 2),
            image: String::new(),
            category: category.to_string(),
            toppings: vec!["tomato sauce".to_string()],
            vegetarian: false,
            spicy: false,
            popular,
            rating: 4.5,
            rating_count: 100,
        }
    }

    fn test_menu() -> Menu {
        Menu::new(
            vec![
                pizza("1", "Margherita Classic", "classic", true),
                pizza("2", "Pepperoni Paradise", "meat", true),
                pizza("3", "Veggie Supreme", "vegetarian", false),
            ],
            vec![Category {
                id: "classic".to_string(),
                name: "Classic".to_string(),
                description: String::new(),
            }],
            iso::USD,
        )
    }

    #[test]
    fn item_lookup_by_id() {
        let menu = test_menu();

        assert_eq!(menu.item("2").map(|item| item.name.as_str()), Some("Pepperoni Paradise"));
        assert!(menu.item("404").is_none());
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let menu = test_menu();

        let by_name = menu.search(None, "pepperoni");
        assert_eq!(by_name.len(), 1);

        let by_description = menu.search(None, "TOMATO SAUCE");
        assert_eq!(by_description.len(), 3);
    }

    #[test]
    fn search_gates_on_category() {
        let menu = test_menu();

        let meat = menu.search(Some("meat"), "");
        assert_eq!(meat.len(), 1);

        let none = menu.search(Some("meat"), "margherita");
        assert!(none.is_empty());
    }

    #[test]
    fn popular_preserves_catalog_order() {
        let menu = test_menu();

        let ids: Vec<&str> = menu.popular().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn snapshot_captures_receipt_fields() {
        let menu = test_menu();

        let snapshot = menu.item("1").map(MenuItem::snapshot);

        assert_eq!(snapshot.as_ref().map(Item::id), Some("1"));
        assert_eq!(snapshot.as_ref().map(Item::price), Some(Decimal::new(1299, 2)));
    }
}
