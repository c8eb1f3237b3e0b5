//! Integration tests for whole cart sessions: mutation semantics, derived
//! totals, notification ordering, and the storefront's reference scenario.
//!
//! Reference scenario:
//!
//! 1. Start empty
//! 2. Add Margherita (id "1", $12.99) × 1
//! 3. Add Pepperoni (id "2", $14.99) × 2 -> totals { 3, 42.97 }
//! 4. Set quantity of "1" to 0 -> totals { 2, 29.98 }
//! 5. Clear -> totals { 0, 0 }

use std::{cell::RefCell, rc::Rc};

use rust_decimal::Decimal;

use crust::{
    cart::CartStore,
    items::Item,
    pricing::CartTotals,
};

fn margherita() -> Item {
    Item::new(
        "p1",
        "Margherita",
        Decimal::new(1299, 2),
        vec!["tomato sauce".to_string(), "mozzarella".to_string()],
    )
}

fn pepperoni() -> Item {
    Item::new("p2", "Pepperoni", Decimal::new(1499, 2), Vec::new())
}

#[test]
fn reference_scenario_totals() {
    let mut cart = CartStore::new();

    assert_eq!(cart.totals(), CartTotals::default());

    // Add one Margherita and two Pepperoni.
    cart.add_item(margherita(), 1);
    cart.add_item(pepperoni(), 2);

    let totals = cart.totals();
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.total_price, Decimal::new(4297, 2));

    // Zero quantity removes the Margherita line entirely.
    cart.set_quantity("p1", 0);

    let totals = cart.totals();
    assert_eq!(totals.total_items, 2);
    assert_eq!(totals.total_price, Decimal::new(2998, 2));

    // Clearing resets everything.
    cart.clear();

    let totals = cart.totals();
    assert_eq!(totals.total_items, 0);
    assert_eq!(totals.total_price, Decimal::ZERO);
    assert!(cart.lines().is_empty());
}

#[test]
fn line_count_never_exceeds_distinct_ids() {
    let mut cart = CartStore::new();

    for _ in 0..5 {
        cart.add_item(margherita(), 1);
        cart.add_item(pepperoni(), 1);
    }

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.quantity_of("p1"), Some(5));
    assert_eq!(cart.quantity_of("p2"), Some(5));
}

#[test]
fn quantities_accumulate_on_one_line() {
    let mut cart = CartStore::new();

    cart.add_item(margherita(), 2);
    cart.add_item(margherita(), 3);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.quantity_of("p1"), Some(5));
}

#[test]
fn insertion_order_survives_quantity_changes() {
    let mut cart = CartStore::new();

    cart.add_item(margherita(), 1);
    cart.add_item(pepperoni(), 1);
    cart.add_item(margherita(), 4);

    let ids: Vec<&str> = cart.lines().iter().map(|line| line.item().id()).collect();
    assert_eq!(ids, ["p1", "p2"]);
}

#[test]
fn totals_stay_consistent_across_a_long_session() {
    let mut cart = CartStore::new();

    cart.add_item(margherita(), 3);
    cart.add_item(pepperoni(), 1);
    cart.set_quantity("p1", 2);
    cart.remove_item("p2");
    cart.add_item(pepperoni(), 2);

    // Recompute by hand from the visible lines.
    let expected_items: u64 = cart.lines().iter().map(|line| u64::from(line.quantity())).sum();
    let expected_price: Decimal = cart.lines().iter().map(crust::cart::CartLine::line_total).sum();

    let totals = cart.totals();
    assert_eq!(totals.total_items, expected_items);
    assert_eq!(totals.total_price, expected_price);
}

#[test]
fn clear_twice_equals_clear_once() {
    let mut cart = CartStore::new();

    cart.add_item(margherita(), 2);

    cart.clear();
    let after_once = cart.totals();

    cart.clear();
    let after_twice = cart.totals();

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice, CartTotals::default());
}

#[test]
fn subscribers_observe_mutations_in_invocation_order() {
    let mut cart = CartStore::new();
    let observed: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

    let observed_inner = Rc::clone(&observed);
    cart.subscribe(move |_, totals| observed_inner.borrow_mut().push(totals.total_items));

    cart.add_item(margherita(), 1); // 1
    cart.add_item(pepperoni(), 2); // 3
    cart.set_quantity("p2", 1); // 2
    cart.remove_item("p1"); // 1
    cart.clear(); // 0

    assert_eq!(observed.borrow().as_slice(), [1, 3, 2, 1, 0]);
}

#[test]
fn every_subscriber_receives_every_notification() {
    let mut cart = CartStore::new();
    let first: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let second: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

    let first_inner = Rc::clone(&first);
    cart.subscribe(move |_, totals| first_inner.borrow_mut().push(totals.total_items));

    let second_inner = Rc::clone(&second);
    cart.subscribe(move |lines, _| second_inner.borrow_mut().push(lines.len() as u64));

    cart.add_item(margherita(), 1);
    cart.add_item(pepperoni(), 1);

    assert_eq!(first.borrow().as_slice(), [1, 2]);
    assert_eq!(second.borrow().as_slice(), [1, 2]);
}

#[test]
fn no_op_mutations_are_silent() {
    let mut cart = CartStore::new();
    cart.add_item(margherita(), 2);

    let observed: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let observed_inner = Rc::clone(&observed);
    cart.subscribe(move |_, totals| observed_inner.borrow_mut().push(totals.total_items));

    cart.remove_item("absent");
    cart.set_quantity("absent", 4);
    cart.set_quantity("p1", 2); // already 2

    assert!(observed.borrow().is_empty());
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut cart = CartStore::new();
    let observed: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

    let observed_inner = Rc::clone(&observed);
    let key = cart.subscribe(move |_, totals| observed_inner.borrow_mut().push(totals.total_items));

    cart.add_item(margherita(), 1);

    assert!(cart.unsubscribe(key));

    cart.add_item(pepperoni(), 1);
    cart.clear();

    assert_eq!(observed.borrow().as_slice(), [1]);
}
