//! Order Example
//!
//! Walks a cart session end to end: load the menu fixture, fill a slot-backed
//! cart while a badge-style subscriber watches the totals, print the order
//! summary, and place the order.
//!
//! Use `-f` to load a menu fixture set by name
//! Use `-s` to persist the cart slot in a directory of your choice
//! Use `--search` to filter the menu before ordering

use std::io;

use anyhow::Result;
use clap::Parser;

use crust::{
    cart::CartStore,
    checkout::{DeliveryDetails, PaymentMethod, place_order},
    fixtures::load_menu,
    menu::MenuItem,
    receipt::OrderSummary,
    storage::CartSlot,
    utils::DemoOrderArgs,
};

/// Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoOrderArgs::parse();

    let menu = load_menu(&args.fixture)?;

    // Keep the tempdir guard alive for the whole session when no storage
    // directory was given.
    let scratch;
    let slot = match args.storage.as_deref() {
        Some(dir) => CartSlot::at(dir),
        None => {
            scratch = tempfile::tempdir()?;
            CartSlot::at(scratch.path())
        }
    };

    let mut cart = CartStore::with_storage(slot);

    if !cart.is_empty() {
        println!("Hydrated {} line(s) from a previous session", cart.len());
    }

    cart.subscribe(|_, totals| {
        println!(
            "  [badge] {} item(s), subtotal {}",
            totals.total_items, totals.total_price
        );
    });

    if let Some(term) = args.search.as_deref() {
        println!("Menu matches for {term:?}:");
        for item in menu.search(None, term) {
            println!("  {} - {} {}", item.name, item.price, menu.currency().iso_alpha_code);
        }
        println!();
    }

    println!("Popular picks:");
    for item in menu.popular() {
        println!("  {} - {} {}", item.name, item.price, menu.currency().iso_alpha_code);
    }
    println!();

    let margherita = menu
        .item("1")
        .map(MenuItem::snapshot)
        .ok_or_else(|| anyhow::anyhow!("fixture has no item with id 1"))?;
    let pepperoni = menu
        .item("2")
        .map(MenuItem::snapshot)
        .ok_or_else(|| anyhow::anyhow!("fixture has no item with id 2"))?;

    println!("Filling the cart:");
    cart.add_one(margherita);
    cart.add_item(pepperoni, 2);

    let summary = OrderSummary::from_store(&cart, menu.currency())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    summary.write_to(&mut handle, cart.lines())?;

    let details = DeliveryDetails {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        address: "1 Analytical Way".to_string(),
        city: "London".to_string(),
        zip: "E1 6AN".to_string(),
    };

    println!("\nPlacing the order:");
    let order = place_order(&mut cart, details, PaymentMethod::Card, menu.currency(), |_| Ok(()))?;

    println!(
        "\nOrder accepted ({:?}, {} line(s), total {}); cart is now empty: {}",
        order.status(),
        order.lines().len(),
        order.total(),
        cart.is_empty()
    );

    Ok(())
}
