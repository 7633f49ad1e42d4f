//! Terminal output.

#![allow(clippy::print_stdout)]

use cafe_cart::checkout::OrderConfirmation;
use cafe_cart::{CartView, LineItem, MenuItem};
use serde::Serialize;

/// Pretty-print any serializable value as JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn menu(items: &[&MenuItem]) {
    let mut current = None;
    for item in items {
        if current != Some(item.category) {
            println!("\n{}", item.category);
            current = Some(item.category);
        }
        let variants = if item.variants.is_empty() {
            String::new()
        } else {
            format!("  [{}]", item.variants.join(" / "))
        };
        println!("  {:<20} {:<24} {:>7}{variants}", item.slug, item.name, item.price.to_string());
    }
}

pub fn added(line: &LineItem) {
    println!("Added! {} x{}", line.name, line.quantity);
}

pub fn cart(view: &CartView) {
    if view.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for (position, item) in view.items.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {} each  x{:<3} {:>9}",
            position + 1,
            item.name,
            item.unit_price,
            item.quantity,
            item.line_total
        );
    }
    println!();
    println!("    Subtotal: {:>10}", view.subtotal);
    println!("    Tax (8%): {:>10}", view.tax);
    println!("    Total:    {:>10}", view.total);
}

pub fn confirmation(confirmation: &OrderConfirmation) {
    println!("{}", confirmation.message());
}

pub fn notice(message: &str) {
    println!("{message}");
}

pub fn badge(count: u32) {
    println!("\nCart: {count} item{}", if count == 1 { "" } else { "s" });
}
