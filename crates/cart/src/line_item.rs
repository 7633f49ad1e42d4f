//! Line items and their persisted layout.

use cafe_cart_core::{LineItemId, Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One distinct entry in the cart: a menu item plus optional variant.
///
/// `name` already carries the variant annotation, e.g. `Latte (Iced)`, and
/// is unique within a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: LineItemId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    pub quantity: Quantity,
}

impl LineItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// `unit_price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_times(self.quantity)
    }

    pub(crate) fn from_record(record: LineItemRecord) -> Self {
        Self {
            id: LineItemId::generate(),
            name: record.name,
            unit_price: record.price,
            image: record.image,
            quantity: record.quantity,
        }
    }

    pub(crate) fn to_record(&self) -> LineItemRecord {
        LineItemRecord {
            name: self.name.clone(),
            price: self.unit_price,
            image: self.image.clone(),
            quantity: self.quantity,
        }
    }
}

/// Request to add an item to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub base_name: String,
    pub unit_price: Price,
    pub image: String,
    pub variant: Option<String>,
    pub quantity: Quantity,
}

impl NewLineItem {
    /// A single unit of `base_name` with no variant.
    #[must_use]
    pub fn new(base_name: impl Into<String>, unit_price: Price, image: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            unit_price,
            image: image.into(),
            variant: None,
            quantity: Quantity::ONE,
        }
    }

    /// Set the variant annotation.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// `Base (Variant)` when a variant is set, otherwise the base name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.variant.as_deref() {
            Some(variant) if !variant.is_empty() => format!("{} ({variant})", self.base_name),
            _ => self.base_name.clone(),
        }
    }
}

/// Persisted form of a line item: `{name, price, image, quantity}`.
///
/// `price` is written as a JSON number. Deserialization rejects negative
/// prices, zero quantities and blank names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LineItemRecord {
    #[serde(deserialize_with = "non_blank")]
    pub name: String,
    #[serde(with = "price_as_number")]
    pub price: Price,
    #[serde(default)]
    pub image: String,
    pub quantity: Quantity,
}

fn non_blank<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(serde::de::Error::custom("line item name is blank"));
    }
    Ok(name)
}

mod price_as_number {
    use super::{Decimal, Price};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&price.amount(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        let amount: Decimal = rust_decimal::serde::float::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_variant() {
        let item = NewLineItem::new("Latte", Price::from_cents(350), "latte.jpg").with_variant("Hot");
        assert_eq!(item.display_name(), "Latte (Hot)");
    }

    #[test]
    fn test_display_name_without_variant() {
        let item = NewLineItem::new("Croissant", Price::from_cents(275), "croissant.jpg");
        assert_eq!(item.display_name(), "Croissant");

        let blank = item.with_variant("");
        assert_eq!(blank.display_name(), "Croissant");
    }

    #[test]
    fn test_line_total() {
        let item = LineItem {
            id: LineItemId::generate(),
            name: "Latte (Iced)".to_string(),
            unit_price: Price::from_cents(350),
            image: String::new(),
            quantity: Quantity::new(2).unwrap(),
        };
        assert_eq!(item.line_total(), Price::from_cents(700));
    }

    #[test]
    fn test_record_layout_uses_numeric_price() {
        let record = LineItemRecord {
            name: "Latte (Hot)".to_string(),
            price: Price::from_cents(350),
            image: "img/latte.jpg".to_string(),
            quantity: Quantity::ONE,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Latte (Hot)",
                "price": 3.5,
                "image": "img/latte.jpg",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_record_rejects_invalid_entries() {
        let negative = r#"{"name":"Tea","price":-1,"image":"","quantity":1}"#;
        assert!(serde_json::from_str::<LineItemRecord>(negative).is_err());

        let zero = r#"{"name":"Tea","price":2.5,"image":"","quantity":0}"#;
        assert!(serde_json::from_str::<LineItemRecord>(zero).is_err());

        let blank = r#"{"name":"  ","price":2.5,"image":"","quantity":1}"#;
        assert!(serde_json::from_str::<LineItemRecord>(blank).is_err());
    }

    #[test]
    fn test_record_reads_browser_layout() {
        let raw = r#"{"name":"Americano (Iced)","price":3.25,"image":"a.jpg","quantity":3}"#;
        let record: LineItemRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.price, Price::from_cents(325));
        assert_eq!(record.quantity.get(), 3);

        // Whole prices are saved as integers.
        let raw = r#"{"name":"Latte (Hot)","price":3,"image":"","quantity":1}"#;
        let record: LineItemRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.price, Price::from_cents(300));
    }
}
