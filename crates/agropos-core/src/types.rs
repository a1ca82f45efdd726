//! # Domain Types
//!
//! Core domain types used throughout the agropos PDV.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Discount     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  Percentage bps │   │  Cash           │       │
//! │  │  sale_price     │   │  Fixed centavos │   │  Debit          │       │
//! │  │  unit_type      │   └─────────────────┘   │  Credit         │       │
//! │  │  stock          │                         │  Pix            │       │
//! │  └─────────────────┘   ┌─────────────────┐   └─────────────────┘       │
//! │                        │    UnitType     │                             │
//! │                        │  Unit | Bulk    │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The cart owns a full `Product` copy per line, frozen at add time. Catalog
//! updates after that moment never change what the customer was quoted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::{MISCELLANEOUS_CATEGORY, MISCELLANEOUS_NAME};

// =============================================================================
// Unit Type
// =============================================================================

/// How a product is measured at the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Sold in whole units (bags, boxes, tools). Quantities must be integral.
    Unit,
    /// Sold by fractional measure (weighed seed, feed, fertilizer).
    /// Quantities carry three decimal places.
    Bulk,
}

impl Default for UnitType {
    fn default() -> Self {
        UnitType::Unit
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Supplied by the external catalog provider; read-only to the cart engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier. Catalog products carry the backend id;
    /// miscellaneous lines carry a generated `misc-{uuid}` id.
    pub id: String,

    /// Display name shown on the PDV screen and the receipt.
    pub name: String,

    /// Display category ("Sementes", "Rações", "Ferramentas", ...).
    pub category: String,

    /// Barcode (EAN-13, EAN-8, ...), when the product has one.
    pub barcode: Option<String>,

    /// Sale price in centavos.
    pub sale_price_cents: i64,

    /// Whether the product is sold by unit or by weight.
    pub unit_type: UnitType,

    /// Display measure ("un", "kg", "sc").
    pub unit_measure: String,

    /// Available stock in milliunits (fractional allowed for bulk).
    pub stock_milli: i64,

    /// The sale price is entered manually at sale time instead of taken
    /// from the catalog.
    pub is_variable_price: bool,

    /// Synthetic ad-hoc line item: fixed quantity 1, no stock tracking.
    pub is_miscellaneous: bool,
}

impl Product {
    /// Creates a unit-type catalog product with no barcode and zero stock.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        sale_price: Money,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            barcode: None,
            sale_price_cents: sale_price.cents(),
            unit_type: UnitType::Unit,
            unit_measure: "un".to_string(),
            stock_milli: 0,
            is_variable_price: false,
            is_miscellaneous: false,
        }
    }

    /// Creates a synthetic "DIVERSOS" line product for a one-off charge.
    ///
    /// ## Behavior
    /// - Generated `misc-{uuid}` id, so two miscellaneous lines never
    ///   collide and never merge in the cart
    /// - Fixed quantity 1 (enforced by the cart), stock set to 1 so stock
    ///   validation is trivially satisfied
    pub fn miscellaneous(value: Money) -> Self {
        Product {
            id: format!("misc-{}", Uuid::new_v4()),
            name: MISCELLANEOUS_NAME.to_string(),
            category: MISCELLANEOUS_CATEGORY.to_string(),
            barcode: None,
            sale_price_cents: value.cents(),
            unit_type: UnitType::Unit,
            unit_measure: "un".to_string(),
            stock_milli: Quantity::ONE.milli(),
            is_variable_price: false,
            is_miscellaneous: true,
        }
    }

    /// Sets the stock level (builder style).
    pub fn with_stock(mut self, stock: Quantity) -> Self {
        self.stock_milli = stock.milli();
        self
    }

    /// Marks the product as bulk with the given display measure.
    pub fn bulk(mut self, unit_measure: impl Into<String>) -> Self {
        self.unit_type = UnitType::Bulk;
        self.unit_measure = unit_measure.into();
        self
    }

    /// Sets the barcode (builder style).
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Marks the product as variable-price (price entered at sale time).
    pub fn variable_price(mut self) -> Self {
        self.is_variable_price = true;
        self
    }

    /// Returns a copy with the sale price substituted.
    ///
    /// This is the variable-price flow: the cashier enters the price and the
    /// caller substitutes it into the snapshot *before* `add_item`, so the
    /// cart captures the entered price.
    pub fn with_sale_price(mut self, price: Money) -> Self {
        self.sale_price_cents = price.cents();
        self
    }

    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the available stock as a Quantity.
    #[inline]
    pub fn stock(&self) -> Quantity {
        Quantity::from_milli(self.stock_milli)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment methods accepted at the register.
///
/// Maps to the original PDV options: dinheiro, débito, crédito, pix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    Pix,
}

// =============================================================================
// Discount
// =============================================================================

/// The cart-level discount configuration.
///
/// ## Representation
/// - `Percentage`: basis points (1000 = 10%). Expected range 0-100% by
///   convention, but construction does NOT clamp - the totals computation
///   clamps so the engine never crashes on out-of-range input.
/// - `Fixed`: a currency amount in centavos, clamped to the subtotal at
///   totals time so the final amount never goes negative.
///
/// Both fields of the original `{type, value}` pair live in one enum value,
/// so the configuration can never be half-updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, in basis points.
    Percentage(u32),
    /// Fixed amount in centavos.
    Fixed(i64),
}

impl Discount {
    /// No discount: 0%.
    pub const NONE: Discount = Discount::Percentage(0);

    /// Creates a percentage discount from a percentage value (UI convenience).
    ///
    /// ## Example
    /// ```rust
    /// use agropos_core::Discount;
    ///
    /// assert_eq!(Discount::percentage(10.0), Discount::Percentage(1000));
    /// assert_eq!(Discount::percentage(8.25), Discount::Percentage(825));
    /// ```
    pub fn percentage(pct: f64) -> Self {
        Discount::Percentage((pct * 100.0).round() as u32)
    }

    /// Creates a fixed discount from a Money amount.
    pub fn fixed(amount: Money) -> Self {
        Discount::Fixed(amount.cents())
    }

    /// True when the discount is percentage-typed.
    #[inline]
    pub const fn is_percentage(&self) -> bool {
        matches!(self, Discount::Percentage(_))
    }

    /// The percentage in basis points, clamped to [0, 10000].
    ///
    /// Zero for fixed discounts. This is what the sale-submission payload
    /// reports as the applied discount percentage.
    pub fn clamped_bps(&self) -> u32 {
        match self {
            Discount::Percentage(bps) => (*bps).min(10_000),
            Discount::Fixed(_) => 0,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::NONE
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("p-1", "Milho Híbrido 20kg", "Sementes", Money::from_cents(18990))
            .with_stock(Quantity::from_units(12))
            .with_barcode("7891234567895");

        assert_eq!(product.id, "p-1");
        assert_eq!(product.sale_price().cents(), 18990);
        assert_eq!(product.stock(), Quantity::from_units(12));
        assert_eq!(product.unit_type, UnitType::Unit);
        assert!(!product.is_miscellaneous);
    }

    #[test]
    fn test_bulk_product() {
        let feed = Product::new("p-2", "Ração a Granel", "Rações", Money::from_cents(400))
            .bulk("kg")
            .with_stock(Quantity::from_milli(2500));

        assert_eq!(feed.unit_type, UnitType::Bulk);
        assert_eq!(feed.unit_measure, "kg");
        assert_eq!(feed.stock(), Quantity::from_milli(2500));
    }

    #[test]
    fn test_miscellaneous_product() {
        let a = Product::miscellaneous(Money::from_cents(1500));
        let b = Product::miscellaneous(Money::from_cents(1500));

        assert!(a.is_miscellaneous);
        assert_eq!(a.name, MISCELLANEOUS_NAME);
        assert!(a.id.starts_with("misc-"));
        // Same displayed value, still distinct identities
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_variable_price_substitution() {
        let queijo = Product::new("p-3", "Queijo Colonial", "Laticínios", Money::zero())
            .variable_price()
            .with_sale_price(Money::from_cents(3250));

        assert!(queijo.is_variable_price);
        assert_eq!(queijo.sale_price().cents(), 3250);
    }

    #[test]
    fn test_discount_constructors() {
        assert_eq!(Discount::percentage(10.0), Discount::Percentage(1000));
        assert_eq!(
            Discount::fixed(Money::from_cents(500)),
            Discount::Fixed(500)
        );
        assert_eq!(Discount::default(), Discount::NONE);
    }

    #[test]
    fn test_discount_clamped_bps() {
        assert_eq!(Discount::Percentage(1000).clamped_bps(), 1000);
        // 110% clamps to 100%
        assert_eq!(Discount::Percentage(11_000).clamped_bps(), 10_000);
        assert_eq!(Discount::Fixed(500).clamped_bps(), 0);
    }

    #[test]
    fn test_discount_serde_shape() {
        let json = serde_json::to_value(Discount::Percentage(1000)).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["value"], 1000);

        let json = serde_json::to_value(Discount::Fixed(500)).unwrap();
        assert_eq!(json["type"], "fixed");
        assert_eq!(json["value"], 500);
    }
}
