//! # agropos-core: Pure Business Logic for the Agropos PDV
//!
//! This crate is the **heart** of the agropos point-of-sale. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Agropos PDV Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (TypeScript)                       │   │
//! │  │    Catalog UI ──► Cart UI ──► Discount UI ──► Payment UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agropos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────┐      │   │
//! │  │   │  money   │ │ quantity │ │   cart   │ │  validation  │      │   │
//! │  │   │  Money   │ │ Quantity │ │   Cart   │ │    rules     │      │   │
//! │  │   │ Discount │ │ (milli)  │ │ CartLine │ │    checks    │      │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKEND • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              agropos-services (Service Seams)                   │   │
//! │  │        Catalog provider, sale submission, checkout session      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Discount, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`quantity`] - Fixed-point quantities (three-decimal bulk precision)
//! - [`cart`] - The cart engine: lines, totals, stock validation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Backend, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Integer Quantity**: All quantities are in milliunits (i64), three decimal places
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use agropos_core::{Cart, Discount, Money, Product, Quantity};
//!
//! let seed = Product::new("p-1", "Milho Híbrido 20kg", "Sementes", Money::from_cents(18990))
//!     .with_stock(Quantity::from_units(12));
//!
//! let mut cart = Cart::new();
//! cart.add_item(seed, Quantity::from_units(2)).unwrap();
//! cart.apply_discount(Discount::percentage(10.0));
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal_cents, 37980);
//! assert_eq!(totals.discount_amount_cents, 3798);
//! assert_eq!(totals.total_cents, 34182);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use agropos_core::Cart` instead of
// `use agropos_core::cart::Cart`

pub use cart::{Cart, CartLine, CartTotals, StockValidation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use types::{Discount, PaymentMethod, Product, UnitType};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name used for miscellaneous (ad-hoc) cart lines.
///
/// ## Business Reason
/// One-off charges that have no catalog product behind them are rung up as
/// "DIVERSOS" lines with a manually entered value and a fixed quantity of 1.
pub const MISCELLANEOUS_NAME: &str = "DIVERSOS";

/// Category assigned to miscellaneous line products.
pub const MISCELLANEOUS_CATEGORY: &str = "Diversos";

/// Number of milliunits in one whole unit of quantity.
///
/// Quantities are fixed-point with three decimal places: a bulk product
/// weighed at 0.250 kg is stored as 250 milliunits.
pub const QUANTITY_SCALE: i64 = 1_000;
