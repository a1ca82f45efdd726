//! # Validation Module
//!
//! Input validation utilities for the agropos PDV.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (TypeScript)                                        │
//! │  ├── Basic format checks (empty, NaN, length)                           │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (boundary validation)                             │
//! │  ├── Positive quantities, integral quantities for unit products         │
//! │  └── Non-negative prices, well-formed barcodes                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart engine clamping                                          │
//! │  └── Discounts clamped inside totals(), never a crash                   │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{Discount, UnitType};
use crate::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a quantity for a product of the given unit type.
///
/// ## Rules
/// - Must be positive (> 0); non-positive input is a caller error and is
///   rejected before it can ever be stored
/// - Unit-type products must have a whole number of units
///
/// ## Example
/// ```rust
/// use agropos_core::validation::validate_quantity;
/// use agropos_core::{Quantity, UnitType};
///
/// assert!(validate_quantity(Quantity::from_units(3), UnitType::Unit, "Enxada").is_ok());
/// assert!(validate_quantity(Quantity::from_milli(250), UnitType::Bulk, "Milho").is_ok());
/// assert!(validate_quantity(Quantity::from_milli(250), UnitType::Unit, "Enxada").is_err());
/// assert!(validate_quantity(Quantity::zero(), UnitType::Bulk, "Milho").is_err());
/// ```
pub fn validate_quantity(
    qty: Quantity,
    unit_type: UnitType,
    name: &str,
) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if unit_type == UnitType::Unit && !qty.is_integral() {
        return Err(ValidationError::FractionalQuantity {
            name: name.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Price Validators
// =============================================================================

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use agropos_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1899).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a barcode.
///
/// ## Rules
/// - Digits only
/// - Between 8 and 14 digits (EAN-8 through ITF-14)
///
/// Checksum verification is the scanner library's job; this only guards the
/// manual-entry path.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if barcode.len() < 8 || barcode.len() > 14 {
        return Err(ValidationError::OutOfRange {
            field: "barcode length".to_string(),
            min: 8,
            max: 14,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Validators
// =============================================================================

/// Advisory range check for a discount configuration.
///
/// The cart engine clamps out-of-range values inside `totals()` and never
/// crashes on them; this validator lets the UI warn the cashier before the
/// clamp silently kicks in.
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(bps) if *bps > 10_000 => Err(ValidationError::OutOfRange {
            field: "discount percentage".to_string(),
            min: 0,
            max: 100,
        }),
        Discount::Fixed(cents) if *cents < 0 => Err(ValidationError::MustBePositive {
            field: "discount amount".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_units(1), UnitType::Unit, "x").is_ok());
        assert!(validate_quantity(Quantity::from_milli(250), UnitType::Bulk, "x").is_ok());

        assert!(validate_quantity(Quantity::zero(), UnitType::Unit, "x").is_err());
        assert!(validate_quantity(Quantity::from_units(-1), UnitType::Bulk, "x").is_err());
        assert!(validate_quantity(Quantity::from_milli(1500), UnitType::Unit, "x").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1899).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Milho Híbrido 20kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("7891234567895").is_ok()); // EAN-13
        assert!(validate_barcode("12345678").is_ok()); // EAN-8

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("12345").is_err());
        assert!(validate_barcode("123456789012345").is_err());
        assert!(validate_barcode("78912ABC67895").is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(&Discount::Percentage(1000)).is_ok());
        assert!(validate_discount(&Discount::Percentage(10_000)).is_ok());
        assert!(validate_discount(&Discount::Fixed(500)).is_ok());

        assert!(validate_discount(&Discount::Percentage(10_001)).is_err());
        assert!(validate_discount(&Discount::Fixed(-1)).is_err());
    }
}
