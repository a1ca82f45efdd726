//! # Sale Submission
//!
//! The sale-submission interface and its request/receipt shapes.
//!
//! ## Finalization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Finalization                                 │
//! │                                                                         │
//! │  1. VALIDATE                                                            │
//! │     └── cart.validate_stock() → advisory errors block checkout          │
//! │                                                                         │
//! │  2. PACKAGE                                                             │
//! │     └── SaleRequest::from_cart() → totals + one line per cart line      │
//! │         (miscellaneous lines carry product_id = null)                   │
//! │                                                                         │
//! │  3. SUBMIT                                                              │
//! │     └── SaleSubmitter::submit_sale() → backend persists the sale        │
//! │         and decrements stock                                            │
//! │                                                                         │
//! │  4. CLEAR                                                               │
//! │     └── cart.clear() - only after a successful submission               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use agropos_core::{Cart, PaymentMethod, Quantity};

use crate::catalog::InMemoryCatalog;
use crate::error::ServiceResult;

// =============================================================================
// Request / Receipt Shapes
// =============================================================================

/// One line of a sale-submission request.
///
/// A frozen copy of the cart line at finalization time: name, unit price,
/// and subtotal are what the customer saw, independent of later catalog
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRequest {
    /// Catalog product reference; `None` for miscellaneous lines, which
    /// have no catalog product behind them.
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity_milli: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

/// The complete sale-submission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Cart subtotal before discount, in centavos.
    pub total_amount_cents: i64,
    /// Applied percentage in basis points when the discount is
    /// percentage-typed; 0 for fixed discounts.
    pub discount_percentage_bps: u32,
    /// Discount actually applied, in centavos.
    pub discount_amount_cents: i64,
    /// Final amount charged, in centavos.
    pub final_amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleLineRequest>,
}

impl SaleRequest {
    /// Packages the current cart state and totals into a submission request.
    pub fn from_cart(cart: &Cart, payment_method: PaymentMethod) -> Self {
        let totals = cart.totals();

        SaleRequest {
            total_amount_cents: totals.subtotal_cents,
            discount_percentage_bps: cart.discount().clamped_bps(),
            discount_amount_cents: totals.discount_amount_cents,
            final_amount_cents: totals.total_cents,
            payment_method,
            items: cart
                .lines()
                .iter()
                .map(|line| SaleLineRequest {
                    product_id: if line.product.is_miscellaneous {
                        None
                    } else {
                        Some(line.product.id.clone())
                    },
                    product_name: line.product.name.clone(),
                    quantity_milli: line.quantity_milli,
                    unit_price_cents: line.product.sale_price_cents,
                    subtotal_cents: line.subtotal().cents(),
                })
                .collect(),
        }
    }
}

/// Acknowledgement returned by the sale-submission backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub sale_id: String,
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
    pub final_amount_cents: i64,
}

// =============================================================================
// Submitter Trait
// =============================================================================

/// The sale-submission seam.
///
/// The backend behind this trait persists the sale record and is
/// responsible for decrementing stock durably. The PDV only holds the cart.
pub trait SaleSubmitter: Send + Sync {
    /// Submits a finalized sale. On success the caller clears the cart.
    fn submit_sale(
        &self,
        request: &SaleRequest,
    ) -> impl std::future::Future<Output = ServiceResult<SaleReceipt>> + Send;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory sale backend for tests and the demo.
///
/// Records every submitted request (inspectable via [`submitted`]) and,
/// when built over a catalog, decrements stock the way the hosted
/// submission endpoint does.
///
/// [`submitted`]: InMemorySales::submitted
#[derive(Debug, Default)]
pub struct InMemorySales {
    catalog: Option<InMemoryCatalog>,
    submitted: Mutex<Vec<SaleRequest>>,
}

impl InMemorySales {
    /// Creates a sale backend with no stock side effects.
    pub fn new() -> Self {
        InMemorySales {
            catalog: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Creates a sale backend that decrements stock on the given catalog.
    pub fn with_catalog(catalog: InMemoryCatalog) -> Self {
        InMemorySales {
            catalog: Some(catalog),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// All requests submitted so far, in order.
    pub async fn submitted(&self) -> Vec<SaleRequest> {
        self.submitted.lock().await.clone()
    }
}

impl SaleSubmitter for InMemorySales {
    async fn submit_sale(&self, request: &SaleRequest) -> ServiceResult<SaleReceipt> {
        debug!(
            items = request.items.len(),
            final_amount = request.final_amount_cents,
            "Submitting sale"
        );

        if let Some(catalog) = &self.catalog {
            for item in &request.items {
                // Miscellaneous lines have no catalog product to decrement
                if let Some(id) = &item.product_id {
                    catalog
                        .decrement_stock(id, Quantity::from_milli(item.quantity_milli))
                        .await?;
                }
            }
        }

        self.submitted.lock().await.push(request.clone());

        let receipt = SaleReceipt {
            sale_id: Uuid::new_v4().to_string(),
            submitted_at: Utc::now(),
            final_amount_cents: request.final_amount_cents,
        };

        info!(sale_id = %receipt.sale_id, final_amount = receipt.final_amount_cents, "Sale persisted");
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agropos_core::{Discount, Money, Product};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            Product::new("p-1", "Milho Híbrido 20kg", "Sementes", Money::from_cents(18990))
                .with_stock(Quantity::from_units(12)),
            Quantity::from_units(2),
        )
        .unwrap();
        cart.add_item(Product::miscellaneous(Money::from_cents(1500)), Quantity::ONE)
            .unwrap();
        cart
    }

    #[test]
    fn test_request_shape_from_cart() {
        let mut cart = sample_cart();
        cart.apply_discount(Discount::percentage(10.0));

        let request = SaleRequest::from_cart(&cart, PaymentMethod::Pix);

        assert_eq!(request.total_amount_cents, 39480);
        assert_eq!(request.discount_percentage_bps, 1000);
        assert_eq!(request.discount_amount_cents, 3948);
        assert_eq!(request.final_amount_cents, 35532);
        assert_eq!(request.payment_method, PaymentMethod::Pix);

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id.as_deref(), Some("p-1"));
        assert_eq!(request.items[0].subtotal_cents, 37980);
        // Miscellaneous line carries no catalog reference
        assert_eq!(request.items[1].product_id, None);
        assert_eq!(request.items[1].product_name, "DIVERSOS");
        assert_eq!(request.items[1].quantity_milli, 1000);
    }

    #[test]
    fn test_fixed_discount_reports_zero_percentage() {
        let mut cart = sample_cart();
        cart.apply_discount(Discount::fixed(Money::from_cents(2000)));

        let request = SaleRequest::from_cart(&cart, PaymentMethod::Cash);
        assert_eq!(request.discount_percentage_bps, 0);
        assert_eq!(request.discount_amount_cents, 2000);
        assert_eq!(request.final_amount_cents, 37480);
    }

    #[tokio::test]
    async fn test_submit_records_request() {
        let sales = InMemorySales::new();
        let request = SaleRequest::from_cart(&sample_cart(), PaymentMethod::Debit);

        let receipt = sales.submit_sale(&request).await.unwrap();
        assert_eq!(receipt.final_amount_cents, request.final_amount_cents);

        let submitted = sales.submitted().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0], request);
    }

    #[tokio::test]
    async fn test_submit_decrements_stock_skipping_miscellaneous() {
        let catalog = InMemoryCatalog::with_products(vec![Product::new(
            "p-1",
            "Milho Híbrido 20kg",
            "Sementes",
            Money::from_cents(18990),
        )
        .with_stock(Quantity::from_units(12))]);
        let sales = InMemorySales::with_catalog(catalog.clone());

        let request = SaleRequest::from_cart(&sample_cart(), PaymentMethod::Credit);
        sales.submit_sale(&request).await.unwrap();

        use crate::catalog::CatalogProvider;
        let product = catalog.get_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(product.stock(), Quantity::from_units(10));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = SaleRequest::from_cart(&sample_cart(), PaymentMethod::Cash);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("totalAmountCents").is_some());
        assert!(json.get("finalAmountCents").is_some());
        assert_eq!(json["paymentMethod"], "cash");
        assert!(json["items"][0].get("productId").is_some());
    }
}
