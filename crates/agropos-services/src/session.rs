//! # Checkout Session
//!
//! One cashier, one cart, one explicitly passed set of backend handles.
//!
//! The original PDV reached its catalog and sale endpoint through a shared
//! global client object. Here the session owns its collaborators instead:
//! whoever builds the session decides which catalog and which submitter it
//! talks to, which is also what makes the whole flow testable with the
//! in-memory backends.
//!
//! ## Thread Safety
//! The cart sits behind `Arc<Mutex<..>>` because the surrounding
//! application (UI event handlers, backend calls) is async, and several
//! handlers may hold the session. The cart operations themselves stay
//! synchronous; the lock is held only for the duration of one operation.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use agropos_core::{Cart, CoreResult, Money, PaymentMethod, Product, Quantity};

use crate::catalog::CatalogProvider;
use crate::error::{ServiceError, ServiceResult};
use crate::sales::{SaleReceipt, SaleRequest, SaleSubmitter};

/// A single-terminal checkout session.
///
/// Wraps the pure cart engine with the two external seams it needs:
/// catalog reads on the way in, sale submission on the way out.
#[derive(Debug)]
pub struct CheckoutSession<C, S> {
    cart: Arc<Mutex<Cart>>,
    catalog: Arc<C>,
    sales: Arc<S>,
}

impl<C, S> CheckoutSession<C, S>
where
    C: CatalogProvider,
    S: SaleSubmitter,
{
    /// Creates a session with an empty cart over the given backends.
    pub fn new(catalog: Arc<C>, sales: Arc<S>) -> Self {
        CheckoutSession {
            cart: Arc::new(Mutex::new(Cart::new())),
            catalog,
            sales,
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = session.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Fetches a product by id and adds it to the cart.
    ///
    /// For variable-price products the caller passes the cashier-entered
    /// price, which is substituted into the snapshot before it is captured.
    pub async fn add_product(
        &self,
        product_id: &str,
        quantity: Quantity,
        entered_price: Option<Money>,
    ) -> ServiceResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "add_product");

        let mut product = self
            .catalog
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(product_id.to_string()))?;

        if product.is_variable_price {
            if let Some(price) = entered_price {
                product = product.with_sale_price(price);
            }
        }

        self.with_cart_mut(|cart| cart.add_item(product, quantity))?;
        Ok(())
    }

    /// Scanner path: looks up a product by barcode and adds it.
    ///
    /// Unit products default to quantity 1, bulk products to 0.100 - the
    /// same defaults the original PDV applies on a scan.
    pub async fn add_by_barcode(&self, barcode: &str) -> ServiceResult<()> {
        debug!(barcode = %barcode, "add_by_barcode");

        let product = self
            .catalog
            .find_by_barcode(barcode)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(barcode.to_string()))?;

        let quantity = match product.unit_type {
            agropos_core::UnitType::Unit => Quantity::ONE,
            agropos_core::UnitType::Bulk => Quantity::from_milli(100),
        };

        self.with_cart_mut(|cart| cart.add_item(product, quantity))?;
        Ok(())
    }

    /// Adds a miscellaneous "DIVERSOS" line for a one-off charge.
    pub fn add_miscellaneous(&self, value: Money) -> CoreResult<()> {
        debug!(value = %value, "add_miscellaneous");
        self.with_cart_mut(|cart| cart.add_item(Product::miscellaneous(value), Quantity::ONE))
    }

    /// Finalizes the sale.
    ///
    /// ## Flow
    /// 1. Reject an empty cart
    /// 2. Run the advisory stock pass; any error blocks checkout here
    /// 3. Package lines + totals into a [`SaleRequest`]
    /// 4. Submit to the backend
    /// 5. Clear the cart - only after a successful submission, so a failed
    ///    submission leaves the sale intact for retry
    pub async fn finalize(&self, payment_method: PaymentMethod) -> ServiceResult<SaleReceipt> {
        debug!(payment_method = ?payment_method, "finalize");

        let request = self.with_cart(|cart| {
            if cart.is_empty() {
                return Err(ServiceError::EmptyCart);
            }

            let validation = cart.validate_stock();
            if !validation.valid {
                return Err(ServiceError::InsufficientStock {
                    errors: validation.errors,
                });
            }

            Ok(SaleRequest::from_cart(cart, payment_method))
        })?;

        let receipt = self.sales.submit_sale(&request).await?;

        self.with_cart_mut(|cart| cart.clear());

        info!(
            sale_id = %receipt.sale_id,
            final_amount = receipt.final_amount_cents,
            "Sale finalized, cart cleared"
        );

        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
