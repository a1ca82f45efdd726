//! # Catalog Provider
//!
//! The catalog-read interface. The real catalog lives in a hosted database;
//! the PDV only ever reads product records through this seam. The in-memory
//! implementation backs the tests and the demo binary.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use agropos_core::{Product, Quantity};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read access to the product catalog.
///
/// Mirrors what the PDV screen needs: the full listing for the product grid,
/// direct lookup for the scanner, and a substring search box.
pub trait CatalogProvider: Send + Sync {
    /// All products, in catalog order.
    fn list_products(&self) -> impl std::future::Future<Output = ServiceResult<Vec<Product>>> + Send;

    /// A single product by id, or `None`.
    fn get_by_id(&self, id: &str) -> impl std::future::Future<Output = ServiceResult<Option<Product>>> + Send;

    /// A single product by exact barcode match, or `None`.
    fn find_by_barcode(&self, barcode: &str) -> impl std::future::Future<Output = ServiceResult<Option<Product>>> + Send;

    /// Case-insensitive substring search over name, category, and barcode,
    /// the same filter the PDV search box applies.
    fn search(&self, query: &str) -> impl std::future::Future<Output = ServiceResult<Vec<Product>>> + Send;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory catalog standing in for the hosted database.
///
/// Cloning is cheap and shares the underlying storage, so the sale
/// submitter can decrement stock on the same catalog the session reads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        InMemoryCatalog {
            products: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a catalog pre-loaded with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        InMemoryCatalog {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Adds a product to the catalog.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }

    /// Decrements stock for a product after a sale is persisted.
    ///
    /// This is the hosted backend's responsibility in production (the
    /// submission endpoint decrements stock transactionally); the in-memory
    /// backend mimics it so demo and tests see stock go down.
    pub async fn decrement_stock(&self, id: &str, qty: Quantity) -> ServiceResult<()> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))?;

        product.stock_milli -= qty.milli();
        debug!(id = %id, stock_milli = product.stock_milli, "Stock decremented");
        Ok(())
    }
}

impl CatalogProvider for InMemoryCatalog {
    async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_barcode(&self, barcode: &str) -> ServiceResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
            .cloned())
    }

    async fn search(&self, query: &str) -> ServiceResult<Vec<Product>> {
        let query = query.to_lowercase();
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
                    || p.barcode
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&query))
            })
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agropos_core::Money;

    fn seeded_catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_products(vec![
            Product::new("p-1", "Milho Híbrido 20kg", "Sementes", Money::from_cents(18990))
                .with_barcode("7891234567895")
                .with_stock(Quantity::from_units(12)),
            Product::new("p-2", "Ração Bovina a Granel", "Rações", Money::from_cents(400))
                .bulk("kg")
                .with_stock(Quantity::from_milli(50_000)),
        ])
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let catalog = seeded_catalog();
        let product = catalog.get_by_id("p-1").await.unwrap();
        assert_eq!(product.unwrap().name, "Milho Híbrido 20kg");

        assert!(catalog.get_by_id("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_barcode() {
        let catalog = seeded_catalog();
        let product = catalog.find_by_barcode("7891234567895").await.unwrap();
        assert_eq!(product.unwrap().id, "p-1");

        assert!(catalog.find_by_barcode("0000000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_matches_name_category_and_barcode() {
        let catalog = seeded_catalog();

        assert_eq!(catalog.search("milho").await.unwrap().len(), 1);
        assert_eq!(catalog.search("rações").await.unwrap().len(), 1);
        assert_eq!(catalog.search("789123").await.unwrap().len(), 1);
        assert_eq!(catalog.search("").await.unwrap().len(), 2);
        assert!(catalog.search("trator").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_stock() {
        let catalog = seeded_catalog();
        catalog
            .decrement_stock("p-2", Quantity::from_milli(2_500))
            .await
            .unwrap();

        let product = catalog.get_by_id("p-2").await.unwrap().unwrap();
        assert_eq!(product.stock(), Quantity::from_milli(47_500));

        let missing = catalog.decrement_stock("ghost", Quantity::ONE).await;
        assert!(matches!(missing, Err(ServiceError::ProductNotFound(_))));
    }
}
