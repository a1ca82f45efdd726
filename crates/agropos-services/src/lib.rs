//! # agropos-services: External Service Seams for the Agropos PDV
//!
//! The original PDV delegates every hard problem to a hosted backend: the
//! product catalog lives in a managed database, sales are persisted (and
//! stock decremented) by a submission endpoint, and auth is a hosted
//! service. This crate models those collaborators as narrow traits and
//! provides the checkout session that orchestrates them around the pure
//! cart engine from `agropos-core`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Service Boundaries                               │
//! │                                                                         │
//! │   ┌──────────────────┐        ┌────────────────────────────────────┐   │
//! │   │  CheckoutSession │───────►│  CatalogProvider (trait)           │   │
//! │   │                  │        │  list / get / find_by_barcode      │   │
//! │   │  Arc<Mutex<Cart>>│        └────────────────────────────────────┘   │
//! │   │                  │        ┌────────────────────────────────────┐   │
//! │   │  finalize() ─────┼───────►│  SaleSubmitter (trait)             │   │
//! │   │                  │        │  submit_sale → stock decrement     │   │
//! │   └──────────────────┘        └────────────────────────────────────┘   │
//! │                                                                         │
//! │   In-memory implementations back the tests and the demo binary.         │
//! │   Production supplies HTTP clients for the same traits.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog-read interface + in-memory implementation
//! - [`sales`] - Sale-submission DTOs, interface + in-memory implementation
//! - [`session`] - The checkout session (explicitly passed context)
//! - [`error`] - Service error types

pub mod catalog;
pub mod error;
pub mod sales;
pub mod session;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use error::{ServiceError, ServiceResult};
pub use sales::{InMemorySales, SaleLineRequest, SaleReceipt, SaleRequest, SaleSubmitter};
pub use session::CheckoutSession;
