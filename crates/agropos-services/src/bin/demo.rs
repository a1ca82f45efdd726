//! # PDV Demo
//!
//! Runs a scripted checkout against the in-memory backends.
//!
//! ## Usage
//! ```bash
//! cargo run -p agropos-services --bin demo
//!
//! # With verbose tracing
//! RUST_LOG=debug cargo run -p agropos-services --bin demo
//! ```
//!
//! The script mirrors a typical counter interaction: a scanned bag of seed,
//! weighed bulk feed, a variable-price item, a one-off DIVERSOS charge, a
//! percentage discount, then finalization over Pix.

use std::sync::Arc;

use agropos_core::{Discount, Money, PaymentMethod, Product, Quantity};
use agropos_services::{
    CatalogProvider, CheckoutSession, InMemoryCatalog, InMemorySales, ServiceResult,
};

fn seed_products() -> Vec<Product> {
    vec![
        Product::new("p-1", "Milho Híbrido 20kg", "Sementes", Money::from_cents(18990))
            .with_barcode("7891234567895")
            .with_stock(Quantity::from_units(12)),
        Product::new("p-2", "Ração Bovina a Granel", "Rações", Money::from_cents(400))
            .bulk("kg")
            .with_barcode("7890000000017")
            .with_stock(Quantity::from_milli(50_000)),
        Product::new("p-3", "Queijo Colonial", "Laticínios", Money::zero())
            .variable_price()
            .with_stock(Quantity::from_units(4)),
        Product::new("p-4", "Enxada Cabo Longo", "Ferramentas", Money::from_cents(4590))
            .with_barcode("7899999000021")
            .with_stock(Quantity::from_units(7)),
    ]
}

#[tokio::main]
async fn main() -> ServiceResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog = InMemoryCatalog::with_products(seed_products());
    let sales = Arc::new(InMemorySales::with_catalog(catalog.clone()));
    let session = CheckoutSession::new(Arc::new(catalog.clone()), sales);

    // Scanned items
    session.add_by_barcode("7891234567895").await?;
    session.add_by_barcode("7891234567895").await?; // merges into one line
    session.add_by_barcode("7899999000021").await?;

    // Weighed feed, 2.5 kg
    session
        .add_product("p-2", Quantity::from_milli(2_500), None)
        .await?;

    // Variable-price cheese, price entered at the counter
    session
        .add_product("p-3", Quantity::ONE, Some(Money::from_cents(3250)))
        .await?;

    // One-off charge
    session.add_miscellaneous(Money::from_cents(1200))?;

    session.with_cart_mut(|cart| cart.apply_discount(Discount::percentage(5.0)));

    println!("--- Carrinho ---");
    session.with_cart(|cart| {
        for line in cart.lines() {
            println!(
                "{:<28} {:>7} {:<3} {:>10}",
                line.product.name,
                line.quantity().to_string(),
                line.product.unit_measure,
                line.subtotal().to_string(),
            );
        }
        let totals = cart.totals();
        println!("----------------");
        println!("Subtotal:  {}", Money::from_cents(totals.subtotal_cents));
        println!("Desconto:  {}", Money::from_cents(totals.discount_amount_cents));
        println!("Total:     {}", Money::from_cents(totals.total_cents));
    });

    let receipt = session.finalize(PaymentMethod::Pix).await?;
    println!(
        "Venda {} confirmada: {}",
        receipt.sale_id,
        Money::from_cents(receipt.final_amount_cents)
    );

    // Stock went down on the backend
    let remaining = catalog.get_by_id("p-1").await?.map(|p| p.stock());
    println!("Estoque restante de Milho Híbrido 20kg: {:?}", remaining);

    Ok(())
}
