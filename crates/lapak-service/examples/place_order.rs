//! End-to-end walkthrough: open an in-memory engine, seed a seller with a
//! product and a buyer with an address, place an order, and print the
//! hydrated response envelope.
//!
//! Run with: `cargo run -p lapak-service --example place_order`

use std::sync::Arc;

use lapak_core::config::LapakConfig;
use lapak_core::envelope::ApiEnvelope;
use lapak_core::models::{NewProduct, NewUser, OrderLineRequest, OrderRequest};
use lapak_service::OrderService;
use lapak_storage::queries::{addresses, categories, products, stores, users};
use lapak_storage::StorageEngine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = LapakConfig::from_toml("")?;
    let engine = Arc::new(StorageEngine::open_in_memory()?);

    let (buyer_id, address_id, product_id) = engine.with_writer(|conn| {
        let seller_id = users::insert_user(
            conn,
            &NewUser {
                name: "Sari".into(),
                phone: "0811000001".into(),
                email: "sari@example.com".into(),
                password_hash: "demo".into(),
            },
        )?;
        let store_id = stores::insert_store(conn, seller_id, "Toko Sari", None)?;
        let category_id = categories::insert_category(conn, "Aksesoris")?;
        let product_id = products::insert_product(
            conn,
            &NewProduct {
                store_id,
                category_id,
                name: "Tas Ransel".into(),
                slug: "tas-ransel".into(),
                reseller_price: "45000".into(),
                consumer_price: "50000".into(),
                stock: 10,
                description: Some("Tas 20L".into()),
            },
        )?;

        let buyer_id = users::insert_user(
            conn,
            &NewUser {
                name: "Budi".into(),
                phone: "0811000002".into(),
                email: "budi@example.com".into(),
                password_hash: "demo".into(),
            },
        )?;
        let address_id = addresses::insert_address(
            conn,
            buyer_id,
            "Rumah",
            "Budi",
            "0811000002",
            "Jl. Melati 1",
        )?;

        Ok((buyer_id, address_id, product_id))
    })?;

    let service = OrderService::new(engine.clone(), engine.clone(), config.service.clone());
    let order = service.create(
        &OrderRequest {
            payment_method: "transfer".into(),
            shipping_address_id: address_id,
            lines: vec![OrderLineRequest {
                product_id,
                quantity: 2,
            }],
        },
        buyer_id,
    )?;

    let envelope = ApiEnvelope::success("Succeed to POST data", order);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
