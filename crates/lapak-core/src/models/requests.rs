//! Request bodies. Serde renames keep the JSON contract of the existing API
//! (`method_bayar`, `alamat_kirim`, `detail_trx`, `id_produk`) while the
//! Rust field names stay descriptive.

use serde::{Deserialize, Serialize};

/// Body of an order creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "method_bayar")]
    pub payment_method: String,
    #[serde(rename = "alamat_kirim")]
    pub shipping_address_id: i64,
    #[serde(rename = "detail_trx", default)]
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "id_produk")]
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of an order update. `status` is accepted for wire compatibility but
/// the schema carries no status column; only the payment method is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "method_bayar", default)]
    pub payment_method: Option<String>,
}

/// Body of a product create/update. The store is resolved from the caller,
/// never taken from the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub category_id: i64,
    pub reseller_price: String,
    pub consumer_price: String,
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Seed shape for the ownership root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}
