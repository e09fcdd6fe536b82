//! Hydrated (joined) shapes returned to callers. Built from full reads after
//! a write commits, never from in-memory aggregation state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entities::{Address, Category, ProductPhoto, ProductSnapshot, Store};

/// A product with its store, category, and photo rows attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: super::entities::Product,
    pub store: Store,
    pub category: Category,
    pub photos: Vec<ProductPhoto>,
}

/// A fully hydrated order: header, shipping address, and lines with their
/// snapshot-sourced product blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub address: Address,
    pub lines: Vec<OrderLineDetail>,
}

impl OrderDetail {
    /// The owning user, derived through the shipping address. There is no
    /// owner column on the order row; this accessor is the single source of
    /// that fact.
    pub fn owner_id(&self) -> i64 {
        self.address.user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineDetail {
    pub id: i64,
    pub quantity: i64,
    pub line_total: Decimal,
    pub store: Store,
    pub product: SnapshotProductView,
}

/// Product block of an order line. The commercial fields (name, slug,
/// prices, description) come from the line's snapshot — the record of what
/// was purchased — while store, category, and photos are joined live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotProductView {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub description: Option<String>,
    pub store: Store,
    pub category: Category,
    pub photos: Vec<ProductPhoto>,
}

impl SnapshotProductView {
    pub fn from_snapshot(
        snapshot: &ProductSnapshot,
        store: Store,
        category: Category,
        photos: Vec<ProductPhoto>,
    ) -> Self {
        Self {
            product_id: snapshot.product_id,
            name: snapshot.name.clone(),
            slug: snapshot.slug.clone(),
            reseller_price: snapshot.reseller_price.clone(),
            consumer_price: snapshot.consumer_price.clone(),
            description: snapshot.description.clone(),
            store,
            category,
            photos,
        }
    }
}
