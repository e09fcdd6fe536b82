//! Persisted entities. Field sets mirror the relational schema; hydrated
//! (joined) shapes live in [`super::responses`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an entity leaves the database when deleted.
///
/// The policy is declared per entity type rather than inferred from the
/// schema: products and addresses keep their rows with a `deleted_at`
/// timestamp, orders drop the header row (lines cascade).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Row stays, `deleted_at` is set; finders filter it out.
    Soft,
    /// Row is removed.
    Hard,
}

/// Ownership root. Registration/login live outside this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seller's store. Exactly one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipping address, owned by exactly one user. An order's owner is derived
/// through this row (`Order` stores no user id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub recipient: String,
    pub phone: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub const DELETE_POLICY: DeletePolicy = DeletePolicy::Soft;
}

/// Live catalog product. Prices are stored as decimal text exactly as the
/// seller entered them; parsing happens at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub stock: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub const DELETE_POLICY: DeletePolicy = DeletePolicy::Soft;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPhoto {
    pub id: i64,
    pub product_id: i64,
    pub url: String,
}

/// Immutable copy of a product's commercial fields taken when an order line
/// is created. Never updated afterwards: later catalog edits must not change
/// what the buyer purchased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub description: Option<String>,
    pub store_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Order header. The owning user is reachable only through the shipping
/// address join; see [`super::responses::OrderDetail::owner_id`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub address_id: i64,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub const DELETE_POLICY: DeletePolicy = DeletePolicy::Hard;
}

/// One product-quantity entry within an order. `store_id` is denormalized so
/// a multi-store order can attribute revenue per store without walking the
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub snapshot_id: i64,
    pub store_id: i64,
    pub quantity: i64,
    pub line_total: Decimal,
}

/// Order header fields as assembled by the aggregator, before persistence.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub invoice_code: String,
    pub payment_method: String,
    pub address_id: i64,
    pub total: Decimal,
}

/// Snapshot fields captured from a live product, paired with the line data
/// that will reference it. The atomic insert writes the snapshot first, then
/// the line pointing at it.
#[derive(Debug, Clone)]
pub struct SnapshotLine {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub description: Option<String>,
    pub snapshot_store_id: i64,
    pub category_id: i64,
    pub store_id: i64,
    pub quantity: i64,
    pub line_total: Decimal,
}

/// Product fields for insert/update, slug already computed.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub store_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub stock: i64,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_policies_are_declared_per_entity() {
        assert_eq!(Product::DELETE_POLICY, DeletePolicy::Soft);
        assert_eq!(Address::DELETE_POLICY, DeletePolicy::Soft);
        assert_eq!(Order::DELETE_POLICY, DeletePolicy::Hard);
    }

    #[test]
    fn user_serialization_hides_the_password_hash() {
        let user = User {
            id: 1,
            name: "Rina".into(),
            phone: "0811".into(),
            email: "rina@example.com".into(),
            password_hash: "secret".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("rina@example.com"));
    }
}
