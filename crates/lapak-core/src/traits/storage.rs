//! Storage contracts implemented by `lapak-storage` and consumed by the
//! service layer through trait objects. Services receive their collaborators
//! by constructor injection; nothing reaches for a global handle.

use crate::errors::LapakResult;
use crate::models::{
    Address, NewOrder, NewProduct, OrderDetail, Page, PageRequest, ProductDetail, SnapshotLine,
    Store,
};

/// Catalog lookups and maintenance: the two collaborator reads the order
/// aggregator depends on (`find_product`, `find_address`), plus the surface
/// the product service manages. Lookups return fully populated entities —
/// nested store and category included — so a snapshot can be built without
/// further reads.
pub trait ICatalogStorage: Send + Sync {
    fn find_product(&self, id: i64) -> LapakResult<Option<ProductDetail>>;
    fn find_address(&self, id: i64) -> LapakResult<Option<Address>>;
    fn find_store_by_user(&self, user_id: i64) -> LapakResult<Option<Store>>;
    fn category_exists(&self, id: i64) -> LapakResult<bool>;

    fn insert_product(&self, product: &NewProduct, photo_urls: &[String]) -> LapakResult<i64>;
    fn update_product(&self, id: i64, product: &NewProduct) -> LapakResult<()>;
    /// Products soft-delete: the row keeps its `deleted_at` timestamp and
    /// disappears from finders.
    fn soft_delete_product(&self, id: i64) -> LapakResult<()>;
    fn replace_photos(&self, product_id: i64, urls: &[String]) -> LapakResult<()>;
    fn search_products(&self, page: &PageRequest) -> LapakResult<Page<ProductDetail>>;
}

/// Order persistence. `insert_order_graph` is the single all-or-nothing
/// write in the system: header, snapshots, and lines commit together or not
/// at all.
pub trait IOrderStorage: Send + Sync {
    fn insert_order_graph(&self, order: &NewOrder, lines: &[SnapshotLine]) -> LapakResult<i64>;
    fn find_order(&self, id: i64) -> LapakResult<Option<OrderDetail>>;
    fn list_orders(&self, page: &PageRequest) -> LapakResult<Page<OrderDetail>>;
    fn update_payment(&self, id: i64, payment_method: &str) -> LapakResult<()>;
    /// Orders hard-delete: the header row is removed and lines cascade.
    fn delete_order(&self, id: i64) -> LapakResult<()>;
}
