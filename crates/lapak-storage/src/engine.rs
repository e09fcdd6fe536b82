//! `StorageEngine` — unified storage engine implementing the catalog and
//! order storage traits.
//!
//! Owns `DatabaseManager` (read/write routing). All reads go through
//! `with_reader()`, all writes through `with_writer()`. This is the single
//! owner of both; no code outside this crate touches a raw `&Connection`
//! except through the escape hatches below.

use std::path::Path;

use tracing::debug;

use lapak_core::config::StorageConfig;
use lapak_core::models::{
    Address, NewOrder, NewProduct, OrderDetail, Page, PageRequest, ProductDetail, SnapshotLine,
    Store,
};
use lapak_core::traits::{ICatalogStorage, IOrderStorage};
use lapak_core::LapakResult;

use crate::connection::DatabaseManager;
use crate::queries;
use crate::to_storage_err;

pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path, config: &StorageConfig) -> LapakResult<Self> {
        let db = DatabaseManager::open(path, config)?;
        Ok(Self { db })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> LapakResult<Self> {
        let db = DatabaseManager::open_in_memory()?;
        Ok(Self { db })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self) -> LapakResult<()> {
        self.db.checkpoint()
    }

    /// Raw read access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_reader<F, T>(&self, f: F) -> LapakResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LapakResult<T>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_writer<F, T>(&self, f: F) -> LapakResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LapakResult<T>,
    {
        self.db.with_writer(f)
    }
}

impl ICatalogStorage for StorageEngine {
    fn find_product(&self, id: i64) -> LapakResult<Option<ProductDetail>> {
        self.db
            .with_reader(|conn| queries::products::get_product_detail(conn, id))
    }

    fn find_address(&self, id: i64) -> LapakResult<Option<Address>> {
        self.db
            .with_reader(|conn| queries::addresses::get_address(conn, id))
    }

    fn find_store_by_user(&self, user_id: i64) -> LapakResult<Option<Store>> {
        self.db
            .with_reader(|conn| queries::stores::find_by_user(conn, user_id))
    }

    fn category_exists(&self, id: i64) -> LapakResult<bool> {
        self.db
            .with_reader(|conn| queries::categories::exists(conn, id))
    }

    fn insert_product(&self, product: &NewProduct, photo_urls: &[String]) -> LapakResult<i64> {
        self.db.with_writer(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| to_storage_err(format!("begin product insert: {e}")))?;
            let result = queries::products::insert_product(conn, product).and_then(|id| {
                queries::product_photos::replace_photos(conn, id, photo_urls)?;
                Ok(id)
            });
            match result {
                Ok(id) => {
                    conn.execute_batch("COMMIT")
                        .map_err(|e| to_storage_err(format!("commit product insert: {e}")))?;
                    debug!(product_id = id, "product inserted");
                    Ok(id)
                }
                Err(e) => {
                    let _ = conn.execute_batch("ROLLBACK");
                    Err(e)
                }
            }
        })
    }

    fn update_product(&self, id: i64, product: &NewProduct) -> LapakResult<()> {
        self.db.with_writer(|conn| {
            let updated = queries::products::update_product(conn, id, product)?;
            if !updated {
                return Err(lapak_core::LapakError::ProductNotFound { id });
            }
            Ok(())
        })
    }

    fn soft_delete_product(&self, id: i64) -> LapakResult<()> {
        self.db.with_writer(|conn| {
            let deleted = queries::products::soft_delete_product(conn, id)?;
            if !deleted {
                return Err(lapak_core::LapakError::ProductNotFound { id });
            }
            Ok(())
        })
    }

    fn replace_photos(&self, product_id: i64, urls: &[String]) -> LapakResult<()> {
        self.db
            .with_writer(|conn| queries::product_photos::replace_photos(conn, product_id, urls))
    }

    fn search_products(&self, page: &PageRequest) -> LapakResult<Page<ProductDetail>> {
        self.db
            .with_reader(|conn| queries::products::search_products(conn, page))
    }
}

impl IOrderStorage for StorageEngine {
    fn insert_order_graph(&self, order: &NewOrder, lines: &[SnapshotLine]) -> LapakResult<i64> {
        self.db
            .with_writer(|conn| queries::orders::insert_order_graph(conn, order, lines))
    }

    fn find_order(&self, id: i64) -> LapakResult<Option<OrderDetail>> {
        self.db
            .with_reader(|conn| queries::orders::find_order_detail(conn, id))
    }

    fn list_orders(&self, page: &PageRequest) -> LapakResult<Page<OrderDetail>> {
        self.db
            .with_reader(|conn| queries::orders::list_orders(conn, page))
    }

    fn update_payment(&self, id: i64, payment_method: &str) -> LapakResult<()> {
        self.db
            .with_writer(|conn| queries::orders::update_payment(conn, id, payment_method))
    }

    fn delete_order(&self, id: i64) -> LapakResult<()> {
        self.db
            .with_writer(|conn| queries::orders::delete_order(conn, id))
    }
}
