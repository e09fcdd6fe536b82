//! Catalog maintenance: product create/update/delete with store-ownership
//! checks, plus paginated keyword search.

use std::sync::Arc;

use tracing::{debug, info};

use lapak_core::models::{NewProduct, Page, PageRequest, ProductDetail, ProductRequest};
use lapak_core::traits::ICatalogStorage;
use lapak_core::{LapakError, LapakResult};

pub struct ProductService {
    catalog: Arc<dyn ICatalogStorage>,
}

impl ProductService {
    pub fn new(catalog: Arc<dyn ICatalogStorage>) -> Self {
        Self { catalog }
    }

    /// Create a product in the caller's store. The store is resolved from
    /// the authenticated user, never taken from the request; the category
    /// must exist.
    pub fn create(&self, request: &ProductRequest, user_id: i64) -> LapakResult<ProductDetail> {
        let store = self
            .catalog
            .find_store_by_user(user_id)?
            .ok_or(LapakError::StoreNotFound { user_id })?;

        if !self.catalog.category_exists(request.category_id)? {
            return Err(LapakError::CategoryNotFound {
                id: request.category_id,
            });
        }

        let product = new_product(request, store.id);
        let id = self
            .catalog
            .insert_product(&product, &request.photo_urls)?;
        info!(product_id = id, store_id = store.id, "product created");

        self.catalog
            .find_product(id)?
            .ok_or(LapakError::ProductNotFound { id })
    }

    pub fn get_by_id(&self, id: i64) -> LapakResult<ProductDetail> {
        self.catalog
            .find_product(id)?
            .ok_or(LapakError::ProductNotFound { id })
    }

    pub fn get_all(
        &self,
        limit: i64,
        page: i64,
        keyword: Option<String>,
    ) -> LapakResult<Page<ProductDetail>> {
        let request = PageRequest::new(limit, page, keyword);
        debug!(limit = request.limit, page = request.page, "listing products");
        self.catalog.search_products(&request)
    }

    /// Update a product owned by the caller's store. Photo URLs are replaced
    /// wholesale.
    pub fn update(
        &self,
        id: i64,
        request: &ProductRequest,
        user_id: i64,
    ) -> LapakResult<ProductDetail> {
        let existing = self.owned_product(id, user_id)?;

        if !self.catalog.category_exists(request.category_id)? {
            return Err(LapakError::CategoryNotFound {
                id: request.category_id,
            });
        }

        let product = new_product(request, existing.store.id);
        self.catalog.update_product(id, &product)?;
        self.catalog.replace_photos(id, &request.photo_urls)?;

        self.catalog
            .find_product(id)?
            .ok_or(LapakError::ProductNotFound { id })
    }

    /// Soft-delete a product owned by the caller's store, returning its last
    /// hydrated state.
    pub fn delete(&self, id: i64, user_id: i64) -> LapakResult<ProductDetail> {
        let existing = self.owned_product(id, user_id)?;
        self.catalog.soft_delete_product(id)?;
        info!(product_id = id, "product deleted");
        Ok(existing)
    }

    fn owned_product(&self, id: i64, user_id: i64) -> LapakResult<ProductDetail> {
        let detail = self
            .catalog
            .find_product(id)?
            .ok_or(LapakError::ProductNotFound { id })?;
        if detail.store.user_id != user_id {
            return Err(LapakError::Forbidden {
                resource: "product",
            });
        }
        Ok(detail)
    }
}

fn new_product(request: &ProductRequest, store_id: i64) -> NewProduct {
    NewProduct {
        store_id,
        category_id: request.category_id,
        name: request.name.clone(),
        slug: slugify(&request.name),
        reseller_price: request.reseller_price.clone(),
        consumer_price: request.consumer_price.clone(),
        stock: request.stock,
        description: request.description.clone(),
    }
}

/// Lowercase the name and join alphanumeric runs with `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    slug
}
