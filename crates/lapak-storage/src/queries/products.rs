//! products table queries: CRUD, hydrated detail reads, and paginated
//! keyword search. Products soft-delete; every finder filters
//! `deleted_at IS NULL`.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::{NewProduct, Page, PageRequest, Product, ProductDetail};
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::{categories, dt_col, now_rfc3339, product_photos, stores};

const COLUMNS: &str = "id, store_id, category_id, name, slug, reseller_price, consumer_price,
                       stock, description, created_at, updated_at";

pub fn insert_product(conn: &Connection, product: &NewProduct) -> LapakResult<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO products (store_id, category_id, name, slug, reseller_price,
                               consumer_price, stock, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            product.store_id,
            product.category_id,
            product.name,
            product.slug,
            product.reseller_price,
            product.consumer_price,
            product.stock,
            product.description,
            now,
            now,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_product(conn: &Connection, id: i64) -> LapakResult<Option<Product>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM products WHERE id = ?1 AND deleted_at IS NULL"
    ))
    .and_then(|mut stmt| stmt.query_row(params![id], map_product_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Fully populated product: row plus nested store, category, and photos.
/// Enough to build an order snapshot without further lookups.
pub fn get_product_detail(conn: &Connection, id: i64) -> LapakResult<Option<ProductDetail>> {
    let Some(product) = get_product(conn, id)? else {
        return Ok(None);
    };
    hydrate(conn, product).map(Some)
}

pub fn update_product(conn: &Connection, id: i64, product: &NewProduct) -> LapakResult<bool> {
    let rows = conn
        .execute(
            "UPDATE products SET
                category_id = ?2, name = ?3, slug = ?4, reseller_price = ?5,
                consumer_price = ?6, stock = ?7, description = ?8, updated_at = ?9
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                id,
                product.category_id,
                product.name,
                product.slug,
                product.reseller_price,
                product.consumer_price,
                product.stock,
                product.description,
                now_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows > 0)
}

pub fn soft_delete_product(conn: &Connection, id: i64) -> LapakResult<bool> {
    let rows = conn
        .execute(
            "UPDATE products SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id, now_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows > 0)
}

/// Paginated keyword search over product names, newest first.
pub fn search_products(conn: &Connection, page: &PageRequest) -> LapakResult<Page<ProductDetail>> {
    let like = page
        .keyword
        .as_deref()
        .filter(|k| !k.is_empty())
        .map(|k| format!("%{k}%"));

    let total_rows: i64 = match &like {
        Some(like) => conn.query_row(
            "SELECT COUNT(*) FROM products WHERE deleted_at IS NULL AND name LIKE ?1",
            params![like],
            |row| row.get(0),
        ),
        None => conn.query_row(
            "SELECT COUNT(*) FROM products WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        ),
    }
    .map_err(|e| to_storage_err(e.to_string()))?;

    let mut products: Vec<Product> = Vec::new();
    match &like {
        Some(like) => {
            let mut stmt = conn
                .prepare_cached(&format!(
                    "SELECT {COLUMNS} FROM products
                     WHERE deleted_at IS NULL AND name LIKE ?1
                     ORDER BY id DESC LIMIT ?2 OFFSET ?3"
                ))
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![like, page.limit, page.offset()], map_product_row)
                .map_err(|e| to_storage_err(e.to_string()))?;
            for row in rows {
                products.push(row.map_err(|e| to_storage_err(e.to_string()))?);
            }
        }
        None => {
            let mut stmt = conn
                .prepare_cached(&format!(
                    "SELECT {COLUMNS} FROM products
                     WHERE deleted_at IS NULL
                     ORDER BY id DESC LIMIT ?1 OFFSET ?2"
                ))
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![page.limit, page.offset()], map_product_row)
                .map_err(|e| to_storage_err(e.to_string()))?;
            for row in rows {
                products.push(row.map_err(|e| to_storage_err(e.to_string()))?);
            }
        }
    }

    let mut details = Vec::with_capacity(products.len());
    for product in products {
        details.push(hydrate(conn, product)?);
    }

    Ok(Page::new(page, total_rows, details))
}

fn hydrate(conn: &Connection, product: Product) -> LapakResult<ProductDetail> {
    let store = stores::get_store(conn, product.store_id)?
        .ok_or_else(|| to_storage_err(format!("store {} missing for product", product.store_id)))?;
    let category = categories::get_category(conn, product.category_id)?.ok_or_else(|| {
        to_storage_err(format!(
            "category {} missing for product",
            product.category_id
        ))
    })?;
    let photos = product_photos::photos_for_product(conn, product.id)?;
    Ok(ProductDetail {
        product,
        store,
        category,
        photos,
    })
}

pub(crate) fn map_product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        store_id: row.get(1)?,
        category_id: row.get(2)?,
        name: row.get(3)?,
        slug: row.get(4)?,
        reseller_price: row.get(5)?,
        consumer_price: row.get(6)?,
        stock: row.get(7)?,
        description: row.get(8)?,
        created_at: dt_col(row, 9)?,
        updated_at: dt_col(row, 10)?,
    })
}
