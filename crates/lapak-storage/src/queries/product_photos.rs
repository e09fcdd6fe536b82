//! product_photos table queries. Photo lists are replaced wholesale when a
//! product is edited.

use rusqlite::{params, Connection};

use lapak_core::models::ProductPhoto;
use lapak_core::LapakResult;

use crate::to_storage_err;

pub fn photos_for_product(conn: &Connection, product_id: i64) -> LapakResult<Vec<ProductPhoto>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, product_id, url FROM product_photos
             WHERE product_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![product_id], |row| {
            Ok(ProductPhoto {
                id: row.get(0)?,
                product_id: row.get(1)?,
                url: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Delete the existing photo rows and insert the given URLs in order.
pub fn replace_photos(conn: &Connection, product_id: i64, urls: &[String]) -> LapakResult<()> {
    conn.execute(
        "DELETE FROM product_photos WHERE product_id = ?1",
        params![product_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare_cached("INSERT INTO product_photos (product_id, url) VALUES (?1, ?2)")
        .map_err(|e| to_storage_err(e.to_string()))?;

    for url in urls {
        stmt.execute(params![product_id, url])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}
