//! product_snapshots table queries. Snapshots are written once, inside the
//! order-graph transaction, and only ever read after that.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::{ProductSnapshot, SnapshotLine};
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::dt_col;

/// Insert a snapshot row. Returns the assigned id. Caller owns the
/// surrounding transaction.
pub fn insert_snapshot(
    conn: &Connection,
    line: &SnapshotLine,
    created_at: &str,
) -> LapakResult<i64> {
    conn.execute(
        "INSERT INTO product_snapshots
             (product_id, name, slug, reseller_price, consumer_price,
              description, store_id, category_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            line.product_id,
            line.name,
            line.slug,
            line.reseller_price,
            line.consumer_price,
            line.description,
            line.snapshot_store_id,
            line.category_id,
            created_at,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_snapshot(conn: &Connection, id: i64) -> LapakResult<Option<ProductSnapshot>> {
    conn.prepare_cached(
        "SELECT id, product_id, name, slug, reseller_price, consumer_price,
                description, store_id, category_id, created_at
         FROM product_snapshots WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], map_snapshot_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

/// All snapshots ever taken of a product, oldest first.
pub fn snapshots_for_product(
    conn: &Connection,
    product_id: i64,
) -> LapakResult<Vec<ProductSnapshot>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, product_id, name, slug, reseller_price, consumer_price,
                    description, store_id, category_id, created_at
             FROM product_snapshots WHERE product_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![product_id], map_snapshot_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn map_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductSnapshot> {
    Ok(ProductSnapshot {
        id: row.get(0)?,
        product_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        reseller_price: row.get(4)?,
        consumer_price: row.get(5)?,
        description: row.get(6)?,
        store_id: row.get(7)?,
        category_id: row.get(8)?,
        created_at: dt_col(row, 9)?,
    })
}
