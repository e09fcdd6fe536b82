//! stores table queries.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::Store;
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::{dt_col, now_rfc3339};

pub fn insert_store(
    conn: &Connection,
    user_id: i64,
    name: &str,
    photo_url: Option<&str>,
) -> LapakResult<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO stores (user_id, name, photo_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, name, photo_url, now, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_store(conn: &Connection, id: i64) -> LapakResult<Option<Store>> {
    conn.prepare_cached(
        "SELECT id, user_id, name, photo_url, created_at, updated_at
         FROM stores WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], map_store_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Every user owns exactly one store; product creation resolves it here.
pub fn find_by_user(conn: &Connection, user_id: i64) -> LapakResult<Option<Store>> {
    conn.prepare_cached(
        "SELECT id, user_id, name, photo_url, created_at, updated_at
         FROM stores WHERE user_id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![user_id], map_store_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

pub(crate) fn map_store_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Store> {
    Ok(Store {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        photo_url: row.get(3)?,
        created_at: dt_col(row, 4)?,
        updated_at: dt_col(row, 5)?,
    })
}
