//! categories table queries.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::Category;
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::{dt_col, now_rfc3339};

pub fn insert_category(conn: &Connection, name: &str) -> LapakResult<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO categories (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
        params![name, now, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_category(conn: &Connection, id: i64) -> LapakResult<Option<Category>> {
    conn.prepare_cached(
        "SELECT id, name, created_at, updated_at FROM categories WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], map_category_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn exists(conn: &Connection, id: i64) -> LapakResult<bool> {
    conn.prepare_cached("SELECT 1 FROM categories WHERE id = ?1")
        .and_then(|mut stmt| stmt.exists(params![id]))
        .map_err(|e| to_storage_err(e.to_string()))
}

pub(crate) fn map_category_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: dt_col(row, 2)?,
        updated_at: dt_col(row, 3)?,
    })
}
