//! addresses table queries. Addresses soft-delete; regular finders filter
//! deleted rows, while order hydration keeps resolving them so historical
//! orders keep their shipping record.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::Address;
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::{dt_col, now_rfc3339};

const COLUMNS: &str = "id, user_id, title, recipient, phone, detail, created_at, updated_at";

pub fn insert_address(
    conn: &Connection,
    user_id: i64,
    title: &str,
    recipient: &str,
    phone: &str,
    detail: &str,
) -> LapakResult<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO addresses (user_id, title, recipient, phone, detail, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![user_id, title, recipient, phone, detail, now, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_address(conn: &Connection, id: i64) -> LapakResult<Option<Address>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM addresses WHERE id = ?1 AND deleted_at IS NULL"
    ))
    .and_then(|mut stmt| stmt.query_row(params![id], map_address_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Lookup that ignores soft deletion; order hydration only.
pub(crate) fn get_address_any(conn: &Connection, id: i64) -> LapakResult<Option<Address>> {
    conn.prepare_cached(&format!("SELECT {COLUMNS} FROM addresses WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row(params![id], map_address_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn list_by_user(conn: &Connection, user_id: i64) -> LapakResult<Vec<Address>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM addresses
             WHERE user_id = ?1 AND deleted_at IS NULL ORDER BY id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], map_address_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn soft_delete_address(conn: &Connection, id: i64) -> LapakResult<bool> {
    let rows = conn
        .execute(
            "UPDATE addresses SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id, now_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows > 0)
}

fn map_address_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        recipient: row.get(3)?,
        phone: row.get(4)?,
        detail: row.get(5)?,
        created_at: dt_col(row, 6)?,
        updated_at: dt_col(row, 7)?,
    })
}
