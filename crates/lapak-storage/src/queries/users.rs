//! users table queries. Only the ownership root lives here; credential
//! handling is outside this core.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::{NewUser, User};
use lapak_core::LapakResult;

use crate::to_storage_err;

use super::{dt_col, now_rfc3339};

pub fn insert_user(conn: &Connection, user: &NewUser) -> LapakResult<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO users (name, phone, email, password_hash, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user.name, user.phone, user.email, user.password_hash, now, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> LapakResult<Option<User>> {
    conn.prepare_cached(
        "SELECT id, name, phone, email, password_hash, created_at, updated_at
         FROM users WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], map_user_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        created_at: dt_col(row, 5)?,
        updated_at: dt_col(row, 6)?,
    })
}
