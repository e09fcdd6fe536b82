//! Raw SQL operations, one module per table group. Functions take a
//! `&Connection` and map rows by hand; callers pick the connection through
//! `DatabaseManager`.

pub mod addresses;
pub mod categories;
pub mod orders;
pub mod product_photos;
pub mod products;
pub mod snapshots;
pub mod stores;
pub mod users;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Read an RFC3339 timestamp column.
pub(crate) fn dt_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Read a decimal-as-text column (totals).
pub(crate) fn decimal_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    Decimal::from_str(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Current time in the storage timestamp format.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
