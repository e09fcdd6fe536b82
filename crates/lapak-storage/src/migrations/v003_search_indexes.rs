//! v003: indexes for keyword search and listing order.

use rusqlite::Connection;

use lapak_core::LapakResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LapakResult<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_products_name
            ON products(name);
        CREATE INDEX IF NOT EXISTS idx_orders_created
            ON orders(created_at);
        ",
    )
    .map_err(|e| to_storage_err(format!("v003 search indexes: {e}")))
}
