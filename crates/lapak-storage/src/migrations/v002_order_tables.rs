//! v002: order headers, product snapshots, order lines.
//!
//! Lines reference both the order and their snapshot, so inserts must run
//! header → snapshot → line. Lines cascade with their header; snapshots are
//! never deleted.

use rusqlite::Connection;

use lapak_core::LapakResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LapakResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS product_snapshots (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id     INTEGER NOT NULL REFERENCES products(id),
            name           TEXT NOT NULL,
            slug           TEXT NOT NULL,
            reseller_price TEXT NOT NULL,
            consumer_price TEXT NOT NULL,
            description    TEXT,
            store_id       INTEGER NOT NULL REFERENCES stores(id),
            category_id    INTEGER NOT NULL REFERENCES categories(id),
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_snapshots_product
            ON product_snapshots(product_id);

        CREATE TABLE IF NOT EXISTS orders (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            invoice_code   TEXT NOT NULL UNIQUE,
            payment_method TEXT NOT NULL,
            address_id     INTEGER NOT NULL REFERENCES addresses(id),
            total          TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_orders_address
            ON orders(address_id);

        CREATE TABLE IF NOT EXISTS order_lines (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id    INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            snapshot_id INTEGER NOT NULL REFERENCES product_snapshots(id),
            store_id    INTEGER NOT NULL REFERENCES stores(id),
            quantity    INTEGER NOT NULL CHECK (quantity > 0),
            line_total  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_order_lines_order
            ON order_lines(order_id);
        CREATE INDEX IF NOT EXISTS idx_order_lines_store
            ON order_lines(store_id);
        ",
    )
    .map_err(|e| to_storage_err(format!("v002 order tables: {e}")))
}
