//! v001: users, stores, categories, addresses, products, product photos.

use rusqlite::Connection;

use lapak_core::LapakResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LapakResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            phone         TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stores (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL UNIQUE REFERENCES users(id),
            name       TEXT NOT NULL,
            photo_url  TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS addresses (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            title      TEXT NOT NULL,
            recipient  TEXT NOT NULL,
            phone      TEXT NOT NULL,
            detail     TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_addresses_user
            ON addresses(user_id);

        CREATE TABLE IF NOT EXISTS products (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id       INTEGER NOT NULL REFERENCES stores(id),
            category_id    INTEGER NOT NULL REFERENCES categories(id),
            name           TEXT NOT NULL,
            slug           TEXT NOT NULL,
            reseller_price TEXT NOT NULL,
            consumer_price TEXT NOT NULL,
            stock          INTEGER NOT NULL DEFAULT 0,
            description    TEXT,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            deleted_at     TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_products_store
            ON products(store_id);
        CREATE INDEX IF NOT EXISTS idx_products_category
            ON products(category_id);

        CREATE TABLE IF NOT EXISTS product_photos (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            url        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_photos_product
            ON product_photos(product_id);
        ",
    )
    .map_err(|e| to_storage_err(format!("v001 catalog tables: {e}")))
}
