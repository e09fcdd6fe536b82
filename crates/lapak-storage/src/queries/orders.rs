//! orders + order_lines queries, including the one all-or-nothing write in
//! the system: the order-graph insert.

use rusqlite::{params, Connection, OptionalExtension};

use lapak_core::models::{
    NewOrder, Order, OrderDetail, OrderLine, OrderLineDetail, Page, PageRequest, SnapshotLine,
    SnapshotProductView,
};
use lapak_core::{LapakError, LapakResult};

use crate::to_storage_err;

use super::{
    addresses, categories, decimal_col, dt_col, now_rfc3339, product_photos, snapshots, stores,
};

/// Insert an order header plus its (snapshot, line) pairs as a single
/// transaction.
///
/// Insert order is fixed: header first (its id is needed by every line),
/// then snapshot before line for each pair (the line references the fresh
/// snapshot id). Any failure rolls the whole graph back; a half-written
/// order would silently break the total invariant.
pub fn insert_order_graph(
    conn: &Connection,
    order: &NewOrder,
    lines: &[SnapshotLine],
) -> LapakResult<i64> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| to_storage_err(format!("begin order insert: {e}")))?;

    match insert_graph_inner(conn, order, lines) {
        Ok(order_id) => {
            conn.execute_batch("COMMIT").map_err(|e| {
                let _ = conn.execute_batch("ROLLBACK");
                to_storage_err(format!("commit order insert: {e}"))
            })?;
            Ok(order_id)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn insert_graph_inner(
    conn: &Connection,
    order: &NewOrder,
    lines: &[SnapshotLine],
) -> LapakResult<i64> {
    let now = now_rfc3339();

    conn.execute(
        "INSERT INTO orders (invoice_code, payment_method, address_id, total,
                             created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            order.invoice_code,
            order.payment_method,
            order.address_id,
            order.total.to_string(),
            now,
            now,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let order_id = conn.last_insert_rowid();

    let mut line_stmt = conn
        .prepare_cached(
            "INSERT INTO order_lines (order_id, snapshot_id, store_id, quantity, line_total)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for line in lines {
        let snapshot_id = snapshots::insert_snapshot(conn, line, &now)?;
        line_stmt
            .execute(params![
                order_id,
                snapshot_id,
                line.store_id,
                line.quantity,
                line.line_total.to_string(),
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(order_id)
}

pub fn get_order(conn: &Connection, id: i64) -> LapakResult<Option<Order>> {
    conn.prepare_cached(
        "SELECT id, invoice_code, payment_method, address_id, total, created_at, updated_at
         FROM orders WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], map_order_row).optional())
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Full order graph: header, shipping address, and each line with its
/// snapshot-sourced product block (store/category/photos joined live).
pub fn find_order_detail(conn: &Connection, id: i64) -> LapakResult<Option<OrderDetail>> {
    let Some(order) = get_order(conn, id)? else {
        return Ok(None);
    };
    hydrate(conn, order).map(Some)
}

/// Offset-paginated order listing. The keyword rides along in the request
/// but does not filter orders.
pub fn list_orders(conn: &Connection, page: &PageRequest) -> LapakResult<Page<OrderDetail>> {
    let total_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT id, invoice_code, payment_method, address_id, total, created_at, updated_at
             FROM orders ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![page.limit, page.offset()], map_order_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut details = Vec::new();
    for row in rows {
        let order = row.map_err(|e| to_storage_err(e.to_string()))?;
        details.push(hydrate(conn, order)?);
    }

    Ok(Page::new(page, total_rows, details))
}

/// Apply a payment-method change and bump `updated_at`.
pub fn update_payment(conn: &Connection, id: i64, payment_method: &str) -> LapakResult<()> {
    let rows = conn
        .execute(
            "UPDATE orders SET payment_method = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, payment_method, now_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(LapakError::OrderNotFound { id });
    }
    Ok(())
}

/// Hard delete: remove the header row; lines cascade via their foreign key.
pub fn delete_order(conn: &Connection, id: i64) -> LapakResult<()> {
    let rows = conn
        .execute("DELETE FROM orders WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(LapakError::OrderNotFound { id });
    }
    Ok(())
}

fn hydrate(conn: &Connection, order: Order) -> LapakResult<OrderDetail> {
    // The address is resolved even if it was soft-deleted after the order
    // was placed; the order keeps its shipping record.
    let address = addresses::get_address_any(conn, order.address_id)?
        .ok_or_else(|| to_storage_err(format!("address {} missing for order", order.address_id)))?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT id, order_id, snapshot_id, store_id, quantity, line_total
             FROM order_lines WHERE order_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let raw_lines = stmt
        .query_map(params![order.id], map_line_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut lines = Vec::with_capacity(raw_lines.len());
    for line in raw_lines {
        let snapshot = snapshots::get_snapshot(conn, line.snapshot_id)?.ok_or_else(|| {
            to_storage_err(format!("snapshot {} missing for line", line.snapshot_id))
        })?;

        let line_store = stores::get_store(conn, line.store_id)?
            .ok_or_else(|| to_storage_err(format!("store {} missing for line", line.store_id)))?;
        let product_store = stores::get_store(conn, snapshot.store_id)?.ok_or_else(|| {
            to_storage_err(format!("store {} missing for snapshot", snapshot.store_id))
        })?;
        let category = categories::get_category(conn, snapshot.category_id)?.ok_or_else(|| {
            to_storage_err(format!(
                "category {} missing for snapshot",
                snapshot.category_id
            ))
        })?;
        let photos = product_photos::photos_for_product(conn, snapshot.product_id)?;

        lines.push(OrderLineDetail {
            id: line.id,
            quantity: line.quantity,
            line_total: line.line_total,
            store: line_store,
            product: SnapshotProductView::from_snapshot(&snapshot, product_store, category, photos),
        });
    }

    Ok(OrderDetail {
        id: order.id,
        invoice_code: order.invoice_code,
        payment_method: order.payment_method,
        total: order.total,
        created_at: order.created_at,
        updated_at: order.updated_at,
        address,
        lines,
    })
}

fn map_line_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderLine> {
    Ok(OrderLine {
        id: row.get(0)?,
        order_id: row.get(1)?,
        snapshot_id: row.get(2)?,
        store_id: row.get(3)?,
        quantity: row.get(4)?,
        line_total: decimal_col(row, 5)?,
    })
}

fn map_order_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        invoice_code: row.get(1)?,
        payment_method: row.get(2)?,
        address_id: row.get(3)?,
        total: decimal_col(row, 4)?,
        created_at: dt_col(row, 5)?,
        updated_at: dt_col(row, 6)?,
    })
}
