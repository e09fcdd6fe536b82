//! Order persistence: the atomic header/snapshot/line insert, all-or-nothing
//! failure behavior, full-graph hydration, pagination, update, and delete.

use rust_decimal::Decimal;

use lapak_core::models::{NewOrder, NewProduct, NewUser, PageRequest, SnapshotLine};
use lapak_core::traits::IOrderStorage;
use lapak_storage::queries::{addresses, categories, snapshots, stores, users};
use lapak_storage::{to_storage_err, StorageEngine};

// ─── Fixtures ────────────────────────────────────────────────────────────────

struct Seed {
    user_id: i64,
    store_id: i64,
    category_id: i64,
    address_id: i64,
    product_id: i64,
}

fn seed(engine: &StorageEngine) -> Seed {
    engine
        .with_writer(|conn| {
            let user_id = users::insert_user(
                conn,
                &NewUser {
                    name: "Budi".into(),
                    phone: "0811000002".into(),
                    email: "budi@example.com".into(),
                    password_hash: "x".into(),
                },
            )?;
            let store_id = stores::insert_store(conn, user_id, "Toko Budi", None)?;
            let category_id = categories::insert_category(conn, "Elektronik")?;
            let address_id = addresses::insert_address(
                conn,
                user_id,
                "Rumah",
                "Budi",
                "0811000002",
                "Jl. Kenanga 2",
            )?;
            let product_id = lapak_storage::queries::products::insert_product(
                conn,
                &NewProduct {
                    store_id,
                    category_id,
                    name: "Powerbank".into(),
                    slug: "powerbank".into(),
                    reseller_price: "40000".into(),
                    consumer_price: "50000".into(),
                    stock: 5,
                    description: Some("10000 mAh".into()),
                },
            )?;
            Ok(Seed {
                user_id,
                store_id,
                category_id,
                address_id,
                product_id,
            })
        })
        .unwrap()
}

fn make_order(s: &Seed, invoice: &str, total: i64) -> NewOrder {
    NewOrder {
        invoice_code: invoice.to_string(),
        payment_method: "transfer".to_string(),
        address_id: s.address_id,
        total: Decimal::from(total),
    }
}

fn make_line(s: &Seed, quantity: i64, line_total: i64) -> SnapshotLine {
    SnapshotLine {
        product_id: s.product_id,
        name: "Powerbank".into(),
        slug: "powerbank".into(),
        reseller_price: "40000".into(),
        consumer_price: "50000".into(),
        description: Some("10000 mAh".into()),
        snapshot_store_id: s.store_id,
        category_id: s.category_id,
        store_id: s.store_id,
        quantity,
        line_total: Decimal::from(line_total),
    }
}

fn count(engine: &StorageEngine, sql: &str) -> i64 {
    engine
        .with_reader(|conn| {
            conn.query_row(sql, [], |row| row.get(0))
                .map_err(|e| to_storage_err(e.to_string()))
        })
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Atomic insert
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn graph_insert_commits_header_snapshots_and_lines_together() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(
            &make_order(&s, "INV-T1", 150000),
            &[make_line(&s, 2, 100000), make_line(&s, 1, 50000)],
        )
        .unwrap();

    assert_eq!(count(&engine, "SELECT COUNT(*) FROM orders"), 1);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM product_snapshots"), 2);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM order_lines"), 2);

    let detail = engine.find_order(order_id).unwrap().unwrap();
    assert_eq!(detail.invoice_code, "INV-T1");
    assert_eq!(detail.total, Decimal::from(150000));
    assert_eq!(detail.lines.len(), 2);
    assert_eq!(detail.owner_id(), s.user_id);

    // Each line references its own snapshot row.
    let snaps = engine
        .with_reader(|conn| snapshots::snapshots_for_product(conn, s.product_id))
        .unwrap();
    assert_eq!(snaps.len(), 2);
    assert!(snaps.iter().all(|snap| snap.consumer_price == "50000"));
}

#[test]
fn failing_line_insert_rolls_back_the_whole_graph() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    // Second pair passes snapshot insert, then breaks the line's store
    // foreign key: the header and the first pair must vanish with it.
    let mut bad = make_line(&s, 1, 50000);
    bad.store_id = 9999;

    let err = engine
        .insert_order_graph(
            &make_order(&s, "INV-T2", 150000),
            &[make_line(&s, 2, 100000), bad],
        )
        .unwrap_err();
    assert!(matches!(err, lapak_core::LapakError::Storage(_)));

    assert_eq!(count(&engine, "SELECT COUNT(*) FROM orders"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM product_snapshots"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM order_lines"), 0);
}

#[test]
fn zero_quantity_line_is_rejected_and_rolled_back() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let err = engine
        .insert_order_graph(&make_order(&s, "INV-T3", 0), &[make_line(&s, 0, 0)])
        .unwrap_err();
    assert!(matches!(err, lapak_core::LapakError::Storage(_)));
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM orders"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM product_snapshots"), 0);
}

#[test]
fn empty_line_list_creates_a_zero_line_order() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(&make_order(&s, "INV-T4", 0), &[])
        .unwrap();

    let detail = engine.find_order(order_id).unwrap().unwrap();
    assert!(detail.lines.is_empty());
    assert_eq!(detail.total, Decimal::ZERO);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Hydration
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn hydrated_order_exposes_snapshot_sourced_product_block() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(&make_order(&s, "INV-T5", 100000), &[make_line(&s, 2, 100000)])
        .unwrap();

    let detail = engine.find_order(order_id).unwrap().unwrap();
    assert_eq!(detail.address.id, s.address_id);
    assert_eq!(detail.address.user_id, s.user_id);

    let line = &detail.lines[0];
    assert_eq!(line.quantity, 2);
    assert_eq!(line.line_total, Decimal::from(100000));
    assert_eq!(line.store.id, s.store_id);
    assert_eq!(line.product.product_id, s.product_id);
    assert_eq!(line.product.name, "Powerbank");
    assert_eq!(line.product.consumer_price, "50000");
    assert_eq!(line.product.category.id, s.category_id);
}

#[test]
fn order_survives_address_soft_deletion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(&make_order(&s, "INV-T6", 50000), &[make_line(&s, 1, 50000)])
        .unwrap();

    engine
        .with_writer(|conn| addresses::soft_delete_address(conn, s.address_id))
        .unwrap();

    // The shipping record stays resolvable for the existing order.
    let detail = engine.find_order(order_id).unwrap().unwrap();
    assert_eq!(detail.address.id, s.address_id);
    assert_eq!(detail.owner_id(), s.user_id);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Listing, update, delete
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn listing_pages_by_offset_and_counts_pages() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    for i in 1..=15 {
        engine
            .insert_order_graph(
                &make_order(&s, &format!("INV-L{i:02}"), 50000),
                &[make_line(&s, 1, 50000)],
            )
            .unwrap();
    }

    let page = engine
        .list_orders(&PageRequest::new(10, 2, None))
        .unwrap();
    assert_eq!(page.total_rows, 15);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows.len(), 5);
    // Offset 10 of the id-ordered set: invoice 11 through 15.
    assert_eq!(page.rows[0].invoice_code, "INV-L11");
    assert_eq!(page.rows[4].invoice_code, "INV-L15");
}

#[test]
fn update_payment_touches_only_the_method() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(&make_order(&s, "INV-T7", 50000), &[make_line(&s, 1, 50000)])
        .unwrap();

    engine.update_payment(order_id, "cod").unwrap();

    let detail = engine.find_order(order_id).unwrap().unwrap();
    assert_eq!(detail.payment_method, "cod");
    assert_eq!(detail.total, Decimal::from(50000));
    assert!(detail.updated_at >= detail.created_at);

    let err = engine.update_payment(9999, "cod").unwrap_err();
    assert!(matches!(err, lapak_core::LapakError::OrderNotFound { .. }));
}

#[test]
fn delete_removes_header_and_cascades_lines_but_keeps_snapshots() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let order_id = engine
        .insert_order_graph(
            &make_order(&s, "INV-T8", 150000),
            &[make_line(&s, 2, 100000), make_line(&s, 1, 50000)],
        )
        .unwrap();

    engine.delete_order(order_id).unwrap();

    assert!(engine.find_order(order_id).unwrap().is_none());
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM orders"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM order_lines"), 0);
    // Snapshots are the permanent purchase record.
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM product_snapshots"), 2);

    let err = engine.delete_order(order_id).unwrap_err();
    assert!(matches!(err, lapak_core::LapakError::OrderNotFound { .. }));
}
