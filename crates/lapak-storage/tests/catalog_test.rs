//! Catalog storage: product CRUD, hydrated reads, soft deletion, photo
//! replacement, keyword search with offset pagination, addresses.

use lapak_core::models::{NewProduct, NewUser, PageRequest};
use lapak_core::traits::ICatalogStorage;
use lapak_storage::queries::{addresses, categories, product_photos, stores, users};
use lapak_storage::{to_storage_err, StorageEngine};

// ─── Fixtures ────────────────────────────────────────────────────────────────

struct Seed {
    user_id: i64,
    store_id: i64,
    category_id: i64,
}

fn seed(engine: &StorageEngine) -> Seed {
    engine
        .with_writer(|conn| {
            let user_id = users::insert_user(
                conn,
                &NewUser {
                    name: "Rina".into(),
                    phone: "0811000001".into(),
                    email: "rina@example.com".into(),
                    password_hash: "x".into(),
                },
            )?;
            let store_id = stores::insert_store(conn, user_id, "Toko Rina", None)?;
            let category_id = categories::insert_category(conn, "Pakaian")?;
            Ok(Seed {
                user_id,
                store_id,
                category_id,
            })
        })
        .unwrap()
}

fn make_product(seed: &Seed, name: &str, consumer_price: &str) -> NewProduct {
    NewProduct {
        store_id: seed.store_id,
        category_id: seed.category_id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        reseller_price: "40000".into(),
        consumer_price: consumer_price.into(),
        stock: 10,
        description: Some(format!("{name} description")),
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
// Product CRUD
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn insert_and_hydrate_product() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let id = engine
        .insert_product(
            &make_product(&s, "Kaos Polos", "50000"),
            &["a.jpg".to_string(), "b.jpg".to_string()],
        )
        .unwrap();

    let detail = engine.find_product(id).unwrap().unwrap();
    assert_eq!(detail.product.name, "Kaos Polos");
    assert_eq!(detail.product.consumer_price, "50000");
    assert_eq!(detail.store.id, s.store_id);
    assert_eq!(detail.store.user_id, s.user_id);
    assert_eq!(detail.category.id, s.category_id);
    let urls: Vec<_> = detail.photos.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["a.jpg", "b.jpg"]);
}

#[test]
fn update_rewrites_fields() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);
    let id = engine
        .insert_product(&make_product(&s, "Kaos Polos", "50000"), &[])
        .unwrap();

    let mut updated = make_product(&s, "Kaos Sablon", "60000");
    updated.stock = 3;
    engine.update_product(id, &updated).unwrap();

    let detail = engine.find_product(id).unwrap().unwrap();
    assert_eq!(detail.product.name, "Kaos Sablon");
    assert_eq!(detail.product.consumer_price, "60000");
    assert_eq!(detail.product.stock, 3);
}

#[test]
fn soft_delete_hides_row_but_keeps_it() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);
    let id = engine
        .insert_product(&make_product(&s, "Kaos Polos", "50000"), &[])
        .unwrap();

    engine.soft_delete_product(id).unwrap();

    assert!(engine.find_product(id).unwrap().is_none());
    // The row survives with a deletion timestamp.
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM products"), 1);
    assert_eq!(
        count(
            &engine,
            "SELECT COUNT(*) FROM products WHERE deleted_at IS NOT NULL"
        ),
        1
    );

    // Deleting again reports not-found.
    let err = engine.soft_delete_product(id).unwrap_err();
    assert!(matches!(
        err,
        lapak_core::LapakError::ProductNotFound { .. }
    ));
}

#[test]
fn replace_photos_swaps_the_list() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);
    let id = engine
        .insert_product(
            &make_product(&s, "Kaos Polos", "50000"),
            &["old1.jpg".to_string(), "old2.jpg".to_string()],
        )
        .unwrap();

    engine
        .replace_photos(id, &["new.jpg".to_string()])
        .unwrap();

    let photos = engine
        .with_reader(|conn| product_photos::photos_for_product(conn, id))
        .unwrap();
    let urls: Vec<_> = photos.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["new.jpg"]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Keyword search + pagination
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn search_paginates_and_counts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    for i in 1..=12 {
        engine
            .insert_product(&make_product(&s, &format!("Kaos {i:02}"), "50000"), &[])
            .unwrap();
    }
    for i in 1..=3 {
        engine
            .insert_product(&make_product(&s, &format!("Sepatu {i:02}"), "90000"), &[])
            .unwrap();
    }

    let page = engine
        .search_products(&PageRequest::new(5, 2, Some("Kaos".into())))
        .unwrap();
    assert_eq!(page.total_rows, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 5);
    // Newest first: page 2 of 12 matches holds "Kaos 07" down to "Kaos 03".
    assert_eq!(page.rows[0].product.name, "Kaos 07");
    assert_eq!(page.rows[4].product.name, "Kaos 03");

    let all = engine
        .search_products(&PageRequest::new(10, 1, None))
        .unwrap();
    assert_eq!(all.total_rows, 15);
    assert_eq!(all.total_pages, 2);
    assert_eq!(all.rows.len(), 10);

    let none = engine
        .search_products(&PageRequest::new(10, 1, Some("Celana".into())))
        .unwrap();
    assert_eq!(none.total_rows, 0);
    assert_eq!(none.total_pages, 0);
    assert!(none.rows.is_empty());
}

#[test]
fn search_skips_soft_deleted_products() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);
    let keep = engine
        .insert_product(&make_product(&s, "Kaos A", "50000"), &[])
        .unwrap();
    let removed = engine
        .insert_product(&make_product(&s, "Kaos B", "50000"), &[])
        .unwrap();
    engine.soft_delete_product(removed).unwrap();

    let page = engine
        .search_products(&PageRequest::new(10, 1, Some("Kaos".into())))
        .unwrap();
    assert_eq!(page.total_rows, 1);
    assert_eq!(page.rows[0].product.id, keep);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Addresses
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn seeded_user_is_readable() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let user = engine
        .with_reader(|conn| users::get_user(conn, s.user_id))
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "rina@example.com");
    assert!(engine.with_reader(|conn| users::get_user(conn, 9999)).unwrap().is_none());
}

#[test]
fn address_lifecycle() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let s = seed(&engine);

    let id = engine
        .with_writer(|conn| {
            addresses::insert_address(conn, s.user_id, "Rumah", "Rina", "0811000001", "Jl. Melati 1")
        })
        .unwrap();

    let address = engine.find_address(id).unwrap().unwrap();
    assert_eq!(address.user_id, s.user_id);
    assert_eq!(address.title, "Rumah");

    let listed = engine
        .with_reader(|conn| addresses::list_by_user(conn, s.user_id))
        .unwrap();
    assert_eq!(listed.len(), 1);

    let deleted = engine
        .with_writer(|conn| addresses::soft_delete_address(conn, id))
        .unwrap();
    assert!(deleted);
    assert!(engine.find_address(id).unwrap().is_none());
}
