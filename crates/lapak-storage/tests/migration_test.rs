//! Migration runner: fresh databases reach the latest version, reruns are
//! no-ops, and file-backed databases keep their version across reopens.

use lapak_core::config::StorageConfig;
use lapak_storage::{migrations, StorageEngine};

#[test]
fn fresh_database_is_at_latest_version() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let version = engine
        .with_reader(|conn| migrations::current_version(conn))
        .unwrap();
    assert_eq!(version, migrations::LATEST_VERSION);
}

#[test]
fn rerunning_migrations_applies_nothing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let applied = engine
        .with_writer(|conn| migrations::run_migrations(conn))
        .unwrap();
    assert_eq!(applied, 0);
}

#[test]
fn reopened_file_database_keeps_its_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lapak.db");
    let config = StorageConfig::default();

    {
        let engine = StorageEngine::open(&path, &config).unwrap();
        assert_eq!(engine.path(), Some(path.as_path()));
        engine.checkpoint().unwrap();
    }

    let engine = StorageEngine::open(&path, &config).unwrap();
    let version = engine
        .with_reader(|conn| migrations::current_version(conn))
        .unwrap();
    assert_eq!(version, migrations::LATEST_VERSION);
}
