use std::path::PathBuf;

use flappy_game::entities::BestKind;
use flappy_game::store::{FileStore, MemoryStore, ScoreStore};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flappy_game_{}_{}", name, std::process::id()))
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.get(BestKind::Score), 0);
    assert_eq!(store.get(BestKind::Items), 0);
    assert_eq!(store.flushes(), 0);
}

#[test]
fn memory_store_keys_are_independent() {
    let mut store = MemoryStore::new();
    store.set(BestKind::Score, 12);
    store.set(BestKind::Items, 3);
    assert_eq!(store.get(BestKind::Score), 12);
    assert_eq!(store.get(BestKind::Items), 3);
}

#[test]
fn memory_store_counts_flushes() {
    // The host loop issues one flush per beaten best; the fake lets
    // tests assert that count
    let mut store = MemoryStore::new();
    store.set(BestKind::Score, 5);
    store.flush().unwrap();
    assert_eq!(store.flushes(), 1);
    store.set(BestKind::Score, 6);
    store.flush().unwrap();
    assert_eq!(store.flushes(), 2);
}

// ── FileStore ─────────────────────────────────────────────────────────────────

#[test]
fn file_store_missing_file_reads_zero() {
    let store = FileStore::open_at(temp_path("missing"));
    assert_eq!(store.get(BestKind::Score), 0);
    assert_eq!(store.get(BestKind::Items), 0);
}

#[test]
fn file_store_round_trip() {
    let path = temp_path("round_trip");
    let _ = std::fs::remove_file(&path);

    let mut store = FileStore::open_at(path.clone());
    store.set(BestKind::Score, 42);
    store.set(BestKind::Items, 9);
    store.flush().unwrap();

    let reopened = FileStore::open_at(path.clone());
    assert_eq!(reopened.get(BestKind::Score), 42);
    assert_eq!(reopened.get(BestKind::Items), 9);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_store_survives_partial_writes() {
    // Only one key flushed so far: the other reads back as zero
    let path = temp_path("partial");
    let _ = std::fs::remove_file(&path);

    let mut store = FileStore::open_at(path.clone());
    store.set(BestKind::Items, 4);
    store.flush().unwrap();

    let reopened = FileStore::open_at(path.clone());
    assert_eq!(reopened.get(BestKind::Score), 0);
    assert_eq!(reopened.get(BestKind::Items), 4);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_store_ignores_malformed_lines() {
    let path = temp_path("malformed");
    std::fs::write(&path, "score=17\ngarbage\nitems=notanumber\n").unwrap();

    let store = FileStore::open_at(path.clone());
    assert_eq!(store.get(BestKind::Score), 17);
    assert_eq!(store.get(BestKind::Items), 0);

    let _ = std::fs::remove_file(&path);
}
