//! Shelf Store Integration Tests
//!
//! Tests for the flat-file format: round-trips, permissive reads of older
//! files, and failure behavior.

use libris::{Book, PublicationYear, Shelf, ShelfStore, StoreError};
use tempfile::TempDir;

fn sample_shelf() -> Shelf {
    let mut shelf = Shelf::new();
    shelf.add(Book::new(
        "Dune",
        "Frank Herbert",
        1965,
        Some("Science".to_string()),
        false,
    ));
    shelf.add(Book::new(
        "The Dispossessed",
        "Ursula K. Le Guin",
        1974,
        Some("Science".to_string()),
        true,
    ));
    shelf.add(Book::new("Untagged", "Anonymous", 1999, None, false));
    shelf
}

#[tokio::test]
async fn test_save_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = ShelfStore::new(temp.path().join("library.json"));

    let shelf = sample_shelf();
    store.save(&shelf).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, shelf);
}

#[tokio::test]
async fn test_round_trip_preserves_field_values() {
    let temp = TempDir::new().unwrap();
    let store = ShelfStore::new(temp.path().join("library.json"));

    store.save(&sample_shelf()).await.unwrap();
    let loaded = store.load().await.unwrap();

    let first = &loaded.books()[0];
    assert_eq!(first.title, "Dune");
    assert_eq!(first.author, "Frank Herbert");
    assert_eq!(first.publication_year, PublicationYear::Year(1965));
    assert_eq!(first.genre.as_deref(), Some("Science"));
    assert!(!first.read_status);

    let second = &loaded.books()[1];
    assert!(second.read_status);
    assert_eq!(loaded.books()[2].genre, None);
}

#[tokio::test]
async fn test_round_trip_preserves_order() {
    let temp = TempDir::new().unwrap();
    let store = ShelfStore::new(temp.path().join("library.json"));

    store.save(&sample_shelf()).await.unwrap();
    let loaded = store.load().await.unwrap();

    let titles: Vec<&str> = loaded.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "The Dispossessed", "Untagged"]);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = ShelfStore::new(temp.path().join("does-not-exist.json"));

    let shelf = store.load().await.unwrap();
    assert!(shelf.is_empty());
}

#[tokio::test]
async fn test_load_tolerates_older_records() {
    // A file written by an earlier version: no genre, no read_status, and
    // a year stored as a string.
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");
    std::fs::write(
        &path,
        r#"[
            {
                "title": "Old Book",
                "author": "Old Author",
                "publication_year": "1923",
                "added_date": "2020-06-01T00:00:00Z"
            }
        ]"#,
    )
    .unwrap();

    let shelf = ShelfStore::new(&path).load().await.unwrap();
    assert_eq!(shelf.len(), 1);

    let book = &shelf.books()[0];
    assert_eq!(book.genre, None);
    assert!(!book.read_status);
    assert_eq!(book.publication_year.as_year(), Some(1923));
}

#[tokio::test]
async fn test_malformed_file_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");
    std::fs::write(&path, "this is not a shelf").unwrap();

    let err = ShelfStore::new(&path).load().await.unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[tokio::test]
async fn test_save_overwrites_previous_contents() {
    let temp = TempDir::new().unwrap();
    let store = ShelfStore::new(temp.path().join("library.json"));

    store.save(&sample_shelf()).await.unwrap();

    let mut smaller = Shelf::new();
    smaller.add(Book::new("Only One", "Solo", 2001, None, false));
    store.save(&smaller).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.books()[0].title, "Only One");
}
