//! libris - Flat-file personal book catalog
//!
//! A small catalog for a personal bookshelf: add, remove, search, and mark
//! books read or unread, with the whole collection mirrored to one JSON
//! file after every change.
//!
//! # Architecture
//!
//! The collection lives in memory and the shelf file is rewritten after
//! each mutation:
//! - The store is the only persistence boundary
//! - Records keep insertion order; operations address books by index
//! - Statistics are computed from the in-memory collection, never stored
//!
//! # Modules
//!
//! - `domain`: Data structures (Book, PublicationYear, SearchField)
//! - `library`: The collection (Shelf), its store, and catalog operations
//! - `stats`: Aggregate statistics (counts, percent read, groupings)
//! - `config`: Shelf file location (env vars, config file, defaults)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! libris add "Dune" "Frank Herbert" 1965 --genre Science
//!
//! # See the shelf
//! libris list
//!
//! # Mark index 0 as read
//! libris toggle 0
//!
//! # Aggregates
//! libris stats
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod stats;

// Re-export main types at crate root for convenience
pub use domain::{Book, PublicationYear, SearchField, SUGGESTED_GENRES};
pub use library::{CatalogError, Library, Shelf, ShelfStore, StoreError};
pub use stats::{compute, LibraryStats};
