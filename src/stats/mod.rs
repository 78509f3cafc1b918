//! Aggregate statistics over the collection.
//!
//! Pure functions: nothing here mutates the shelf or touches the store.

use serde::Serialize;

use crate::domain::Book;

/// Aggregates computed from the current collection.
///
/// Groupings are association lists rather than maps so their order is part
/// of the result: `genres` and `authors` are sorted by count descending
/// (ties keep first-seen order), `decades` ascending by decade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    /// Count of all records
    pub total_books: usize,

    /// Count of records marked read
    pub read_books: usize,

    /// read_books / total_books * 100; 0 for an empty collection
    pub percent_read: f64,

    /// Genre -> count, most common first; untagged records count as "Unknown"
    pub genres: Vec<(String, usize)>,

    /// Author -> count, most common first
    pub authors: Vec<(String, usize)>,

    /// Decade -> count, earliest first; records whose year does not parse
    /// are skipped here but still counted in `total_books`
    pub decades: Vec<(i32, usize)>,
}

/// Compute statistics for a collection
pub fn compute(books: &[Book]) -> LibraryStats {
    let total_books = books.len();
    let read_books = books.iter().filter(|b| b.read_status).count();
    let percent_read = if total_books > 0 {
        read_books as f64 / total_books as f64 * 100.0
    } else {
        0.0
    };

    let mut genres: Vec<(String, usize)> = Vec::new();
    let mut authors: Vec<(String, usize)> = Vec::new();
    let mut decades: Vec<(i32, usize)> = Vec::new();

    for book in books {
        let genre = book.genre.as_deref().unwrap_or("Unknown");
        bump(&mut genres, genre.to_string());
        bump(&mut authors, book.author.clone());

        if let Some(decade) = book.publication_year.decade() {
            bump(&mut decades, decade);
        }
    }

    // Stable sorts, so equal counts stay in first-seen order
    genres.sort_by(|a, b| b.1.cmp(&a.1));
    authors.sort_by(|a, b| b.1.cmp(&a.1));
    decades.sort_by_key(|(decade, _)| *decade);

    LibraryStats {
        total_books,
        read_books,
        percent_read,
        genres,
        authors,
        decades,
    }
}

/// Increment the count for `key`, inserting it on first sight
fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
