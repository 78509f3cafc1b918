//! The book record and its field types.
//!
//! Records are stored in the shelf file exactly as serialized here; readers
//! stay permissive toward files written by older versions (missing `genre`,
//! missing `read_status`, string-typed years).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Genres offered by the add form. The set is open: any string is a valid
/// genre, these are only suggestions.
pub const SUGGESTED_GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Science",
    "Technology",
    "Fantasy",
    "Romance",
    "Poetry",
    "Self Help",
    "Art",
    "Religion",
    "History",
];

/// A single book record in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Book title (non-empty)
    pub title: String,

    /// Author name (non-empty)
    pub author: String,

    /// Publication year, kept as written in the shelf file
    pub publication_year: PublicationYear,

    /// Genre; absent on records written before the field existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Whether the book has been read
    #[serde(default)]
    pub read_status: bool,

    /// When the record was created (immutable after creation)
    pub added_date: DateTime<Utc>,
}

impl Book {
    /// Create a new record with `added_date` set to now
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: Option<String>,
        read_status: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year: PublicationYear::Year(publication_year),
            genre,
            read_status,
            added_date: Utc::now(),
        }
    }
}

/// Publication year as stored on disk.
///
/// This crate always writes integer years, but files from other tools may
/// carry the year as a string. Those records are kept as-is and only
/// interpreted when a numeric year is actually needed (decade grouping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicationYear {
    Year(i32),
    Raw(String),
}

impl PublicationYear {
    /// Numeric year, if the stored value parses as one
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Raw(raw) => raw.trim().parse().ok(),
        }
    }

    /// Year floored to a multiple of ten (1965 -> 1960)
    pub fn decade(&self) -> Option<i32> {
        self.as_year().map(|year| year.div_euclid(10) * 10)
    }
}

impl std::fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{}", year),
            Self::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<i32> for PublicationYear {
    fn from(year: i32) -> Self {
        Self::Year(year)
    }
}

/// Field a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Author => write!(f, "author"),
            SearchField::Genre => write!(f, "genre"),
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "genre" => Ok(SearchField::Genre),
            _ => anyhow::bail!("Unknown search field: {}", s),
        }
    }
}
