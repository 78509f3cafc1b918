//! Command-line interface for libris.
//!
//! One subcommand per view of the catalog: listing the shelf, adding,
//! removing, toggling read status, searching, and statistics.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{SearchField, SUGGESTED_GENRES};
use crate::library::{Library, ShelfStore};
use crate::stats::LibraryStats;

/// libris - personal book catalog
#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the shelf
    Add {
        /// Book title
        title: String,

        /// Author name
        author: String,

        /// Publication year
        year: i32,

        /// Genre (any string; see `libris genres` for suggestions)
        #[arg(short, long)]
        genre: Option<String>,

        /// Mark the book as already read
        #[arg(short, long)]
        read: bool,
    },

    /// List all books on the shelf
    List,

    /// Remove a book by its index (as shown by `list`)
    Remove {
        /// Index of the book to remove
        index: usize,
    },

    /// Flip a book between read and unread
    Toggle {
        /// Index of the book to toggle
        index: usize,
    },

    /// Search the shelf
    Search {
        /// Search term (case-insensitive substring)
        term: String,

        /// Field to match against
        #[arg(short, long, value_enum, default_value = "title")]
        by: SearchBy,
    },

    /// Show shelf statistics
    Stats {
        /// Print the raw statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List suggested genres
    Genres,

    /// Show resolved configuration (debug)
    Config,
}

/// Search field for the CLI (maps to SearchField)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SearchBy {
    /// Match against the title
    Title,

    /// Match against the author
    Author,

    /// Match against the genre
    Genre,
}

impl From<SearchBy> for SearchField {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Title => SearchField::Title,
            SearchBy::Author => SearchField::Author,
            SearchBy::Genre => SearchField::Genre,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Add {
                title,
                author,
                year,
                genre,
                read,
            } => add_book(title, author, year, genre, read).await,
            Commands::List => list_books().await,
            Commands::Remove { index } => remove_book(index).await,
            Commands::Toggle { index } => toggle_book(index).await,
            Commands::Search { term, by } => search_books(&term, by.into()).await,
            Commands::Stats { json } => show_stats(json).await,
            Commands::Genres => list_genres(),
            Commands::Config => show_config(),
        }
    }
}

/// Open the library at the configured shelf path
async fn open_library() -> Result<Library> {
    let store = ShelfStore::open_default()?;
    Ok(Library::open(store).await)
}

/// Add a book to the shelf
async fn add_book(
    title: String,
    author: String,
    year: i32,
    genre: Option<String>,
    read: bool,
) -> Result<()> {
    let mut library = open_library().await?;
    library
        .add(title.as_str(), author.as_str(), year, genre, read)
        .await?;

    eprintln!("[Added \"{}\" by {}]", title, author);
    Ok(())
}

/// List every book on the shelf
async fn list_books() -> Result<()> {
    let library = open_library().await?;

    if library.books().is_empty() {
        println!("Your library is empty. Use 'libris add' to get started.");
        return Ok(());
    }

    print_book_table(library.books().iter().enumerate());
    println!("\nTotal: {} books", library.books().len());

    Ok(())
}

/// Remove a book by index
async fn remove_book(index: usize) -> Result<()> {
    let mut library = open_library().await?;

    match library.remove(index).await? {
        Some(book) => {
            eprintln!("[Removed \"{}\" by {}]", book.title, book.author);
            Ok(())
        }
        None => {
            anyhow::bail!(
                "No book at index {} (the shelf has {} books)",
                index,
                library.books().len()
            )
        }
    }
}

/// Toggle a book's read status
async fn toggle_book(index: usize) -> Result<()> {
    let mut library = open_library().await?;

    match library.toggle_read(index).await? {
        Some(read) => {
            let book = &library.books()[index];
            let status = if read { "read" } else { "unread" };
            eprintln!("[Marked \"{}\" as {}]", book.title, status);
            Ok(())
        }
        None => {
            anyhow::bail!(
                "No book at index {} (the shelf has {} books)",
                index,
                library.books().len()
            )
        }
    }
}

/// Search the shelf and print matches
async fn search_books(term: &str, field: SearchField) -> Result<()> {
    let library = open_library().await?;

    let results = library.search(term, field);

    if results.is_empty() {
        println!("No books matched \"{}\" in {}", term, field);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\" in {}:\n", results.len(), term, field);

    // Re-pair matches with their shelf index so remove/toggle can target them
    let indexed = library
        .books()
        .iter()
        .enumerate()
        .filter(|(_, book)| results.iter().any(|r| std::ptr::eq(*r, *book)));
    print_book_table(indexed);

    Ok(())
}

/// Show shelf statistics
async fn show_stats(json: bool) -> Result<()> {
    let library = open_library().await?;
    let stats = library.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.total_books == 0 {
        println!("Your library is empty. Nothing to summarize yet.");
        return Ok(());
    }

    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &LibraryStats) {
    println!("Total books: {}", stats.total_books);
    println!(
        "Read:        {} of {} ({:.1}%)",
        stats.read_books, stats.total_books, stats.percent_read
    );

    if !stats.genres.is_empty() {
        println!("\nGenres:");
        for (genre, count) in &stats.genres {
            println!("  {:<20} {}", genre, count);
        }
    }

    if !stats.authors.is_empty() {
        println!("\nAuthors:");
        for (author, count) in &stats.authors {
            println!("  {:<20} {}", author, count);
        }
    }

    if !stats.decades.is_empty() {
        println!("\nBooks by decade:");
        for (decade, count) in &stats.decades {
            println!("  {}s{:>16}", decade, count);
        }
    }
}

/// List the suggested genres
fn list_genres() -> Result<()> {
    println!("Suggested genres (any other string works too):");
    for genre in SUGGESTED_GENRES {
        println!("  {}", genre);
    }
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    use crate::config;

    let cfg = config::config()?;

    println!("libris configuration");
    println!("{}", "-".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Home:        {}", cfg.home.display());
    println!("Shelf file:  {}", cfg.shelf.display());

    Ok(())
}

/// Print a table of books with their shelf indices
fn print_book_table<'a>(books: impl Iterator<Item = (usize, &'a crate::domain::Book)>) {
    println!(
        "{:<4} {:<34} {:<22} {:<6} {:<14} {:<7}",
        "#", "TITLE", "AUTHOR", "YEAR", "GENRE", "STATUS"
    );
    println!("{}", "-".repeat(90));

    for (index, book) in books {
        println!(
            "{:<4} {:<34} {:<22} {:<6} {:<14} {:<7}",
            index,
            truncate(&book.title, 32),
            truncate(&book.author, 20),
            book.publication_year.to_string(),
            truncate(book.genre.as_deref().unwrap_or("-"), 12),
            if book.read_status { "read" } else { "unread" }
        );
    }
}

/// Shorten a string to `max` characters, appending "..." when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
