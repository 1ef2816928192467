//! Catalogue operations. Every successful mutation is persisted before it
//! becomes visible in memory.

use campus_core::error::CampusError;
use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::models::{Book, BookStatus};
use crate::store::BookStore;

/// Days a book may be kept once issued.
pub const LOAN_DAYS: i64 = 14;

const UNKNOWN: &str = "Unknown";

/// Reasons a catalogue operation is refused.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Title and ISBN required.")]
    MissingField,

    #[error("ISBN {0} already exists.")]
    DuplicateIsbn(String),

    #[error("No book with ISBN {0}.")]
    NotFound(String),

    #[error("Book {0} is already issued.")]
    AlreadyIssued(String),

    #[error("Book {0} is not issued.")]
    NotIssued(String),

    #[error(transparent)]
    Storage(#[from] CampusError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;

/// The catalogue together with the file it is persisted to.
pub struct Library {
    store: BookStore,
    books: Vec<Book>,
}

impl Library {
    /// Open the catalogue stored in `store`.
    pub fn open(store: BookStore) -> Self {
        let books = store.load();
        info!("Loaded {} books from {}", books.len(), store.path().display());
        Self { store, books }
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    /// Books whose title, author or ISBN contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let keyword = keyword.trim();
        self.books.iter().filter(|b| b.matches(keyword)).collect()
    }

    /// Add a new available book. An empty author is recorded as `Unknown`.
    pub fn add(&mut self, title: &str, author: &str, isbn: &str) -> Result<&Book> {
        let (title, isbn) = (title.trim(), isbn.trim());
        if title.is_empty() || isbn.is_empty() {
            return Err(LibraryError::MissingField);
        }
        if self.find(isbn).is_some() {
            return Err(LibraryError::DuplicateIsbn(isbn.to_string()));
        }

        let mut next = self.books.clone();
        next.push(Book::new(title, or_unknown(author), isbn));
        self.commit(next)?;
        info!("Added book {}", isbn);
        Ok(&self.books[self.books.len() - 1])
    }

    /// Lend an available book, due back [`LOAN_DAYS`] after `today`.
    pub fn issue(&mut self, isbn: &str, borrower: &str, today: NaiveDate) -> Result<&Book> {
        let idx = self.position(isbn)?;
        if !self.books[idx].is_available() {
            return Err(LibraryError::AlreadyIssued(isbn.to_string()));
        }

        let mut next = self.books.clone();
        let book = &mut next[idx];
        book.status = BookStatus::Issued;
        book.borrower = Some(or_unknown(borrower));
        book.due_date = Some(today + Duration::days(LOAN_DAYS));
        self.commit(next)?;
        info!("Issued book {}", isbn);
        Ok(&self.books[idx])
    }

    /// Take back an issued book, clearing the borrower and due date.
    pub fn return_book(&mut self, isbn: &str) -> Result<&Book> {
        let idx = self.position(isbn)?;
        if self.books[idx].status != BookStatus::Issued {
            return Err(LibraryError::NotIssued(isbn.to_string()));
        }

        let mut next = self.books.clone();
        let book = &mut next[idx];
        book.status = BookStatus::Available;
        book.borrower = None;
        book.due_date = None;
        self.commit(next)?;
        info!("Returned book {}", isbn);
        Ok(&self.books[idx])
    }

    fn position(&self, isbn: &str) -> Result<usize> {
        let isbn = isbn.trim();
        self.books
            .iter()
            .position(|b| b.isbn == isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))
    }

    fn commit(&mut self, next: Vec<Book>) -> Result<()> {
        self.store.save(&next)?;
        self.books = next;
        Ok(())
    }
}

fn or_unknown(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
