use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Circulation state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Issued => write!(f, "issued"),
        }
    }
}

/// One catalogue record as stored in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub isbn: String,
    #[serde(default)]
    pub status: BookStatus,
    /// Who holds the book while it is issued.
    #[serde(default)]
    pub borrower: Option<String>,
    /// Return date while the book is issued (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            status: BookStatus::Available,
            borrower: None,
            due_date: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Case-insensitive substring match on title, author or ISBN.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        [&self.title, &self.author, &self.isbn]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} | ISBN:{} | {}",
            self.title, self.author, self.isbn, self.status
        )?;
        if let Some(borrower) = &self.borrower {
            write!(f, " | borrower: {}", borrower)?;
        }
        if let Some(due) = self.due_date {
            write!(f, " | due: {}", due)?;
        }
        Ok(())
    }
}
