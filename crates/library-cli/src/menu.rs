//! Interactive numbered menu over a [`Library`].

use std::io::{self, BufRead, Write};

use campus_core::prompt::Console;
use chrono::NaiveDate;
use tracing::warn;

use crate::library::{Library, LibraryError};

const MENU: &str = "1.Add 2.View 3.Search 4.Issue 5.Return 6.Exit";

/// Print every book, or `No books.` when the catalogue is empty.
pub fn print_books<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    library: &Library,
) -> io::Result<()> {
    if library.books().is_empty() {
        return console.say("No books.");
    }
    for book in library.books() {
        console.say(&book.to_string())?;
    }
    Ok(())
}

/// Print the books matching `keyword`, or `No match.`.
pub fn print_search<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    library: &Library,
    keyword: &str,
) -> io::Result<()> {
    let found = library.search(keyword);
    if found.is_empty() {
        return console.say("No match.");
    }
    for book in found {
        console.say(&book.to_string())?;
    }
    Ok(())
}

/// Print the outcome of a catalogue operation.
///
/// Refusals are reported and the session continues.
pub fn report<R: BufRead, W: Write, T>(
    console: &mut Console<R, W>,
    outcome: Result<T, LibraryError>,
    success: &str,
) -> io::Result<()> {
    match outcome {
        Ok(_) => console.say(success),
        Err(LibraryError::Storage(e)) => {
            warn!("Catalogue not saved: {}", e);
            console.say(&format!("Could not save catalogue: {}", e))
        }
        Err(e) => console.say(&e.to_string()),
    }
}

/// Run the menu until `6` or end of input.
///
/// `today` supplies the issue date so due dates are reproducible.
pub fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    library: &mut Library,
    today: impl Fn() -> NaiveDate,
) -> io::Result<()> {
    loop {
        console.say("")?;
        console.say(MENU)?;
        let Some(choice) = console.ask("Choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let title = console.ask("Title: ")?.unwrap_or_default();
                let author = console.ask("Author: ")?.unwrap_or_default();
                let isbn = console.ask("ISBN: ")?.unwrap_or_default();
                let outcome = library.add(&title, &author, &isbn);
                report(console, outcome, "Added.")?;
            }
            "2" => print_books(console, library)?,
            "3" => {
                let keyword = console
                    .ask("Search (title/author/isbn): ")?
                    .unwrap_or_default();
                print_search(console, library, &keyword)?;
            }
            "4" => {
                let isbn = console.ask("ISBN to issue: ")?.unwrap_or_default();
                // Ask for the borrower only when the book can be issued.
                match library.find(&isbn).map(|b| b.is_available()) {
                    None => console.say(&LibraryError::NotFound(isbn).to_string())?,
                    Some(false) => console.say(&LibraryError::AlreadyIssued(isbn).to_string())?,
                    Some(true) => {
                        let borrower = console.ask("Borrower name: ")?.unwrap_or_default();
                        let outcome = library.issue(&isbn, &borrower, today());
                        report(console, outcome, "Issued.")?;
                    }
                }
            }
            "5" => {
                let isbn = console.ask("ISBN to return: ")?.unwrap_or_default();
                let outcome = library.return_book(&isbn);
                report(console, outcome, "Returned.")?;
            }
            "6" => return Ok(()),
            _ => console.say("Invalid.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookStatus;
    use crate::store::BookStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn session(library: &mut Library, input: &str) -> String {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run_menu(&mut console, library, today).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn library(tmp: &TempDir) -> Library {
        Library::open(BookStore::new(tmp.path().join("books.json")))
    }

    #[test]
    fn test_add_view_and_exit() {
        let tmp = TempDir::new().unwrap();
        let mut lib = library(&tmp);

        let out = session(&mut lib, "1\nDune\nFrank Herbert\n111\n2\n6\n");

        assert!(out.contains("Added."));
        assert!(out.contains("Dune - Frank Herbert | ISBN:111 | available"));
        assert_eq!(lib.books().len(), 1);
    }

    #[test]
    fn test_duplicate_isbn_message() {
        let tmp = TempDir::new().unwrap();
        let mut lib = library(&tmp);

        let out = session(&mut lib, "1\nDune\n\n111\n1\nOther\n\n111\n6\n");

        assert!(out.contains("ISBN 111 already exists."));
        assert_eq!(lib.books().len(), 1);
    }

    #[test]
    fn test_issue_and_return_flow() {
        let tmp = TempDir::new().unwrap();
        let mut lib = library(&tmp);
        lib.add("Dune", "Frank Herbert", "111").unwrap();

        let out = session(&mut lib, "4\n111\nAda\n4\n111\n5\n111\n5\n111\n6\n");

        assert!(out.contains("Issued."));
        assert!(out.contains("Book 111 is already issued."));
        assert!(out.contains("Returned."));
        assert!(out.contains("Book 111 is not issued."));
        assert_eq!(lib.find("111").unwrap().status, BookStatus::Available);
    }

    #[test]
    fn test_issue_uses_injected_date() {
        let tmp = TempDir::new().unwrap();
        let mut lib = library(&tmp);
        lib.add("Dune", "Frank Herbert", "111").unwrap();

        session(&mut lib, "4\n111\nAda\n6\n");

        assert_eq!(
            lib.find("111").unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 5, 15)
        );
    }

    #[test]
    fn test_search_and_empty_view() {
        let tmp = TempDir::new().unwrap();
        let mut lib = library(&tmp);

        let out = session(&mut lib, "2\n3\nanything\n9\n");

        assert!(out.contains("No books."));
        assert!(out.contains("No match."));
        assert!(out.contains("Invalid."));
    }
}
