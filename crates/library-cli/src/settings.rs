use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::store::DEFAULT_DATA_FILE;

/// Manage a small library catalogue stored as JSON
#[derive(Parser, Debug, Clone)]
#[command(name = "library", about = "Manage a small library catalogue stored as JSON", version)]
pub struct Settings {
    /// Catalogue file
    #[arg(long, env = "LIBRARY_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Operation to run; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long)]
        isbn: String,
    },
    /// List every book
    List,
    /// Find books by title, author or ISBN
    Search { keyword: String },
    /// Lend a book for two weeks
    Issue {
        isbn: String,
        #[arg(long, default_value = "")]
        borrower: String,
    },
    /// Take back a lent book
    Return { isbn: String },
    /// Interactive numbered menu
    Menu,
}

impl Settings {
    /// The requested command, defaulting to the menu.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_menu() {
        let s = Settings::parse_from(["library"]);
        assert_eq!(s.command(), Command::Menu);
        assert_eq!(s.data_file, PathBuf::from("books.json"));
    }

    #[test]
    fn test_add_subcommand() {
        let s = Settings::parse_from([
            "library", "--data-file", "/tmp/cat.json", "add", "--title", "Dune", "--isbn", "111",
        ]);
        assert_eq!(s.data_file, PathBuf::from("/tmp/cat.json"));
        assert_eq!(
            s.command(),
            Command::Add {
                title: "Dune".to_string(),
                author: String::new(),
                isbn: "111".to_string(),
            }
        );
    }

    #[test]
    fn test_issue_subcommand() {
        let s = Settings::parse_from(["library", "issue", "111", "--borrower", "Ada"]);
        assert_eq!(
            s.command(),
            Command::Issue {
                isbn: "111".to_string(),
                borrower: "Ada".to_string(),
            }
        );
    }
}
