use std::path::{Path, PathBuf};

use campus_core::error::{CampusError, Result};
use tracing::warn;

use crate::models::Book;

/// Default catalogue file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "books.json";

/// JSON file holding the whole catalogue as an array of [`Book`]s.
#[derive(Debug, Clone)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalogue. A missing or unreadable file yields an empty one.
    pub fn load(&self) -> Vec<Book> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "No catalogue at {}, starting empty: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(books) => books,
            Err(e) => {
                warn!(
                    "Ignoring unreadable catalogue {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Atomically write the catalogue, creating parent directories if needed.
    pub fn save(&self, books: &[Book]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let json = serde_json::to_string_pretty(books)?;

        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| self.write_error(source))?;
        std::fs::rename(&tmp, &self.path).map_err(|source| self.write_error(source))?;
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> CampusError {
        CampusError::FileWrite {
            path: self.path.clone(),
            source,
        }
    }
}
