//! Shared building blocks for the campus tools.
//!
//! Domain models for meter readings, the workspace error type, column and
//! timestamp helpers, console prompts and logging bootstrap.

pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod time_utils;

pub use error::{CampusError, Result};
