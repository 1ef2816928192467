//! Report outputs for the campus energy pipeline: CSV exports, the SVG
//! dashboard and the plain-text summary.

pub mod dashboard;
pub mod export;
pub mod summary;

pub use export::OutputPaths;
