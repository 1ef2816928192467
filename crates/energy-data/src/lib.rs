//! Data layer for the campus energy pipeline.
//!
//! Discovers and parses per-building CSV files, collects manual readings,
//! aggregates consumption and assembles the analysis consumed by reporting.

pub mod aggregator;
pub mod analysis;
pub mod manual;
pub mod reader;

pub use campus_core as core;
