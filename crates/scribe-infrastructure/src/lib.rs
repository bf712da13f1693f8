//! Persistence and export infrastructure for Scribe.
//!
//! The JSON file history store and the spreadsheet export projection.

pub mod export;
pub mod history;

pub use history::JsonHistoryRepository;
