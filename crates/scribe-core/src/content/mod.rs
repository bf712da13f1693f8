//! Generated-content domain: records, kinds, requests, and the history
//! store contract.

pub mod model;
pub mod repository;

pub use model::{ContentKind, ContentRecord, GenerationRequest};
pub use repository::HistoryRepository;
