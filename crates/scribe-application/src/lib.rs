//! Application services for Scribe.
//!
//! The generation pipeline lives here; domain contracts come from
//! `scribe-core` and concrete collaborators are injected by the caller.

pub mod generator;

pub use generator::ContentGenerator;
