//! freyja-core
//!
//! Pure domain types for the content approval pipeline: content items,
//! their lifecycle rules, annotations, analytics and storage key conventions.
//! No I/O. This is the shared vocabulary of the Freyja system.

pub mod error;
pub mod keys;
pub mod lifecycle;
pub mod models;
pub mod text;
