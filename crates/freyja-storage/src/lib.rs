//! freyja-storage
//!
//! Persistence for content items. Every stored item carries an ETag-style
//! version so concurrent writers fail instead of overwriting each other.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
