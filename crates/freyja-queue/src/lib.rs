//! freyja-queue
//!
//! The approval queue: every status change of a content item goes through
//! [`ApprovalQueue`], which serializes transitions per item, commits each
//! one in a single store write and emits an audit event. The [`sweep`]
//! module publishes approved and due scheduled items in the background.

pub mod audit;
pub mod error;
pub mod queue;
pub mod sweep;

pub use queue::ApprovalQueue;
