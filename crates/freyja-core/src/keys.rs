//! Object key conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of objects in the Freyja bucket.

use uuid::Uuid;

use crate::models::status::ContentStatus;

pub const ITEMS_PREFIX: &str = "items/";

/// Empty marker objects, one per item, under the item's current status.
/// Only statuses that still lead somewhere are indexed.
pub const STATUS_INDEX_PREFIX: &str = "index/";

pub fn item(id: Uuid) -> String {
    format!("{ITEMS_PREFIX}{id}.json")
}

/// Recover the item id from a key produced by [`item`].
pub fn item_id_from_key(key: &str) -> Option<Uuid> {
    key.strip_prefix(ITEMS_PREFIX)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

pub fn status_index(status: ContentStatus) -> String {
    format!("{STATUS_INDEX_PREFIX}{status}/")
}

pub fn status_marker(status: ContentStatus, id: Uuid) -> String {
    format!("{}{id}", status_index(status))
}

/// Recover the item id from a key produced by [`status_marker`].
pub fn item_id_from_marker(key: &str) -> Option<Uuid> {
    key.strip_prefix(STATUS_INDEX_PREFIX)?
        .split_once('/')?
        .1
        .parse()
        .ok()
}
