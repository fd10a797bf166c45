//! Record identifiers
//!
//! Identifiers are UUIDv7 values: the leading bits are a millisecond
//! timestamp and the generator keeps a counter within the process, so
//! identifiers sort in creation order and are never reissued.

use uuid::Uuid;

/// Returns a fresh identifier as 32 lowercase hex characters.
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}
