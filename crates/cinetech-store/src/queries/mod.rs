//! Read-modify-write operations over the key-value substrate.
//!
//! - favorites: The single favorites collection
//! - comments: Per-partition local comment threads
//!
//! Every mutation reads one key, changes the decoded array, and writes the
//! whole array back. There is no locking; a single writer is assumed.

pub mod comments;
pub mod favorites;

use cinetech_common::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::KeyValueStore;

/// Decode the JSON array stored under `key`; a missing key is an empty array.
pub(crate) fn read_array<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match kv.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Encode `items` as a JSON array and store it under `key`.
pub(crate) fn write_array<T: Serialize>(kv: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    kv.set(key, &raw)
}
