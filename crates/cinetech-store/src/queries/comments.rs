//! Local comment queries, one key per partition.

use std::collections::HashSet;

use cinetech_common::{CommentId, Error, Partition, Result};

use super::{read_array, write_array};
use crate::kv::KeyValueStore;
use crate::models::CommentEntry;

/// Local comments of one partition in stored order.
pub fn list_comments(kv: &dyn KeyValueStore, partition: &Partition) -> Result<Vec<CommentEntry>> {
    read_array(kv, &partition.storage_key())
}

/// Append an already-built comment to its partition.
///
/// A reply with a local (negative) parent id must point at a stored
/// top-level comment of this partition. Positive parent ids belong to remote
/// reviews and are checked by the caller, which knows the remote thread.
pub fn insert_comment(
    kv: &dyn KeyValueStore,
    partition: &Partition,
    comment: CommentEntry,
) -> Result<CommentEntry> {
    let key = partition.storage_key();
    let mut comments: Vec<CommentEntry> = read_array(kv, &key)?;

    if comments.iter().any(|c| c.id == comment.id) {
        return Err(Error::validation(format!(
            "comment id {} already exists in {}",
            comment.id, partition
        )));
    }

    if let Some(parent_id) = comment.parent_id {
        match comments.iter().find(|c| c.id == parent_id) {
            Some(parent) if !parent.is_top_level() => {
                return Err(Error::validation(format!(
                    "comment {} is a reply and cannot receive replies",
                    parent_id
                )));
            }
            None if parent_id.is_local() => {
                return Err(Error::validation(format!(
                    "parent comment {} does not exist in {}",
                    parent_id, partition
                )));
            }
            _ => {}
        }
    }

    comments.push(comment.clone());
    write_array(kv, &key, &comments)?;
    Ok(comment)
}

/// Delete a comment and every reply that descends from it.
///
/// Returns the number of entries removed; zero when the id is unknown, in
/// which case nothing is written.
pub fn delete_comment(
    kv: &dyn KeyValueStore,
    partition: &Partition,
    comment_id: CommentId,
) -> Result<usize> {
    let key = partition.storage_key();
    let mut comments: Vec<CommentEntry> = read_array(kv, &key)?;

    if !comments.iter().any(|c| c.id == comment_id) {
        return Ok(0);
    }

    let mut doomed = HashSet::from([comment_id]);
    loop {
        let before = doomed.len();
        for c in &comments {
            if c.parent_id.is_some_and(|p| doomed.contains(&p)) {
                doomed.insert(c.id);
            }
        }
        if doomed.len() == before {
            break;
        }
    }

    let before = comments.len();
    comments.retain(|c| !doomed.contains(&c.id));
    write_array(kv, &key, &comments)?;
    Ok(before - comments.len())
}
