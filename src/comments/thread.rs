//! Two-level comment threads over remote reviews and local comments.
//!
//! [`build_thread`] is the pure tree construction. [`CommentThread`] owns a
//! rendered thread for one title and keeps it in step with the
//! [`LocalStore`] as comments are added or deleted, without rebuilding it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use cinetech_common::{CommentId, CommentOrigin, Error, Partition, Result};
use cinetech_store::store::DEFAULT_AUTHOR;
use cinetech_store::{CommentEntry, LocalStore};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::catalog::Review;

/// Shown in place of an empty thread.
pub const EMPTY_THREAD_MESSAGE: &str =
    "Aucun commentaire pour le moment. Soyez le premier à commenter !";

/// A top-level comment and its replies, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadNode {
    pub comment: CommentEntry,
    pub replies: Vec<CommentEntry>,
}

impl ThreadNode {
    fn new(comment: CommentEntry) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }
}

/// Ordered top-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Thread {
    pub nodes: Vec<ThreadNode>,
}

impl Thread {
    /// Whether to render the empty-state placeholder.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of comments shown.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| 1 + n.replies.len()).sum()
    }

    /// Find a shown comment by id.
    pub fn find(&self, id: CommentId) -> Option<&CommentEntry> {
        self.nodes.iter().find_map(|node| {
            if node.comment.id == id {
                Some(&node.comment)
            } else {
                node.replies.iter().find(|r| r.id == id)
            }
        })
    }

    fn node_mut(&mut self, id: CommentId) -> Option<&mut ThreadNode> {
        self.nodes.iter_mut().find(|n| n.comment.id == id)
    }

    fn remove(&mut self, ids: &[CommentId]) {
        self.nodes.retain(|n| !ids.contains(&n.comment.id));
        for node in &mut self.nodes {
            node.replies.retain(|r| !ids.contains(&r.id));
        }
    }
}

/// Build a thread from remote comments followed by local ones.
///
/// Replies attach to their top-level ancestor, so a reply to a reply is
/// flattened one level up. Replies whose ancestor chain does not reach a
/// top-level comment in the input are not shown.
pub fn build_thread(remote: Vec<CommentEntry>, local: Vec<CommentEntry>) -> Thread {
    let all: Vec<CommentEntry> = remote.into_iter().chain(local).collect();
    let parents: HashMap<CommentId, Option<CommentId>> =
        all.iter().map(|c| (c.id, c.parent_id)).collect();

    let root_of = |mut id: CommentId| -> Option<CommentId> {
        // Bounded walk; a parent cycle yields no root.
        for _ in 0..=parents.len() {
            match parents.get(&id)? {
                None => return Some(id),
                Some(parent) => id = *parent,
            }
        }
        None
    };

    let mut thread = Thread::default();
    let mut index: HashMap<CommentId, usize> = HashMap::new();
    let mut replies = Vec::new();

    for comment in all {
        match comment.parent_id {
            None => {
                index.insert(comment.id, thread.nodes.len());
                thread.nodes.push(ThreadNode::new(comment));
            }
            Some(_) => replies.push(comment),
        }
    }

    for reply in replies {
        let root = reply.parent_id.and_then(&root_of);
        match root.and_then(|r| index.get(&r)) {
            Some(&i) => thread.nodes[i].replies.push(reply),
            None => debug!(comment_id = %reply.id, parent_id = ?reply.parent_id, "Skipping orphaned reply"),
        }
    }

    thread
}

/// Stable positive comment id for a remote review.
pub fn remote_comment_id(review_id: &str) -> CommentId {
    let digest = Sha256::digest(review_id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let id = (u64::from_be_bytes(bytes) >> 1) as i64;
    CommentId::new(id.max(1))
}

/// Convert a remote review into a read-only top-level comment.
///
/// Reviews without a timestamp are dated at the Unix epoch.
pub fn review_to_comment(review: &Review) -> CommentEntry {
    CommentEntry {
        id: remote_comment_id(&review.id),
        author: review.author_name().unwrap_or(DEFAULT_AUTHOR).to_string(),
        content: review.content.clone(),
        created_at: review.created_at.unwrap_or_else(DateTime::<Utc>::default),
        parent_id: None,
        origin: CommentOrigin::Remote,
    }
}

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, comment: &CommentEntry) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&CommentEntry) -> bool,
{
    fn confirm(&self, comment: &CommentEntry) -> bool {
        self(comment)
    }
}

/// The comment section of one title.
#[derive(Debug)]
pub struct CommentThread {
    store: LocalStore,
    partition: Partition,
    thread: Thread,
}

impl CommentThread {
    /// Load local comments and build the thread with `reviews` first.
    pub fn render(store: LocalStore, partition: Partition, reviews: &[Review]) -> Result<Self> {
        let remote = reviews.iter().map(review_to_comment).collect();
        let local = store.list_comments(&partition)?;
        let thread = build_thread(remote, local);
        debug!(%partition, comments = thread.len(), "Rendered comment thread");
        Ok(Self {
            store,
            partition,
            thread,
        })
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// Post a new top-level comment; it is shown first.
    pub fn submit_comment(&mut self, content: &str) -> Result<CommentEntry> {
        let comment = self.store.add_comment(&self.partition, content, None)?;
        self.thread.nodes.insert(0, ThreadNode::new(comment.clone()));
        Ok(comment)
    }

    /// Reply to a shown top-level comment; the reply is appended to its node.
    pub fn submit_reply(&mut self, parent: CommentId, content: &str) -> Result<CommentEntry> {
        if self.thread.node_mut(parent).is_none() {
            return Err(match self.thread.find(parent) {
                Some(_) => Error::validation(format!("comment {parent} is a reply")),
                None => Error::not_found(format!("comment {parent}")),
            });
        }

        let reply = self
            .store
            .add_comment(&self.partition, content, Some(parent))?;
        if let Some(node) = self.thread.node_mut(parent) {
            node.replies.push(reply.clone());
        }
        Ok(reply)
    }

    /// Delete a local comment and its replies once `confirm` agrees.
    ///
    /// Returns `false` when the comment is not shown or the user declined.
    /// Remote comments cannot be deleted.
    pub fn delete(&mut self, id: CommentId, confirm: &impl Confirm) -> Result<bool> {
        let Some(comment) = self.thread.find(id) else {
            return Ok(false);
        };
        if !comment.is_local() {
            return Err(Error::validation(format!("comment {id} is read-only")));
        }
        if !confirm.confirm(comment) {
            debug!(partition = %self.partition, comment_id = %id, "Deletion declined");
            return Ok(false);
        }

        let mut removed = self.store.delete_comment(&self.partition, id)?;
        if !removed.contains(&id) {
            removed.push(id);
        }
        self.thread.remove(&removed);
        info!(partition = %self.partition, comment_id = %id, removed = removed.len(), "Comment deleted");
        Ok(true)
    }
}
