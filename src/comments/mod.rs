//! Comment sections: thread construction, mutation and display formatting.

pub mod format;
pub mod thread;

pub use format::{format_date, format_rating, format_release_date, format_runtime, format_timestamp};
pub use thread::{
    build_thread, review_to_comment, CommentThread, Confirm, Thread, ThreadNode,
    EMPTY_THREAD_MESSAGE,
};
