use crate::api::{ACTIVITY_EXCERPT_LEN, DELETED_PLACEHOLDER, MAX_RECENT_ACTIVITY, MAX_REPLY_DEPTH};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    /// Number of entries kept in each profile's recent activity log
    pub max_recent_activity: usize,

    /// Length, in chars, of the content excerpt kept per activity entry
    pub activity_excerpt_len: usize,

    /// Content a comment gets once deleted by its author
    pub deleted_placeholder: String,

    /// Replies to a comment this deep below its thread's top are rejected
    pub max_reply_depth: usize,
}

impl Default for StoreConfig {
    fn default() -> StoreConfig {
        StoreConfig {
            max_recent_activity: MAX_RECENT_ACTIVITY,
            activity_excerpt_len: ACTIVITY_EXCERPT_LEN,
            deleted_placeholder: String::from(DELETED_PLACEHOLDER),
            max_reply_depth: MAX_REPLY_DEPTH,
        }
    }
}
