use crate::Time;

/// Number of entries kept in `UserProfile::recent_activity`
pub const MAX_RECENT_ACTIVITY: usize = 20;

/// Length, in chars, of the content excerpt stored in an `Activity`
pub const ACTIVITY_EXCERPT_LEN: usize = 100;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Comment,
    Reply,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub date: Time,
    pub content: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UserProfile {
    pub username: String,

    /// Comments and replies ever authored, deleted ones included
    pub comments_count: u64,

    /// Likes ever received
    pub likes_received: u64,

    pub joined_at: Time,

    /// Most recent first
    pub recent_activity: Vec<Activity>,
}

impl UserProfile {
    pub fn new(username: String, joined_at: Time) -> UserProfile {
        UserProfile {
            username,
            comments_count: 0,
            likes_received: 0,
            joined_at,
            recent_activity: Vec::new(),
        }
    }
}
