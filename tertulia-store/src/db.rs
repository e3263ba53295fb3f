use crate::api::{Comment, Notification, UserProfile};

/// Consistent snapshot of a whole store
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StoreDump {
    pub current_user: Option<String>,

    /// Top-level comments newest first, deleted ones included
    pub comments: Vec<Comment>,

    /// Sorted by username
    pub profiles: Vec<UserProfile>,

    /// Newest first
    pub notifications: Vec<Notification>,
}

impl StoreDump {
    pub fn num_comments(&self) -> usize {
        self.comments.iter().map(|c| c.walk().count()).sum()
    }
}
