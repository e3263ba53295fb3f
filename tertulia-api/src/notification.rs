use crate::{CommentId, Time, Uuid, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn stub() -> NotificationId {
        NotificationId(STUB_UUID)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Reply,
    Like,
    // TODO: emit once comments get @-mention parsing
    Mention,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub from_user: String,
    pub to_user: String,

    /// For replies, the reply itself; for likes, the liked comment
    pub comment_id: CommentId,

    pub date: Time,
    pub read: bool,

    /// Human-readable summary
    pub content: String,
}

impl Notification {
    pub fn reply(
        id: NotificationId,
        from_user: String,
        to_user: String,
        reply_id: CommentId,
        date: Time,
    ) -> Notification {
        Notification {
            id,
            notification_type: NotificationType::Reply,
            content: format!("{from_user} replied to your comment"),
            from_user,
            to_user,
            comment_id: reply_id,
            date,
            read: false,
        }
    }

    pub fn like(
        id: NotificationId,
        from_user: String,
        to_user: String,
        liked_id: CommentId,
        date: Time,
    ) -> Notification {
        Notification {
            id,
            notification_type: NotificationType::Like,
            content: format!("{from_user} liked your comment"),
            from_user,
            to_user,
            comment_id: liked_id,
            date,
            read: false,
        }
    }
}
