use crate::{CommentId, NewComment, NotificationId};

/// One state-changing call on the store, in a form that can be written to and
/// replayed from a script
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    SetCurrentUser {
        user: String,
    },
    AddComment {
        /// Pre-assigned id, so later actions of the same script can refer to
        /// this comment. A fresh one is drawn if absent.
        #[serde(default)]
        id: Option<CommentId>,
        comment: NewComment,
        #[serde(default)]
        parent_id: Option<CommentId>,
    },
    LikeComment {
        id: CommentId,
        user: String,
    },
    EditComment {
        id: CommentId,
        content: String,
        user: String,
    },
    DeleteComment {
        id: CommentId,
        user: String,
    },
    ReportComment {
        id: CommentId,
        reason: String,
        user: String,
    },
    MarkNotificationAsRead {
        id: NotificationId,
    },
    MarkAllNotificationsAsRead {
        user: String,
    },
}

impl Action {
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            Action::SetCurrentUser { user } => crate::validate_non_empty("user", user),
            Action::AddComment { comment, .. } => comment.validate(),
            Action::LikeComment { user, .. } => crate::validate_non_empty("user", user),
            Action::EditComment { content, user, .. } => {
                crate::validate_non_empty("content", content)?;
                crate::validate_non_empty("user", user)
            }
            Action::DeleteComment { user, .. } => crate::validate_non_empty("user", user),
            Action::ReportComment { reason, user, .. } => {
                crate::validate_string(reason)?;
                crate::validate_non_empty("user", user)
            }
            Action::MarkNotificationAsRead { .. } => Ok(()),
            Action::MarkAllNotificationsAsRead { user } => crate::validate_string(user),
        }
    }
}
