use crate::{CommentId, NotificationId};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment not found {0:?}")]
    CommentNotFound(CommentId),

    #[error("Notification not found {0:?}")]
    NotificationNotFound(NotificationId),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment id already used {0:?}")]
    IdAlreadyUsed(CommentId),

    #[error("Thread under {0:?} is already too deep to reply to")]
    ThreadTooDeep(CommentId),

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Invalid search {0:?}")]
    InvalidSearch(String),
}

/// Coarse classification of an `Error`, for callers that only care about
/// which kind of recoverable failure happened
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Conflict,
    Validation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CommentNotFound(_) => ErrorKind::NotFound,
            Error::NotificationNotFound(_) => ErrorKind::NotFound,
            Error::PermissionDenied => ErrorKind::Unauthorized,
            Error::IdAlreadyUsed(_) => ErrorKind::Conflict,
            Error::ThreadTooDeep(_) => ErrorKind::Validation,
            Error::EmptyField(_) => ErrorKind::Validation,
            Error::NullByteInString(_) => ErrorKind::Validation,
            Error::InvalidSearch(_) => ErrorKind::Validation,
        }
    }
}
