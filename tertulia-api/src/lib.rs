use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

mod action;
pub use action::Action;

mod comment;
pub use comment::{
    Comment, CommentId, NewComment, Source, SourceType, DELETED_PLACEHOLDER, MAX_REPLY_DEPTH,
};

mod error;
pub use error::{Error, ErrorKind};

mod notification;
pub use notification::{Notification, NotificationId, NotificationType};

mod query;
pub use query::Query;

mod search;
pub use search::{Order, Search};

mod user;
pub use user::{Activity, ActivityKind, UserProfile, ACTIVITY_EXCERPT_LEN, MAX_RECENT_ACTIVITY};

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

// The `validate` functions throughout tertulia-api check user-supplied data
// before it reaches the store. Anything that passes them can be inserted
// without the store having to second-guess it.

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

/// Like `validate_string`, but also refuses strings that are empty once trimmed
pub fn validate_non_empty(field: &'static str, s: &str) -> Result<(), Error> {
    if s.trim().is_empty() {
        return Err(Error::EmptyField(field));
    }
    validate_string(s)
}

/// Returns the first `max_chars` characters of `s`, never splitting a code point
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => String::from(&s[..idx]),
        None => String::from(s),
    }
}
