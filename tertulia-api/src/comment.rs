use std::collections::BTreeSet;

use crate::{Error, Time, Uuid, STUB_UUID};

/// Content shown in place of a comment its author deleted
pub const DELETED_PLACEHOLDER: &str = "[Comment deleted by user]";

/// Deepest a reply may sit below its top-level comment
///
/// Threads are walked recursively, and a dump must stay within serde_json's
/// nesting limit when read back.
pub const MAX_REPLY_DEPTH: usize = 50;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Article,
    Reel,
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<SourceType, String> {
        match s {
            "article" => Ok(SourceType::Article),
            "reel" => Ok(SourceType::Reel),
            _ => Err(format!("unknown source type {s:?}, expected article or reel")),
        }
    }
}

/// The article or reel a thread is attached to
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Source {
    pub source_type: SourceType,
    pub id: i64,
    pub title: String,
}

impl Source {
    pub fn article(id: i64, title: impl Into<String>) -> Source {
        Source {
            source_type: SourceType::Article,
            id,
            title: title.into(),
        }
    }

    pub fn reel(id: i64, title: impl Into<String>) -> Source {
        Source {
            source_type: SourceType::Reel,
            id,
            title: title.into(),
        }
    }
}

/// Caller-supplied part of a comment, before the store assigns it an id
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub author: String,
    pub content: String,
    pub source: Source,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_non_empty("author", &self.author)?;
        crate::validate_non_empty("content", &self.content)?;
        crate::validate_string(&self.source.title)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub date: Time,

    /// Only meaningful on top-level comments, replies just copy their
    /// parent's
    pub source: Source,

    pub likes: u64,

    /// Users who already liked this comment
    pub liked_by: BTreeSet<String>,

    /// Comment this one replies to, if any
    pub parent_id: Option<CommentId>,

    /// Replies, in the order they were posted
    pub children: Vec<Comment>,

    pub edited: bool,
    pub edited_at: Option<Time>,
    pub reported: bool,
    pub report_reason: Option<String>,
    pub deleted: bool,
}

impl Comment {
    pub fn new(id: CommentId, c: NewComment, parent_id: Option<CommentId>, date: Time) -> Comment {
        Comment {
            id,
            author: c.author,
            content: c.content,
            date,
            source: c.source,
            likes: 0,
            liked_by: BTreeSet::new(),
            parent_id,
            children: Vec::new(),
            edited: false,
            edited_at: None,
            reported: false,
            report_reason: None,
            deleted: false,
        }
    }

    pub fn find_in<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
        for c in comments {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = Comment::find_in(&c.children, id) {
                return Some(res);
            }
        }
        None
    }

    pub fn find_in_mut<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
        for c in comments.iter_mut() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = Comment::find_in_mut(&mut c.children, id) {
                return Some(res);
            }
        }
        None
    }

    /// Iterates over this comment and all its replies, depth-first, parents
    /// before their children
    pub fn walk(&self) -> impl Iterator<Item = &Comment> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let c = stack.pop()?;
            stack.extend(c.children.iter().rev());
            Some(c)
        })
    }
}
