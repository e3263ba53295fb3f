use std::collections::HashMap;

use crate::api::{
    Comment, CommentId, Error, NewComment, SourceType, Time, Uuid, MAX_REPLY_DEPTH,
};

/// Result of a like attempt
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Liked {
    /// The like was recorded; carries the author of the liked comment
    New { author: String },

    /// This user had already liked the comment, nothing changed
    Already,
}

/// The forest of comment threads
///
/// Nodes are never physically removed: deletion only masks them. This lets
/// `depths` double as the set of every id ever issued.
#[derive(Clone, Debug)]
pub struct CommentRepository {
    /// Top-level comments, newest first
    roots: Vec<Comment>,

    /// Depth of every comment, top-level ones being at 0
    depths: HashMap<CommentId, usize>,

    max_depth: usize,
}

impl Default for CommentRepository {
    fn default() -> CommentRepository {
        CommentRepository::new()
    }
}

impl CommentRepository {
    pub fn new() -> CommentRepository {
        CommentRepository::with_max_depth(MAX_REPLY_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> CommentRepository {
        CommentRepository {
            roots: Vec::new(),
            depths: HashMap::new(),
            max_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn fresh_id(&self) -> CommentId {
        loop {
            let id = CommentId(Uuid::new_v4());
            if !self.depths.contains_key(&id) {
                return id;
            }
            tracing::warn!(?id, "drew an already-used comment id, drawing again");
        }
    }

    /// Inserts a new comment, at the front of the top-level list or at the end
    /// of its parent's replies
    ///
    /// Returns the new comment along with the author of its parent, if any.
    pub fn insert(
        &mut self,
        id: CommentId,
        c: NewComment,
        parent_id: Option<CommentId>,
        date: Time,
    ) -> Result<(Comment, Option<String>), Error> {
        c.validate()?;
        if self.depths.contains_key(&id) {
            return Err(Error::IdAlreadyUsed(id));
        }
        let depth = match parent_id {
            None => 0,
            Some(parent_id) => {
                let parent_depth = self
                    .depths
                    .get(&parent_id)
                    .ok_or(Error::CommentNotFound(parent_id))?;
                if *parent_depth >= self.max_depth {
                    return Err(Error::ThreadTooDeep(parent_id));
                }
                parent_depth + 1
            }
        };
        let res = match parent_id {
            None => {
                let comment = Comment::new(id, c, None, date);
                self.roots.insert(0, comment.clone());
                (comment, None)
            }
            Some(parent_id) => {
                let parent = Comment::find_in_mut(&mut self.roots, &parent_id)
                    .ok_or(Error::CommentNotFound(parent_id))?;
                let mut comment = Comment::new(id, c, Some(parent_id), date);
                comment.source = parent.source.clone();
                parent.children.push(comment.clone());
                (comment, Some(parent.author.clone()))
            }
        };
        self.depths.insert(id, depth);
        Ok(res)
    }

    /// Depth-first lookup across every thread, deleted comments included
    pub fn find(&self, id: &CommentId) -> Option<&Comment> {
        if !self.depths.contains_key(id) {
            return None;
        }
        Comment::find_in(&self.roots, id)
    }

    fn find_mut(&mut self, id: &CommentId) -> Result<&mut Comment, Error> {
        if !self.depths.contains_key(id) {
            return Err(Error::CommentNotFound(*id));
        }
        Comment::find_in_mut(&mut self.roots, id).ok_or(Error::CommentNotFound(*id))
    }

    pub fn like(&mut self, id: &CommentId, user: &str) -> Result<Liked, Error> {
        crate::api::validate_non_empty("user", user)?;
        let c = self.find_mut(id)?;
        if !c.liked_by.insert(String::from(user)) {
            return Ok(Liked::Already);
        }
        c.likes += 1;
        Ok(Liked::New {
            author: c.author.clone(),
        })
    }

    pub fn edit(
        &mut self,
        id: &CommentId,
        content: String,
        user: &str,
        date: Time,
    ) -> Result<(), Error> {
        crate::api::validate_non_empty("content", &content)?;
        let c = self.find_mut(id)?;
        if c.deleted || c.author != user {
            return Err(Error::PermissionDenied);
        }
        c.content = content;
        c.edited = true;
        c.edited_at = Some(date);
        Ok(())
    }

    /// Masks the comment in place, leaving its replies untouched
    pub fn delete(&mut self, id: &CommentId, user: &str, placeholder: &str) -> Result<(), Error> {
        let c = self.find_mut(id)?;
        if c.author != user {
            return Err(Error::PermissionDenied);
        }
        c.deleted = true;
        c.content = String::from(placeholder);
        Ok(())
    }

    pub fn report(&mut self, id: &CommentId, reason: String, user: &str) -> Result<(), Error> {
        crate::api::validate_string(&reason)?;
        let c = self.find_mut(id)?;
        if c.author == user {
            return Err(Error::PermissionDenied);
        }
        c.reported = true;
        c.report_reason = Some(reason);
        Ok(())
    }

    /// Top-level comments, newest first, deleted ones skipped
    pub fn top_level(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().filter(|c| !c.deleted)
    }

    pub fn by_source(&self, source_type: SourceType, id: i64) -> impl Iterator<Item = &Comment> {
        self.top_level()
            .filter(move |c| c.source.source_type == source_type && c.source.id == id)
    }

    /// Every comment of every thread, deleted ones included, threads
    /// newest-first and each walked depth-first
    pub fn all(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().flat_map(|c| c.walk())
    }

    /// Number of non-deleted comments in the thread rooted at `id`
    pub fn thread_size(&self, id: &CommentId) -> Option<usize> {
        self.find(id).map(|c| c.walk().filter(|c| !c.deleted).count())
    }

    pub fn roots(&self) -> &[Comment] {
        &self.roots
    }
}
