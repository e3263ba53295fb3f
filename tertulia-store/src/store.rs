use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::{
    api::{
        Action, ActivityKind, Comment, CommentId, Error, NewComment, Notification,
        NotificationId, Order, Query, Search, SourceType, Time, UserProfile,
    },
    CommentRepository, Liked, NotificationService, OrderExt, QueryExt, StoreConfig, StoreDump,
    Subscription, SubscriptionBus, UserProfileRegistry,
};

struct State {
    comments: CommentRepository,
    profiles: UserProfileRegistry,
    notifications: NotificationService,
    current_user: Option<String>,
}

impl State {
    fn add_comment(
        &mut self,
        id: Option<CommentId>,
        c: NewComment,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, Error> {
        let now = Utc::now();
        let id = id.unwrap_or_else(|| self.comments.fresh_id());
        let (comment, parent_author) = self.comments.insert(id, c, parent_id, now)?;
        let kind = match parent_id {
            None => ActivityKind::Comment,
            Some(_) => ActivityKind::Reply,
        };
        self.profiles
            .record_activity(&comment.author, kind, &comment.content, now);
        if let Some(parent_author) = parent_author {
            self.notifications
                .notify_reply(&comment.author, &parent_author, comment.id, now);
        }
        tracing::debug!(id = ?comment.id, ?parent_id, author = %comment.author, "added comment");
        Ok(comment)
    }

    fn like_comment(&mut self, id: CommentId, user: &str) -> Result<bool, Error> {
        match self.comments.like(&id, user)? {
            Liked::Already => {
                tracing::debug!(?id, user, "comment already liked by this user");
                Ok(false)
            }
            Liked::New { author } => {
                let now = Utc::now();
                self.profiles.record_like_received(&author, now);
                self.notifications.notify_like(user, &author, id, now);
                tracing::debug!(?id, user, "liked comment");
                Ok(true)
            }
        }
    }

    fn query(&self, q: &Query, order: Order) -> Vec<Comment> {
        let mut res = self
            .comments
            .all()
            .filter(|c| !c.deleted && q.matches(c))
            .cloned()
            .collect::<Vec<_>>();
        order.sort(&mut res);
        res
    }
}

/// The comment store: threads, profiles and notifications behind a single
/// reader-writer lock
///
/// Every mutation holds the write lock for its whole duration, side effects
/// on profiles and notifications included, so readers only ever see fully
/// applied operations. Subscribers are signalled after the lock is released,
/// on the thread that performed the mutation.
pub struct Store {
    state: RwLock<State>,
    bus: SubscriptionBus,
    config: StoreConfig,
}

impl Default for Store {
    fn default() -> Store {
        Store::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("num_comments", &self.state.read().comments.len())
            .field("bus", &self.bus)
            .field("config", &self.config)
            .finish()
    }
}

impl Store {
    pub fn new() -> Store {
        Store::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Store {
        Store {
            state: RwLock::new(State {
                comments: CommentRepository::with_max_depth(config.max_reply_depth),
                profiles: UserProfileRegistry::new(
                    config.max_recent_activity,
                    config.activity_excerpt_len,
                ),
                notifications: NotificationService::new(),
                current_user: None,
            }),
            bus: SubscriptionBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Runs `f` under the write lock, then signals subscribers if it succeeded
    /// and `changed` agrees that something changed
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, Error>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, Error> {
        let res = {
            let mut state = self.state.write();
            f(&mut state)
        };
        match &res {
            Ok(v) if changed(v) => self.bus.notify(),
            Ok(_) => (),
            Err(err) => tracing::info!(%err, "rejected store operation"),
        }
        res
    }

    pub fn set_current_user(&self, user: &str) -> Result<(), Error> {
        crate::api::validate_non_empty("user", user)?;
        self.mutate(
            |s| {
                s.current_user = Some(String::from(user));
                s.profiles.register(user, Utc::now());
                Ok(())
            },
            |_| true,
        )
    }

    pub fn get_current_user(&self) -> Option<String> {
        self.state.read().current_user.clone()
    }

    /// Adds a top-level comment, or a reply to `parent_id`
    pub fn add_comment(
        &self,
        c: NewComment,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, Error> {
        self.mutate(|s| s.add_comment(None, c, parent_id), |_| true)
    }

    pub(crate) fn add_comment_with_id(
        &self,
        id: Option<CommentId>,
        c: NewComment,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, Error> {
        self.mutate(|s| s.add_comment(id, c, parent_id), |_| true)
    }

    /// Looks a comment up anywhere in the threads, deleted or not
    pub fn find_comment_by_id(&self, id: CommentId) -> Option<Comment> {
        self.state.read().comments.find(&id).cloned()
    }

    /// Returns `Ok(false)` if `user` had already liked this comment
    pub fn like_comment(&self, id: CommentId, user: &str) -> Result<bool, Error> {
        self.mutate(|s| s.like_comment(id, user), |newly_liked| *newly_liked)
    }

    pub fn edit_comment(&self, id: CommentId, content: String, user: &str) -> Result<(), Error> {
        self.mutate(
            |s| {
                s.comments.edit(&id, content, user, Utc::now())?;
                tracing::debug!(?id, user, "edited comment");
                Ok(())
            },
            |_| true,
        )
    }

    pub fn delete_comment(&self, id: CommentId, user: &str) -> Result<(), Error> {
        let placeholder = &self.config.deleted_placeholder;
        self.mutate(
            |s| {
                s.comments.delete(&id, user, placeholder)?;
                tracing::debug!(?id, user, "deleted comment");
                Ok(())
            },
            |_| true,
        )
    }

    pub fn report_comment(&self, id: CommentId, reason: String, user: &str) -> Result<(), Error> {
        self.mutate(
            |s| {
                s.comments.report(&id, reason, user)?;
                tracing::debug!(?id, user, "reported comment");
                Ok(())
            },
            |_| true,
        )
    }

    /// Non-deleted top-level comments, newest first
    pub fn get_comments(&self) -> Vec<Comment> {
        self.state.read().comments.top_level().cloned().collect()
    }

    pub fn get_comments_by_source(&self, source_type: SourceType, id: i64) -> Vec<Comment> {
        self.state
            .read()
            .comments
            .by_source(source_type, id)
            .cloned()
            .collect()
    }

    /// Non-deleted comments anywhere in the threads matching `q`
    pub fn query(&self, q: &Query, order: Order) -> Vec<Comment> {
        self.state.read().query(q, order)
    }

    /// Like `query`, with the query written in the search language
    pub fn search(&self, search: &str, order: Order) -> Result<Vec<Comment>, Error> {
        let s = Search::parse(search, order)?;
        s.validate()?;
        Ok(self.query(&s.filter, s.order))
    }

    /// Case-insensitive substring search on content and author
    pub fn search_comments(&self, text: &str) -> Vec<Comment> {
        self.query(&Query::Phrase(String::from(text)), Order::Tree)
    }

    pub fn filter_comments_by_user(&self, user: &str) -> Vec<Comment> {
        self.query(&Query::Author(String::from(user)), Order::Tree)
    }

    /// Both bounds are inclusive
    pub fn filter_comments_by_date_range(&self, start: Time, end: Time) -> Vec<Comment> {
        self.query(&Query::DateBetween { start, end }, Order::Tree)
    }

    /// Number of non-deleted comments in the thread rooted at `id`
    pub fn thread_size(&self, id: CommentId) -> Option<usize> {
        self.state.read().comments.thread_size(&id)
    }

    pub fn get_user_profile(&self, user: &str) -> Option<UserProfile> {
        self.state.read().profiles.get(user).cloned()
    }

    /// Notifications addressed to `user`, newest first
    pub fn get_notifications(&self, user: &str) -> Vec<Notification> {
        self.state
            .read()
            .notifications
            .for_user(user)
            .cloned()
            .collect()
    }

    pub fn get_unread_notification_count(&self, user: &str) -> usize {
        self.state.read().notifications.unread_count(user)
    }

    pub fn mark_notification_as_read(&self, id: NotificationId) -> Result<(), Error> {
        self.mutate(|s| s.notifications.mark_read(&id), |_| true)
    }

    /// Returns the number of notifications that were unread
    pub fn mark_all_notifications_as_read(&self, user: &str) -> usize {
        let changed = self.state.write().notifications.mark_all_read(user);
        if changed > 0 {
            self.bus.notify();
        }
        changed
    }

    /// Calls `callback` after every successful mutation, until the returned
    /// handle is dropped
    ///
    /// The callback runs on the mutating thread, after the store is unlocked.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    /// Channel flavor of `subscribe`, see `SubscriptionBus::feed`
    pub fn feed(&self) -> watch::Receiver<u64> {
        self.bus.feed()
    }

    pub fn apply(&self, a: Action) -> Result<(), Error> {
        a.validate()?;
        match a {
            Action::SetCurrentUser { user } => self.set_current_user(&user),
            Action::AddComment {
                id,
                comment,
                parent_id,
            } => self.add_comment_with_id(id, comment, parent_id).map(|_| ()),
            Action::LikeComment { id, user } => self.like_comment(id, &user).map(|_| ()),
            Action::EditComment { id, content, user } => self.edit_comment(id, content, &user),
            Action::DeleteComment { id, user } => self.delete_comment(id, &user),
            Action::ReportComment { id, reason, user } => self.report_comment(id, reason, &user),
            Action::MarkNotificationAsRead { id } => self.mark_notification_as_read(id),
            Action::MarkAllNotificationsAsRead { user } => {
                self.mark_all_notifications_as_read(&user);
                Ok(())
            }
        }
    }

    pub fn dump(&self) -> StoreDump {
        let state = self.state.read();
        StoreDump {
            current_user: state.current_user.clone(),
            comments: state.comments.roots().to_vec(),
            profiles: state.profiles.all().cloned().collect(),
            notifications: state.notifications.all().cloned().collect(),
        }
    }
}
