use std::collections::VecDeque;

use crate::api::{CommentId, Error, Notification, NotificationId, Time, Uuid};

/// Append-only log of notifications, newest first
#[derive(Clone, Debug, Default)]
pub struct NotificationService {
    notifications: VecDeque<Notification>,
}

impl NotificationService {
    pub fn new() -> NotificationService {
        NotificationService::default()
    }

    fn push(&mut self, n: Notification) -> NotificationId {
        tracing::debug!(
            id = ?n.id,
            from = %n.from_user,
            to = %n.to_user,
            kind = ?n.notification_type,
            "new notification"
        );
        let id = n.id;
        self.notifications.push_front(n);
        id
    }

    /// Tells `to` that `from` replied with comment `reply_id`
    ///
    /// Nothing happens when users reply to themselves.
    pub fn notify_reply(
        &mut self,
        from: &str,
        to: &str,
        reply_id: CommentId,
        now: Time,
    ) -> Option<NotificationId> {
        if from == to {
            return None;
        }
        Some(self.push(Notification::reply(
            NotificationId(Uuid::new_v4()),
            String::from(from),
            String::from(to),
            reply_id,
            now,
        )))
    }

    /// Tells `to` that `from` liked their comment `liked_id`
    ///
    /// Nothing happens when users like their own comments.
    pub fn notify_like(
        &mut self,
        from: &str,
        to: &str,
        liked_id: CommentId,
        now: Time,
    ) -> Option<NotificationId> {
        if from == to {
            return None;
        }
        Some(self.push(Notification::like(
            NotificationId(Uuid::new_v4()),
            String::from(from),
            String::from(to),
            liked_id,
            now,
        )))
    }

    pub fn for_user<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a Notification> {
        self.notifications.iter().filter(move |n| n.to_user == user)
    }

    pub fn unread_count(&self, user: &str) -> usize {
        self.for_user(user).filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: &NotificationId) -> Result<(), Error> {
        let n = self
            .notifications
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or(Error::NotificationNotFound(*id))?;
        n.read = true;
        Ok(())
    }

    /// Returns the number of notifications that were not read yet
    pub fn mark_all_read(&mut self, user: &str) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut() {
            if n.to_user == user && !n.read {
                n.read = true;
                changed += 1;
            }
        }
        changed
    }

    pub fn all(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }
}
