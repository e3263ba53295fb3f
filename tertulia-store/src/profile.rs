use std::collections::BTreeMap;

use crate::api::{Activity, ActivityKind, Time, UserProfile};

#[derive(Clone, Debug)]
pub struct UserProfileRegistry {
    profiles: BTreeMap<String, UserProfile>,
    max_recent_activity: usize,
    excerpt_len: usize,
}

impl UserProfileRegistry {
    pub fn new(max_recent_activity: usize, excerpt_len: usize) -> UserProfileRegistry {
        UserProfileRegistry {
            profiles: BTreeMap::new(),
            max_recent_activity,
            excerpt_len,
        }
    }

    pub fn get(&self, user: &str) -> Option<&UserProfile> {
        self.profiles.get(user)
    }

    pub fn all(&self) -> impl Iterator<Item = &UserProfile> {
        self.profiles.values()
    }

    fn get_or_create(&mut self, user: &str, now: Time) -> &mut UserProfile {
        self.profiles
            .entry(String::from(user))
            .or_insert_with(|| {
                tracing::debug!(user, "creating user profile");
                UserProfile::new(String::from(user), now)
            })
    }

    /// Creates the profile if it does not exist yet, returning whether it did
    pub fn register(&mut self, user: &str, now: Time) -> bool {
        let existed = self.profiles.contains_key(user);
        self.get_or_create(user, now);
        !existed
    }

    pub fn record_activity(&mut self, user: &str, kind: ActivityKind, content: &str, now: Time) {
        let (max, excerpt_len) = (self.max_recent_activity, self.excerpt_len);
        let profile = self.get_or_create(user, now);
        profile.comments_count += 1;
        profile.recent_activity.insert(
            0,
            Activity {
                kind,
                date: now,
                content: crate::api::truncate_chars(content, excerpt_len),
            },
        );
        profile.recent_activity.truncate(max);
    }

    pub fn record_like_received(&mut self, user: &str, now: Time) {
        self.get_or_create(user, now).likes_received += 1;
    }
}
