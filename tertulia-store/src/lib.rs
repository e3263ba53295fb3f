mod bus;
pub use bus::{Subscription, SubscriptionBus};

mod config;
pub use config::StoreConfig;

mod db;
pub use db::StoreDump;

mod notification;
pub use notification::NotificationService;

mod order;
pub use order::OrderExt;

mod profile;
pub use profile::UserProfileRegistry;

mod query;
pub use query::QueryExt;

mod repository;
pub use repository::{CommentRepository, Liked};

mod store;
pub use store::Store;

#[cfg(test)]
mod fuzz;

pub mod api {
    pub use tertulia_api::*;
}
