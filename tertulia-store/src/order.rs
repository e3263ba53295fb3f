use std::cmp::Reverse;

use crate::api::{Comment, Order};

pub trait OrderExt {
    fn sort(&self, comments: &mut [Comment]);
}

impl OrderExt for Order {
    /// Sorts are stable, so ties keep their thread order
    fn sort(&self, comments: &mut [Comment]) {
        match self {
            Order::Tree => (),
            Order::Newest => comments.sort_by_key(|c| Reverse(c.date)),
            Order::Oldest => comments.sort_by_key(|c| c.date),
            Order::MostLiked => comments.sort_by_key(|c| (Reverse(c.likes), Reverse(c.date))),
        }
    }
}
