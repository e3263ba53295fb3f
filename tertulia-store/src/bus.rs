use std::{
    collections::BTreeMap,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;
use tokio::sync::watch;

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback>,
}

struct Inner {
    subscribers: Mutex<Subscribers>,

    /// Number of signals raised so far
    generation: watch::Sender<u64>,
}

/// Coarse "something changed" signal, raised once after every successful
/// mutation of the store
///
/// There is no payload: subscribers are expected to re-query the store.
#[derive(Clone)]
pub struct SubscriptionBus(Arc<Inner>);

impl Default for SubscriptionBus {
    fn default() -> SubscriptionBus {
        SubscriptionBus::new()
    }
}

impl SubscriptionBus {
    pub fn new() -> SubscriptionBus {
        let (generation, _) = watch::channel(0);
        SubscriptionBus(Arc::new(Inner {
            subscribers: Mutex::new(Subscribers::default()),
            generation,
        }))
    }

    /// Registers `callback` until the returned handle is dropped
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut subs = self.0.subscribers.lock();
        let id = subs.next_id;
        subs.next_id += 1;
        subs.callbacks.insert(id, Arc::new(callback));
        Subscription {
            id,
            bus: Arc::downgrade(&self.0),
        }
    }

    /// Channel flavor of `subscribe`, carrying the number of signals raised
    /// so far
    ///
    /// Signals coalesce: a receiver that is not polled only ever holds the
    /// latest count. Dropping the receiver is enough to unsubscribe.
    pub fn feed(&self) -> watch::Receiver<u64> {
        self.0.generation.subscribe()
    }

    pub fn num_subscribers(&self) -> usize {
        self.0.subscribers.lock().callbacks.len() + self.0.generation.receiver_count()
    }

    /// Runs every callback on the calling thread
    ///
    /// The subscriber list is not locked while callbacks run, so they may
    /// subscribe or drop subscriptions themselves.
    pub fn notify(&self) {
        self.0.generation.send_modify(|g| *g += 1);
        let callbacks = self
            .0
            .subscribers
            .lock()
            .callbacks
            .values()
            .cloned()
            .collect::<Vec<_>>();
        tracing::trace!(num_callbacks = callbacks.len(), "notifying subscribers");
        for cb in callbacks {
            cb();
        }
    }
}

impl std::fmt::Debug for SubscriptionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionBus")
            .field("num_subscribers", &self.num_subscribers())
            .field("generation", &*self.0.generation.borrow())
            .finish()
    }
}

/// Handle returned by `SubscriptionBus::subscribe`, unsubscribing on drop
#[must_use = "dropping a Subscription unsubscribes its callback"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<Inner>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.subscribers.lock().callbacks.remove(&self.id);
        }
    }
}
