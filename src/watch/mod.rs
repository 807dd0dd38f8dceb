//! Price watch — in-process fan-out of last-trade price updates.
//!
//! The transport that produces updates (WS feed, poller) lives outside this
//! crate; apps push into a [`PriceFeed`] and consumers hold a
//! [`PriceSubscription`]. A subscription is a scoped resource: it is
//! released exactly once, whether through an explicit [`close`] or by being
//! dropped on any exit path.
//!
//! [`close`]: PriceSubscription::close

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::mpsc;

/// A single price tick delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub value: Decimal,
    pub at: DateTime<Utc>,
}

struct FeedInner {
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<PriceUpdate>>>,
    next_id: AtomicU64,
}

/// Fan-out feed of price updates for one trading pair.
#[derive(Clone)]
pub struct PriceFeed {
    inner: Arc<FeedInner>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Push a new price to all live subscribers.
    pub fn publish(&self, value: Decimal) {
        let update = PriceUpdate {
            value,
            at: Utc::now(),
        };
        let mut subs = self.inner.subscribers.lock().expect("price feed lock poisoned");
        subs.retain(|_, tx| tx.send(update.clone()).is_ok());
    }

    /// Register a new subscriber and hand back its scoped handle.
    pub fn subscribe(&self) -> PriceSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner
            .subscribers
            .lock()
            .expect("price feed lock poisoned")
            .insert(id, tx);
        PriceSubscription {
            id,
            rx,
            feed: Arc::downgrade(&self.inner),
            released: false,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .expect("price feed lock poisoned")
            .len()
    }
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to a [`PriceFeed`].
///
/// Releasing is idempotent: `close()` followed by `Drop`, or `Drop` alone,
/// deregisters from the feed exactly once.
pub struct PriceSubscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<PriceUpdate>,
    feed: Weak<FeedInner>,
    released: bool,
}

impl PriceSubscription {
    /// Wait for the next price update. Returns `None` once the feed is gone
    /// and the backlog is drained.
    pub async fn next(&mut self) -> Option<PriceUpdate> {
        self.rx.recv().await
    }

    /// Non-blocking poll for an already-delivered update.
    pub fn try_next(&mut self) -> Option<PriceUpdate> {
        self.rx.try_recv().ok()
    }

    /// Explicitly release the subscription.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(inner) = self.feed.upgrade() {
            inner
                .subscribers
                .lock()
                .expect("price feed lock poisoned")
                .remove(&self.id);
        }
    }
}

impl Drop for PriceSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
