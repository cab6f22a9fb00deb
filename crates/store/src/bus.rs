use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Token returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Publish/subscribe channel signalled after every successful store mutation.
///
/// Delivery is synchronous on the mutating caller's thread and carries no
/// payload; subscribers are expected to re-fetch via `read`/`list_tree`.
/// Handlers registered before a mutation hear it, handlers removed before a
/// mutation do not.
pub struct ChangeBus {
    handlers: Vec<(Subscription, Box<dyn Fn()>)>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registers a zero-argument handler and returns its unsubscribe token.
    pub fn subscribe(&mut self, handler: impl Fn() + 'static) -> Subscription {
        let token = Subscription(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.handlers.push((token, Box::new(handler)));
        token
    }

    /// Removes the handler behind `token`. Unknown tokens are a no-op.
    pub fn unsubscribe(&mut self, token: Subscription) {
        self.handlers.retain(|(existing, _)| *existing != token);
    }

    /// Invokes every registered handler once, in subscription order.
    pub fn notify_all(&self) {
        for (_, handler) in &self.handlers {
            handler();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
