//! Publish/subscribe value streams.

use std::fmt;

/// Handle returned by [`Signal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A value stream with optional replay of the latest value.
///
/// Replaying signals hand their most recent value to late subscribers, so a
/// derived value is computed once and shared. Broadcast signals only deliver
/// values emitted after subscription.
pub struct Signal<T> {
    replay: bool,
    latest: Option<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Signal that replays its latest value to new subscribers.
    pub fn replaying() -> Self {
        Self {
            replay: true,
            latest: None,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Signal without replay.
    pub fn broadcast() -> Self {
        Self {
            replay: false,
            ..Self::replaying()
        }
    }

    /// Register `listener`. A replaying signal calls it with the latest value first.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        if let Some(latest) = &self.latest {
            listener(latest);
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sid, _)| *sid != id);
    }

    /// Send `value` to every listener.
    pub fn emit(&mut self, value: T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&value);
        }
        if self.replay {
            self.latest = Some(value);
        }
    }

    /// Latest value, for replaying signals.
    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("replay", &self.replay)
            .field("latest", &self.latest)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
