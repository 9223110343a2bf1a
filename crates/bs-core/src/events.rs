//! Typed change notification.
//!
//! Listeners are called synchronously in registration order, and every
//! emission carries a process-wide increasing [`EventId`] so observers can
//! tell two notifications apart.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(u64);

impl EventId {
    /// Allocate the next event id.
    pub fn next() -> Self {
        Self(NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Handle returned by [`TypedEvent::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener<T> = Box<dyn FnMut(EventId, &T) + Send>;

pub struct TypedEvent<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener: usize,
}

impl<T> Default for TypedEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypedEvent<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn on(&mut self, listener: impl FnMut(EventId, &T) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event_id: EventId, value: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event_id, value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> std::fmt::Debug for TypedEvent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedEvent")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn event_ids_increase() {
        let a = EventId::next();
        let b = EventId::next();
        assert!(b > a);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut event = TypedEvent::<u32>::new();

        let first = Arc::clone(&seen);
        event.on(move |_, v| first.lock().unwrap().push(("first", *v)));
        let second = Arc::clone(&seen);
        event.on(move |_, v| second.lock().unwrap().push(("second", *v)));

        event.emit(EventId::next(), &7);
        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn off_removes_listener() {
        let count = Arc::new(Mutex::new(0));
        let mut event = TypedEvent::<()>::new();
        let c = Arc::clone(&count);
        let id = event.on(move |_, _| *c.lock().unwrap() += 1);

        event.emit(EventId::next(), &());
        assert!(event.off(id));
        assert!(!event.off(id));
        event.emit(EventId::next(), &());

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(event.listener_count(), 0);
    }
}
