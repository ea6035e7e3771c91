//! Typed observer lists used to wire components together.
//!
//! A [`Signal`] holds zero or more listeners. `emit` calls each of them
//! synchronously on the current thread, in connection order. Listeners may
//! connect or disconnect other listeners while being called; such changes
//! take effect from the next emission.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::connect`], used to disconnect later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

pub struct Signal<T> {
    listeners: RefCell<Vec<(Connection, Listener<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn connect(&self, listener: impl Fn(&T) + 'static) -> Connection {
        let id = Connection(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` if the connection was already gone.
    pub fn disconnect(&self, connection: Connection) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != connection);
        listeners.len() != before
    }

    pub fn emit(&self, value: &T) {
        // Snapshot so listeners can touch this signal without a double borrow.
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Re-emit every value of `self` on `target`.
    pub fn forward_to(&self, target: Rc<Signal<T>>) -> Connection {
        self.connect(move |value| target.emit(value))
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_to_all_listeners_in_order() {
        let signal = Signal::<i32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            signal.connect(move |v| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec!["a7", "b7"]);
    }

    #[test]
    fn emit_without_listeners_is_a_no_op() {
        let signal = Signal::<String>::new();
        signal.emit(&"nobody".to_string());
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn disconnect_stops_delivery() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let conn = signal.connect(move |_| h.set(h.get() + 1));
        signal.emit(&());
        assert!(signal.disconnect(conn));
        assert!(!signal.disconnect(conn));
        signal.emit(&());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn listener_may_connect_during_emit() {
        let signal = Rc::new(Signal::<u8>::new());
        let inner = signal.clone();
        signal.connect(move |_| {
            inner.connect(|_| {});
        });
        signal.emit(&1);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn forward_to_reemits() {
        let source = Signal::<bool>::new();
        let target = Rc::new(Signal::<bool>::new());
        let got = Rc::new(Cell::new(false));
        let g = got.clone();
        target.connect(move |v| g.set(*v));
        source.forward_to(target.clone());
        source.emit(&true);
        assert!(got.get());
    }
}
