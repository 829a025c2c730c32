//! Change notifications.
//!
//! Subscribers are called synchronously after the state change has been
//! written. Nothing in the storefront depends on them.

use levelup_commerce::ids::{OrderId, UserId};

/// Something in the store changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Cart lines changed; carries the new badge count.
    CartChanged { item_count: i64 },
    /// Someone signed in or out.
    SessionChanged { user_id: Option<UserId> },
    /// A user was added, edited or removed.
    UsersChanged,
    /// An order was placed.
    OrderPlaced { order_id: OrderId },
    /// A review was added.
    ReviewAdded { code: String },
}

/// A subscriber callback.
pub type Subscriber = Box<dyn Fn(&StoreEvent)>;

/// Registered subscribers.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Vec<Subscriber>,
}

impl Subscribers {
    /// Register a callback.
    pub fn add(&mut self, callback: Subscriber) {
        self.callbacks.push(callback);
    }

    /// Deliver an event to every callback in registration order.
    pub fn emit(&self, event: &StoreEvent) {
        for callback in &self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            subscribers.add(Box::new(move |event| {
                seen.borrow_mut().push((tag, event.clone()));
            }));
        }
        subscribers.emit(&StoreEvent::UsersChanged);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "a");
        assert_eq!(seen[1].1, StoreEvent::UsersChanged);
    }
}
