//! Typed in-page event channels.
//!
//! Replaces a global key-value store with one channel per piece of shared
//! page state. Subscribers get an explicit handle and can unsubscribe;
//! publication runs callbacks synchronously, in subscription order, inside
//! the `publish` call. Everything is process-lifetime: nothing survives a
//! page reload.

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Handle returned by [`Channel::subscribe`]; pass it back to
/// [`Channel::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

struct ChannelInner<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// A single-threaded broadcast channel. Interior mutability keeps the API
/// shareable across independent DOM listeners; safe because one page has one
/// thread and callbacks never interleave.
pub struct Channel<T> {
    inner: RefCell<ChannelInner<T>>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(ChannelInner {
                next_id: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(id, _)| *id != subscription.0);
    }

    /// Invoke every live subscriber with the value, in subscription order.
    pub fn publish(&self, value: &T) {
        // Snapshot so a callback that subscribes or unsubscribes does not
        // alias the borrow; the snapshot preserves ordering.
        let callbacks: Vec<Callback<T>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// The shared page state, one channel per concern.
#[derive(Default)]
pub struct AppState {
    pub current_section: Channel<String>,
    pub scroll_position: Channel<f64>,
    pub menu_open: Channel<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_runs_in_subscription_order() {
        let ch: Channel<i32> = Channel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let seen = Rc::clone(&seen);
            ch.subscribe(move |v: &i32| seen.borrow_mut().push(format!("{tag}{v}")));
        }

        ch.publish(&1);
        ch.publish(&2);
        assert_eq!(
            *seen.borrow(),
            vec!["a1", "b1", "c1", "a2", "b2", "c2"]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let ch: Channel<&'static str> = Channel::new();
        let count = Rc::new(RefCell::new(0));

        let sub = {
            let count = Rc::clone(&count);
            ch.subscribe(move |_| *count.borrow_mut() += 1)
        };

        ch.publish(&"x");
        ch.unsubscribe(sub);
        ch.publish(&"y");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(ch.subscriber_count(), 0);
    }

    #[test]
    fn publishing_with_no_subscribers_is_fine() {
        let ch: Channel<bool> = Channel::new();
        ch.publish(&true);
    }

    #[test]
    fn subscribing_inside_a_callback_does_not_panic() {
        let ch: Rc<Channel<i32>> = Rc::new(Channel::new());
        let ch2 = Rc::clone(&ch);
        ch.subscribe(move |_| {
            ch2.subscribe(|_| {});
        });
        ch.publish(&0);
        assert_eq!(ch.subscriber_count(), 2);
    }
}
