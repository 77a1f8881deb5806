// SPDX-License-Identifier: MPL-2.0
//! Synchronous publish/subscribe for notification messages.
//!
//! Every published [`Message`] is handed to each subscriber in subscription
//! order before `publish` returns. Subscribers cannot acknowledge or reject
//! a message.

use crate::notification::Message;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::{broadcast, mpsc};

/// Name under which messages are announced to renderers.
pub const GROWL_MESSAGE_EVENT: &str = "growlMessage";

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receives every message published on the bus.
pub trait Subscriber {
    fn on_message(&self, message: &Message);
}

/// Adapts a closure registered through [`EventBus::subscribe_fn`].
struct FnSubscriber<F>(F);

impl<F> Subscriber for FnSubscriber<F>
where
    F: Fn(&Message),
{
    fn on_message(&self, message: &Message) {
        (self.0)(message);
    }
}

impl Subscriber for mpsc::UnboundedSender<Message> {
    fn on_message(&self, message: &Message) {
        if self.send(message.clone()).is_err() {
            log::debug!("{GROWL_MESSAGE_EVENT} receiver dropped, message discarded");
        }
    }
}

impl Subscriber for broadcast::Sender<Message> {
    fn on_message(&self, message: &Message) {
        // Fails only when nobody is listening right now.
        if self.send(message.clone()).is_err() {
            log::debug!("{GROWL_MESSAGE_EVENT} has no broadcast receivers");
        }
    }
}

impl<S: Subscriber + ?Sized> Subscriber for Rc<S> {
    fn on_message(&self, message: &Message) {
        (**self).on_message(message);
    }
}

/// Subscribers that need mutable state, such as a display stack.
pub trait MessageSink {
    fn accept(&mut self, message: &Message);
}

impl<T: MessageSink> Subscriber for RefCell<T> {
    fn on_message(&self, message: &Message) {
        // A sink publishing into the bus it listens to would re-enter here.
        match self.try_borrow_mut() {
            Ok(mut sink) => sink.accept(message),
            Err(_) => log::warn!("{GROWL_MESSAGE_EVENT} sink already borrowed, message dropped"),
        }
    }
}

/// In-order, fire-and-forget message bus.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. It receives messages published from now on.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Registers a closure as a subscriber.
    pub fn subscribe_fn(&mut self, f: impl Fn(&Message) + 'static) -> SubscriptionId {
        self.subscribe(FnSubscriber(f))
    }

    /// Removes a subscriber. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(pos) = self.subscribers.iter().position(|(sid, _)| *sid == id) {
            self.subscribers.remove(pos);
            return true;
        }
        false
    }

    /// Delivers `message` to every subscriber, in subscription order.
    pub fn publish(&self, message: &Message) {
        log::debug!(
            "{GROWL_MESSAGE_EVENT}: {} {:?} to {} subscriber(s)",
            message.severity(),
            message.text(),
            self.subscribers.len()
        );
        for (_, subscriber) in &self.subscribers {
            subscriber.on_message(message);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Severity;

    #[test]
    fn publish_reaches_every_subscriber_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&seen);
        bus.subscribe_fn(move |m: &Message| first.borrow_mut().push(format!("a:{}", m.text())));
        let second = Rc::clone(&seen);
        bus.subscribe_fn(move |m: &Message| second.borrow_mut().push(format!("b:{}", m.text())));

        bus.publish(&Message::new(Severity::Warning, "one"));
        bus.publish(&Message::new(Severity::Error, "two"));

        assert_eq!(*seen.borrow(), vec!["a:one", "b:one", "a:two", "b:two"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut bus = EventBus::new();
        let id = bus.subscribe(tx);

        bus.publish(&Message::new(Severity::Info, "before"));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&Message::new(Severity::Info, "after"));

        assert_eq!(rx.try_recv().unwrap().text(), "before");
        assert!(rx.try_recv().is_err());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn dropped_receiver_does_not_break_publish() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut bus = EventBus::new();
        bus.subscribe(tx);

        bus.publish(&Message::new(Severity::Success, "ignored"));
    }

    #[test]
    fn broadcast_sender_fans_out() {
        let (tx, mut rx_a) = broadcast::channel(8);
        let mut rx_b = tx.subscribe();
        let mut bus = EventBus::new();
        bus.subscribe(tx);

        bus.publish(&Message::new(Severity::Success, "saved"));

        assert_eq!(rx_a.try_recv().unwrap().text(), "saved");
        assert_eq!(rx_b.try_recv().unwrap().text(), "saved");
    }

    #[test]
    fn refcell_sink_receives_messages() {
        #[derive(Default)]
        struct Counter(usize);
        impl MessageSink for Counter {
            fn accept(&mut self, _message: &Message) {
                self.0 += 1;
            }
        }

        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut bus = EventBus::new();
        bus.subscribe(Rc::clone(&counter));

        bus.publish(&Message::new(Severity::Info, "one"));
        bus.publish(&Message::new(Severity::Info, "two"));

        assert_eq!(counter.borrow().0, 2);
    }
}
