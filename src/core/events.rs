//! Cross-component notification
//!
//! A typed, in-process publish/subscribe bus. Components announce named
//! changes; interested components subscribe and re-read their state
//! instead of holding stale copies. Single-threaded: publish invokes
//! subscribers synchronously in registration order.

use std::cell::RefCell;

use crate::catalog::{GradeTier, Role};

/// Topics components can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    ProgressUpdated,
    PersonaUpdated,
    UserNameUpdated,
    UserGradeUpdated,
}

/// A published change, with whatever payload the topic implies
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ProgressUpdated { role: Role, percentage: u8 },
    PersonaUpdated { persona: String },
    UserNameUpdated { name: String },
    UserGradeUpdated { grade: GradeTier },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::ProgressUpdated { .. } => Topic::ProgressUpdated,
            Event::PersonaUpdated { .. } => Topic::PersonaUpdated,
            Event::UserNameUpdated { .. } => Topic::UserNameUpdated,
            Event::UserGradeUpdated { .. } => Topic::UserGradeUpdated,
        }
    }
}

type Subscriber<'a> = Box<dyn FnMut(&Event) + 'a>;

/// In-process event bus
#[derive(Default)]
pub struct EventBus<'a> {
    subscribers: RefCell<Vec<(Topic, Subscriber<'a>)>>,
}

impl<'a> EventBus<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a topic
    pub fn subscribe<F>(&self, topic: Topic, callback: F)
    where
        F: FnMut(&Event) + 'a,
    {
        self.subscribers
            .borrow_mut()
            .push((topic, Box::new(callback)));
    }

    /// Deliver an event to every subscriber of its topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        for (subscribed, callback) in self.subscribers.borrow_mut().iter_mut() {
            if *subscribed == topic {
                callback(&event);
            }
        }
    }
}
