//! Page event channel.
//!
//! Inbound events from the server are routed through a callback table keyed
//! by event name; the host's event loop calls [`EventChannel::dispatch`] and
//! the handler runs to completion before the next event. Outbound events are
//! queued until the host drains them.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Outbound event name telling the page that form fields changed.
pub const INPUT_EVENT: &str = "input";

/// Outbound event name requesting deletion of a record.
pub const DELETE_EVENT: &str = "delete";

type Handler = Box<dyn FnMut(&Value)>;

/// Receives "fields changed" notifications from the editor.
pub trait ChangeNotifier {
    /// The form fields were rewritten; re-read them.
    fn fields_changed(&mut self);
}

/// An event waiting to be sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEvent {
    pub name: String,
    pub payload: Value,
}

/// Callback table plus outbound queue.
#[derive(Default)]
pub struct EventChannel {
    handlers: HashMap<String, Handler>,
    outbound: VecDeque<OutboundEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for `name`, replacing any previous one.
    pub fn on(&mut self, name: impl Into<String>, handler: impl FnMut(&Value) + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Removes the handler for `name`. Returns true if one was registered.
    pub fn off(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Runs the handler for `name`. Returns false if nothing is registered.
    pub fn dispatch(&mut self, name: &str, payload: &Value) -> bool {
        match self.handlers.get_mut(name) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => {
                debug!(event = name, "No handler registered, dropping event");
                false
            }
        }
    }

    /// Queues an event for the server.
    pub fn push(&mut self, name: impl Into<String>, payload: Value) {
        self.outbound.push_back(OutboundEvent {
            name: name.into(),
            payload,
        });
    }

    /// Number of queued outbound events.
    pub fn pending(&self) -> usize {
        self.outbound.len()
    }

    /// Takes all queued outbound events, oldest first.
    pub fn drain(&mut self) -> Vec<OutboundEvent> {
        self.outbound.drain(..).collect()
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("EventChannel")
            .field("handlers", &names)
            .field("outbound", &self.outbound)
            .finish()
    }
}

impl ChangeNotifier for EventChannel {
    fn fields_changed(&mut self) {
        self.push(INPUT_EVENT, Value::Null);
    }
}

/// Delete button that asks before pushing the deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDeletion {
    pub id: String,
    pub message: String,
}

impl ConfirmDeletion {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Pushes `delete {id}` if the user confirmed. Returns whether it did.
    pub fn resolve(&self, confirmed: bool, channel: &mut EventChannel) -> bool {
        if confirmed {
            channel.push(DELETE_EVENT, serde_json::json!({ "id": self.id }));
        }
        confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_runs_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::new();

        let sink = Rc::clone(&seen);
        channel.on("set_view", move |payload| sink.borrow_mut().push(payload.clone()));

        assert!(channel.dispatch("set_view", &serde_json::json!({"n": 1})));
        assert!(!channel.dispatch("unknown", &Value::Null));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_on_replaces_handler() {
        let hits = Rc::new(RefCell::new((0, 0)));
        let mut channel = EventChannel::new();

        let first = Rc::clone(&hits);
        channel.on("update_position", move |_| first.borrow_mut().0 += 1);
        let second = Rc::clone(&hits);
        channel.on("update_position", move |_| second.borrow_mut().1 += 1);

        channel.dispatch("update_position", &Value::Null);
        assert_eq!(*hits.borrow(), (0, 1));
    }

    #[test]
    fn test_off() {
        let mut channel = EventChannel::new();
        channel.on("set_view", |_| {});
        assert!(channel.off("set_view"));
        assert!(!channel.off("set_view"));
        assert!(!channel.dispatch("set_view", &Value::Null));
    }

    #[test]
    fn test_fields_changed_pushes_input() {
        let mut channel = EventChannel::new();
        channel.fields_changed();
        channel.fields_changed();

        assert_eq!(channel.pending(), 2);
        let events = channel.drain();
        assert!(events.iter().all(|e| e.name == INPUT_EVENT));
        assert_eq!(channel.pending(), 0);
    }

    #[test]
    fn test_confirm_deletion() {
        let mut channel = EventChannel::new();
        let button = ConfirmDeletion::new("42", "Delete this geo-fence?");

        assert!(!button.resolve(false, &mut channel));
        assert_eq!(channel.pending(), 0);

        assert!(button.resolve(true, &mut channel));
        let events = channel.drain();
        assert_eq!(events[0].name, DELETE_EVENT);
        assert_eq!(events[0].payload, serde_json::json!({"id": "42"}));
    }
}
