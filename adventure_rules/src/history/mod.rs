//! Event log - the ordered history of committed steps, used for `log` and `undo`.
//!
//! Events live in a growable arena; an event's predecessor and successor are its
//! neighbours in the arena, so removing the tail is a truncation and no links can
//! dangle.

use serde::{Deserialize, Serialize};

use crate::world::LocationId;

/// One committed step of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Where the player stood after the step.
    pub location: LocationId,
    /// Text shown for the step.
    pub description: String,
    /// Command that produced the step. `None` only for the opening event.
    pub command: Option<String>,
}

impl Event {
    /// The opening event of a session.
    pub fn initial(location: LocationId, description: impl Into<String>) -> Self {
        Self {
            location,
            description: description.into(),
            command: None,
        }
    }

    /// A step produced by `command`.
    pub fn new(
        location: LocationId,
        description: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            location,
            description: description.into(),
            command: Some(command.into()),
        }
    }

    /// Whether undo may remove this event.
    pub fn is_undoable(&self) -> bool {
        self.command.is_some()
    }
}

/// Ordered history of events, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an event after the current tail.
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Detach the tail, exposing its predecessor as the new tail.
    pub fn remove_tail(&mut self) -> Option<Event> {
        self.events.pop()
    }

    /// Whether no event has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The opening event.
    pub fn head(&self) -> Option<&Event> {
        self.events.first()
    }

    /// The most recent event.
    pub fn tail(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Event at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Predecessor of the event at `index`.
    pub fn prev(&self, index: usize) -> Option<&Event> {
        index.checked_sub(1).and_then(|i| self.events.get(i))
    }

    /// Successor of the event at `index`.
    pub fn next(&self, index: usize) -> Option<&Event> {
        self.events.get(index + 1)
    }

    /// Forward traversal, head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Location of every recorded event, initial state included.
    pub fn id_log(&self) -> Vec<LocationId> {
        self.events.iter().map(|e| e.location).collect()
    }

    /// Human-readable history: each description followed by the command that left it.
    pub fn history_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.events.len() * 2);
        for (index, event) in self.events.iter().enumerate() {
            lines.push(format!("[{}] {}", event.location, event.description));
            if let Some(command) = self.next(index).and_then(|e| e.command.as_deref()) {
                lines.push(format!("You chose: {command}"));
            }
        }
        lines
    }
}
