//! Location definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::LocationId;

/// A named point of interest at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examinable {
    pub text: String,
    /// Unlock code learned by examining this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveals: Option<String>,
}

impl Examinable {
    /// Create an examinable with no hidden code.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reveals: None,
        }
    }

    /// Attach a code that examining this object reveals.
    pub fn revealing(mut self, code: impl Into<String>) -> Self {
        self.reveals = Some(code.into());
        self
    }
}

/// A location in the game world.
///
/// Only `items` and `visited` change during play; everything else is fixed at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub brief_description: String,
    /// Shown on the first visit only.
    pub long_description: String,
    /// Command (e.g. "go north") -> destination.
    #[serde(default)]
    pub available_commands: BTreeMap<String, LocationId>,
    /// Names of the items lying here, in arrival order.
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub examinables: BTreeMap<String, Examinable>,
    /// Flag that must be set before the examinables are listed as actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examine_flag: Option<String>,
    #[serde(default)]
    pub visited: bool,
}

impl Location {
    /// Create a location with no exits, items or examinables.
    pub fn new(
        id: LocationId,
        brief_description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            brief_description: brief_description.into(),
            long_description: long_description.into(),
            available_commands: BTreeMap::new(),
            items: Vec::new(),
            examinables: BTreeMap::new(),
            examine_flag: None,
            visited: false,
        }
    }

    /// Add an exit.
    pub fn with_exit(mut self, command: impl Into<String>, destination: LocationId) -> Self {
        self.available_commands.insert(command.into(), destination);
        self
    }

    /// Place an item here at load time.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add an examinable object.
    pub fn with_examinable(mut self, name: impl Into<String>, examinable: Examinable) -> Self {
        self.examinables.insert(name.into(), examinable);
        self
    }

    /// Destination of a command, if this location offers it.
    pub fn destination(&self, command: &str) -> Option<LocationId> {
        self.available_commands.get(command).copied()
    }

    /// Whether the item lies here.
    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    /// Remove an item from this location. Returns false if it was not here.
    pub fn take_item(&mut self, name: &str) -> bool {
        match self.items.iter().position(|i| i == name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Leave an item here. Returns false if it was already here.
    pub fn put_item(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.has_item(&name) {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Description for the current visit, marking the location visited.
    pub fn arrive(&mut self) -> String {
        if self.visited {
            self.brief_description.clone()
        } else {
            self.visited = true;
            self.long_description.clone()
        }
    }
}
