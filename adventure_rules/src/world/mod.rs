//! World model - locations, items and puzzles, validated once at load time.

mod config;
mod item;
mod location;
mod puzzles;

pub use config::*;
pub use item::*;
pub use location::*;
pub use puzzles::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Unique identifier for locations. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u32);

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LocationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Fatal problems with a world description.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported world file extension {0:?}")]
    UnsupportedFormat(String),

    #[error("location ids must be positive")]
    ZeroLocationId,

    #[error("move budget must be positive, got {0}")]
    NonPositiveMoveBudget(i32),

    #[error("name {0:?} must be lowercase to match player input")]
    NonLowercaseName(String),

    #[error("location {0} is defined twice")]
    DuplicateLocation(LocationId),

    #[error("unknown location {0}")]
    UnknownLocation(LocationId),

    #[error("command {command:?} at location {from} leads to unknown location {to}")]
    DanglingCommand {
        from: LocationId,
        command: String,
        to: LocationId,
    },

    #[error("item {0:?} is defined twice")]
    DuplicateItem(String),

    #[error("unknown item {0:?}")]
    UnknownItem(String),

    #[error("item {item:?} starts at {start} but is placed at {placed}")]
    MisplacedItem {
        item: String,
        start: LocationId,
        placed: LocationId,
    },

    #[error("item {0:?} is placed in more than one location")]
    ItemPlacedTwice(String),

    #[error("item {0:?} is not placed in any location")]
    ItemUnplaced(String),

    #[error("gate {gate:?} intercepts {command:?}, which location {location} does not offer")]
    GateWithoutExit {
        gate: String,
        location: LocationId,
        command: String,
    },

    #[error("flag {0:?} is never set by any gate")]
    UnknownFlag(String),
}

/// Result type used throughout the rules crate.
pub type WorldResult<T> = Result<T, WorldError>;

/// The validated game map.
///
/// Read-only during play apart from location item lists, `visited` and `scored`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    start: LocationId,
    moves: i32,
    loss_message: String,
    win: WinRule,
    locations: BTreeMap<LocationId, Location>,
    items: Vec<Item>,
    gates: Vec<Gate>,
    readables: Vec<Readable>,
    riddles: Vec<Riddle>,
    protections: Vec<DropProtection>,
}

impl World {
    /// Build and validate a world from its description.
    pub fn from_config(config: WorldConfig) -> WorldResult<Self> {
        let mut locations = BTreeMap::new();
        for location in config.locations {
            if location.id.0 == 0 {
                return Err(WorldError::ZeroLocationId);
            }
            let id = location.id;
            if locations.insert(id, location).is_some() {
                return Err(WorldError::DuplicateLocation(id));
            }
        }

        let world = Self {
            start: config.start,
            moves: config.moves,
            loss_message: config.loss_message,
            win: config.win,
            locations,
            items: config.items,
            gates: config.gates,
            readables: config.readables,
            riddles: config.riddles,
            protections: config.protections,
        };
        world.validate()?;
        Ok(world)
    }

    /// The built-in campus world.
    pub fn campus() -> WorldResult<Self> {
        Self::from_config(WorldConfig::campus()?)
    }

    fn validate(&self) -> WorldResult<()> {
        if self.moves <= 0 {
            return Err(WorldError::NonPositiveMoveBudget(self.moves));
        }
        self.location(self.start)?;
        self.location(self.win.location)?;

        // Input is lowercased before matching, so anything it must match is too.
        let matched_names = self
            .items
            .iter()
            .map(|item| &item.name)
            .chain(self.locations.values().flat_map(|location| {
                location
                    .available_commands
                    .keys()
                    .chain(location.examinables.keys())
            }));
        for name in matched_names {
            if name.chars().any(char::is_uppercase) {
                return Err(WorldError::NonLowercaseName(name.clone()));
            }
        }

        for location in self.locations.values() {
            for (command, to) in &location.available_commands {
                if !self.locations.contains_key(to) {
                    return Err(WorldError::DanglingCommand {
                        from: location.id,
                        command: command.clone(),
                        to: *to,
                    });
                }
            }
        }

        let mut names = HashSet::new();
        for item in &self.items {
            if !names.insert(item.name.as_str()) {
                return Err(WorldError::DuplicateItem(item.name.clone()));
            }
            self.location(item.target_position)?;
        }

        // Every item lies in exactly one location, the one it starts in.
        let mut placed = HashSet::new();
        for location in self.locations.values() {
            for name in &location.items {
                let item = self
                    .item(name)
                    .ok_or_else(|| WorldError::UnknownItem(name.clone()))?;
                if item.start_position != location.id {
                    return Err(WorldError::MisplacedItem {
                        item: name.clone(),
                        start: item.start_position,
                        placed: location.id,
                    });
                }
                if !placed.insert(name.as_str()) {
                    return Err(WorldError::ItemPlacedTwice(name.clone()));
                }
            }
        }
        if let Some(item) = self.items.iter().find(|i| !placed.contains(i.name.as_str())) {
            return Err(WorldError::ItemUnplaced(item.name.clone()));
        }

        for gate in &self.gates {
            if self.location(gate.location)?.destination(&gate.command).is_none() {
                return Err(WorldError::GateWithoutExit {
                    gate: gate.id.clone(),
                    location: gate.location,
                    command: gate.command.clone(),
                });
            }
            if let Some(item) = &gate.requires_item {
                self.require_item(item)?;
            }
        }

        let referenced = self
            .win
            .required_items
            .iter()
            .chain(self.readables.iter().map(|r| &r.item))
            .chain(self.riddles.iter().map(|r| &r.item))
            .chain(self.protections.iter().map(|p| &p.item));
        for name in referenced {
            self.require_item(name)?;
        }

        // Flags are only ever set by gates, so anything else that names one must match.
        let flags = self.flag_names();
        let consumers = self
            .protections
            .iter()
            .map(|p| &p.lifted_by)
            .chain(self.locations.values().filter_map(|l| l.examine_flag.as_ref()));
        for flag in consumers {
            if !flags.contains(flag) {
                return Err(WorldError::UnknownFlag(flag.clone()));
            }
        }

        Ok(())
    }

    fn require_item(&self, name: &str) -> WorldResult<()> {
        match self.item(name) {
            Some(_) => Ok(()),
            None => Err(WorldError::UnknownItem(name.to_string())),
        }
    }

    /// Where sessions begin.
    pub fn start(&self) -> LocationId {
        self.start
    }

    /// Move budget a fresh session starts with.
    pub fn move_budget(&self) -> i32 {
        self.moves
    }

    /// Text shown when the move budget runs out.
    pub fn loss_message(&self) -> &str {
        &self.loss_message
    }

    /// The win condition.
    pub fn win_rule(&self) -> &WinRule {
        &self.win
    }

    /// Look up a location. A miss is a data-integrity error.
    pub fn location(&self, id: LocationId) -> WorldResult<&Location> {
        self.locations
            .get(&id)
            .ok_or(WorldError::UnknownLocation(id))
    }

    /// Mutable lookup of a location by id.
    pub fn location_mut(&mut self, id: LocationId) -> WorldResult<&mut Location> {
        self.locations
            .get_mut(&id)
            .ok_or(WorldError::UnknownLocation(id))
    }

    /// All locations, by ascending id.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Look up an item by name. `None` when no such item exists.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Mutable lookup of an item by name.
    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.name == name)
    }

    /// All items, in definition order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Location currently holding an item, if any.
    pub fn item_holder(&self, name: &str) -> Option<LocationId> {
        self.locations
            .values()
            .find(|l| l.has_item(name))
            .map(|l| l.id)
    }

    /// Gate intercepting `command` at `location`.
    pub fn gate_at(&self, location: LocationId, command: &str) -> Option<&Gate> {
        self.gates
            .iter()
            .find(|g| g.location == location && g.command == command)
    }

    /// All gates.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Readable text carried by `item`, if any.
    pub fn readable(&self, item: &str) -> Option<&Readable> {
        self.readables.iter().find(|r| r.item == item)
    }

    /// Riddle guarding `item`, if any.
    pub fn riddle(&self, item: &str) -> Option<&Riddle> {
        self.riddles.iter().find(|r| r.item == item)
    }

    /// Drop protection on `item`, if any.
    pub fn protection(&self, item: &str) -> Option<&DropProtection> {
        self.protections.iter().find(|p| p.item == item)
    }

    /// Every flag name the world can set.
    pub fn flag_names(&self) -> BTreeSet<String> {
        self.gates
            .iter()
            .flat_map(|g| std::iter::once(&g.activation_flag).chain(g.unlock_flag.as_ref()))
            .cloned()
            .collect()
    }
}
