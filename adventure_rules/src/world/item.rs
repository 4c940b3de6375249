//! Item definitions.

use serde::{Deserialize, Serialize};

use super::LocationId;

/// An item in the game world.
///
/// Which container holds the item (a location or the inventory) is tracked by the
/// containers themselves, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub start_position: LocationId,
    /// Location where dropping the item earns points.
    pub target_position: LocationId,
    pub target_points: u32,
    /// Set once the item has been credited. Never cleared.
    #[serde(default)]
    pub scored: bool,
}

impl Item {
    /// Create an unscored item.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_position: LocationId,
        target_position: LocationId,
        target_points: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_position,
            target_position,
            target_points,
            scored: false,
        }
    }

    /// Credit the item for arriving at `location`.
    ///
    /// Returns the points earned: the item's value the first time it reaches its
    /// target, zero otherwise.
    pub fn credit(&mut self, location: LocationId) -> u32 {
        if self.scored || location != self.target_position {
            return 0;
        }
        self.scored = true;
        self.target_points
    }
}
