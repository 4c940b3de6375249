//! World description - the static input the engine is built from.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    DropProtection, Gate, Item, Location, LocationId, Readable, Riddle, WinRule, WorldError,
    WorldResult,
};

const CAMPUS_TOML: &str = include_str!("../../data/campus.toml");

fn default_moves() -> i32 {
    40
}

fn default_loss_message() -> String {
    "You have run out of moves.".to_string()
}

/// Everything needed to build a [`World`](super::World), as loaded from TOML or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub start: LocationId,
    /// Move budget for a session.
    #[serde(default = "default_moves")]
    pub moves: i32,
    #[serde(default = "default_loss_message")]
    pub loss_message: String,
    pub win: WinRule,
    pub locations: Vec<Location>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub gates: Vec<Gate>,
    #[serde(default)]
    pub readables: Vec<Readable>,
    #[serde(default)]
    pub riddles: Vec<Riddle>,
    #[serde(default)]
    pub protections: Vec<DropProtection>,
}

impl WorldConfig {
    /// The built-in campus world.
    pub fn campus() -> WorldResult<Self> {
        Self::from_toml_str(CAMPUS_TOML)
    }

    /// Parse a TOML world description.
    pub fn from_toml_str(source: &str) -> WorldResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON world description.
    pub fn from_json_str(source: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a world file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => Err(WorldError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}
