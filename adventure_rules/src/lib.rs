//! # Adventure Rules
//!
//! The rules engine for the campus text adventure. This crate owns the game map,
//! the player's state, the event log and the action resolver. It performs no
//! console I/O; answers to mid-command prompts arrive through a [`Responder`].
//!
//! ## Core Components
//!
//! - **world**: Locations, items and puzzles, validated at load time
//! - **state**: Inventory, score, move budget, discovered codes and puzzle flags
//! - **history**: The event log behind `log` and `undo`
//! - **resolver**: The command state machine and the [`Session`] that drives it
//! - **simulation**: Scripted replays for walkthrough verification

pub mod history;
pub mod resolver;
pub mod simulation;
pub mod state;
pub mod world;

pub use history::*;
pub use resolver::*;
pub use simulation::*;
pub use state::*;
pub use world::*;
