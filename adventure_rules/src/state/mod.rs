//! Game state - the mutable session data for one player.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::world::{Gate, GateStatus, LocationId, World};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    /// Moves ran out.
    Lost,
    Quit,
}

/// Result of spending a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveBudget {
    Remaining(i32),
    Exhausted,
}

/// Player inventory, score, move budget, discovered codes and puzzle flags.
///
/// Fields are private so that every change goes through a mutator that keeps the
/// inventory free of duplicates and the outcome set at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    current_location: LocationId,
    inventory: Vec<String>,
    score: i64,
    remaining_moves: i32,
    known_codes: BTreeSet<String>,
    flags: BTreeMap<String, bool>,
    unlocked_gates: BTreeSet<String>,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Create a fresh state at the world's start with every declared flag cleared.
    pub fn new(world: &World) -> Self {
        Self {
            current_location: world.start(),
            inventory: Vec::new(),
            score: 0,
            remaining_moves: world.move_budget(),
            known_codes: BTreeSet::new(),
            flags: world
                .flag_names()
                .into_iter()
                .map(|name| (name, false))
                .collect(),
            unlocked_gates: BTreeSet::new(),
            outcome: None,
        }
    }

    /// Where the player stands.
    pub fn current_location(&self) -> LocationId {
        self.current_location
    }

    /// Move the player without spending a move.
    pub fn set_location(&mut self, location: LocationId) {
        self.current_location = location;
    }

    /// Held item names, in pick-up order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Whether the item is held.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|i| i == name)
    }

    /// Returns false, leaving the inventory untouched, if the item is already held.
    pub fn add_to_inventory(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.has_item(&name) {
            return false;
        }
        self.inventory.push(name);
        true
    }

    /// Returns false if the item was not held.
    pub fn remove_from_inventory(&mut self, name: &str) -> bool {
        match self.inventory.iter().position(|i| i == name) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    /// Points earned so far.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Add `delta` points.
    pub fn adjust_score(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Moves left before the session is lost.
    pub fn remaining_moves(&self) -> i32 {
        self.remaining_moves
    }

    /// Spend one move. Reaching zero ends the session as lost, unless it already ended.
    pub fn decrement_moves(&mut self) -> MoveBudget {
        self.remaining_moves -= 1;
        if self.remaining_moves <= 0 {
            self.finish(Outcome::Lost);
            MoveBudget::Exhausted
        } else {
            MoveBudget::Remaining(self.remaining_moves)
        }
    }

    /// Give back moves spent by an undone step.
    pub fn refund_moves(&mut self, moves: u32) {
        self.remaining_moves += moves as i32;
    }

    /// Value of a puzzle flag; unknown flags read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Set a puzzle flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// All puzzle flags.
    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// Whether the player has discovered `code`.
    pub fn knows_code(&self, code: &str) -> bool {
        self.known_codes.contains(code)
    }

    /// Returns true if the code was new.
    pub fn add_known_code(&mut self, code: impl Into<String>) -> bool {
        self.known_codes.insert(code.into())
    }

    /// Every discovered code.
    pub fn known_codes(&self) -> &BTreeSet<String> {
        &self.known_codes
    }

    /// Mark a gate permanently unlocked.
    pub fn unlock_gate(&mut self, gate: &Gate) {
        self.unlocked_gates.insert(gate.id.clone());
    }

    /// Where the gate stands for this player.
    pub fn gate_status(&self, gate: &Gate) -> GateStatus {
        if self.unlocked_gates.contains(&gate.id) {
            GateStatus::Unlocked
        } else if self.knows_code(&gate.code) {
            GateStatus::LockedKnown
        } else {
            GateStatus::LockedUnknown
        }
    }

    /// How the session ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the session has not ended yet.
    pub fn is_ongoing(&self) -> bool {
        self.outcome.is_none()
    }

    /// End the session. Returns false if it had already ended.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campus_state() -> (World, GameState) {
        let world = World::campus().unwrap();
        let state = GameState::new(&world);
        (world, state)
    }

    #[test]
    fn test_new_state() {
        let (world, state) = campus_state();

        assert_eq!(state.current_location(), LocationId(7));
        assert_eq!(state.remaining_moves(), world.move_budget());
        assert!(state.inventory().is_empty());
        assert!(state.is_ongoing());
        assert!(!state.flag("card-used"));
        assert_eq!(state.flags().len(), 3);
    }

    #[test]
    fn test_inventory_rejects_duplicates() {
        let (_, mut state) = campus_state();

        assert!(state.add_to_inventory("uoft mug"));
        assert!(!state.add_to_inventory("uoft mug"));
        assert_eq!(state.inventory().len(), 1);

        assert!(state.remove_from_inventory("uoft mug"));
        assert!(!state.remove_from_inventory("uoft mug"));
    }

    #[test]
    fn test_moves_exhausted_loses() {
        let (_, mut state) = campus_state();

        for _ in 0..39 {
            assert!(matches!(state.decrement_moves(), MoveBudget::Remaining(_)));
        }
        assert_eq!(state.decrement_moves(), MoveBudget::Exhausted);
        assert_eq!(state.outcome(), Some(Outcome::Lost));
        assert!(!state.is_ongoing());
    }

    #[test]
    fn test_finish_keeps_first_outcome() {
        let (_, mut state) = campus_state();

        assert!(state.finish(Outcome::Won));
        assert!(!state.finish(Outcome::Lost));
        assert_eq!(state.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn test_exhausting_moves_after_win_keeps_win() {
        let (_, mut state) = campus_state();

        for _ in 0..39 {
            state.decrement_moves();
        }
        state.finish(Outcome::Won);
        assert_eq!(state.decrement_moves(), MoveBudget::Exhausted);
        assert_eq!(state.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn test_gate_status_progression() {
        let (world, mut state) = campus_state();
        let gate = world.gate_at(LocationId(4), "go south").unwrap();

        assert_eq!(state.gate_status(gate), GateStatus::LockedUnknown);

        assert!(state.add_known_code("3842"));
        assert!(!state.add_known_code("3842"));
        assert_eq!(state.gate_status(gate), GateStatus::LockedKnown);

        state.unlock_gate(gate);
        assert_eq!(state.gate_status(gate), GateStatus::Unlocked);
    }
}
