//! Undo - roll back the most recent logged step.
//!
//! Undo restores the location, reverses item transfers and refunds one move,
//! whatever the undone step cost. It deliberately leaves alone what the player has learned or earned:
//! discovered codes, unlocked gates, visited locations, `scored` items and the score.

use log::{debug, warn};

use super::{Command, Rejection, Session, Status, Step};
use crate::world::{LocationId, WorldResult};

impl Session {
    pub(super) fn undo(&mut self, step: &mut Step) -> WorldResult<Status> {
        if !self.log.tail().is_some_and(|event| event.is_undoable()) {
            warn!("undo requested with nothing to undo");
            return Ok(Status::Rejected(Rejection::NothingToUndo));
        }
        let Some(undone) = self.log.remove_tail() else {
            return Ok(Status::Rejected(Rejection::NothingToUndo));
        };

        let restored = self
            .log
            .tail()
            .map_or(self.world.start(), |event| event.location);
        let brief = self.world.location(restored)?.brief_description.clone();
        self.state.set_location(restored);
        step.say("Undoing the last move...");
        step.say(format!("Moved back to: {brief}"));

        match undone.command.as_deref().and_then(Command::parse) {
            Some(Command::PickUp(item)) => {
                if self.state.remove_from_inventory(&item) {
                    self.world.location_mut(restored)?.put_item(item.clone());
                    step.say(format!("Undo: dropped {item}."));
                }
            }
            Some(Command::Drop(item)) => {
                if self.world.location_mut(restored)?.take_item(&item) {
                    self.state.add_to_inventory(item.clone());
                    step.say(format!("Undo: picked up {item}."));
                }
            }
            _ => {}
        }

        self.state.refund_moves(1);
        step.say(format!(
            "Move added back. Remaining moves: {}",
            self.state.remaining_moves()
        ));

        self.reset_activation_flags(restored)?;
        debug!(
            "undid {:?}, back at {restored}",
            undone.command.as_deref().unwrap_or_default()
        );
        Ok(Status::Undone)
    }

    /// Clear the hint flags tied to `location` so stale hints are not shown again.
    fn reset_activation_flags(&mut self, location: LocationId) -> WorldResult<()> {
        let mut flags: Vec<String> = self
            .world
            .gates()
            .iter()
            .filter(|gate| gate.location == location)
            .map(|gate| gate.activation_flag.clone())
            .collect();
        flags.extend(self.world.location(location)?.examine_flag.clone());

        for flag in flags {
            self.state.set_flag(flag, false);
        }
        Ok(())
    }
}
