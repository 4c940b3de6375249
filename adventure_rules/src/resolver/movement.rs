//! Movement, gates and the win check.
//!
//! A gate is consulted before the ordinary exit. While locked it moves through:
//! - **locked-unknown**: hint only, one move spent, passage refused
//! - **locked-known**: the player is prompted; a wrong code costs an extra move
//! - **unlocked**: permanent; the exit behaves like any other
//!
//! A gate that requires an item refuses passage before any of this while the item
//! is not carried.

use log::{debug, info};

use super::{Prompt, Rejection, Responder, Session, Status, Step};
use crate::state::Outcome;
use crate::world::{Gate, GateStatus, LocationId, WorldResult};

impl Session {
    pub(super) fn go(
        &mut self,
        command: &str,
        step: &mut Step,
        responder: &mut dyn Responder,
    ) -> WorldResult<Status> {
        let here = self.state.current_location();
        let Some(destination) = self.world.location(here)?.destination(command) else {
            return Ok(Status::Rejected(Rejection::InvalidAction(
                command.to_string(),
            )));
        };

        if let Some(gate) = self.world.gate_at(here, command).cloned() {
            if self.state.gate_status(&gate) != GateStatus::Unlocked {
                return self.pass_gate(&gate, destination, step, responder);
            }
        }

        self.travel(destination, step)?;
        Ok(Status::Applied)
    }

    fn pass_gate(
        &mut self,
        gate: &Gate,
        destination: LocationId,
        step: &mut Step,
        responder: &mut dyn Responder,
    ) -> WorldResult<Status> {
        self.state.set_flag(gate.activation_flag.clone(), true);

        if let Some(item) = &gate.requires_item {
            if !self.state.has_item(item) {
                debug!("gate {:?} refused: {item:?} not carried", gate.id);
                step.say(gate.missing_item_text());
                self.spend_move(step);
                return Ok(Status::Refused);
            }
        }

        match self.state.gate_status(gate) {
            GateStatus::Unlocked => {
                self.travel(destination, step)?;
                Ok(Status::Applied)
            }
            GateStatus::LockedUnknown => {
                debug!("gate {:?} refused: code unknown", gate.id);
                step.say(gate.unknown_code.clone());
                self.spend_move(step);
                Ok(Status::Refused)
            }
            GateStatus::LockedKnown => {
                let prompt = Prompt::Code {
                    gate: gate.id.clone(),
                    prompt: gate.prompt.clone(),
                };
                let opened = responder
                    .respond(&prompt)
                    .is_some_and(|attempt| gate.accepts(&attempt));

                if opened {
                    self.state.unlock_gate(gate);
                    if let Some(flag) = &gate.unlock_flag {
                        self.state.set_flag(flag.clone(), true);
                    }
                    info!("gate {:?} unlocked", gate.id);
                    step.say(gate.success.clone());
                    self.travel(destination, step)?;
                    Ok(Status::Applied)
                } else {
                    debug!("gate {:?} refused: wrong code", gate.id);
                    step.say(gate.failure.clone());
                    // The attempt itself plus the penalty.
                    self.spend_move(step);
                    self.spend_move(step);
                    Ok(Status::Refused)
                }
            }
        }
    }

    /// Move the player, describe the arrival, check for a win, then spend the move.
    fn travel(&mut self, destination: LocationId, step: &mut Step) -> WorldResult<()> {
        let description = self.world.location_mut(destination)?.arrive();
        self.state.set_location(destination);
        step.say(description.clone());
        step.description = Some(description);

        self.check_win(step);
        self.spend_move(step);
        Ok(())
    }

    fn check_win(&mut self, step: &mut Step) {
        let rule = self.world.win_rule();
        if !rule.is_met(self.state.current_location(), self.state.inventory()) {
            return;
        }
        let message = rule.message.clone();
        if self.state.finish(Outcome::Won) {
            info!("won with score {}", self.state.score());
            step.say(message);
            step.say(format!("Your final score was: {}", self.state.score()));
        }
    }
}
