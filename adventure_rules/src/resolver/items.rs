//! Item and examine commands.

use log::{debug, info};

use super::{Prompt, Rejection, Responder, Session, Status, Step};
use crate::world::WorldResult;

impl Session {
    /// Move an item from the current location into the inventory.
    pub(super) fn pick_up(
        &mut self,
        item: &str,
        step: &mut Step,
        responder: &mut dyn Responder,
    ) -> WorldResult<Status> {
        let here = self.state.current_location();
        if !self.world.location(here)?.has_item(item) {
            return Ok(Status::Rejected(Rejection::NotHere(item.to_string())));
        }

        if let Some(riddle) = self.world.riddle(item).cloned() {
            let prompt = Prompt::Riddle {
                item: item.to_string(),
                question: riddle.question.clone(),
            };
            let solved = responder
                .respond(&prompt)
                .is_some_and(|answer| riddle.is_solved(&answer));
            if !solved {
                return Ok(Status::Rejected(Rejection::RiddleFailed {
                    item: item.to_string(),
                    hint: riddle.hint,
                }));
            }
            step.say("Correct!");
        }

        self.world.location_mut(here)?.take_item(item);
        self.state.add_to_inventory(item);
        debug!("picked up {item:?} at {here}");

        if let Some(definition) = self.world.item(item) {
            step.say(definition.description.clone());
        }
        step.say(format!("You picked up {item}!"));
        self.spend_move(step);
        Ok(Status::Applied)
    }

    /// Move an item from the inventory to the current location, scoring it on its
    /// first arrival at its target.
    pub(super) fn drop_item(&mut self, item: &str, step: &mut Step) -> WorldResult<Status> {
        if !self.state.has_item(item) {
            return Ok(Status::Rejected(Rejection::NotCarrying(item.to_string())));
        }
        if let Some(protection) = self.world.protection(item) {
            if !self.state.flag(&protection.lifted_by) {
                return Ok(Status::Rejected(Rejection::Protected {
                    item: item.to_string(),
                    message: protection.message.clone(),
                }));
            }
        }

        let here = self.state.current_location();
        self.state.remove_from_inventory(item);
        self.world.location_mut(here)?.put_item(item);
        step.say(format!("You dropped {item}."));

        let points = self.world.item_mut(item).map_or(0, |i| i.credit(here));
        if points > 0 {
            self.state.adjust_score(i64::from(points));
            info!("{item:?} scored {points} points at {here}");
            step.say(format!(
                "You placed {item} in the correct location! +{points} points."
            ));
        }

        self.spend_move(step);
        Ok(Status::Applied)
    }

    /// Show a held item's text, learning any code it reveals. Free.
    pub(super) fn read(&mut self, item: &str, step: &mut Step) -> WorldResult<Status> {
        let readable = match self.world.readable(item) {
            Some(readable) if self.state.has_item(item) => readable.clone(),
            _ => return Ok(Status::Rejected(Rejection::NothingToRead(item.to_string()))),
        };

        step.say(readable.text);
        if let Some(code) = readable.reveals {
            if self.state.add_known_code(code) {
                debug!("learned a code by reading {item:?}");
            }
        }
        Ok(Status::Applied)
    }

    /// Describe an object at the current location, learning any code it hides. Free.
    pub(super) fn examine(&mut self, object: &str, step: &mut Step) -> WorldResult<Status> {
        let location = self.location(None)?;
        let Some(examinable) = location.examinables.get(object).cloned() else {
            return Ok(Status::Rejected(Rejection::NothingToExamine(
                object.to_string(),
            )));
        };

        step.say(examinable.text);
        if let Some(code) = examinable.reveals {
            if self.state.add_known_code(code) {
                debug!("learned a code by examining {object:?}");
            }
        }
        Ok(Status::Applied)
    }
}
