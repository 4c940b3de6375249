//! Action resolver - turns one command into the next game state.
//!
//! Commands are dispatched in a fixed precedence:
//! 1. **Menu**: `look`, `inventory`, `score`, `log`, `quit`, `undo`
//! 2. **Items**: `pick up`, `drop`, `read`
//! 3. **Examine**
//! 4. **Gated movement**: exits behind a locked gate
//! 5. **Movement**: any exit of the current location
//!
//! Anything else is rejected as an invalid action. Steps that change play are
//! appended to the event log; menu commands and rejections never are.

mod command;
mod items;
mod movement;
mod prompt;
mod resolution;
mod undo;

pub use command::*;
pub use prompt::*;
pub use resolution::*;

use log::debug;

use crate::history::{Event, EventLog};
use crate::state::{GameState, MoveBudget, Outcome};
use crate::world::{Location, LocationId, World, WorldResult};

/// Scratch space for the command being resolved.
#[derive(Debug, Default)]
struct Step {
    narration: Vec<String>,
    /// Description recorded on the logged event; defaults to the brief description.
    description: Option<String>,
}

impl Step {
    fn say(&mut self, line: impl Into<String>) {
        self.narration.push(line.into());
    }
}

/// One play session: the world, the player's state and the history of committed steps.
#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    state: GameState,
    log: EventLog,
}

impl Session {
    /// Start a session at the world's start location, recording the opening event.
    pub fn new(mut world: World) -> WorldResult<Self> {
        let state = GameState::new(&world);
        let start = state.current_location();
        let description = world.location_mut(start)?.arrive();

        let mut log = EventLog::new();
        log.append(Event::initial(start, description));

        debug!("session started at {start}");
        Ok(Self { world, state, log })
    }

    /// The world as play has changed it.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player's current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// History of committed steps.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Whether the session still accepts commands.
    pub fn is_ongoing(&self) -> bool {
        self.state.is_ongoing()
    }

    /// Visited location ids in order, initial state included.
    pub fn id_log(&self) -> Vec<LocationId> {
        self.log.id_log()
    }

    /// Text of the opening event.
    pub fn opening(&self) -> &str {
        self.log
            .head()
            .map(|e| e.description.as_str())
            .unwrap_or_default()
    }

    /// Look up a location, defaulting to the current one.
    pub fn location(&self, id: Option<LocationId>) -> WorldResult<&Location> {
        self.world
            .location(id.unwrap_or_else(|| self.state.current_location()))
    }

    /// Commands worth offering the player right now.
    pub fn available_actions(&self) -> WorldResult<Vec<String>> {
        let location = self.location(None)?;
        let mut actions: Vec<String> = MENU_COMMANDS.iter().map(|c| c.to_string()).collect();

        actions.extend(location.available_commands.keys().cloned());
        actions.extend(location.items.iter().map(|i| format!("pick up {i}")));

        let examinables_visible = location
            .examine_flag
            .as_deref()
            .map_or(true, |flag| self.state.flag(flag));
        if examinables_visible {
            actions.extend(location.examinables.keys().map(|o| format!("examine {o}")));
        }

        for item in self.state.inventory() {
            if self.world.readable(item).is_some() {
                actions.push(format!("read {item}"));
            }
            actions.push(format!("drop {item}"));
        }
        Ok(actions)
    }

    /// Resolve one input line.
    ///
    /// Errors are data-integrity failures only; everything the player can cause is
    /// reported through [`Resolution::status`].
    pub fn resolve(
        &mut self,
        input: &str,
        responder: &mut dyn Responder,
    ) -> WorldResult<Resolution> {
        let input = normalize(input);
        let mut step = Step::default();

        let status = if !self.state.is_ongoing() {
            Status::Rejected(Rejection::GameOver)
        } else {
            match Command::parse(&input) {
                Some(command) => self.dispatch(command, &mut step, responder)?,
                None => Status::Rejected(Rejection::InvalidAction(input.clone())),
            }
        };

        match &status {
            Status::Applied | Status::Refused => self.commit(&input, &mut step)?,
            Status::Rejected(rejection) => {
                debug!("rejected {input:?}: {rejection:?}");
                step.say(rejection.to_string());
            }
            Status::Undone | Status::Informational => {}
        }

        debug!(
            "resolved {input:?} -> {status:?} at {} ({} moves left)",
            self.state.current_location(),
            self.state.remaining_moves()
        );
        Ok(Resolution {
            narration: step.narration,
            status,
            state: self.state.clone(),
        })
    }

    fn dispatch(
        &mut self,
        command: Command,
        step: &mut Step,
        responder: &mut dyn Responder,
    ) -> WorldResult<Status> {
        match command {
            Command::Look => self.look(step),
            Command::Inventory => {
                if self.state.inventory().is_empty() {
                    step.say("Your inventory is empty.");
                } else {
                    step.say(format!(
                        "Your inventory contains: {}",
                        self.state.inventory().join(", ")
                    ));
                }
                Ok(Status::Informational)
            }
            Command::Score => {
                step.say(format!("Your current score is: {}", self.state.score()));
                Ok(Status::Informational)
            }
            Command::Log => {
                for line in self.log.history_lines() {
                    step.say(line);
                }
                Ok(Status::Informational)
            }
            Command::Quit => {
                self.state.finish(Outcome::Quit);
                step.say("Thanks for playing! Goodbye.");
                Ok(Status::Informational)
            }
            Command::Undo => self.undo(step),
            Command::PickUp(item) => self.pick_up(&item, step, responder),
            Command::Drop(item) => self.drop_item(&item, step),
            Command::Read(item) => self.read(&item, step),
            Command::Examine(object) => self.examine(&object, step),
            Command::Go(command) => self.go(&command, step, responder),
        }
    }

    fn look(&self, step: &mut Step) -> WorldResult<Status> {
        let location = self.location(None)?;
        step.say(location.long_description.clone());
        if !location.items.is_empty() {
            step.say(format!("You see: {}", location.items.join(", ")));
        }
        Ok(Status::Informational)
    }

    /// Spend one move, announcing the loss if it runs the budget out.
    fn spend_move(&mut self, step: &mut Step) {
        if self.state.outcome() == Some(Outcome::Lost) {
            return;
        }
        match self.state.decrement_moves() {
            MoveBudget::Remaining(left) => step.say(format!("Remaining moves: {left}")),
            MoveBudget::Exhausted => {
                step.say("Remaining moves: 0");
                if self.state.outcome() == Some(Outcome::Lost) {
                    log::info!("moves exhausted at {}", self.state.current_location());
                    step.say(self.world.loss_message().to_string());
                }
            }
        }
    }

    /// Append the resolved step to the event log.
    fn commit(&mut self, input: &str, step: &mut Step) -> WorldResult<()> {
        let location = self.state.current_location();
        let description = match step.description.take() {
            Some(description) => description,
            None => self.world.location(location)?.brief_description.clone(),
        };
        self.log
            .append(Event::new(location, description, input));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn campus() -> Session {
        Session::new(World::campus().unwrap()).unwrap()
    }

    /// Run commands that need no prompt answers.
    pub(super) fn run(session: &mut Session, commands: &[&str]) -> Vec<Resolution> {
        commands
            .iter()
            .map(|c| session.resolve(c, &mut NoResponder).unwrap())
            .collect()
    }

    #[test]
    fn test_new_session_records_opening() {
        let session = campus();

        assert_eq!(session.id_log(), vec![LocationId(7)]);
        assert!(session.opening().starts_with("You wake up in your dorm room"));
        assert!(session.location(None).unwrap().visited);
        assert!(session.is_ongoing());
    }

    #[test]
    fn test_menu_commands_are_free_and_unlogged() {
        let mut session = campus();

        for resolution in run(&mut session, &["look", "inventory", "score", "log"]) {
            assert_eq!(resolution.status, Status::Informational);
        }
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.state().remaining_moves(), 40);
    }

    #[test]
    fn test_inventory_and_score_narration() {
        let mut session = campus();
        let results = run(&mut session, &["inventory", "score"]);

        assert_eq!(results[0].narration, vec!["Your inventory is empty."]);
        assert_eq!(results[1].narration, vec!["Your current score is: 0"]);
    }

    #[test]
    fn test_invalid_action_changes_nothing() {
        let mut session = campus();
        let before = session.state().clone();

        let resolution = session.resolve("fly away", &mut NoResponder).unwrap();
        assert_eq!(
            resolution.rejection(),
            Some(&Rejection::InvalidAction("fly away".to_string()))
        );
        assert_eq!(session.state(), &before);
        assert_eq!(session.log().len(), 1);

        let blank = session.resolve("   ", &mut NoResponder).unwrap();
        assert!(matches!(blank.status, Status::Rejected(Rejection::InvalidAction(_))));
    }

    #[test]
    fn test_movement_costs_one_move_and_logs() {
        let mut session = campus();

        let resolution = session.resolve("Go South", &mut NoResponder).unwrap();
        assert_eq!(resolution.status, Status::Applied);
        assert_eq!(resolution.state.current_location(), LocationId(5));
        assert_eq!(resolution.state.remaining_moves(), 39);
        assert!(resolution.narration[0].starts_with("St. George Street is busy"));

        let tail = session.log().tail().unwrap();
        assert_eq!(tail.command.as_deref(), Some("go south"));
    }

    #[test]
    fn test_brief_description_on_revisit() {
        let mut session = campus();
        let results = run(&mut session, &["go south", "go north", "go south"]);

        assert_eq!(results[1].narration[0], "Your dorm room.");
        assert_eq!(
            results[2].narration[0],
            "St. George Street. Your residence is to the north."
        );
    }

    #[test]
    fn test_quit_ends_session() {
        let mut session = campus();

        let resolution = session.resolve("quit", &mut NoResponder).unwrap();
        assert!(!resolution.ongoing());
        assert_eq!(resolution.state.outcome(), Some(Outcome::Quit));
        assert_eq!(session.log().len(), 1);

        let after = session.resolve("go south", &mut NoResponder).unwrap();
        assert_eq!(after.rejection(), Some(&Rejection::GameOver));
        assert_eq!(session.state().current_location(), LocationId(7));
    }

    #[test]
    fn test_available_actions() {
        let mut session = campus();
        run(&mut session, &["go south", "go south", "pick up old notebook"]);

        let actions = session.available_actions().unwrap();
        assert!(actions.contains(&"go north".to_string()));
        assert!(actions.contains(&"pick up lost student card".to_string()));
        assert!(actions.contains(&"read old notebook".to_string()));
        assert!(actions.contains(&"drop old notebook".to_string()));
        assert!(!actions.contains(&"pick up old notebook".to_string()));
    }

    #[test]
    fn test_running_out_of_moves_loses() {
        let mut session = campus();

        for _ in 0..19 {
            run(&mut session, &["go south", "go north"]);
        }
        assert_eq!(session.state().remaining_moves(), 2);
        run(&mut session, &["go south"]);
        let last = session.resolve("go north", &mut NoResponder).unwrap();

        assert!(!last.ongoing());
        assert_eq!(last.state.outcome(), Some(Outcome::Lost));
        assert!(last
            .narration
            .iter()
            .any(|line| line.contains("failed to meet the deadline")));
        assert_eq!(session.log().len(), 41);
    }
}
