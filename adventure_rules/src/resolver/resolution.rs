//! What a resolved command hands back to the caller.

use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// A command the player may retry: nothing was changed and no move was spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    #[error("That was an invalid option; try again.")]
    InvalidAction(String),

    #[error("There's no such item here.")]
    NotHere(String),

    #[error("You don't have {0} to drop.")]
    NotCarrying(String),

    #[error("{message}")]
    Protected { item: String, message: String },

    #[error("{hint}")]
    RiddleFailed { item: String, hint: String },

    #[error("You don't have {0} to read.")]
    NothingToRead(String),

    #[error("Looks like there's nothing to examine!")]
    NothingToExamine(String),

    #[error("No moves to undo.")]
    NothingToUndo,

    #[error("The game is over.")]
    GameOver,
}

/// How a command was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// State changed; the step was logged.
    Applied,
    /// A gated move was refused after spending moves; the step was logged.
    Refused,
    /// The last logged step was rolled back.
    Undone,
    /// Menu command with no effect on play (`quit` ends the session).
    Informational,
    Rejected(Rejection),
}

impl Status {
    /// Whether the command appended an event to the log.
    pub fn is_logged(&self) -> bool {
        matches!(self, Status::Applied | Status::Refused)
    }
}

/// The result of one command: narration, how it was handled, and the state afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub narration: Vec<String>,
    pub status: Status,
    pub state: GameState,
}

impl Resolution {
    /// Whether play continues after this command.
    pub fn ongoing(&self) -> bool {
        self.state.is_ongoing()
    }

    /// The rejection, if the command was rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.status {
            Status::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
