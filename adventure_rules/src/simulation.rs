//! Replay harness - runs a scripted list of inputs against a fresh session.

use crate::resolver::{ScriptedResponder, Session};
use crate::world::{LocationId, World, WorldResult};

/// A finished scripted run.
#[derive(Debug, Clone)]
pub struct Playthrough {
    pub session: Session,
    /// Every narration line, in order.
    pub transcript: Vec<String>,
    /// Inputs never consumed because the session ended first.
    pub unused_inputs: usize,
}

impl Playthrough {
    /// Visited location ids of the run.
    pub fn id_log(&self) -> Vec<LocationId> {
        self.session.id_log()
    }
}

/// Feed `inputs` to a new session until they run out or the session ends.
///
/// Prompt answers come from the same queue, directly after the command that asks.
pub fn replay<I, S>(world: World, inputs: I) -> WorldResult<Playthrough>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut session = Session::new(world)?;
    let mut script = ScriptedResponder::new(inputs);
    let mut transcript = vec![session.opening().to_string()];

    while session.is_ongoing() {
        let Some(input) = script.next_input() else {
            break;
        };
        let resolution = session.resolve(&input, &mut script)?;
        transcript.extend(resolution.narration);
    }

    log::debug!(
        "replay finished at {} after {} events",
        session.state().current_location(),
        session.log().len()
    );
    Ok(Playthrough {
        session,
        transcript,
        unused_inputs: script.remaining(),
    })
}
