//! Mid-command prompts.
//!
//! Riddles and keypads need an extra answer while a command is being resolved. The
//! resolver asks a [`Responder`] for it synchronously; the decision itself stays in
//! `Riddle::is_solved` and `Gate::accepts`.

use std::collections::VecDeque;

/// A question asked while resolving a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Riddle { item: String, question: String },
    Code { gate: String, prompt: String },
}

impl Prompt {
    /// Text to show the player.
    pub fn text(&self) -> &str {
        match self {
            Prompt::Riddle { question, .. } => question,
            Prompt::Code { prompt, .. } => prompt,
        }
    }
}

/// Supplies answers to prompts. `None` means no answer, which counts as wrong.
pub trait Responder {
    fn respond(&mut self, prompt: &Prompt) -> Option<String>;
}

impl<F> Responder for F
where
    F: FnMut(&Prompt) -> Option<String>,
{
    fn respond(&mut self, prompt: &Prompt) -> Option<String> {
        self(prompt)
    }
}

/// Never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResponder;

impl Responder for NoResponder {
    fn respond(&mut self, _prompt: &Prompt) -> Option<String> {
        None
    }
}

/// A queue of inputs shared between commands and prompt answers.
///
/// Answers are taken from the front of the queue, so an answer is written directly
/// after the command that asks for it.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponder {
    inputs: VecDeque<String>,
}

impl ScriptedResponder {
    /// Queue `inputs` in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Next command to run.
    pub fn next_input(&mut self) -> Option<String> {
        self.inputs.pop_front()
    }

    /// Inputs not yet taken.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Responder for ScriptedResponder {
    fn respond(&mut self, prompt: &Prompt) -> Option<String> {
        let answer = self.inputs.pop_front();
        log::debug!("scripted answer {:?} to {:?}", answer, prompt.text());
        answer
    }
}
