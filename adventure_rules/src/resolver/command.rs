//! Command grammar.

/// Commands that never cost a move and are never logged (`quit` and `undo` included).
pub const MENU_COMMANDS: [&str; 6] = ["look", "inventory", "score", "undo", "log", "quit"];

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Look,
    Inventory,
    Score,
    Log,
    Quit,
    Undo,
    PickUp(String),
    Drop(String),
    Read(String),
    Examine(String),
    /// Anything else; resolved against the current location's exits.
    Go(String),
}

impl Command {
    /// Parse a raw input line. Case and surrounding whitespace are ignored.
    ///
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = normalize(input);
        if input.is_empty() {
            return None;
        }

        let command = match input.as_str() {
            "look" => Command::Look,
            "inventory" => Command::Inventory,
            "score" => Command::Score,
            "log" => Command::Log,
            "quit" => Command::Quit,
            "undo" => Command::Undo,
            other => {
                if let Some(item) = other.strip_prefix("pick up ") {
                    Command::PickUp(item.trim().to_string())
                } else if let Some(item) = other.strip_prefix("drop ") {
                    Command::Drop(item.trim().to_string())
                } else if let Some(item) = other.strip_prefix("read ") {
                    Command::Read(item.trim().to_string())
                } else if let Some(object) = other.strip_prefix("examine ") {
                    Command::Examine(object.trim().to_string())
                } else {
                    Command::Go(other.to_string())
                }
            }
        };
        Some(command)
    }

    /// Whether this is one of the menu commands.
    pub fn is_menu(&self) -> bool {
        matches!(
            self,
            Command::Look
                | Command::Inventory
                | Command::Score
                | Command::Log
                | Command::Quit
                | Command::Undo
        )
    }
}

/// Lowercase and trim an input line.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
