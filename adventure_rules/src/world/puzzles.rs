//! Puzzle definitions: gates, riddles, readable items, drop protections and the win rule.
//!
//! Each puzzle type owns a pure decision function (`Gate::accepts`,
//! `Riddle::is_solved`); collecting the answer is left to the caller.

use serde::{Deserialize, Serialize};

use super::LocationId;

/// A movement transition locked behind a code and, optionally, an item in hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub id: String,
    /// Location the gated command is issued from.
    pub location: LocationId,
    /// Movement command that the gate intercepts.
    pub command: String,
    pub code: String,
    /// Item that must be carried before the keypad is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_item: Option<String>,
    /// Set whenever the gate shows its hints.
    pub activation_flag: String,
    /// Set when the gate is unlocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_item: Option<String>,
    pub unknown_code: String,
    pub prompt: String,
    pub success: String,
    pub failure: String,
}

impl Gate {
    /// Whether `attempt` opens this gate.
    pub fn accepts(&self, attempt: &str) -> bool {
        attempt.trim() == self.code
    }

    /// Text shown when the required item is missing.
    pub fn missing_item_text(&self) -> &str {
        self.missing_item.as_deref().unwrap_or(&self.unknown_code)
    }
}

/// Where a gate stands for the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateStatus {
    /// Code not yet discovered; hints only.
    LockedUnknown,
    /// Code discovered; the player is prompted.
    LockedKnown,
    /// Opened once, open for good.
    Unlocked,
}

/// A question guarding the pickup of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Riddle {
    pub item: String,
    pub question: String,
    pub answer: String,
    pub hint: String,
}

impl Riddle {
    /// Case-insensitive, whitespace-trimmed comparison against the answer.
    pub fn is_solved(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(self.answer.trim())
    }
}

/// An item with text that `read` shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Readable {
    pub item: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveals: Option<String>,
}

/// An item that cannot be dropped until a story flag is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropProtection {
    pub item: String,
    pub lifted_by: String,
    pub message: String,
}

/// The success predicate: be at `location` carrying every required item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinRule {
    pub location: LocationId,
    pub required_items: Vec<String>,
    pub message: String,
}

impl WinRule {
    /// Whether standing at `location` with `inventory` wins.
    pub fn is_met(&self, location: LocationId, inventory: &[String]) -> bool {
        location == self.location
            && self
                .required_items
                .iter()
                .all(|required| inventory.contains(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypad() -> Gate {
        Gate {
            id: "lab".to_string(),
            location: LocationId(4),
            command: "go south".to_string(),
            code: "3842".to_string(),
            requires_item: None,
            activation_flag: "lab-door-triggered".to_string(),
            unlock_flag: None,
            missing_item: None,
            unknown_code: "You need a code.".to_string(),
            prompt: "Code:".to_string(),
            success: "Open.".to_string(),
            failure: "Wrong.".to_string(),
        }
    }

    #[test]
    fn test_gate_accepts_exact_code() {
        let gate = keypad();
        assert!(gate.accepts("3842"));
        assert!(gate.accepts(" 3842\n"));
        assert!(!gate.accepts("3942"));
        assert!(!gate.accepts(""));
    }

    #[test]
    fn test_missing_item_text_falls_back() {
        let gate = keypad();
        assert_eq!(gate.missing_item_text(), "You need a code.");
    }

    #[test]
    fn test_riddle_ignores_case_and_whitespace() {
        let riddle = Riddle {
            item: "charger".to_string(),
            question: "What has keys but can't open locks?".to_string(),
            answer: "dictionary".to_string(),
            hint: "Think about data types.".to_string(),
        };
        assert!(riddle.is_solved("  Dictionary "));
        assert!(!riddle.is_solved("piano"));
    }

    #[test]
    fn test_win_rule() {
        let rule = WinRule {
            location: LocationId(7),
            required_items: vec!["usb drive".to_string(), "mug".to_string()],
            message: "Done.".to_string(),
        };
        let both = vec!["mug".to_string(), "usb drive".to_string()];
        let one = vec!["mug".to_string()];

        assert!(rule.is_met(LocationId(7), &both));
        assert!(!rule.is_met(LocationId(5), &both));
        assert!(!rule.is_met(LocationId(7), &one));
    }
}
