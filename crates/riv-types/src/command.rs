//! The command table — what an action strand's vertical displacement means.
//!
//! Keys are the stringified signed displacement; each entry carries a scalar
//! and a list-level command name so the organizer can pick the right one
//! when pairing an action to its data strand.

use crate::{RivError, RivResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The builtin command set.
const BUILTIN_COMMANDS: &str = include_str!("../config/commands.json");

/// One command table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    pub note: String,
    pub list_name: Option<String>,
    pub list_note: Option<String>,
}

/// Mapping from stringified vertical displacement to command.
///
/// Loaded once, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: BTreeMap<String, CommandEntry>,
}

impl CommandTable {
    /// Load a command table from JSON.
    pub fn from_json(json: &str) -> RivResult<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| RivError::internal(format!("malformed command table: {e}")))?;
        Ok(Self { entries })
    }

    /// The builtin command set.
    pub fn builtin() -> RivResult<Self> {
        Self::from_json(BUILTIN_COMMANDS)
    }

    /// Look up the command for an action strand's vertical displacement.
    ///
    /// A displacement with no entry means the user drew a command the
    /// language does not have.
    pub fn lookup(&self, vertical_value: i64) -> RivResult<&CommandEntry> {
        self.entries.get(&vertical_value.to_string()).ok_or_else(|| {
            RivError::syntax(format!("unrecognized command magnitude {vertical_value}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = CommandTable::builtin().unwrap();
        assert_eq!(table.lookup(1).unwrap().name, "addition_assignment");
        assert_eq!(table.lookup(2).unwrap().name, "multiplication_assignment");
        assert_eq!(table.lookup(-1).unwrap().name, "subtraction_assignment");
        assert_eq!(table.lookup(-4).unwrap().name, "modulo_assignment");
        assert_eq!(
            table.lookup(2).unwrap().list_name.as_deref(),
            Some("list_multiplication_assignment")
        );
    }

    #[test]
    fn test_unknown_magnitude_is_syntax_error() {
        let table = CommandTable::builtin().unwrap();
        let err = table.lookup(99).unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("unrecognized command"));
    }
}
