//! Traced strands and their classifications.

use riv_types::{CommandEntry, Direction, Pos, StrandType};

/// A confirmed strand start: a hook (or question-marker tick) with exactly
/// one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrandStart {
    pub pos: Pos,
    pub dir: Direction,
    pub strand_type: StrandType,
}

/// What a fully traced strand turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum StrandKind {
    /// Data strand carrying a literal value.
    Value { value: i64 },
    /// Data strand naming another cell by location.
    Ref,
    /// Action strand applied to a whole list.
    List { command: CommandEntry },
    /// Action strand applied to a single cell.
    Element { command: CommandEntry },
    /// Action strand copying one list onto another.
    ListToList { command: CommandEntry },
    /// Question-marker strand. `marker_end` records whether it terminated
    /// on a matching location marker.
    Question { marker_end: bool },
}

/// A fully traced strand in glyph-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    /// The hook cell the strand starts from.
    pub origin: Pos,
    /// The direction the strand leaves its hook in.
    pub dir: Direction,
    /// The cell the strand ends on.
    pub terminus: Pos,
    pub kind: StrandKind,
}

impl Strand {
    /// `true` for value and ref strands.
    pub fn is_data(&self) -> bool {
        matches!(self.kind, StrandKind::Value { .. } | StrandKind::Ref)
    }

    /// `true` for the three action shapes.
    pub fn is_action(&self) -> bool {
        matches!(
            self.kind,
            StrandKind::List { .. } | StrandKind::Element { .. } | StrandKind::ListToList { .. }
        )
    }

    /// `true` for question-marker strands.
    pub fn is_question(&self) -> bool {
        matches!(self.kind, StrandKind::Question { .. })
    }

    /// The command carried by an action strand.
    pub fn command(&self) -> Option<&CommandEntry> {
        match &self.kind {
            StrandKind::List { command }
            | StrandKind::Element { command }
            | StrandKind::ListToList { command } => Some(command),
            _ => None,
        }
    }
}
