//! Organized tokens — strands with their placement and pairing resolved.
//!
//! Each case carries exactly the fields valid for it: a data token is a
//! literal value or a resolved cell reference, an attached action knows how
//! it applies, and the question-marker pair collapses to one token holding
//! the resolved predicate.

use riv_types::Pos;

/// A resolved cell address: which state row, which position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub list_id: u64,
    pub cell_index: usize,
}

/// How an attached action applies to its data token's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionApply {
    /// Scalar, against a single cell.
    Element,
    /// Element-wise across the data token's whole list.
    List,
    /// Element-wise, sourcing from the referenced list.
    ListToList,
}

/// An action strand paired onto a data token, with its command name already
/// resolved to the scalar or list-level variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAction {
    pub name: String,
    pub note: String,
    pub apply: ActionApply,
}

/// What a data token sources its operand from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// A literal carried by the strand's shape.
    Value { value: i64 },
    /// Another cell, named by the strand's terminus.
    Ref { cell: CellRef },
}

/// A data strand with its placement and any paired action.
#[derive(Debug, Clone, PartialEq)]
pub struct DataToken {
    /// Hook cell in glyph-local coordinates.
    pub origin: Pos,
    /// Execution order within the glyph.
    pub order: usize,
    /// The state row this token writes to.
    pub list_id: u64,
    /// Position within the row, assigned in increasing order per row.
    pub cell_index: usize,
    pub kind: DataKind,
    pub action: Option<AppliedAction>,
}

/// What a question-marker pair tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// A single cell must be positive.
    Cell(CellRef),
    /// Every cell of the list must be positive.
    List(u64),
}

/// The question-marker pair of a glyph, evaluated after its data tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionToken {
    pub order: usize,
    /// Hook cell of the first marker.
    pub origin: Pos,
    /// Where the first marker ends and the second begins.
    pub junction: Pos,
    pub predicate: Predicate,
}

/// Everything the organizer produces for one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTokens {
    pub data: Vec<DataToken>,
    pub question: Option<QuestionToken>,
}
