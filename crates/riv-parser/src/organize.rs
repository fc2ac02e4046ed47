//! Token organization — ordering, placement, reference resolution, and
//! action/data pairing for one glyph.
//!
//! Data strands run in `(x, y)` scan order and fill their row's cells left
//! to right. Question markers run last and must come in pairs whose ends
//! meet. Action strands pair to data strands positionally: among strands
//! sharing a starting column, the k-th action (top to bottom) modifies the
//! k-th data strand.

use crate::token::{
    ActionApply, AppliedAction, CellRef, DataKind, DataToken, GlyphTokens, Predicate,
    QuestionToken,
};
use riv_lexer::{Strand, StrandKind};
use riv_types::{CommandEntry, Pos, PrimeTable, RivError, RivResult};
use std::collections::BTreeMap;

/// Organize one glyph's strands into ordered tokens.
pub fn organize(strands: &[Strand], primes: &mut PrimeTable) -> RivResult<GlyphTokens> {
    let mut data_strands: Vec<&Strand> = strands.iter().filter(|s| s.is_data()).collect();
    data_strands.sort_by_key(|s| (s.origin.x, s.origin.y));

    // Cell indexes count up per row, in scan order.
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    let mut placed: Vec<(usize, &Strand)> = Vec::new();
    for &strand in &data_strands {
        let count = counts.entry(strand.origin.y).or_insert(0);
        placed.push((*count, strand));
        *count += 1;
    }

    let mut data = Vec::with_capacity(placed.len());
    for (order, &(cell_index, strand)) in placed.iter().enumerate() {
        let kind = match &strand.kind {
            StrandKind::Value { value } => DataKind::Value { value: *value },
            StrandKind::Ref => DataKind::Ref {
                cell: resolve_left_of(strand.terminus, &placed, primes),
            },
            _ => unreachable!("non-data strand in data pass"),
        };
        data.push(DataToken {
            origin: strand.origin,
            order,
            list_id: primes.get(strand.origin.y),
            cell_index,
            kind,
            action: None,
        });
    }

    pair_actions(strands, &mut data);

    let question = organize_questions(strands, &placed, data.len(), primes)?;

    Ok(GlyphTokens { data, question })
}

/// The left-of rule shared by refs and cell predicates: among data strands
/// on the terminus row whose hook is strictly left of the terminus column,
/// take the lowest cell index plus one; with no such strand, cell zero.
fn resolve_left_of(terminus: Pos, placed: &[(usize, &Strand)], primes: &mut PrimeTable) -> CellRef {
    let cell_index = placed
        .iter()
        .filter(|(_, s)| s.origin.y == terminus.y && s.origin.x < terminus.x)
        .map(|&(cell, _)| cell)
        .min()
        .map_or(0, |cell| cell + 1);
    CellRef {
        list_id: primes.get(terminus.y),
        cell_index,
    }
}

/// Pair action strands onto data tokens by shared starting column.
fn pair_actions(strands: &[Strand], data: &mut [DataToken]) {
    let mut actions: Vec<&Strand> = strands.iter().filter(|s| s.is_action()).collect();
    actions.sort_by_key(|s| (s.origin.x, s.origin.y));

    let mut seen_in_col: BTreeMap<usize, usize> = BTreeMap::new();
    for action in actions {
        let k = seen_in_col.entry(action.origin.x).or_insert(0);
        let partner = data
            .iter_mut()
            .filter(|t| t.origin.x == action.origin.x)
            .nth(*k);
        *k += 1;

        // An action with no k-th partner modifies nothing and is dropped.
        let Some(token) = partner else { continue };
        let (apply, command) = match &action.kind {
            StrandKind::Element { command } => (ActionApply::Element, command),
            StrandKind::List { command } => (ActionApply::List, command),
            StrandKind::ListToList { command } => (ActionApply::ListToList, command),
            _ => continue,
        };
        token.action = Some(applied(apply, command));
    }
}

/// Resolve the scalar or list-level command variant for a pairing.
fn applied(apply: ActionApply, command: &CommandEntry) -> AppliedAction {
    let list_level = matches!(apply, ActionApply::List | ActionApply::ListToList);
    match (&command.list_name, list_level) {
        (Some(list_name), true) => AppliedAction {
            name: list_name.clone(),
            note: command.list_note.clone().unwrap_or_else(|| command.note.clone()),
            apply,
        },
        _ => AppliedAction {
            name: command.name.clone(),
            note: command.note.clone(),
            apply,
        },
    }
}

/// Validate and fold the glyph's question markers into one predicate token.
fn organize_questions(
    strands: &[Strand],
    placed: &[(usize, &Strand)],
    next_order: usize,
    primes: &mut PrimeTable,
) -> RivResult<Option<QuestionToken>> {
    let mut questions: Vec<&Strand> = strands.iter().filter(|s| s.is_question()).collect();
    questions.sort_by_key(|s| s.origin.y);

    let (first, second) = match questions.as_slice() {
        [] => return Ok(None),
        [first, second] => (first, second),
        _ => {
            return Err(RivError::syntax(
                "invalid number of question markers: only 0 or 2 are allowed in a glyph",
            ))
        }
    };

    if second.origin != first.terminus {
        return Err(RivError::syntax_at(
            "a second question marker must begin just below where the first ends",
            second.origin,
        ));
    }

    // The junction row picks the list under test; a marker-terminated
    // second strand narrows it to a single cell.
    let junction = first.terminus;
    let predicate = match second.kind {
        StrandKind::Question { marker_end: true } => {
            Predicate::Cell(resolve_left_of(junction, placed, primes))
        }
        _ => Predicate::List(primes.get(junction.y)),
    };

    Ok(Some(QuestionToken {
        order: next_order,
        origin: first.origin,
        junction,
        predicate,
    }))
}
