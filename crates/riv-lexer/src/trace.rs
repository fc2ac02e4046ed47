//! Strand tracing — follow each strand from its hook to its terminus.
//!
//! A cell is a start when its symbol has a `start` reading and exactly one
//! of its continuation directions has a live connection. Tracing then walks
//! cell to cell: a `continue` or `corner` reading whose directions include
//! the way back determines the onward direction; every rightward `continue`
//! step adds the prime of the cell's row to the strand value and every
//! leftward step subtracts it, while vertical steps accumulate the vertical
//! value from the horizontal distance back to the hook. A cell with an
//! `end` or `loc_marker` reading terminates the strand unless the next cell
//! connects back to carry it on.

use crate::grid::Grid;
use crate::strand::{Strand, StrandKind, StrandStart};
use riv_types::{
    CommandTable, Direction, Lexicon, Pos, PrimeTable, ReadingPos, RivError, RivResult,
    StrandType, SymbolDef,
};

/// Scan a glyph for strand starts, in row-major order.
pub fn find_strand_starts(glyph: &Grid, lexicon: &Lexicon) -> RivResult<Vec<StrandStart>> {
    let mut starts = Vec::new();
    for y in 0..glyph.height() {
        for x in 0..glyph.width() {
            if let Some(start) = check_is_start(glyph, lexicon, Pos::new(x, y))? {
                starts.push(start);
            }
        }
    }
    Ok(starts)
}

/// Decide whether the cell at `pos` starts a strand.
fn check_is_start(glyph: &Grid, lexicon: &Lexicon, pos: Pos) -> RivResult<Option<StrandStart>> {
    let Some(def) = lexicon.get(glyph.cell(pos)) else {
        return Ok(None);
    };
    if def.reading(ReadingPos::Start).is_none() {
        return Ok(None);
    }

    // A hook with two live connections is an interior corner; with none it
    // is stray ink. Only exactly one makes a start.
    let matches = continuation_matches(glyph, lexicon, pos, def);
    if matches.len() != 1 {
        return Ok(None);
    }
    let dir = matches[0];

    let for_dir: Vec<_> = def
        .readings
        .iter()
        .filter(|r| r.pos == ReadingPos::Start && r.dir == [dir])
        .collect();
    if for_dir.len() != 1 {
        return Err(RivError::internal_at(
            format!("{} start readings matched where 1 was expected", for_dir.len()),
            pos,
        ));
    }

    Ok(Some(StrandStart {
        pos,
        dir,
        strand_type: for_dir[0].strand_type,
    }))
}

/// Directions from this cell's continuation reading that have a live
/// connection on the other side.
fn continuation_matches(
    glyph: &Grid,
    lexicon: &Lexicon,
    pos: Pos,
    def: &SymbolDef,
) -> Vec<Direction> {
    let Some(reading) = def.continuation_reading() else {
        return Vec::new();
    };
    let mut matches = Vec::new();
    for &dir in &reading.dir {
        let Some((_, ch)) = glyph.neighbor(pos, dir) else {
            continue;
        };
        if let Some(nbr) = lexicon.get(ch) {
            if nbr.connects_toward_strand(dir.opposite()) {
                matches.push(dir);
            }
        }
    }
    matches
}

/// Follow a strand from its start to its terminus, accumulating its value
/// and classifying it.
pub fn trace_strand(
    glyph: &Grid,
    lexicon: &Lexicon,
    primes: &mut PrimeTable,
    commands: &CommandTable,
    start: StrandStart,
) -> RivResult<Strand> {
    let mut value: i64 = 0;
    let mut vert_value: i64 = 0;
    let mut prev_pos = start.pos;
    let mut prev_dir = start.dir;

    loop {
        let (curr, ch) = glyph
            .neighbor(prev_pos, prev_dir)
            .ok_or_else(|| RivError::syntax_at("strand runs off the glyph", prev_pos))?;

        let def = lexicon.get(ch).ok_or_else(|| {
            if ch == ' ' {
                RivError::internal_at("blank space found in strand", curr)
            } else {
                RivError::internal_at(format!("no symbol found for '{ch}'"), curr)
            }
        })?;

        // Onward direction, if this cell carries the strand through.
        let carry = def
            .reading(ReadingPos::Continue)
            .or_else(|| def.reading(ReadingPos::Corner));
        let mut next_dir = None;
        if let Some(reading) = carry {
            if reading.dir.contains(&prev_dir.opposite()) {
                let onward: Vec<Direction> = reading
                    .dir
                    .iter()
                    .copied()
                    .filter(|&d| d != prev_dir.opposite())
                    .collect();
                if onward.len() != 1 {
                    return Err(RivError::internal_at(
                        "more than one direction in next step",
                        curr,
                    ));
                }
                next_dir = Some(onward[0]);
            }
        }

        // Corners redirect without counting; only straight `continue` cells
        // accumulate.
        if def.reading(ReadingPos::Continue).is_some() {
            if let Some(nd) = next_dir {
                match nd {
                    Direction::Right => value += primes.get(curr.y) as i64,
                    Direction::Left => value -= primes.get(curr.y) as i64,
                    Direction::Down | Direction::Up => {
                        let delta = start.pos.x as i64 - curr.x as i64;
                        let idx = delta.div_euclid(2).unsigned_abs() as usize;
                        let p = primes.get(idx) as i64;
                        if nd == Direction::Down {
                            vert_value += p;
                        } else {
                            vert_value -= p;
                        }
                    }
                }
            }
        }

        // End test. A cell that could be an end really is one unless it can
        // also continue and the next cell connects back to it.
        if def.reading(ReadingPos::End).is_some() || def.reading(ReadingPos::LocMarker).is_some() {
            let following = next_dir
                .and_then(|nd| glyph.neighbor(curr, nd))
                .and_then(|(_, fch)| lexicon.get(fch));

            let carries_on = match (next_dir, following) {
                (Some(nd), Some(fdef)) => {
                    def.reading(ReadingPos::Continue).is_some()
                        && fdef.connects_toward(nd.opposite())
                }
                _ => false,
            };

            if !carries_on {
                return classify(start, curr, next_dir, prev_dir, def, value, vert_value, commands);
            }
        }

        match next_dir {
            Some(nd) => {
                prev_pos = curr;
                prev_dir = nd;
            }
            None => {
                return Err(RivError::syntax_at(
                    format!("no valid reading for '{ch}'"),
                    curr,
                ))
            }
        }
    }
}

/// Lex a whole glyph: find its starts and trace each one.
pub fn lex_glyph(
    glyph: &Grid,
    lexicon: &Lexicon,
    primes: &mut PrimeTable,
    commands: &CommandTable,
) -> RivResult<Vec<Strand>> {
    find_strand_starts(glyph, lexicon)?
        .into_iter()
        .map(|s| trace_strand(glyph, lexicon, primes, commands, s))
        .collect()
}

/// Classify a finished strand from its type and how it ended.
#[allow(clippy::too_many_arguments)]
fn classify(
    start: StrandStart,
    terminus: Pos,
    next_dir: Option<Direction>,
    prev_dir: Direction,
    def: &SymbolDef,
    value: i64,
    vert_value: i64,
    commands: &CommandTable,
) -> RivResult<Strand> {
    // A location marker only reads as one when it points back along the
    // strand; flush approaches make it a plain end.
    let marker_end = def
        .reading(ReadingPos::LocMarker)
        .is_some_and(|r| r.dir.contains(&prev_dir.opposite()));

    let kind = match start.strand_type {
        StrandType::QuestionMarker => StrandKind::Question { marker_end },
        StrandType::Data if marker_end => StrandKind::Ref,
        StrandType::Data => StrandKind::Value { value },
        StrandType::Action => {
            let command = commands.lookup(vert_value)?.clone();
            if marker_end {
                StrandKind::ListToList { command }
            } else if next_dir.is_some_and(|d| d.is_horizontal()) {
                StrandKind::List { command }
            } else {
                StrandKind::Element { command }
            }
        }
    };

    Ok(Strand {
        origin: start.pos,
        dir: start.dir,
        terminus,
        kind,
    })
}
