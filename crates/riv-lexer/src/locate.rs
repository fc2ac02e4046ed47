//! Glyph location — finds the paired start/end markers bounding each glyph.
//!
//! A start marker is the rightmost cell of a horizontal run of `╔` with no
//! vertical continuation; the run length is the glyph's nesting level. Each
//! start is matched to the first free `╝` strictly below and to its right
//! such that the row above the start is blank (or the top of the program),
//! no blank row or column splits the region, and the column right of the
//! end is blank down to the end's row.

use crate::grid::Grid;
use riv_types::{Direction, Lexicon, Pos, RivError, RivResult};

/// A located glyph in program coordinates, markers included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRegion {
    /// The rightmost start-marker cell.
    pub start: Pos,
    /// The end-marker cell.
    pub end: Pos,
    /// Nesting level (number of stacked start markers).
    pub level: usize,
}

/// A glyph cut out of the program: its nesting level, its own grid with the
/// markers blanked, and where its top-left corner sat in the program.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub level: usize,
    pub grid: Grid,
    pub offset: Pos,
}

/// Find every glyph region in the program, in start-scan order.
pub fn locate_glyphs(program: &Grid, lexicon: &Lexicon) -> RivResult<Vec<GlyphRegion>> {
    let start_syms = lexicon.symbols_named("start_glyph");
    let end_syms = lexicon.symbols_named("end_glyph");

    let mut starts: Vec<(Pos, usize)> = Vec::new();
    let mut ends: Vec<Pos> = Vec::new();

    for y in 0..program.height() {
        for x in 0..program.width() {
            let pos = Pos::new(x, y);
            let ch = program.cell(pos);
            if start_syms.contains(&ch) {
                // Only the rightmost marker of a run counts, and a marker
                // woven into a strand is not a glyph boundary.
                if x + 1 < program.width()
                    && !start_syms.contains(&program.cell(Pos::new(x + 1, y)))
                    && !has_continuation(program, lexicon, pos, Direction::Up)
                    && !has_continuation(program, lexicon, pos, Direction::Down)
                {
                    let mut level = 1;
                    let mut i = x;
                    while i > 0 && start_syms.contains(&program.cell(Pos::new(i - 1, y))) {
                        level += 1;
                        i -= 1;
                    }
                    starts.push((pos, level));
                }
            } else if end_syms.contains(&ch)
                && !has_continuation(program, lexicon, pos, Direction::Down)
                && !has_continuation(program, lexicon, pos, Direction::Up)
            {
                ends.push(pos);
            }
        }
    }

    let mut used = vec![false; ends.len()];
    let mut regions = Vec::new();

    for &(start, level) in &starts {
        let mut matched = false;
        for (ei, &end) in ends.iter().enumerate() {
            if used[ei] || end.x <= start.x || end.y <= start.y {
                continue;
            }
            if !region_is_isolated(program, start, end) {
                continue;
            }
            regions.push(GlyphRegion { start, end, level });
            used[ei] = true;
            matched = true;
            break;
        }
        if !matched {
            return Err(RivError::syntax_at("start glyph has no matching end", start));
        }
    }

    if let Some(ei) = used.iter().position(|&u| !u) {
        return Err(RivError::syntax_at(
            "end glyph has no corresponding start",
            ends[ei],
        ));
    }

    Ok(regions)
}

/// Cut the located regions out of the program, blanking their markers.
pub fn extract_glyphs(program: &Grid, regions: &[GlyphRegion]) -> Vec<Glyph> {
    regions
        .iter()
        .map(|r| {
            let x0 = r.start.x + 1 - r.level;
            let mut grid = program.slice(x0, r.end.x, r.start.y, r.end.y);
            for i in 0..r.level {
                grid.set(Pos::new(i, 0), ' ');
            }
            grid.set(Pos::new(grid.width() - 1, grid.height() - 1), ' ');
            Glyph {
                level: r.level,
                grid,
                offset: Pos::new(x0, r.start.y),
            }
        })
        .collect()
}

/// The blank-isolation rules pairing a start with an end.
fn region_is_isolated(program: &Grid, start: Pos, end: Pos) -> bool {
    // Blank row (or top of program) above the start, and no blank row
    // splitting the region.
    let above_ok = start.y == 0 || program.row_blank(start.y - 1);
    if !above_ok || (start.y..end.y).any(|y| program.row_blank(y)) {
        return false;
    }

    // Blank column (or bottom of program) right of the end down to its row,
    // and no blank column splitting the region.
    let right_ok =
        end.y == program.height() - 1 || program.col_blank(end.x + 1, start.y..end.y);
    right_ok && !(start.x..end.x).any(|x| program.col_blank(x, start.y..end.y + 1))
}

/// A marker with a symbol connecting to it vertically is part of a strand,
/// not a glyph boundary.
fn has_continuation(program: &Grid, lexicon: &Lexicon, pos: Pos, dir: Direction) -> bool {
    let Some((_, ch)) = program.neighbor(pos, dir) else {
        return false;
    };
    lexicon
        .get(ch)
        .is_some_and(|def| def.connects_toward(dir.opposite()))
}
