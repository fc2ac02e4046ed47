//! Rivulet lexer — locates glyphs in a program grid and traces their strands.
//!
//! This is the first half of the pipeline:
//! - [`grid`] — the rectangular character grid a program is read into
//! - [`locate`] — find the paired start/end markers bounding each glyph,
//!   determine nesting levels, and cut the glyphs out of the program
//! - [`trace`] — from each hook in a glyph, follow the strand to its
//!   terminus, accumulating its value and classifying it
//!
//! The output is, per glyph, a list of [`strand::Strand`]s ready for the
//! organizer.

pub mod grid;
pub mod locate;
pub mod strand;
pub mod trace;

pub use grid::Grid;
pub use locate::{extract_glyphs, locate_glyphs, Glyph, GlyphRegion};
pub use strand::{Strand, StrandKind, StrandStart};
pub use trace::{find_strand_starts, lex_glyph, trace_strand};
