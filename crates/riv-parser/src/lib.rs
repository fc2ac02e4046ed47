//! Rivulet parser — turns lexed strands into an executable block tree.
//!
//! - [`token`] — organized tokens: data tokens with list/cell placement and
//!   attached actions, plus the question-marker pair
//! - [`organize`] — ordering, cell assignment, ref resolution, and
//!   action/data pairing for one glyph
//! - [`block`] — the arena block tree rebuilt from glyph nesting levels,
//!   with `first_id`/`following_id` links
//! - [`parser`] — the end-to-end [`Parser`] running text through locate,
//!   trace, organize, build, and decorate

pub mod block;
pub mod organize;
pub mod parser;
pub mod token;

pub use block::{Block, BlockTree, Leaf, Node, NodeId};
pub use organize::organize;
pub use parser::{ParsedProgram, Parser};
pub use token::{
    ActionApply, AppliedAction, CellRef, DataKind, DataToken, GlyphTokens, Predicate,
    QuestionToken,
};
