//! The symbol lexicon — how each box-drawing character may be read.
//!
//! A symbol can carry several readings (a hook is both a strand start and an
//! interior corner, a half-width tick is both a plain end and a location
//! marker). Which reading applies depends on the direction a strand enters
//! the cell from; that resolution lives in the tracer, not here.

use crate::{Direction, RivError, RivResult};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// The builtin Rivulet symbol set.
const BUILTIN_LEXICON: &str = include_str!("../config/lexicon.json");

/// Where in a strand a reading may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingPos {
    Start,
    Continue,
    Corner,
    End,
    LocMarker,
    PreStart,
}

/// What kind of strand a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrandType {
    Data,
    Action,
    QuestionMarker,
}

/// One way a symbol may be read.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    pub pos: ReadingPos,
    #[serde(deserialize_with = "one_or_many")]
    pub dir: Vec<Direction>,
    #[serde(rename = "type")]
    pub strand_type: StrandType,
}

/// A symbol definition: the characters it covers and their readings.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolDef {
    pub name: String,
    pub symbol: Vec<String>,
    pub readings: Vec<Reading>,
}

impl SymbolDef {
    /// First reading at the given position, if any.
    pub fn reading(&self, pos: ReadingPos) -> Option<&Reading> {
        self.readings.iter().find(|r| r.pos == pos)
    }

    /// First reading usable for continuation matching: a corner, a continue,
    /// or a question-marker reading.
    pub fn continuation_reading(&self) -> Option<&Reading> {
        self.readings.iter().find(|r| {
            r.pos == ReadingPos::Corner
                || r.pos == ReadingPos::Continue
                || r.strand_type == StrandType::QuestionMarker
        })
    }

    /// `true` if any reading extends toward `dir`.
    pub fn connects_toward(&self, dir: Direction) -> bool {
        self.readings.iter().any(|r| r.dir.contains(&dir))
    }

    /// Like [`connects_toward`](Self::connects_toward), but ignoring
    /// decorative `pre_start` readings (they add no connectivity).
    pub fn connects_toward_strand(&self, dir: Direction) -> bool {
        self.readings
            .iter()
            .any(|r| r.pos != ReadingPos::PreStart && r.dir.contains(&dir))
    }
}

/// The full lexicon, with a per-character index built at load time.
///
/// Loaded once and immutable for the life of the process; a character
/// claimed by two definitions is a configuration defect.
#[derive(Debug, Clone)]
pub struct Lexicon {
    defs: Vec<SymbolDef>,
    by_char: BTreeMap<char, usize>,
}

impl Lexicon {
    /// Load a lexicon from JSON.
    pub fn from_json(json: &str) -> RivResult<Self> {
        let defs: Vec<SymbolDef> = serde_json::from_str(json)
            .map_err(|e| RivError::internal(format!("malformed lexicon: {e}")))?;

        let mut by_char = BTreeMap::new();
        for (idx, def) in defs.iter().enumerate() {
            for sym in &def.symbol {
                let mut chars = sym.chars();
                let ch = chars.next().ok_or_else(|| {
                    RivError::internal(format!("empty symbol in lexicon entry '{}'", def.name))
                })?;
                if chars.next().is_some() {
                    return Err(RivError::internal(format!(
                        "multi-character symbol '{sym}' in lexicon entry '{}'",
                        def.name
                    )));
                }
                if by_char.insert(ch, idx).is_some() {
                    return Err(RivError::internal(format!(
                        "more than one symbol found for '{ch}'"
                    )));
                }
            }
        }

        Ok(Self { defs, by_char })
    }

    /// The builtin symbol set.
    pub fn builtin() -> RivResult<Self> {
        Self::from_json(BUILTIN_LEXICON)
    }

    /// Look up the definition covering a character, if any.
    pub fn get(&self, ch: char) -> Option<&SymbolDef> {
        self.by_char.get(&ch).map(|&idx| &self.defs[idx])
    }

    /// All characters belonging to the named definition.
    pub fn symbols_named(&self, name: &str) -> Vec<char> {
        self.defs
            .iter()
            .filter(|d| d.name == name)
            .flat_map(|d| d.symbol.iter().filter_map(|s| s.chars().next()))
            .collect()
    }
}

/// Accept either a bare direction or a list of directions for `dir`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Direction>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Direction),
        Many(Vec<Direction>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(d) => vec![d],
        OneOrMany::Many(v) => v,
    })
}
