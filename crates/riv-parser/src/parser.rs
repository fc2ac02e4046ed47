//! The end-to-end parse pipeline: text → decorated block tree.

use crate::block::BlockTree;
use crate::organize::organize;
use riv_lexer::{extract_glyphs, lex_glyph, locate_glyphs, Grid};
use riv_types::{CommandTable, Lexicon, PrimeTable, RivError, RivResult};

/// A fully parsed program, ready for the interpreter.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub tree: BlockTree,
    /// Prime table grown during parsing; row `y` of a glyph maps to
    /// `primes.get(y)`.
    pub primes: PrimeTable,
    /// Row count of the largest glyph; the state store starts with this
    /// many lists.
    pub state_rows: usize,
}

/// Rivulet parser with injected lexicon and command configuration.
pub struct Parser {
    lexicon: Lexicon,
    commands: CommandTable,
}

impl Parser {
    pub fn new(lexicon: Lexicon, commands: CommandTable) -> Self {
        Self { lexicon, commands }
    }

    /// A parser over the builtin symbol set and command table.
    pub fn with_builtin_config() -> RivResult<Self> {
        Ok(Self::new(Lexicon::builtin()?, CommandTable::builtin()?))
    }

    /// Run the full pipeline: locate glyphs, trace their strands, organize
    /// tokens, and rebuild the decorated block tree.
    pub fn parse(&self, source: &str) -> RivResult<ParsedProgram> {
        let program = Grid::from_source(source);
        let regions = locate_glyphs(&program, &self.lexicon)?;
        if regions.is_empty() {
            return Err(RivError::syntax("no glyph found"));
        }
        let glyphs = extract_glyphs(&program, &regions);

        let mut primes = PrimeTable::new();
        let state_rows = glyphs.iter().map(|g| g.grid.height()).max().unwrap_or(0);

        let mut tagged = Vec::with_capacity(glyphs.len());
        for glyph in &glyphs {
            let strands = lex_glyph(&glyph.grid, &self.lexicon, &mut primes, &self.commands)?;
            let tokens = organize(&strands, &mut primes)?;
            tagged.push((glyph.level, tokens));
        }

        let mut tree = BlockTree::build(tagged);
        tree.decorate();

        Ok(ParsedProgram {
            tree,
            primes,
            state_rows,
        })
    }
}
