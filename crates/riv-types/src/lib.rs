//! Shared types for the Rivulet core.
//!
//! Rivulet programs are two-dimensional line drawings; every stage of the
//! pipeline (locator, tracer, organizer, interpreter) speaks in terms of the
//! vocabulary defined here: grid positions and directions, the two fatal
//! error kinds, the symbol lexicon, the command table, and the prime table
//! that gives the language its arithmetic.

pub mod command;
pub mod error;
pub mod lexicon;
pub mod pos;
pub mod primes;

pub use command::{CommandEntry, CommandTable};
pub use error::{RivError, RivResult};
pub use lexicon::{Lexicon, Reading, ReadingPos, StrandType, SymbolDef};
pub use pos::{Direction, Pos};
pub use primes::PrimeTable;
