//! Rivulet interpreter — executes a parsed block tree against the numeric
//! state store.
//!
//! Execution is a synchronous depth-first walk. Every block entry takes a
//! deep snapshot of the state; a failed question predicate rolls the block
//! back to that snapshot, a passing one in a nested block repeats it from
//! the top. See [`interpreter::Interpreter`].

pub mod interpreter;
pub mod state;

pub use interpreter::{Interpreter, Outcome};
pub use state::StateStore;
