//! The transactional tree-walking interpreter.
//!
//! Blocks snapshot the state on entry. A glyph's question predicate decides
//! how its block proceeds: a failing predicate rolls the block back to the
//! entry snapshot and returns to the parent; a passing predicate repeats a
//! nested block from the top (the while-loop mechanism) or simply continues
//! at the top level.

use crate::state::StateStore;
use riv_parser::{
    ActionApply, BlockTree, DataKind, DataToken, Node, NodeId, ParsedProgram, Predicate,
};
use riv_types::{RivError, RivResult};
use tracing::debug;

/// How a glyph execution leaves its enclosing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Rollback,
    Repeat,
}

/// Executes a parsed program against a fresh state store.
pub struct Interpreter<'p> {
    tree: &'p BlockTree,
    state: StateStore,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p mut ParsedProgram) -> Self {
        let state = StateStore::new(&mut program.primes, program.state_rows);
        Self {
            tree: &program.tree,
            state,
        }
    }

    /// Run the program to completion and hand back the final state.
    pub fn run(mut self) -> RivResult<StateStore> {
        let root = self.tree.root();
        self.run_block(root)?;
        Ok(self.state)
    }

    fn run_block(&mut self, block_id: NodeId) -> RivResult<()> {
        let children = match self.tree.node(block_id) {
            Node::Block(block) => block.children.clone(),
            Node::Leaf(_) => return Err(RivError::internal("block node expected")),
        };

        // Each pass takes its own snapshot: a repeat commits the previous
        // iteration and a later rollback only undoes the current one.
        'repeat: loop {
            let snapshot = self.state.snapshot();
            debug!(block = block_id, "entering block");

            for &child in &children {
                let is_block = matches!(self.tree.node(child), Node::Block(_));
                let outcome = if is_block {
                    self.run_block(child)?;
                    Outcome::Continue
                } else {
                    self.run_glyph(child)?
                };

                match outcome {
                    Outcome::Continue => {}
                    Outcome::Rollback => {
                        debug!(block = block_id, "rolling back");
                        self.state.restore(snapshot);
                        return Ok(());
                    }
                    Outcome::Repeat => {
                        debug!(block = block_id, "repeating");
                        continue 'repeat;
                    }
                }
            }
            return Ok(());
        }
    }

    fn run_glyph(&mut self, leaf_id: NodeId) -> RivResult<Outcome> {
        let tree = self.tree;
        let Node::Leaf(leaf) = tree.node(leaf_id) else {
            return Err(RivError::internal("leaf node expected"));
        };

        for token in &leaf.glyph.data {
            self.apply_data(token)?;
        }

        if let Some(question) = &leaf.glyph.question {
            let holds = match question.predicate {
                Predicate::Cell(cell) => self.state.cell(cell.list_id, cell.cell_index) > 0.0,
                Predicate::List(list_id) => self.state.list(list_id).iter().all(|&v| v > 0.0),
            };
            debug!(leaf = leaf_id, holds, "question evaluated");

            return Ok(if !holds {
                Outcome::Rollback
            } else if leaf.level >= 2 {
                Outcome::Repeat
            } else {
                Outcome::Continue
            });
        }

        Ok(Outcome::Continue)
    }

    fn apply_data(&mut self, token: &DataToken) -> RivResult<()> {
        match token.action.as_ref().map(|a| a.apply) {
            Some(ActionApply::List) => {
                let source = self.source_scalar(token);
                let name = token.action.as_ref().map(|a| a.name.as_str()).unwrap_or_default();
                debug!(list = token.list_id, command = name, "applying list command");
                for cell in self.state.list_mut(token.list_id).iter_mut() {
                    apply_op(name, cell, source)?;
                }
            }
            Some(ActionApply::ListToList) => {
                let DataKind::Ref { cell } = token.kind else {
                    return Err(RivError::internal(
                        "list-to-list action requires a reference strand",
                    ));
                };
                let source = self.state.list(cell.list_id).to_vec();
                let name = token.action.as_ref().map(|a| a.name.as_str()).unwrap_or_default();
                debug!(
                    from = cell.list_id,
                    to = token.list_id,
                    command = name,
                    "applying list-to-list command"
                );
                let dest = self.state.list_mut(token.list_id);
                if dest.len() < source.len() {
                    dest.resize(source.len(), 0.0);
                }
                for (cell, &src) in dest.iter_mut().zip(&source) {
                    apply_op(name, cell, src)?;
                }
            }
            _ => {
                // Scalar path: an element action, or the default add-assign
                // when no action is attached.
                let source = self.source_scalar(token);
                let name = token
                    .action
                    .as_ref()
                    .map(|a| a.name.as_str())
                    .unwrap_or("addition_assignment");
                debug!(
                    list = token.list_id,
                    cell = token.cell_index,
                    command = name,
                    "applying command"
                );
                let dest = self.state.cell_mut(token.list_id, token.cell_index)?;
                apply_op(name, dest, source)?;
            }
        }
        Ok(())
    }

    /// Resolve a token's scalar operand.
    fn source_scalar(&self, token: &DataToken) -> f64 {
        match token.kind {
            DataKind::Value { value } => value as f64,
            DataKind::Ref { cell } => self.state.cell(cell.list_id, cell.cell_index),
        }
    }
}

/// Apply one assignment command to a destination cell. List-level names
/// dispatch to the same scalar op.
fn apply_op(name: &str, dest: &mut f64, src: f64) -> RivResult<()> {
    let base = name.strip_prefix("list_").unwrap_or(name);
    match base {
        "addition_assignment" => *dest += src,
        "subtraction_assignment" => *dest -= src,
        "multiplication_assignment" => *dest *= src,
        "division_assignment" => *dest /= src,
        "exponent_assignment" => *dest = dest.powf(src),
        "root_assignment" => *dest = dest.powf(1.0 / src),
        "overwrite_assignment" => *dest = src,
        "modulo_assignment" => *dest %= src,
        _ => {
            return Err(RivError::internal(format!(
                "unrecognized command '{name}'"
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_op_dispatch() {
        let mut cell = 9.0;
        apply_op("subtraction_assignment", &mut cell, 4.0).unwrap();
        assert_eq!(cell, 5.0);
        apply_op("list_multiplication_assignment", &mut cell, 2.0).unwrap();
        assert_eq!(cell, 10.0);
        apply_op("overwrite_assignment", &mut cell, 1.5).unwrap();
        assert_eq!(cell, 1.5);
    }

    #[test]
    fn test_root_is_fractional_exponent() {
        let mut cell = 16.0;
        apply_op("root_assignment", &mut cell, 2.0).unwrap();
        assert_eq!(cell, 4.0);
    }

    #[test]
    fn test_unknown_command_is_internal_error() {
        let mut cell = 0.0;
        let err = apply_op("no_such_assignment", &mut cell, 1.0).unwrap_err();
        assert!(!err.is_syntax());
    }
}
