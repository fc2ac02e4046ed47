//! End-to-end interpretation of hand-drawn programs.

use riv_eval::{Interpreter, StateStore};
use riv_parser::Parser;

const WHILE_PROGRAM: &str = "
╔ ───╮
     │
 ╰───┘
      ╝

╔╔╷
  │
  ╷─╯
  │
  ╷
     ╝
";

const LIST_ACTION_PROGRAM: &str = "
╔╰─╴╰──╴
        ╝

╔╰──╴
 ╭
 │
 │
 ╰─
    ╝
";

const LIST_TO_LIST_PROGRAM: &str = "
╔╰─╴ ╵
     │
    ╰┘
    ╭
    │
    ╷
      ╝
";

const ROLLBACK_PROGRAM: &str = "
╔╷
 │
 ╷─╯
 │
 ╷
    ╝
";

const CONTINUE_PROGRAM: &str = "
╔╷
 │
 ╷╰──
 │
 ╷
     ╝
";

fn run(src: &str) -> StateStore {
    let parser = Parser::with_builtin_config().unwrap();
    let mut program = parser.parse(src).unwrap();
    Interpreter::new(&mut program).run().unwrap()
}

#[test]
fn test_default_add_assign_builds_list() {
    let state = run("╔╰─╴╰──╴\n        ╝");
    assert_eq!(state.list(1), &[1.0, 2.0]);
    assert_eq!(state.list(2), &[] as &[f64]);
}

#[test]
fn test_while_loop_runs_until_predicate_fails() {
    // The outer glyph seeds list 3 with 6; the nested glyph subtracts 3 and
    // repeats while the cell stays positive, then rolls its last pass back.
    let state = run(WHILE_PROGRAM);
    assert_eq!(state.list(3), &[3.0]);
}

#[test]
fn test_list_action_applies_elementwise() {
    let state = run(LIST_ACTION_PROGRAM);
    assert_eq!(state.list(1), &[2.0, 4.0]);
}

#[test]
fn test_list_to_list_grows_destination() {
    let state = run(LIST_TO_LIST_PROGRAM);
    assert_eq!(state.list(1), &[1.0]);
    assert_eq!(state.list(3), &[1.0]);
}

#[test]
fn test_failed_top_level_predicate_rolls_back() {
    // The glyph writes -3 into list 3, but its question test fails, so the
    // whole block restores to its entry snapshot.
    let state = run(ROLLBACK_PROGRAM);
    assert_eq!(state.list(3), &[] as &[f64]);
}

#[test]
fn test_passing_top_level_predicate_continues() {
    let state = run(CONTINUE_PROGRAM);
    assert_eq!(state.list(3), &[6.0]);
}
