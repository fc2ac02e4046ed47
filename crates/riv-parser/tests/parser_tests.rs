//! Token organization and end-to-end parsing.

use riv_lexer::{lex_glyph, Grid, Strand};
use riv_parser::{
    organize, ActionApply, CellRef, DataKind, Leaf, Node, ParsedProgram, Parser, Predicate,
};
use riv_types::{CommandTable, Lexicon, Pos, PrimeTable};

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

fn lex(src: &str) -> (Vec<Strand>, PrimeTable) {
    let lexicon = Lexicon::builtin().unwrap();
    let commands = CommandTable::builtin().unwrap();
    let mut primes = PrimeTable::new();
    let strands =
        lex_glyph(&Grid::from_source(src), &lexicon, &mut primes, &commands).unwrap();
    (strands, primes)
}

fn leaf(program: &ParsedProgram, id: usize) -> &Leaf {
    match program.tree.node(id) {
        Node::Leaf(l) => l,
        Node::Block(_) => panic!("expected leaf at {id}"),
    }
}

#[test]
fn test_data_tokens_ordered_and_placed() {
    let (strands, mut primes) = lex("╰─╴╰──╴");
    let tokens = organize(&strands, &mut primes).unwrap();

    assert_eq!(tokens.data.len(), 2);
    assert!(tokens.question.is_none());

    assert_eq!(tokens.data[0].order, 0);
    assert_eq!(tokens.data[0].origin, Pos::new(0, 0));
    assert_eq!(tokens.data[0].list_id, 1);
    assert_eq!(tokens.data[0].cell_index, 0);
    assert_eq!(tokens.data[0].kind, DataKind::Value { value: 1 });

    assert_eq!(tokens.data[1].order, 1);
    assert_eq!(tokens.data[1].list_id, 1);
    assert_eq!(tokens.data[1].cell_index, 1);
    assert_eq!(tokens.data[1].kind, DataKind::Value { value: 2 });
}

#[test]
fn test_ref_resolution_includes_own_strand() {
    let (strands, mut primes) = lex("╰─╶");
    let tokens = organize(&strands, &mut primes).unwrap();

    assert_eq!(tokens.data.len(), 1);
    // The ref strand itself sits left of its terminus, so the lowest cell
    // on the row is its own and the reference lands one past it.
    assert_eq!(
        tokens.data[0].kind,
        DataKind::Ref {
            cell: CellRef {
                list_id: 1,
                cell_index: 1
            }
        }
    );
}

#[test]
fn test_action_pairs_to_data_in_same_column() {
    let (strands, mut primes) = lex("╰──╴\n╭\n│\n│");
    let tokens = organize(&strands, &mut primes).unwrap();

    assert_eq!(tokens.data.len(), 1);
    let action = tokens.data[0].action.as_ref().expect("paired action");
    assert_eq!(action.name, "multiplication_assignment");
    assert_eq!(action.apply, ActionApply::Element);
}

#[test]
fn test_list_action_uses_list_variant() {
    let (strands, mut primes) = lex("╰──╴\n╭\n│\n│\n╰─");
    let tokens = organize(&strands, &mut primes).unwrap();

    let action = tokens.data[0].action.as_ref().expect("paired action");
    assert_eq!(action.name, "list_multiplication_assignment");
    assert_eq!(action.apply, ActionApply::List);
}

#[test]
fn test_unpaired_action_is_dropped() {
    // The action strand starts in a column with no data strand.
    let (strands, mut primes) = lex("╰──╮╰─╮╰─╮\n   │ ─┘  │\n     ────┘\n      ╭\n      │\n      │");
    let tokens = organize(&strands, &mut primes).unwrap();

    assert_eq!(tokens.data.len(), 3);
    assert!(tokens.data.iter().all(|t| t.action.is_none()));
}

#[test]
fn test_question_pair_resolves_cell_predicate() {
    let (strands, mut primes) = lex("╷\n│\n╷\n│\n╷");
    let tokens = organize(&strands, &mut primes).unwrap();

    let question = tokens.question.as_ref().expect("question pair");
    assert_eq!(question.junction, Pos::new(0, 2));
    assert_eq!(
        question.predicate,
        Predicate::Cell(CellRef {
            list_id: 3,
            cell_index: 0
        })
    );
}

#[test]
fn test_mismatched_question_pair_is_syntax_error() {
    let (strands, mut primes) = lex("╷ ╷\n│ │\n╷ ╷");
    let err = organize(&strands, &mut primes).unwrap_err();
    assert!(err.is_syntax());
    assert!(err.to_string().contains("second question marker"));
}

#[test]
fn test_single_question_marker_is_syntax_error() {
    let (strands, mut primes) = lex("╷\n│\n╷");
    let err = organize(&strands, &mut primes).unwrap_err();
    assert!(err.is_syntax());
    assert!(err.to_string().contains("question markers"));
}

#[test]
fn test_parse_builds_decorated_tree() {
    let parser = Parser::with_builtin_config().unwrap();
    let program = parser.parse(WHILE_PROGRAM).unwrap();

    assert_eq!(program.state_rows, 6);

    let leaves = program.tree.leaves();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaf(&program, leaves[0]).level, 1);
    assert_eq!(leaf(&program, leaves[1]).level, 2);

    // The outer glyph holds one value token targeting list 3.
    let outer = &leaf(&program, leaves[0]).glyph;
    assert_eq!(outer.data.len(), 1);
    assert_eq!(outer.data[0].list_id, 3);
    assert_eq!(outer.data[0].kind, DataKind::Value { value: 6 });

    // The nested glyph carries the while test.
    let inner = &leaf(&program, leaves[1]).glyph;
    assert_eq!(inner.data.len(), 1);
    assert_eq!(inner.data[0].kind, DataKind::Value { value: -3 });
    assert!(inner.question.is_some());
}

#[test]
fn test_empty_program_is_syntax_error() {
    let parser = Parser::with_builtin_config().unwrap();
    let err = parser.parse("   \n   ").unwrap_err();
    assert!(err.is_syntax());
    assert!(err.to_string().contains("no glyph found"));
}
