//! Pattern compiler
//!
//! Turns a pattern into states and transitions of a [`Graph`]. The pattern is
//! read as a sequence of pieces:
//!
//!   pattern    := piece+
//!   piece      := atom quantifier?
//!   atom       := literal | '.' | '\d'
//!   quantifier := '*' | '+'
//!
//! Each atom becomes one consuming edge `current -> n`. A quantifier rewrites
//! around that edge instead of wrapping it in new sub-automata:
//!
//! - `+` adds a self-loop with the atom's kind on `n`.
//! - `*` adds a skip edge from the atom's source to a fresh state `m`, the same
//!   self-loop on `n`, and a skip edge `n -> m`, then continues from `m`.
//!
//! Insertion order decides which alternative the matcher tries first, so a
//! repeated atom is always preferred over leaving the loop.

use crate::error::{CompileError, Result};
use crate::graph::{Graph, MatchKind, StateId};
use crate::lexer::{Lexer, Token};
use log::debug;

/// How often a piece may repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    ZeroOrMore,
    OneOrMore,
}

/// A single atom plus its optional quantifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: MatchKind,
    pub repeat: Repeat,
}

/// Group lexed tokens into pieces, rejecting quantifiers with nothing to repeat
pub fn parse(pattern: &str) -> Result<Vec<Piece>> {
    let tokens = Lexer::new(pattern).tokenize()?;
    let mut pieces: Vec<Piece> = Vec::with_capacity(tokens.len());
    // Whether the last piece can still take a quantifier
    let mut open = false;

    for (token, span) in tokens {
        let kind = match token {
            Token::Literal(c) => MatchKind::Literal(c),
            Token::Wildcard => MatchKind::Wildcard,
            Token::Digit => MatchKind::Digit,
            Token::Star | Token::Plus => {
                let repeat = if token == Token::Star {
                    Repeat::ZeroOrMore
                } else {
                    Repeat::OneOrMore
                };
                match pieces.last_mut() {
                    Some(piece) if open => piece.repeat = repeat,
                    _ => {
                        return Err(CompileError::NothingToRepeat {
                            position: span.start,
                            operator: if repeat == Repeat::ZeroOrMore { '*' } else { '+' },
                        }
                        .into());
                    }
                }
                open = false;
                continue;
            }
            Token::Eof => break,
        };
        pieces.push(Piece {
            kind,
            repeat: Repeat::Once,
        });
        open = true;
    }

    if pieces.is_empty() {
        return Err(CompileError::EmptyPattern.into());
    }
    Ok(pieces)
}

/// Compile `pattern` into `graph`, starting from the existing state `start`.
///
/// Returns the accepting state created for this pattern. The pattern is fully
/// checked before anything is emitted, so on error the graph is unchanged.
///
/// A graph may hold several compiled patterns. Each keeps its own accepting
/// state; patterns compiled from the same start state act as alternatives,
/// tried in compilation order.
pub fn compile(graph: &mut Graph, start: StateId, pattern: &str) -> Result<StateId> {
    if !graph.contains_state(start) {
        return Err(CompileError::UnknownStartState(start).into());
    }
    let pieces = parse(pattern)?;

    let states_before = graph.state_count();
    let transitions_before = graph.transition_count();

    let mut current = start;
    for piece in &pieces {
        current = emit(graph, current, *piece);
    }
    graph.mark_accepting(current)?;

    debug!(
        "compiled {:?} from s{}: {} pieces, +{} states, +{} transitions, accepting s{}",
        pattern,
        start,
        pieces.len(),
        graph.state_count() - states_before,
        graph.transition_count() - transitions_before,
        current
    );
    Ok(current)
}

/// Emit one piece leaving `current`, returning the state the next piece starts from
fn emit(graph: &mut Graph, current: StateId, piece: Piece) -> StateId {
    let next = graph.add_state();
    graph.add_transition(current, next, piece.kind);

    match piece.repeat {
        Repeat::Once => next,
        Repeat::OneOrMore => {
            graph.add_transition(next, next, piece.kind);
            next
        }
        Repeat::ZeroOrMore => {
            let exit = graph.add_state();
            graph.add_transition(current, exit, MatchKind::Skip);
            graph.add_transition(next, next, piece.kind);
            graph.add_transition(next, exit, MatchKind::Skip);
            exit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexerErrorKind, RegexError};
    use crate::graph::Transition;

    fn compiled(pattern: &str) -> (Graph, StateId) {
        let mut graph = Graph::new();
        let s0 = graph.add_state();
        let accept = compile(&mut graph, s0, pattern).unwrap();
        (graph, accept)
    }

    fn t(from: StateId, to: StateId, kind: MatchKind) -> Transition {
        Transition { from, to, kind }
    }

    #[test]
    fn test_parse_pieces() {
        let pieces = parse(r"a.*\d+").unwrap();
        assert_eq!(
            pieces,
            vec![
                Piece {
                    kind: MatchKind::Literal('a'),
                    repeat: Repeat::Once,
                },
                Piece {
                    kind: MatchKind::Wildcard,
                    repeat: Repeat::ZeroOrMore,
                },
                Piece {
                    kind: MatchKind::Digit,
                    repeat: Repeat::OneOrMore,
                },
            ]
        );
    }

    #[test]
    fn test_compile_literals() {
        let (graph, accept) = compiled("ab");
        assert_eq!(accept, 2);
        assert_eq!(
            graph.transitions(),
            &[t(0, 1, MatchKind::Literal('a')), t(1, 2, MatchKind::Literal('b'))]
        );
        assert_eq!(graph.accepting_states().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_compile_plus() {
        let (graph, accept) = compiled("a+");
        assert_eq!(accept, 1);
        assert_eq!(
            graph.transitions(),
            &[t(0, 1, MatchKind::Literal('a')), t(1, 1, MatchKind::Literal('a'))]
        );
    }

    #[test]
    fn test_compile_star() {
        let (graph, accept) = compiled("a*b");
        assert_eq!(accept, 3);
        assert_eq!(
            graph.transitions(),
            &[
                t(0, 1, MatchKind::Literal('a')),
                t(0, 2, MatchKind::Skip),
                t(1, 1, MatchKind::Literal('a')),
                t(1, 2, MatchKind::Skip),
                t(2, 3, MatchKind::Literal('b')),
            ]
        );
    }

    #[test]
    fn test_compile_digit_plus() {
        let (graph, _) = compiled(r"\d+");
        assert_eq!(
            graph.transitions(),
            &[t(0, 1, MatchKind::Digit), t(1, 1, MatchKind::Digit)]
        );
    }

    #[test]
    fn test_compile_mul_pattern() {
        let (graph, accept) = compiled(r"mul(\d+,\d+)");
        assert_eq!(graph.state_count(), 9);
        assert_eq!(graph.transition_count(), 10);
        assert_eq!(accept, 8);
        graph.validate(0).unwrap();
    }

    #[test]
    fn test_star_after_plus_piece_uses_own_source() {
        // The bypass edge of `b*` starts where `b` starts, not at an older state.
        let (graph, _) = compiled("a+b*");
        let skips: Vec<_> = graph
            .transitions()
            .iter()
            .filter(|tr| tr.kind == MatchKind::Skip)
            .copied()
            .collect();
        assert_eq!(skips, vec![t(1, 3, MatchKind::Skip), t(2, 3, MatchKind::Skip)]);
    }

    #[test]
    fn test_nothing_to_repeat() {
        assert_eq!(
            parse("+a").unwrap_err(),
            RegexError::Compile(CompileError::NothingToRepeat {
                position: 0,
                operator: '+',
            })
        );
        assert_eq!(
            parse("a*+").unwrap_err(),
            RegexError::Compile(CompileError::NothingToRepeat {
                position: 2,
                operator: '+',
            })
        );
        assert_eq!(
            parse(r"\d**").unwrap_err(),
            RegexError::Compile(CompileError::NothingToRepeat {
                position: 3,
                operator: '*',
            })
        );
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(
            parse("").unwrap_err(),
            RegexError::Compile(CompileError::EmptyPattern)
        );
    }

    #[test]
    fn test_errors_leave_graph_untouched() {
        let mut graph = Graph::new();
        let s0 = graph.add_state();

        let err = compile(&mut graph, s0, r"ab\q").unwrap_err();
        assert_eq!(
            err,
            RegexError::Lexer {
                position: 2,
                kind: LexerErrorKind::InvalidEscape('q'),
            }
        );
        assert_eq!(graph.state_count(), 1);
        assert_eq!(graph.transition_count(), 0);

        assert!(compile(&mut graph, s0, "ab++").is_err());
        assert_eq!(graph.state_count(), 1);
        assert_eq!(graph.transition_count(), 0);
    }

    #[test]
    fn test_unknown_start_state() {
        let mut graph = Graph::new();
        assert_eq!(
            compile(&mut graph, 3, "a").unwrap_err(),
            RegexError::Compile(CompileError::UnknownStartState(3))
        );
    }

    #[test]
    fn test_second_compilation_gets_its_own_accepting_state() {
        let mut graph = Graph::new();
        let s0 = graph.add_state();
        let first = compile(&mut graph, s0, "ab").unwrap();
        let second = compile(&mut graph, s0, "cd").unwrap();
        assert_ne!(first, second);
        assert!(graph.is_accepting(first));
        assert!(graph.is_accepting(second));
        assert_eq!(graph.accepting_states().count(), 2);
    }
}
