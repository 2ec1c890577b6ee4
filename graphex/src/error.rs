//! Error types for the pattern engine
//!
//! Errors are grouped by the phase that raises them: lexing the pattern,
//! compiling tokens into a graph, validating a graph before matching, or
//! running out of the matching step budget. Not finding a match is never an
//! error; matchers report it as `Ok(None)`.

use crate::graph::StateId;
use thiserror::Error;

/// The main error type for the pattern engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegexError {
    /// Errors that occur while tokenizing a pattern
    #[error("lexer error at position {position}: {kind}")]
    Lexer {
        /// Byte offset in the pattern where the error occurred
        position: usize,
        /// The specific kind of lexer error
        kind: LexerErrorKind,
    },

    /// Errors that occur while emitting states and transitions
    #[error("compilation error: {0}")]
    Compile(#[from] CompileError),

    /// The graph handed to a matcher breaks a structural invariant
    #[error("malformed graph: {0}")]
    Graph(#[from] GraphError),

    /// The backtracking search used up its configured step budget
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded {
        /// The configured limit
        limit: usize,
    },
}

/// Specific kinds of lexer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerErrorKind {
    /// A character outside the supported pattern alphabet
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    /// A backslash followed by anything other than `d`
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    /// The pattern ends right after a backslash
    #[error("dangling escape at end of pattern")]
    DanglingEscape,
}

/// Errors raised by the compiler after a pattern lexed cleanly
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The pattern has no tokens at all
    #[error("empty pattern")]
    EmptyPattern,

    /// A quantifier with no atom in front of it
    #[error("nothing to repeat before `{operator}` at position {position}")]
    NothingToRepeat {
        /// Byte offset of the quantifier
        position: usize,
        /// The quantifier glyph
        operator: char,
    },

    /// The compilation start state does not exist in the graph
    #[error("start state s{0} does not exist")]
    UnknownStartState(StateId),
}

/// Structural problems found by [`Graph::validate`](crate::graph::Graph::validate)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The graph has no states
    #[error("graph has no states")]
    Empty,

    /// The start state does not exist
    #[error("start state s{0} does not exist")]
    UnknownStartState(StateId),

    /// A state id that was never added
    #[error("state s{0} does not exist")]
    NoSuchState(StateId),

    /// A transition refers to a state that was never added
    #[error("transition #{transition} refers to unknown state s{state}")]
    UnknownState {
        /// Index of the offending transition
        transition: usize,
        /// The unknown state id
        state: StateId,
    },

    /// No state is marked accepting
    #[error("graph has no accepting state")]
    NoAcceptingState,

    /// The start state itself accepts, so every input would match empty
    #[error("start state s{0} is accepting")]
    StartIsAccepting(StateId),

    /// A loop made only of skip transitions, reachable without consuming input
    #[error("skip transitions form a cycle through s{0}")]
    EpsilonCycle(StateId),
}

/// A span representing a location in the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single byte
    pub fn single(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RegexError>;
