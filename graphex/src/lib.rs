//! Graphex Core Library
//!
//! A minimal pattern matcher. Patterns are compiled into an explicit state
//! graph, which is then searched with insertion-order backtracking.
//!
//! The pattern language supports literal characters, the wildcard `.`, the
//! digit class `\d`, and the postfix quantifiers `*` and `+`. Parentheses and
//! commas are ordinary literals.
//!
//! ```
//! use graphex::Regex;
//!
//! let regex = Regex::new(r"mul(\d+,\d+)").unwrap();
//! let found: Vec<_> = regex
//!     .find_all("xmul(2,4)%mul(5,5)")
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.as_str())
//!     .collect();
//! assert_eq!(found, vec!["mul(2,4)", "mul(5,5)"]);
//! ```

pub mod compiler;
pub mod dot;
pub mod engine;
pub mod error;
pub mod graph;
pub mod lexer;
pub mod matcher;

pub use compiler::{Piece, Repeat, compile};
pub use dot::{Dot, render_svg, to_dot, write_dot};
pub use engine::Regex;
pub use error::{CompileError, GraphError, LexerErrorKind, RegexError, Result, Span};
pub use graph::{Graph, MatchKind, State, StateId, Transition};
pub use lexer::{Lexer, Token};
pub use matcher::{Config, Match, Matcher, Matches, match_anchored, match_scan};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // pattern -> graph -> scan, feeding the remainder back each time
        let mut graph = Graph::new();
        let s0 = graph.add_state();
        compile(&mut graph, s0, "ab*c").unwrap();

        let mut input = "xacyabbbcz";
        let mut found = Vec::new();
        while let Some(m) = match_scan(&graph, s0, input).unwrap() {
            found.push(m.as_str());
            input = m.remainder();
        }
        assert_eq!(found, vec!["ac", "abbbc"]);
        assert_eq!(input, "z");
    }
}
