//! Compiled pattern facade
//!
//! [`Regex`] owns one graph holding exactly one compiled pattern, together
//! with its start state and matching configuration.

use crate::compiler::compile;
use crate::dot::to_dot;
use crate::error::{RegexError, Result};
use crate::graph::{Graph, StateId};
use crate::matcher::{Config, Match, Matcher, Matches};
use std::fmt;
use std::str::FromStr;

/// A compiled pattern
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    graph: Graph,
    start: StateId,
    accept: StateId,
    config: Config,
}

impl Regex {
    /// Compile a pattern with the default configuration
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, Config::default())
    }

    /// Compile a pattern with an explicit matching configuration
    pub fn with_config(pattern: &str, config: Config) -> Result<Self> {
        let mut graph = Graph::new();
        let start = graph.add_state();
        let accept = compile(&mut graph, start, pattern)?;
        graph.validate(start)?;
        Ok(Regex {
            pattern: pattern.to_string(),
            graph,
            start,
            accept,
            config,
        })
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The compiled state graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The state every search starts from
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The accepting state of the compiled pattern
    pub fn accepting(&self) -> StateId {
        self.accept
    }

    /// The matching options in effect
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher::validated(&self.graph, self.start, self.config)
    }

    /// Find the first match anywhere in `input`
    pub fn find<'h>(&self, input: &'h str) -> Result<Option<Match<'h>>> {
        self.matcher().scan(input)
    }

    /// Match only at the very beginning of `input`
    pub fn find_at_start<'h>(&self, input: &'h str) -> Result<Option<Match<'h>>> {
        self.matcher().anchored(input)
    }

    /// Check if the pattern matches anywhere in `input`
    pub fn is_match(&self, input: &str) -> Result<bool> {
        Ok(self.find(input)?.is_some())
    }

    /// Iterate over all non-overlapping matches
    pub fn find_iter<'r, 'h>(&'r self, input: &'h str) -> Matches<'r, 'h> {
        self.matcher().find_iter(input)
    }

    /// Collect every match, stopping at the first error
    pub fn find_all<'h>(&self, input: &'h str) -> Result<Vec<Match<'h>>> {
        self.find_iter(input).collect()
    }

    /// Graphviz DOT source for the compiled automaton
    pub fn to_dot(&self) -> String {
        to_dot(&self.graph)
    }
}

impl FromStr for Regex {
    type Err = RegexError;

    fn from_str(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompileError, LexerErrorKind};

    #[test]
    fn test_regex_literal_match() {
        let regex = Regex::new("abc").unwrap();
        assert!(regex.is_match("abc").unwrap());
        assert!(regex.is_match("xabcy").unwrap());
        assert!(!regex.is_match("ab").unwrap());
        assert!(!regex.is_match("xyz").unwrap());
    }

    #[test]
    fn test_regex_star() {
        let regex = Regex::new("a*b").unwrap();
        assert!(regex.is_match("b").unwrap());
        assert!(regex.is_match("aab").unwrap());
        assert!(!regex.is_match("aaa").unwrap());
    }

    #[test]
    fn test_regex_plus() {
        let regex = Regex::new("a+").unwrap();
        assert!(regex.is_match("a").unwrap());
        assert!(regex.is_match("baaa").unwrap());
        assert!(!regex.is_match("").unwrap());
        assert!(!regex.is_match("bbb").unwrap());
    }

    #[test]
    fn test_regex_dot() {
        let regex = Regex::new("a.b").unwrap();
        assert!(regex.is_match("axb").unwrap());
        assert!(regex.is_match("a b").unwrap());
        assert!(!regex.is_match("ab").unwrap());
    }

    #[test]
    fn test_regex_find() {
        let regex = Regex::new("abc").unwrap();
        let m = regex.find("xabcy").unwrap().unwrap();
        assert_eq!(m.start(), 1);
        assert_eq!(m.end(), 4);
        assert_eq!(m.remainder(), "y");
    }

    #[test]
    fn test_regex_find_at_start() {
        let regex = Regex::new("abc").unwrap();
        assert!(regex.find_at_start("xabc").unwrap().is_none());
        assert_eq!(
            regex.find_at_start("abcx").unwrap().map(|m| m.as_str()),
            Some("abc")
        );
    }

    #[test]
    fn test_regex_find_all() {
        let regex = Regex::new("a").unwrap();
        assert_eq!(regex.find_all("banana").unwrap().len(), 3);

        let regex = Regex::new(r"\d+").unwrap();
        let found: Vec<_> = regex
            .find_all("a1b22c")
            .unwrap()
            .iter()
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["1", "2", "2"]);
    }

    #[test]
    fn test_regex_accessors() {
        let regex: Regex = r"mul(\d+,\d+)".parse().unwrap();
        assert_eq!(regex.as_str(), r"mul(\d+,\d+)");
        assert_eq!(regex.to_string(), r"mul(\d+,\d+)");
        assert_eq!(regex.start(), 0);
        assert_eq!(regex.accepting(), 8);
        assert!(regex.graph().is_accepting(regex.accepting()));
        assert!(regex.to_dot().starts_with("digraph regex {"));
    }

    #[test]
    fn test_regex_errors() {
        assert_eq!(
            Regex::new("").unwrap_err(),
            RegexError::Compile(CompileError::EmptyPattern)
        );
        assert_eq!(
            Regex::new(r"\s").unwrap_err(),
            RegexError::Lexer {
                position: 0,
                kind: LexerErrorKind::InvalidEscape('s'),
            }
        );
        assert!(matches!(
            Regex::new("*a"),
            Err(RegexError::Compile(CompileError::NothingToRepeat { .. }))
        ));
    }

    #[test]
    fn test_regex_step_limit() {
        let regex = Regex::with_config(".*.*.*.*z", Config::new().step_limit(100)).unwrap();
        assert_eq!(regex.config().step_limit, Some(100));
        assert_eq!(
            regex.find("yyyyyyyyyyyyyyyyyyyy").unwrap_err(),
            RegexError::StepLimitExceeded { limit: 100 }
        );
    }
}
