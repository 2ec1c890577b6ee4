//! Backtracking matcher
//!
//! Walks a validated [`Graph`] depth-first. From each state the outgoing
//! transitions are tried in insertion order and the first path that reaches an
//! accepting state wins. Acceptance is checked on arrival, before any
//! transition out of the state is considered, so a match is the first accepted
//! prefix along that path, not the longest one.
//!
//! The search keeps its own stack of frames instead of recursing, so deep
//! inputs cannot overflow the call stack. There is no memoization; an optional
//! step budget in [`Config`] bounds the work of one anchored attempt.

use crate::error::{RegexError, Result};
use crate::graph::{Graph, StateId};
use log::trace;
use std::ops::Range;

/// Matching options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum transitions one anchored attempt may follow; `None` is unbounded
    pub step_limit: Option<usize>,
}

impl Config {
    /// Unbounded matching
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of transitions one anchored attempt may follow
    pub fn step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

/// A match borrowed from the searched input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'h> {
    haystack: &'h str,
    start: usize,
    end: usize,
}

impl<'h> Match<'h> {
    fn new(haystack: &'h str, start: usize, end: usize) -> Self {
        Match {
            haystack,
            start,
            end,
        }
    }

    /// Byte offset where the match starts
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the match
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of the match in the searched input
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the match in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the match consumed no input
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched text
    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.range()]
    }

    /// Everything in the searched input after the match
    pub fn remainder(&self) -> &'h str {
        &self.haystack[self.end..]
    }
}

/// One pending position of the depth-first search
struct Frame {
    state: StateId,
    at: usize,
    /// Index into the graph's transition list to resume scanning from
    cursor: usize,
}

/// A matcher bound to one validated graph and start state
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'g> {
    graph: &'g Graph,
    start: StateId,
    config: Config,
}

impl<'g> Matcher<'g> {
    /// Validate `graph` for matching from `start`
    pub fn new(graph: &'g Graph, start: StateId) -> Result<Self> {
        Self::with_config(graph, start, Config::default())
    }

    /// Validate `graph` for matching from `start` under `config`
    pub fn with_config(graph: &'g Graph, start: StateId, config: Config) -> Result<Self> {
        graph.validate(start)?;
        Ok(Self::validated(graph, start, config))
    }

    /// Build a matcher for a graph the caller already validated from `start`
    pub(crate) fn validated(graph: &'g Graph, start: StateId, config: Config) -> Self {
        Matcher {
            graph,
            start,
            config,
        }
    }

    /// The matching options in effect
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Match a prefix of `input`, starting at offset 0
    pub fn anchored<'h>(&self, input: &'h str) -> Result<Option<Match<'h>>> {
        self.anchored_at(input, 0, true)
    }

    /// Find the first non-empty match anywhere in `input`.
    ///
    /// Anchored attempts are made at every character boundary from the left.
    /// Empty acceptances are passed over while the search backtracks into the
    /// remaining alternatives, so repeatedly scanning [`Match::remainder`]
    /// always makes progress.
    pub fn scan<'h>(&self, input: &'h str) -> Result<Option<Match<'h>>> {
        self.scan_at(input, 0)
    }

    /// Iterate over all non-overlapping matches in `input`, left to right
    pub fn find_iter<'h>(&self, input: &'h str) -> Matches<'g, 'h> {
        Matches {
            matcher: *self,
            haystack: input,
            at: 0,
            done: false,
        }
    }

    fn scan_at<'h>(&self, haystack: &'h str, mut at: usize) -> Result<Option<Match<'h>>> {
        while let Some(c) = haystack[at..].chars().next() {
            if let Some(m) = self.anchored_at(haystack, at, false)? {
                return Ok(Some(m));
            }
            trace!("no match at offset {}", at);
            at += c.len_utf8();
        }
        Ok(None)
    }

    /// Depth-first search from `origin`. With `allow_empty` unset, reaching an
    /// accepting state without consuming input does not end the search.
    fn anchored_at<'h>(
        &self,
        haystack: &'h str,
        origin: usize,
        allow_empty: bool,
    ) -> Result<Option<Match<'h>>> {
        let mut steps = 0usize;
        let mut stack = vec![Frame {
            state: self.start,
            at: origin,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if self.graph.is_accepting(frame.state) && (allow_empty || frame.at > origin) {
                trace!(
                    "accepted s{} at {}..{} after {} steps",
                    frame.state, origin, frame.at, steps
                );
                return Ok(Some(Match::new(haystack, origin, frame.at)));
            }

            let Some(index) = self.graph.next_transition_from(frame.state, frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor = index + 1;

            let transition = self.graph.transitions()[index];
            let Some(next_at) = transition.kind.step(haystack, frame.at) else {
                continue;
            };

            steps += 1;
            if let Some(limit) = self.config.step_limit
                && steps > limit
            {
                return Err(RegexError::StepLimitExceeded { limit });
            }
            stack.push(Frame {
                state: transition.to,
                at: next_at,
                cursor: 0,
            });
        }

        Ok(None)
    }
}

/// Iterator over successive non-overlapping matches
#[derive(Debug)]
pub struct Matches<'g, 'h> {
    matcher: Matcher<'g>,
    haystack: &'h str,
    at: usize,
    done: bool,
}

impl<'h> Iterator for Matches<'_, 'h> {
    type Item = Result<Match<'h>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.matcher.scan_at(self.haystack, self.at) {
            Ok(Some(m)) => {
                self.at = m.end();
                Some(Ok(m))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Match a prefix of `input` against `graph` from `start`
pub fn match_anchored<'h>(
    graph: &Graph,
    start: StateId,
    input: &'h str,
) -> Result<Option<Match<'h>>> {
    Matcher::new(graph, start)?.anchored(input)
}

/// Find the first match anywhere in `input`; the rest of the input is
/// available from [`Match::remainder`]
pub fn match_scan<'h>(
    graph: &Graph,
    start: StateId,
    input: &'h str,
) -> Result<Option<Match<'h>>> {
    Matcher::new(graph, start)?.scan(input)
}
