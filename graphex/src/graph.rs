//! State graph construction
//!
//! A [`Graph`] is an append-only collection of states and labeled transitions.
//! States are numbered densely in creation order. Transitions are kept in one
//! global list whose insertion order is significant: the matcher tries the
//! transitions leaving a state in exactly the order they were added.
//!
//! Nothing is validated on insertion. [`Graph::validate`] checks the structural
//! invariants once, before any matching starts.

use crate::error::GraphError;
use std::fmt;

/// A graph state ID
pub type StateId = usize;

/// What a transition consumes from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Exactly this character
    Literal(char),
    /// Any single character
    Wildcard,
    /// Any ASCII digit `0`-`9`
    Digit,
    /// Nothing; an epsilon transition
    Skip,
}

impl MatchKind {
    /// Try to take this transition at byte offset `at` of `haystack`.
    ///
    /// Returns the offset after whatever the transition consumed, or `None`
    /// when the transition does not apply there. Consuming transitions always
    /// take one whole `char`, so the returned offset stays on a UTF-8 boundary.
    pub fn step(&self, haystack: &str, at: usize) -> Option<usize> {
        if self.is_epsilon() {
            return Some(at);
        }
        let c = haystack[at..].chars().next()?;
        self.accepts(c).then(|| at + c.len_utf8())
    }

    /// Whether a consuming transition of this kind accepts `c`
    pub fn accepts(&self, c: char) -> bool {
        match self {
            MatchKind::Literal(expected) => *expected == c,
            MatchKind::Wildcard => true,
            MatchKind::Digit => c.is_ascii_digit(),
            MatchKind::Skip => false,
        }
    }

    /// Whether taking this transition never consumes input
    pub fn is_epsilon(&self) -> bool {
        matches!(self, MatchKind::Skip)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Literal(c) => write!(f, "{}", c),
            MatchKind::Wildcard => write!(f, "."),
            MatchKind::Digit => write!(f, "DIGIT"),
            MatchKind::Skip => write!(f, "SKIP"),
        }
    }
}

/// A directed, labeled edge between two states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub kind: MatchKind,
}

/// A graph state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Whether reaching this state ends a match successfully
    pub is_accepting: bool,
}

/// A pattern automaton: states plus ordered transitions
#[derive(Debug, Clone, Default)]
pub struct Graph {
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Graph {
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Append a non-accepting state and return its ID
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::default());
        id
    }

    /// Append an accepting state and return its ID
    pub fn add_state_accepting(&mut self) -> StateId {
        let id = self.add_state();
        self.states[id].is_accepting = true;
        id
    }

    /// Flag an existing state as accepting
    pub fn mark_accepting(&mut self, state: StateId) -> Result<(), GraphError> {
        match self.states.get_mut(state) {
            Some(s) => {
                s.is_accepting = true;
                Ok(())
            }
            None => Err(GraphError::NoSuchState(state)),
        }
    }

    /// Append a transition. The endpoints are not checked here.
    pub fn add_transition(&mut self, from: StateId, to: StateId, kind: MatchKind) {
        self.transitions.push(Transition { from, to, kind });
    }

    /// All states, indexed by ID
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// All transitions, in insertion order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of states added so far
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions added so far
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Whether `state` was ever added
    pub fn contains_state(&self, state: StateId) -> bool {
        state < self.states.len()
    }

    /// Whether `state` exists and is accepting
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states.get(state).is_some_and(|s| s.is_accepting)
    }

    /// IDs of every accepting state, ascending
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_accepting)
            .map(|(id, _)| id)
    }

    /// Transitions leaving `state`, in insertion order
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.from == state)
    }

    /// Position of the first transition leaving `state` at or after index `from_index`
    pub(crate) fn next_transition_from(&self, state: StateId, from_index: usize) -> Option<usize> {
        self.transitions
            .get(from_index..)?
            .iter()
            .position(|t| t.from == state)
            .map(|offset| from_index + offset)
    }

    /// Edges as `(from, to, label)` triples, for rendering
    pub fn edges(&self) -> impl Iterator<Item = (StateId, StateId, String)> + '_ {
        self.transitions
            .iter()
            .map(|t| (t.from, t.to, t.kind.to_string()))
    }

    /// Check that the graph can be matched from `start`
    pub fn validate(&self, start: StateId) -> Result<(), GraphError> {
        if self.states.is_empty() {
            return Err(GraphError::Empty);
        }
        if !self.contains_state(start) {
            return Err(GraphError::UnknownStartState(start));
        }
        for (index, t) in self.transitions.iter().enumerate() {
            for state in [t.from, t.to] {
                if !self.contains_state(state) {
                    return Err(GraphError::UnknownState {
                        transition: index,
                        state,
                    });
                }
            }
        }
        if self.accepting_states().next().is_none() {
            return Err(GraphError::NoAcceptingState);
        }
        if self.is_accepting(start) {
            return Err(GraphError::StartIsAccepting(start));
        }
        if let Some(state) = self.find_skip_cycle() {
            return Err(GraphError::EpsilonCycle(state));
        }
        Ok(())
    }

    /// Find a state lying on a cycle made only of skip transitions
    fn find_skip_cycle(&self) -> Option<StateId> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            Active,
            Done,
        }

        let mut skips: Vec<Vec<StateId>> = vec![Vec::new(); self.states.len()];
        for t in self.transitions.iter().filter(|t| t.kind.is_epsilon()) {
            skips[t.from].push(t.to);
        }

        let mut marks = vec![Mark::Unvisited; self.states.len()];
        for root in 0..self.states.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::Active;
            let mut stack = vec![(root, 0usize)];
            while let Some((state, next)) = stack.last_mut() {
                if let Some(&target) = skips[*state].get(*next) {
                    *next += 1;
                    match marks[target] {
                        Mark::Active => return Some(target),
                        Mark::Unvisited => {
                            marks[target] = Mark::Active;
                            stack.push((target, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[*state] = Mark::Done;
                    stack.pop();
                }
            }
        }
        None
    }
}
