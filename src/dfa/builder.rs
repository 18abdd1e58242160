use super::{Acceptance, Dfa, StateNumber};

/// Helper struct for the construction of automata. It collects states (with their
/// acceptance) and edges, and only creates the actual [`Dfa`] at the very end. States are
/// created in the order in which they are given, followed by states that only appear as
/// endpoints of edges.
///
/// # Example
///
/// A parser decision with two alternatives, where the lookahead `a` predicts alternative
/// 1 and `b` predicts alternative 2:
/// ```
/// use dfa_serialize::prelude::*;
///
/// let dfa = DfaBuilder::default()
///     .with_parser_accept(1, 1)
///     .with_parser_accept(2, 2)
///     .with_edges([(0, "a", 1), (0, "b", 2)])
///     .into_dfa(0);
/// assert_eq!(dfa.size(), 3);
/// ```
pub struct DfaBuilder<L> {
    states: Vec<(StateNumber, Acceptance)>,
    edges: Vec<(StateNumber, L, StateNumber)>,
}

impl<L> Default for DfaBuilder<L> {
    fn default() -> Self {
        Self {
            states: vec![],
            edges: vec![],
        }
    }
}

impl<L> DfaBuilder<L> {
    /// Adds non-accepting states with the given numbers.
    pub fn with_states<I: IntoIterator<Item = StateNumber>>(mut self, iter: I) -> Self {
        self.states
            .extend(iter.into_iter().map(|q| (q, Acceptance::NonAccepting)));
        self
    }

    /// Adds a state with an explicitly given acceptance.
    pub fn with_state(mut self, number: StateNumber, acceptance: Acceptance) -> Self {
        self.states.push((number, acceptance));
        self
    }

    /// Adds a lexer accept state at which the given rules match, in the given order.
    pub fn with_lexer_accept<I, S>(self, number: StateNumber, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_state(number, Acceptance::lexer(rules))
    }

    /// Adds a parser accept state that predicts `alt`.
    pub fn with_parser_accept(self, number: StateNumber, alt: i32) -> Self {
        self.with_state(number, Acceptance::parser(alt))
    }

    /// Adds edges given as `(source, label, target)` triples. The order of the triples
    /// determines the order of the outgoing edges of each state.
    pub fn with_edges<I: IntoIterator<Item = (StateNumber, L, StateNumber)>>(
        mut self,
        iter: I,
    ) -> Self {
        self.edges.extend(iter);
        self
    }

    /// Builds the automaton with `start` as its start state.
    pub fn into_dfa(self, start: StateNumber) -> Dfa<L> {
        let mut dfa = self.without_start();
        dfa.set_start(start);
        dfa
    }

    /// Builds the automaton without designating a start state.
    pub fn without_start(self) -> Dfa<L> {
        let mut dfa = Dfa::new();
        for (q, acceptance) in self.states {
            dfa.add_state(q, acceptance);
        }
        for (q, label, p) in self.edges {
            dfa.add_edge(q, label, p);
        }
        dfa
    }
}
