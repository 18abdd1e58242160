use crate::{serializer::state_label, Show};

use super::{Edge, StateNumber};

/// What a state accepts, if anything. Lexer accept states know which rules match at
/// them, parser accept states know the single alternative they predict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Acceptance {
    /// The state does not accept.
    #[default]
    NonAccepting,
    /// A lexer accept state. The rule names are kept in the order in which they were
    /// attached to the state, more than one name means the match is ambiguous.
    Lexer {
        /// Names of the lexer rules that match in this state.
        rules: Vec<String>,
    },
    /// A parser accept state that uniquely predicts the alternative `alt`.
    Parser {
        /// The predicted grammar alternative.
        alt: i32,
    },
}

impl Acceptance {
    /// Builds a lexer acceptance from a sequence of rule names.
    pub fn lexer<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Acceptance::Lexer {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a parser acceptance predicting `alt`.
    pub fn parser(alt: i32) -> Self {
        Acceptance::Parser { alt }
    }

    /// Returns `true` for both kinds of accept states.
    pub fn is_accept(&self) -> bool {
        !matches!(self, Acceptance::NonAccepting)
    }
}

/// A single state of a [`super::Dfa`] together with its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState<L> {
    number: StateNumber,
    acceptance: Acceptance,
    edges: Vec<Edge<L>>,
}

impl<L> DfaState<L> {
    pub(crate) fn new(number: StateNumber, acceptance: Acceptance) -> Self {
        Self {
            number,
            acceptance,
            edges: vec![],
        }
    }

    /// The identity of the state.
    pub fn number(&self) -> StateNumber {
        self.number
    }

    /// What the state accepts.
    pub fn acceptance(&self) -> &Acceptance {
        &self.acceptance
    }

    /// Shorthand for `self.acceptance().is_accept()`.
    pub fn is_accept(&self) -> bool {
        self.acceptance.is_accept()
    }

    /// The outgoing edges, in the order in which they were added.
    pub fn edges(&self) -> &[Edge<L>] {
        &self.edges
    }

    pub(crate) fn set_acceptance(&mut self, acceptance: Acceptance) {
        self.acceptance = acceptance;
    }

    pub(crate) fn push_edge(&mut self, edge: Edge<L>) {
        self.edges.push(edge);
    }
}

impl<L> Show for DfaState<L> {
    fn show(&self) -> String {
        state_label(self)
    }
}
