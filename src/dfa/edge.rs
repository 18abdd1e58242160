use super::{Dfa, StateRef};

/// A labeled edge as it is stored inside of a [`Dfa`]. The target is an index into the
/// arena of the automaton that owns the edge, so edges never own the state they point to.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Edge<L> {
    label: L,
    target: usize,
}

impl<L> Edge<L> {
    pub(crate) fn new(label: L, target: usize) -> Self {
        Self { label, target }
    }

    /// The opaque label of the edge.
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Arena index of the target state.
    pub fn target_index(&self) -> usize {
        self.target
    }
}

/// An [`Edge`] viewed through the automaton it belongs to, which makes it possible to
/// follow it to its target.
pub struct EdgeRef<'a, L> {
    dfa: &'a Dfa<L>,
    edge: &'a Edge<L>,
}

impl<'a, L> Clone for EdgeRef<'a, L> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, L> Copy for EdgeRef<'a, L> {}

impl<'a, L> EdgeRef<'a, L> {
    pub(crate) fn new(dfa: &'a Dfa<L>, edge: &'a Edge<L>) -> Self {
        Self { dfa, edge }
    }

    /// The label of the edge.
    pub fn label(&self) -> &'a L {
        &self.edge.label
    }

    /// The state this edge leads to.
    pub fn target(&self) -> StateRef<'a, L> {
        StateRef::new(self.dfa, self.edge.target)
    }
}

impl<'a, L: std::fmt::Debug> std::fmt::Debug for EdgeRef<'a, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-{:?}->{}", self.edge.label, self.target().number())
    }
}
