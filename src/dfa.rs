use crate::{math::Map, serializer::DfaSerializer, Show, SymbolContext};

mod builder;
pub use builder::DfaBuilder;

mod edge;
pub use edge::{Edge, EdgeRef};

mod state;
pub use state::{Acceptance, DfaState};

/// The identity of a state. Numbers are unique within one automaton but need not be
/// contiguous, and they carry no meaning beyond identification and labeling.
pub type StateNumber = u32;

/// A deterministic finite automaton stored as an arena of [`DfaState`]s. Edges refer to
/// their targets by arena index, which allows arbitrary cycles and parallel edges without
/// any state owning another one.
///
/// Automata are usually built with a [`DfaBuilder`], but states and edges can also be
/// added one by one through [`Dfa::add_state`] and [`Dfa::add_edge`].
#[derive(Debug, Clone)]
pub struct Dfa<L> {
    states: Vec<DfaState<L>>,
    indices: Map<StateNumber, usize>,
    start: Option<usize>,
}

impl<L> Default for Dfa<L> {
    fn default() -> Self {
        Self {
            states: vec![],
            indices: Map::default(),
            start: None,
        }
    }
}

impl<L> Dfa<L> {
    /// Creates an empty automaton without a start state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for an automaton with labels of type `L`.
    pub fn builder() -> DfaBuilder<L> {
        DfaBuilder::default()
    }

    /// Number of states in the arena, reachable or not.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the automaton has no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Adds the state `number` with the given acceptance. If a state with this number
    /// exists already, only its acceptance is replaced. Returns `true` if the state was
    /// newly created.
    pub fn add_state(&mut self, number: StateNumber, acceptance: Acceptance) -> bool {
        match self.indices.get(&number) {
            Some(&idx) => {
                self.states[idx].set_acceptance(acceptance);
                false
            }
            None => {
                self.indices.insert(number, self.states.len());
                self.states.push(DfaState::new(number, acceptance));
                true
            }
        }
    }

    /// Adds an edge from `source` to `target` labeled with `label`. Endpoints that do not
    /// exist yet are created as non-accepting states. Parallel edges are kept as they are.
    pub fn add_edge(&mut self, source: StateNumber, label: L, target: StateNumber) {
        let target = self.ensure_state(target);
        let source = self.ensure_state(source);
        self.states[source].push_edge(Edge::new(label, target));
    }

    /// Designates `number` as the start state, creating it if necessary.
    pub fn set_start(&mut self, number: StateNumber) {
        self.start = Some(self.ensure_state(number));
    }

    /// Removes the designation of a start state.
    pub fn clear_start(&mut self) {
        self.start = None;
    }

    /// The start state, if there is one.
    pub fn start(&self) -> Option<StateRef<'_, L>> {
        self.start.map(|idx| StateRef::new(self, idx))
    }

    /// Looks up the state with the given number.
    pub fn state(&self, number: StateNumber) -> Option<StateRef<'_, L>> {
        self.indices
            .get(&number)
            .map(|&idx| StateRef::new(self, idx))
    }

    /// Iterates over all states in the order in which they were created.
    pub fn states(&self) -> impl Iterator<Item = StateRef<'_, L>> + '_ {
        (0..self.states.len()).map(move |idx| StateRef::new(self, idx))
    }

    /// Serializes everything reachable from the start state, see [`DfaSerializer::render`].
    pub fn serialize<C: SymbolContext<L>>(&self, context: C) -> Result<Option<String>, C::Error> {
        DfaSerializer::new(context, self.start()).render()
    }

    fn ensure_state(&mut self, number: StateNumber) -> usize {
        if let Some(&idx) = self.indices.get(&number) {
            return idx;
        }
        let idx = self.states.len();
        self.indices.insert(number, idx);
        self.states.push(DfaState::new(number, Acceptance::NonAccepting));
        idx
    }
}

/// A borrowed handle on a state of a [`Dfa`]. Handles are cheap to copy and allow
/// walking the automaton along its edges, cycles included.
pub struct StateRef<'a, L> {
    dfa: &'a Dfa<L>,
    index: usize,
}

impl<'a, L> Clone for StateRef<'a, L> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, L> Copy for StateRef<'a, L> {}

impl<'a, L> StateRef<'a, L> {
    pub(crate) fn new(dfa: &'a Dfa<L>, index: usize) -> Self {
        debug_assert!(index < dfa.states.len());
        Self { dfa, index }
    }

    /// The underlying state.
    pub fn state(&self) -> &'a DfaState<L> {
        &self.dfa.states[self.index]
    }

    /// Arena index of the state.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The identity of the state.
    pub fn number(&self) -> StateNumber {
        self.state().number()
    }

    /// What the state accepts.
    pub fn acceptance(&self) -> &'a Acceptance {
        self.state().acceptance()
    }

    /// Whether this is an accept state of either kind.
    pub fn is_accept(&self) -> bool {
        self.state().is_accept()
    }

    /// The outgoing edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'a, L>> + 'a {
        let dfa = self.dfa;
        self.state()
            .edges()
            .iter()
            .map(move |edge| EdgeRef::new(dfa, edge))
    }
}

impl<'a, L> Show for StateRef<'a, L> {
    fn show(&self) -> String {
        self.state().show()
    }
}

impl<'a, L> std::fmt::Debug for StateRef<'a, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}
