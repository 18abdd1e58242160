//! Canonical text dumps of deterministic finite automata as they are produced by a
//! lexer or parser generator.
//!
//! A [`Dfa`] is an arena of states connected by labeled edges. States are either
//! non-accepting, lexer accept states (carrying the names of the rules that match there)
//! or parser accept states (carrying the uniquely predicted alternative). Edges may form
//! cycles and may run in parallel between the same pair of states.
//!
//! The [`DfaSerializer`] walks everything reachable from a start state in breadth-first
//! order and emits one line per edge of the form `<source>-<label>-><target>`. Edge labels
//! are opaque to the serializer, they are resolved to text by a [`SymbolContext`] that is
//! borrowed for the duration of the call. Once all lines are collected they are sorted, so
//! two automata with the same structure always produce byte-identical output no matter in
//! which order their states and edges were created.
//!
//! ```
//! use dfa_serialize::prelude::*;
//!
//! let dfa = DfaBuilder::default()
//!     .with_lexer_accept(4, ["NUM", "FLOAT"])
//!     .with_edges([(0, "DIGIT", 2), (2, "DIGIT", 4)])
//!     .into_dfa(0);
//!
//! let text = dfa.serialize(&PlainSymbols).unwrap().unwrap();
//! assert_eq!(text, "s0-DIGIT->s2\ns2-DIGIT->:s4=> NUM FLOAT");
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_serialize::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        dfa::{Acceptance, Dfa, DfaBuilder, DfaState, Edge, EdgeRef, StateNumber, StateRef},
        serializer::{sort_lines, state_label, DfaSerializer},
        symbol::{EdgeLabel, GrammarKind, PlainSymbols, SymbolContext, SymbolError, Vocabulary},
        Show,
    };
}

/// Collection type aliases used throughout the crate.
pub mod math;

mod show;
pub use show::Show;

/// The automaton model: states, edges and the arena that owns them.
pub mod dfa;
pub use dfa::{Dfa, DfaBuilder};

/// Resolution of opaque edge labels into text.
pub mod symbol;
pub use symbol::SymbolContext;

/// The breadth-first serializer and its canonicalization step.
pub mod serializer;
pub use serializer::DfaSerializer;
