use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    dfa::{Acceptance, DfaState, StateNumber, StateRef},
    math::Set,
    SymbolContext,
};

/// Walks an automaton and dumps it into a canonical, diffable text.
///
/// Every edge that is reachable from the start state contributes exactly one line of the
/// form `<source>-<label>-><target>`, where the states are rendered with [`state_label`]
/// and the label is resolved by the [`SymbolContext`]. The lines are sorted before they
/// are returned, so the result does not depend on the order in which states were
/// numbered or edges were added. States without outgoing edges only show up as targets.
pub struct DfaSerializer<'a, C, L> {
    context: C,
    start: Option<StateRef<'a, L>>,
}

impl<'a, C, L> DfaSerializer<'a, C, L>
where
    C: SymbolContext<L>,
{
    /// Creates a serializer that resolves labels through `context` and starts its
    /// traversal at `start`.
    pub fn new(context: C, start: Option<StateRef<'a, L>>) -> Self {
        Self { context, start }
    }

    /// Produces the sorted dump. Returns `Ok(None)` if there is no start state, and
    /// forwards the first error the context reports while rendering a label.
    pub fn render(&self) -> Result<Option<String>, C::Error> {
        let Some(start) = self.start else {
            trace!("no start state, nothing to serialize");
            return Ok(None);
        };

        let mut marked: Set<StateNumber> = Set::default();
        let mut work = VecDeque::from([start]);
        let mut buf = String::new();
        let mut lines = 0usize;

        // states can be queued several times, duplicates are dropped when they are dequeued
        while let Some(state) = work.pop_front() {
            if !marked.insert(state.number()) {
                continue;
            }
            for edge in state.edges() {
                let target = edge.target();
                buf.push_str(&state_label(state.state()));
                buf.push('-');
                buf.push_str(&self.context.render_label(edge.label())?);
                buf.push_str("->");
                buf.push_str(&state_label(target.state()));
                buf.push('\n');
                work.push_back(target);
                lines += 1;
            }
        }
        debug!(
            "visited {} states and emitted {} lines",
            marked.len(),
            lines
        );

        let out = sort_lines(&buf);
        trace!("produced dfa string from automaton\n{}", out);
        Ok(Some(out))
    }
}

/// Renders a state as it appears in a serialized automaton: `s<n>` for states that do not
/// accept, `:s<n>=>` followed by the matching rule names (each preceded by a space) for
/// lexer accept states, and `:s<n>=><alt>` for parser accept states.
pub fn state_label<L>(state: &DfaState<L>) -> String {
    let n = state.number();
    match state.acceptance() {
        Acceptance::NonAccepting => format!("s{n}"),
        Acceptance::Lexer { rules } => {
            format!(":s{n}=>{}", rules.iter().map(|rule| format!(" {rule}")).join(""))
        }
        Acceptance::Parser { alt } => format!(":s{n}=>{alt}"),
    }
}

/// Sorts the lines of `text` lexicographically and joins them with `\n`. A final line
/// terminator is dropped, the result never ends with one.
pub fn sort_lines(text: &str) -> String {
    text.split_terminator('\n').sorted().join("\n")
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use crate::prelude::*;

    fn dump<L: Show>(dfa: &Dfa<L>) -> String {
        dfa.serialize(&PlainSymbols)
            .expect("plain symbols never fail")
            .expect("dfa has a start state")
    }

    #[test_log::test]
    fn lexer_accept_label() {
        let dfa = DfaBuilder::default()
            .with_lexer_accept(4, ["NUM", "FLOAT"])
            .with_edges([(2, "DIGIT", 4)])
            .into_dfa(2);
        assert_eq!(dump(&dfa), "s2-DIGIT->:s4=> NUM FLOAT");
    }

    #[test]
    fn lexer_accept_without_rules() {
        let dfa = DfaBuilder::default()
            .with_lexer_accept(7, std::iter::empty::<&str>())
            .with_edges([(0, "x", 7)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), "s0-x->:s7=>");
    }

    #[test]
    fn parser_accept_label() {
        let dfa = DfaBuilder::default()
            .with_parser_accept(9, 2)
            .with_edges([(1, "a", 9)])
            .into_dfa(1);
        assert_eq!(dump(&dfa), "s1-a->:s9=>2");
    }

    #[test]
    fn accepting_source_is_labeled_too() {
        let dfa = DfaBuilder::default()
            .with_lexer_accept(1, ["ID", "KEYWORD"])
            .with_edges([(0, "i", 1), (1, "f", 2)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), ":s1=> ID KEYWORD-f->s2\ns0-i->:s1=> ID KEYWORD");
    }

    #[test]
    fn lines_are_sorted() {
        let dfa = DfaBuilder::default()
            .with_edges([(3, "x", 1), (1, "y", 2)])
            .into_dfa(3);
        assert_eq!(dump(&dfa), "s1-y->s2\ns3-x->s1");
    }

    #[test]
    fn sorting_is_textual() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 2), (2, "a", 10), (10, "a", 0)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), "s0-a->s2\ns10-a->s0\ns2-a->s10");
    }

    #[test]
    fn cyclic_automaton_terminates() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 1), (1, "b", 0)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), "s0-a->s1\ns1-b->s0");
    }

    #[test]
    fn self_loops_and_parallel_edges_are_kept() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 1), (0, "a", 1), (0, "b", 1), (1, "c", 1)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), "s0-a->s1\ns0-a->s1\ns0-b->s1\ns1-c->s1");
    }

    #[test]
    fn unreachable_states_are_ignored() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 1), (5, "b", 0), (6, "c", 6)])
            .into_dfa(0);
        assert_eq!(dump(&dfa), "s0-a->s1");
    }

    #[test]
    fn missing_start_state_yields_nothing() {
        let dfa: Dfa<&str> = DfaBuilder::default()
            .with_edges([(0, "a", 1)])
            .without_start();
        assert_eq!(dfa.serialize(&PlainSymbols), Ok(None));

        let serializer = DfaSerializer::<_, char>::new(PlainSymbols, None);
        assert_eq!(serializer.render(), Ok(None));
    }

    #[test]
    fn start_without_edges_yields_empty_text() {
        let dfa: Dfa<&str> = DfaBuilder::default().with_states([0]).into_dfa(0);
        assert_eq!(dfa.serialize(&PlainSymbols), Ok(Some(String::new())));
    }

    #[test_log::test]
    fn construction_order_does_not_matter() {
        let edges = [
            (0, "a", 1),
            (0, "b", 2),
            (1, "a", 0),
            (1, "b", 3),
            (2, "a", 4),
            (2, "b", 5),
            (3, "a", 4),
            (3, "b", 5),
            (4, "a", 4),
            (4, "b", 5),
            (5, "a", 5),
            (5, "b", 5),
        ];
        let forward = DfaBuilder::default()
            .with_parser_accept(4, 1)
            .with_lexer_accept(5, ["A", "B"])
            .with_edges(edges)
            .into_dfa(0);
        let backward = DfaBuilder::default()
            .with_states([5, 3, 1])
            .with_lexer_accept(5, ["A", "B"])
            .with_parser_accept(4, 1)
            .with_edges(edges.into_iter().rev())
            .into_dfa(0);

        let expected = dump(&forward);
        assert_eq!(expected, dump(&backward));
        assert_eq!(expected, dump(&forward));
        assert_eq!(expected.lines().count(), edges.len());
    }

    #[test]
    fn serializer_can_start_anywhere() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 1), (1, "b", 2), (2, "c", 0)])
            .into_dfa(0);
        let from_two = DfaSerializer::new(PlainSymbols, dfa.state(2)).render();
        assert_eq!(from_two, Ok(Some(dump(&dfa))));
    }

    #[test]
    fn vocabulary_labels() {
        let tokens = Vocabulary::parser().with_tokens([(1, "ID"), (2, "'('")]);
        let dfa = DfaBuilder::default()
            .with_parser_accept(3, 1)
            .with_parser_accept(4, 2)
            .with_edges([
                (0, EdgeLabel::Atom(1), 3),
                (0, EdgeLabel::Set(vec![(2, 2), (-1, -1)]), 4),
            ])
            .into_dfa(0);
        assert_eq!(
            dfa.serialize(&tokens),
            Ok(Some("s0-ID->:s3=>1\ns0-{'(', EOF}->:s4=>2".to_string()))
        );
    }

    #[derive(Debug, PartialEq)]
    struct Unresolved(&'static str);

    struct Strict;

    impl SymbolContext<&'static str> for Strict {
        type Error = Unresolved;

        fn render_label(&self, label: &&'static str) -> Result<String, Self::Error> {
            match *label {
                "?" => Err(Unresolved("?")),
                other => Ok(other.to_string()),
            }
        }
    }

    fn assert_forwarded<E: Debug + PartialEq>(result: Result<Option<String>, E>, err: E) {
        assert_eq!(result, Err(err));
    }

    #[test]
    fn context_errors_are_forwarded() {
        let dfa = DfaBuilder::default()
            .with_edges([(0, "a", 1), (1, "?", 2)])
            .into_dfa(0);
        assert_forwarded(dfa.serialize(&Strict), Unresolved("?"));

        let fine = DfaBuilder::default().with_edges([(0, "a", 1)]).into_dfa(0);
        assert_eq!(fine.serialize(Strict), Ok(Some("s0-a->s1".to_string())));

        let tokens = Vocabulary::parser();
        let dfa = DfaBuilder::default()
            .with_edges([(0, EdgeLabel::Atom(12), 1)])
            .into_dfa(0);
        assert_eq!(
            dfa.serialize(&tokens),
            Err(SymbolError::UnknownTokenType(12))
        );
    }

    #[test]
    fn state_labels_via_show() {
        let dfa: Dfa<char> = DfaBuilder::default()
            .with_states([0])
            .with_lexer_accept(1, ["ID"])
            .with_parser_accept(2, 3)
            .without_start();
        let labels = dfa.states().map(|q| q.show()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["s0", ":s1=> ID", ":s2=>3"]);
        assert_eq!(state_label(dfa.state(2).unwrap().state()), ":s2=>3");
    }

    #[test]
    fn sort_lines_drops_final_terminator() {
        assert_eq!(sort_lines("b\na\n"), "a\nb");
        assert_eq!(sort_lines("b\na"), "a\nb");
        assert_eq!(sort_lines(""), "");
    }
}
