use std::convert::Infallible;

use thiserror::Error;

use crate::{math::Map, Show};

/// Resolves the opaque label of an edge to the text that appears in a serialized
/// automaton. A context is borrowed by the serializer for the duration of one call and is
/// never mutated. Failures are reported through [`SymbolContext::Error`] and are passed
/// on to the caller untouched.
pub trait SymbolContext<L> {
    /// The error produced when a label can not be resolved.
    type Error;

    /// Renders `label` as text.
    fn render_label(&self, label: &L) -> Result<String, Self::Error>;
}

impl<L, C: SymbolContext<L> + ?Sized> SymbolContext<L> for &C {
    type Error = C::Error;

    fn render_label(&self, label: &L) -> Result<String, Self::Error> {
        C::render_label(*self, label)
    }
}

/// A context that renders every label through its [`Show`] implementation. It can not
/// fail and is mostly useful for tests and debugging dumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainSymbols;

impl<L: Show> SymbolContext<L> for PlainSymbols {
    type Error = Infallible;

    fn render_label(&self, label: &L) -> Result<String, Self::Error> {
        Ok(label.show())
    }
}

/// Token type that marks the end of the input.
pub const EOF: i32 = -1;

/// The condition under which an edge of a grammar automaton can be taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    /// An edge that consumes no input.
    Epsilon,
    /// A single character (lexer) or token type (parser).
    Atom(i32),
    /// An inclusive range of characters or token types.
    Range(i32, i32),
    /// A union of inclusive ranges, single elements are given as `(x, x)`.
    Set(Vec<(i32, i32)>),
}

/// Distinguishes between the two kinds of grammars, which determines how the atoms of an
/// [`EdgeLabel`] are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// Atoms are unicode code points.
    Lexer,
    /// Atoms are token types.
    Parser,
}

/// Errors that occur when a [`Vocabulary`] can not resolve a label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// A parser edge refers to a token type that has no registered name.
    #[error("token type {0} has no display name in the vocabulary")]
    UnknownTokenType(i32),
    /// A lexer edge refers to a value that is not a unicode scalar value.
    #[error("{0} is not a valid code point")]
    InvalidCodePoint(i32),
}

/// The grammar-level symbol table that turns [`EdgeLabel`]s into text. Lexer vocabularies
/// print characters as quoted literals, parser vocabularies print token display names.
///
/// ```
/// use dfa_serialize::prelude::*;
///
/// let tokens = Vocabulary::parser().with_token(1, "ID").with_token(2, "'='");
/// assert_eq!(tokens.render_label(&EdgeLabel::Atom(2)).unwrap(), "'='");
/// assert_eq!(Vocabulary::lexer().render_label(&EdgeLabel::Range(97, 122)).unwrap(), "'a'..'z'");
/// ```
#[derive(Debug, Clone)]
pub struct Vocabulary {
    kind: GrammarKind,
    names: Map<i32, String>,
}

impl Vocabulary {
    /// Creates an empty vocabulary of the given kind.
    pub fn new(kind: GrammarKind) -> Self {
        Self {
            kind,
            names: Map::default(),
        }
    }

    /// A vocabulary for lexer automata.
    pub fn lexer() -> Self {
        Self::new(GrammarKind::Lexer)
    }

    /// A vocabulary for parser automata.
    pub fn parser() -> Self {
        Self::new(GrammarKind::Parser)
    }

    /// Registers the display name of a token type.
    pub fn with_token<S: Into<String>>(mut self, token_type: i32, name: S) -> Self {
        self.names.insert(token_type, name.into());
        self
    }

    /// Registers several token names at once.
    pub fn with_tokens<I, S>(self, iter: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        iter.into_iter()
            .fold(self, |acc, (t, name)| acc.with_token(t, name))
    }

    /// The kind of grammar this vocabulary belongs to.
    pub fn kind(&self) -> GrammarKind {
        self.kind
    }

    /// Looks up the registered display name of a token type.
    pub fn token_name(&self, token_type: i32) -> Option<&str> {
        self.names.get(&token_type).map(String::as_str)
    }

    fn render_atom(&self, atom: i32) -> Result<String, SymbolError> {
        if atom == EOF {
            return Ok("EOF".to_string());
        }
        match self.kind {
            GrammarKind::Lexer => char_literal(atom),
            GrammarKind::Parser => self
                .token_name(atom)
                .map(str::to_string)
                .ok_or(SymbolError::UnknownTokenType(atom)),
        }
    }

    fn render_range(&self, low: i32, high: i32) -> Result<String, SymbolError> {
        if low == high {
            return self.render_atom(low);
        }
        Ok(format!(
            "{}..{}",
            self.render_atom(low)?,
            self.render_atom(high)?
        ))
    }
}

impl SymbolContext<EdgeLabel> for Vocabulary {
    type Error = SymbolError;

    fn render_label(&self, label: &EdgeLabel) -> Result<String, Self::Error> {
        match label {
            EdgeLabel::Epsilon => Ok("ε".to_string()),
            EdgeLabel::Atom(t) => self.render_atom(*t),
            EdgeLabel::Range(low, high) => self.render_range(*low, *high),
            EdgeLabel::Set(ranges) => {
                let parts = ranges
                    .iter()
                    .map(|(low, high)| self.render_range(*low, *high))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{{{}}}", parts.join(", ")))
            }
        }
    }
}

/// Renders a code point as a quoted character literal, escaping quotes, backslashes and
/// non-printable characters.
fn char_literal(code_point: i32) -> Result<String, SymbolError> {
    let c = u32::try_from(code_point)
        .ok()
        .and_then(char::from_u32)
        .ok_or(SymbolError::InvalidCodePoint(code_point))?;
    let escaped = match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        c if c.is_control() => format!("\\u{:04X}", c as u32),
        c => c.to_string(),
    };
    Ok(format!("'{escaped}'"))
}
