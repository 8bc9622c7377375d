//! The token alphabet the parser consumes, and the [`TokenSource`]
//! interface a lexer implements to feed it.
//!
//! Lexer construction itself is out of scope here (see
//! [`crate::lexer`] for the bundled reference implementation): the
//! [`Parser`](crate::parse::Parser) only ever depends on this trait.

/// One lexical token, as recognized by the N3 grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// End of input.
    Eof,
    /// `<...>`, already unescaped but not yet resolved against the base.
    IriRef(String),
    /// `prefix:`, split into the bare prefix (no trailing colon).
    PNameNS(String),
    /// `prefix:local`, split into `(prefix, local)`.
    PNameLN(String, String),
    /// `_:label`, the label only (no `_:`).
    BlankNodeLabel(String),
    /// `@en`, `@en-GB`, the tag only (no leading `@`).
    LangTag(String),
    /// An `xsd:integer`-lexical numeral.
    Integer(String),
    /// An `xsd:decimal`-lexical numeral.
    Decimal(String),
    /// An `xsd:double`-lexical numeral.
    Double(String),
    /// A quoted string, already unescaped, any of the four N3 quote forms.
    StringLiteral(String),
    /// `false`.
    False,
    /// `true`.
    True,
    /// `@prefix`.
    Prefix,
    /// `@base`.
    Base,
    /// SPARQL-style `PREFIX` (case-sensitive, no leading `@`).
    SparqlPrefix,
    /// SPARQL-style `BASE` (case-sensitive, no leading `@`).
    SparqlBase,
    /// `^^`.
    CaretCaret,
    /// `<=`.
    ReverseImplies,
    /// `=>`.
    Implies,
    /// `?name`, the name only (no leading `?`).
    Var(String),
    /// A single-character structural token: one of `. ; , { } ( ) [ ] ! ^ =`,
    /// or the bareword `a` (`rdf:type` shorthand).
    Punct(char),
}

/// Feeds [`Token`]s to the parser, one at a time, with one token of
/// lookahead buffered by the parser itself.
///
/// A lexer only needs to implement this trait; how it tokenizes (regex,
/// hand-written state machine, or otherwise) is its own business.
pub trait TokenSource {
    /// An error raised while scanning, convertible to
    /// [`crate::error::ParseError`] by the parser.
    type Error: std::fmt::Display;

    /// Consume and return the next token.
    fn next_token(&mut self) -> Result<Token, Self::Error>;

    /// The 1-based source line the token just returned by `next_token`
    /// started on. Used to annotate parse errors.
    fn line(&self) -> u32;
}
