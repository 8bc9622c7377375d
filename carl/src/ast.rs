//! The parsed term model: [`N3Node`] and [`TriplePattern`].
//!
//! The reference implementation this crate is a reimplementation of uses a
//! class hierarchy with a visitor (`N3NodeVisitor`) for dispatch. Here the
//! whole family collapses into one tagged `enum`, matched on directly by the
//! formatter.

/// A parsed N3 term.
///
/// Every node is owned: once it is moved into a [`TriplePattern`] or into a
/// [`N3Node::GraphTemplate`]'s pattern list, nothing else aliases it.
#[derive(Debug, Clone, PartialEq)]
pub enum N3Node {
    /// An absolute IRI, already resolved against the current base.
    Iri(String),
    /// A blank node, identified by an opaque id minted by [`crate::blank::BlankIdGen`].
    Blank(String),
    /// A variable, as used inside graph templates (`?x`).
    Var(String),
    /// A literal of one of the recognized or generic datatypes.
    Literal(Literal),
    /// An RDF collection `( e1 e2 ... )`.
    ///
    /// Retained for API completeness and exercised by the formatter (see
    /// `N3PFormatter::format_list`); the core grammar's `collection`
    /// production never actually constructs one itself, since a collection
    /// desugars directly into `rdf:first`/`rdf:rest`/`rdf:nil` triples at
    /// parse time (see [`crate::parse::Parser::collection`]).
    List(Vec<N3Node>),
    /// A quoted formula: `{ ... }`.
    GraphTemplate(GraphTemplate),
}

impl N3Node {
    /// Shorthand for `N3Node::Iri(uri.into())`.
    pub fn iri(uri: impl Into<String>) -> Self {
        N3Node::Iri(uri.into())
    }

    /// Shorthand for `N3Node::Blank(id.into())`.
    pub fn blank(id: impl Into<String>) -> Self {
        N3Node::Blank(id.into())
    }

    /// `true` if this node is an [`N3Node::Iri`].
    pub fn is_iri(&self) -> bool {
        matches!(self, N3Node::Iri(_))
    }

    /// `true` if this node is an [`N3Node::Var`].
    pub fn is_var(&self) -> bool {
        matches!(self, N3Node::Var(_))
    }

    /// `true` if this node is an [`N3Node::GraphTemplate`].
    pub fn is_graph_template(&self) -> bool {
        matches!(self, N3Node::GraphTemplate(_))
    }

    /// The IRI string, if this node is an [`N3Node::Iri`].
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            N3Node::Iri(uri) => Some(uri),
            _ => None,
        }
    }

    /// The underlying [`GraphTemplate`], if this node is one.
    pub fn as_graph_template(&self) -> Option<&GraphTemplate> {
        match self {
            N3Node::GraphTemplate(g) => Some(g),
            _ => None,
        }
    }
}

/// The recognized literal variants.
///
/// A literal's lexical form is bit-exact as scanned: enclosing quote
/// delimiters stripped, and escapes already expanded by [`crate::escape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `xsd:integer`.
    Integer(String),
    /// `xsd:decimal`.
    Decimal(String),
    /// `xsd:double`.
    Double(String),
    /// `xsd:boolean`. The lexical value is normalized to `true`/`false`.
    Boolean(bool),
    /// `xsd:string`, optionally with a BCP-47 language tag.
    String {
        /// The lexical value.
        lexical: String,
        /// The language tag, if any. A non-empty tag implies `xsd:string`
        /// remains the datatype (languages don't get their own type).
        lang: Option<String>,
    },
    /// Any other datatype IRI, including user-defined ones.
    Other {
        /// The lexical value, unvalidated against its claimed datatype.
        lexical: String,
        /// The datatype IRI.
        datatype: String,
    },
}

impl Literal {
    /// The datatype IRI this literal renders with.
    pub fn datatype(&self) -> &str {
        match self {
            Literal::Integer(_) => xsd::INTEGER,
            Literal::Decimal(_) => xsd::DECIMAL,
            Literal::Double(_) => xsd::DOUBLE,
            Literal::Boolean(_) => xsd::BOOLEAN,
            Literal::String { .. } => xsd::STRING,
            Literal::Other { datatype, .. } => datatype,
        }
    }
}

/// `xsd:` datatype IRIs recognized by [`Literal::datatype`] and by the
/// parser's `dtlang` promotion logic.
pub mod xsd {
    /// `xsd:` namespace.
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:integer`.
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:decimal`.
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    /// `xsd:double`.
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:boolean`.
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// `xsd:string`.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

/// A single `(subject, property, object)` pattern, as it appears inside a
/// [`GraphTemplate`] or is pushed to a [`crate::parse::TripleSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct TriplePattern {
    subject: N3Node,
    property: N3Node,
    object: N3Node,
}

impl TriplePattern {
    /// Build a pattern from its three owned parts.
    pub fn new(subject: N3Node, property: N3Node, object: N3Node) -> Self {
        TriplePattern {
            subject,
            property,
            object,
        }
    }

    /// The subject term.
    pub fn subject(&self) -> &N3Node {
        &self.subject
    }

    /// The property (predicate) term.
    pub fn property(&self) -> &N3Node {
        &self.property
    }

    /// The object term.
    pub fn object(&self) -> &N3Node {
        &self.object
    }

    /// Replace the object in place. Used while desugaring `[...]`-valued
    /// objects, where a placeholder blank is pushed before the nested
    /// property list is parsed.
    pub fn set_object(&mut self, object: N3Node) {
        self.object = object;
    }
}

/// A quoted formula: a per-document-ordinal id plus the triple patterns it
/// quotes. Appears as the subject or object of an outer triple, most often
/// one whose property is `log:implies` or the `log:reverseImplies`
/// pseudo-property.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphTemplate {
    id: String,
    triples: Vec<TriplePattern>,
}

impl GraphTemplate {
    /// Start an empty template with the given per-document ordinal id.
    pub fn new(id: impl Into<String>) -> Self {
        GraphTemplate {
            id: id.into(),
            triples: Vec::new(),
        }
    }

    /// The per-document monotonically increasing ordinal assigned to this
    /// template at parse time.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a pattern to the template.
    pub fn push(&mut self, pattern: TriplePattern) {
        self.triples.push(pattern);
    }

    /// The number of patterns accumulated so far.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// `true` if no patterns have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate the accumulated patterns in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, TriplePattern> {
        self.triples.iter()
    }

    /// Mutably access the last pushed pattern. Used by the `[...]`-object
    /// placeholder-patch desugaring.
    pub fn last_mut(&mut self) -> Option<&mut TriplePattern> {
        self.triples.last_mut()
    }
}

impl<'a> IntoIterator for &'a GraphTemplate {
    type Item = &'a TriplePattern;
    type IntoIter = std::slice::Iter<'a, TriplePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
