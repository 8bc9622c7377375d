//! The LL(k) recursive-descent parser and the [`TripleSink`] it drives.
//!
//! Grounded on the original `Parser.cc`: this module keeps its grammar
//! (including the rule/var-aware productions used inside `{ ... }` graph
//! templates) but consolidates the original's two near-identical
//! production families — plain and `*var` — only where a shared helper
//! stays a faithful match; anywhere the two diverge in the original this
//! keeps them as separate methods, same as the source grammar does.
//!
//! Two deliberate departures from the original, both documented again in
//! `DESIGN.md`:
//! - `addTriple`'s placeholder-then-patch triple reordering (a
//!   micro-optimization in the reference build) is not replicated; triples
//!   are pushed in natural traversal order.
//! - a blank-node or bracketed property inside a graph template now
//!   correctly routes its objects through the template instead of escaping
//!   to the top-level sink.

use std::collections::HashMap;

use crate::ast::{GraphTemplate, Literal, N3Node, TriplePattern};
use crate::blank::BlankIdGen;
use crate::error::{Error, ParseError, Result};
use crate::escape;
use crate::iri;
use crate::ns;
use crate::token::{Token, TokenSource};

/// Receives triples, prefix declarations and document boundaries as the
/// parser discovers them. Mirrors the original `TripleSink` interface.
pub trait TripleSink {
    /// Called once before the first triple of the first input document.
    fn start(&mut self) {}
    /// Called once after the last input document has been fully parsed.
    fn end(&mut self) {}
    /// Called once per input document, with its resolved base IRI.
    fn document(&mut self, _source: &str) {}
    /// Called for every `@prefix`/`PREFIX` directive encountered.
    fn prefix(&mut self, _prefix: &str, _ns: &str) {}
    /// Called for every top-level triple the document asserts.
    fn triple(&mut self, subject: &N3Node, property: &N3Node, object: &N3Node);
    /// The number of triples pushed so far.
    fn count(&self) -> u32;
}

/// A [`TripleSink`] that discards triples and only counts them. Useful in
/// tests that only care about the parser accepting or rejecting input.
#[derive(Debug, Default)]
pub struct CountingSink(u32);

impl TripleSink for CountingSink {
    fn triple(&mut self, _subject: &N3Node, _property: &N3Node, _object: &N3Node) {
        self.0 += 1;
    }

    fn count(&self) -> u32 {
        self.0
    }
}

/// Parses one N3 document, pushing triples to a [`TripleSink`] as they are
/// recognized (except inside `{ ... }` graph templates, which accumulate
/// internally and are pushed as a single [`N3Node::GraphTemplate`]).
pub struct Parser<'s, T: TokenSource> {
    tokens: T,
    base: String,
    prefixes: HashMap<String, String>,
    blanks: BlankIdGen,
    graph_counter: u32,
    lookahead: Token,
    sink: &'s mut dyn TripleSink,
}

impl<'s, T: TokenSource> Parser<'s, T> {
    /// Start a parser over `tokens`, resolving relative IRIs against
    /// `base`, pushing triples to `sink`.
    pub fn new(mut tokens: T, base: impl Into<String>, sink: &'s mut dyn TripleSink) -> Result<Self> {
        let lookahead = Self::read(&mut tokens)?;
        Ok(Parser {
            tokens,
            base: base.into(),
            prefixes: HashMap::new(),
            blanks: BlankIdGen::new(),
            graph_counter: 0,
            lookahead,
            sink,
        })
    }

    fn read(tokens: &mut T) -> Result<Token> {
        tokens
            .next_token()
            .map_err(|e| Error::from(ParseError::at(e.to_string(), tokens.line())))
    }

    fn bump(&mut self) -> Result<Token> {
        let next = Self::read(&mut self.tokens)?;
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    fn expect_punct(&mut self, c: char) -> Result<()> {
        if self.lookahead == Token::Punct(c) {
            self.bump()?;
            Ok(())
        } else {
            self.fail(format!("expected '{}'", c))
        }
    }

    fn fail<X>(&self, message: impl Into<String>) -> Result<X> {
        Err(Error::from(ParseError::at(message, self.tokens.line())))
    }

    fn fresh_blank(&mut self) -> N3Node {
        N3Node::blank(self.blanks.fresh())
    }

    fn to_uri(&self, prefix: &str, local: &str) -> Result<String> {
        let ns = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| Error::InvalidPrefix(prefix.to_string()))?;
        let local = escape::unescape_pname_local(local)
            .map_err(|e| Error::from(e.with_line(self.tokens.line())))?;
        Ok(format!("{}{}", ns, local))
    }

    fn resolve(&self, reference: &str) -> String {
        iri::resolve(&self.base, reference)
    }

    /// Parse one complete, self-contained document: `start()`, this
    /// document's body, then `end()`. The common case for a single-input
    /// translation (see [`crate::translate`]).
    ///
    /// A CLI translating several input files into one N3P session instead
    /// calls [`Parser::parse_document`] once per file, bracketed by a single
    /// `sink.start()`/`sink.end()` pair of its own — see `main.rs`.
    pub fn parse(&mut self) -> Result<()> {
        self.sink.start();
        self.parse_document()?;
        self.sink.end();
        Ok(())
    }

    /// Parse this document's body, driving `self.sink` with `document(...)`
    /// followed by the directives and triples in source order. Does not
    /// call `start()`/`end()`; the caller brackets one or more calls to this
    /// method with those itself.
    pub fn parse_document(&mut self) -> Result<()> {
        let base = self.base.clone();
        self.sink.document(&base);

        while self.lookahead != Token::Eof {
            match &self.lookahead {
                Token::Prefix => self.prefix_id()?,
                Token::Base => self.base_directive()?,
                Token::SparqlPrefix => self.sparql_prefix()?,
                Token::SparqlBase => self.sparql_base()?,
                tok if is_subject_start(tok) => {
                    self.triples()?;
                    self.expect_punct('.')?;
                }
                _ => return self.fail("expected base, prefix or triple"),
            }
        }

        Ok(())
    }

    fn base_directive(&mut self) -> Result<()> {
        self.bump()?; // @base
        let uri = self.expect_iriref()?;
        self.expect_punct('.')?;
        self.base = self.resolve(&uri);
        Ok(())
    }

    fn sparql_base(&mut self) -> Result<()> {
        self.bump()?; // BASE
        let uri = self.expect_iriref()?;
        self.base = self.resolve(&uri);
        Ok(())
    }

    fn prefix_id(&mut self) -> Result<()> {
        self.bump()?; // @prefix
        let prefix = self.expect_pname_ns()?;
        let uri = self.expect_iriref()?;
        self.expect_punct('.')?;
        let ns = self.resolve(&uri);
        self.sink.prefix(&prefix, &ns);
        self.prefixes.insert(prefix, ns);
        Ok(())
    }

    fn sparql_prefix(&mut self) -> Result<()> {
        self.bump()?; // PREFIX
        let prefix = self.expect_pname_ns()?;
        let uri = self.expect_iriref()?;
        let ns = self.resolve(&uri);
        self.sink.prefix(&prefix, &ns);
        self.prefixes.insert(prefix, ns);
        Ok(())
    }

    fn expect_iriref(&mut self) -> Result<String> {
        match self.bump()? {
            Token::IriRef(s) => Ok(s),
            _ => self.fail("expected IRI reference"),
        }
    }

    fn expect_pname_ns(&mut self) -> Result<String> {
        match self.bump()? {
            Token::PNameNS(prefix) => Ok(prefix),
            _ => self.fail("expected prefixed name"),
        }
    }

    fn iri(&mut self) -> Result<String> {
        match self.bump()? {
            Token::IriRef(uri) => {
                if iri::absolute(&uri) {
                    Ok(uri)
                } else {
                    Ok(self.resolve(&uri))
                }
            }
            Token::PNameNS(prefix) => self.to_uri(&prefix, ""),
            Token::PNameLN(prefix, local) => self.to_uri(&prefix, &local),
            _ => self.fail("expected IRI ref or prefixed name"),
        }
    }

    fn iri_node(&mut self) -> Result<N3Node> {
        Ok(N3Node::iri(self.iri()?))
    }

    // -- top-level grammar -------------------------------------------------

    fn triples(&mut self) -> Result<()> {
        if self.lookahead == Token::Punct('[') {
            let s = self.blanknodepropertylist()?;
            let s = self.path(s)?;
            self.propertylistopt(&s)
        } else if is_subject_start(&self.lookahead) {
            let s = self.subject()?;
            let s = self.path(s)?;
            self.propertylist(&s)
        } else {
            self.fail("expected blank node, uri or list as subject")
        }
    }

    fn subject(&mut self) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::PNameLN(..) | Token::PNameNS(_) | Token::IriRef(_) => self.iri_node(),
            Token::BlankNodeLabel(label) => {
                self.bump()?;
                Ok(N3Node::blank(self.blanks.from_label(&label)))
            }
            Token::Punct('{') => self.graph_template(),
            Token::Punct('(') => self.collection(),
            _ => self.literal_node(),
        }
    }

    fn object(&mut self) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::Punct('[') => self.blanknodepropertylist(),
            _ => self.subject(),
        }
    }

    fn literal_node(&mut self) -> Result<N3Node> {
        let literal = match self.bump()? {
            Token::StringLiteral(s) => return Ok(N3Node::Literal(self.dtlang(s)?)),
            Token::Integer(s) => Literal::Integer(s),
            Token::Decimal(s) => Literal::Decimal(s),
            Token::Double(s) => Literal::Double(s),
            Token::True => Literal::Boolean(true),
            Token::False => Literal::Boolean(false),
            _ => return self.fail("expected blank node, iri, literal or list"),
        };
        Ok(N3Node::Literal(literal))
    }

    fn dtlang(&mut self, lexical: String) -> Result<Literal> {
        match &self.lookahead {
            Token::LangTag(_) => {
                let tag = match self.bump()? {
                    Token::LangTag(t) => t,
                    _ => unreachable!(),
                };
                Ok(Literal::String {
                    lexical,
                    lang: Some(tag),
                })
            }
            Token::CaretCaret => {
                self.bump()?;
                let datatype = self.iri()?;
                Ok(match datatype.as_str() {
                    crate::ast::xsd::INTEGER => Literal::Integer(lexical),
                    crate::ast::xsd::DECIMAL => Literal::Decimal(lexical),
                    crate::ast::xsd::DOUBLE => Literal::Double(lexical),
                    crate::ast::xsd::BOOLEAN => Literal::Boolean(lexical == "true" || lexical == "1"),
                    crate::ast::xsd::STRING => Literal::String {
                        lexical,
                        lang: None,
                    },
                    _ => Literal::Other { lexical, datatype },
                })
            }
            _ => Ok(Literal::String {
                lexical,
                lang: None,
            }),
        }
    }

    fn propertylist(&mut self, subject: &N3Node) -> Result<()> {
        if !is_property_start(&self.lookahead) {
            return self.fail("expected 'a' or uri as property");
        }
        self.property(subject)?;
        while self.lookahead == Token::Punct(';') {
            self.bump()?;
            if is_property_start(&self.lookahead) {
                self.property(subject)?;
            }
        }
        Ok(())
    }

    fn propertylistopt(&mut self, subject: &N3Node) -> Result<()> {
        if is_property_start(&self.lookahead) {
            self.propertylist(subject)
        } else {
            Ok(())
        }
    }

    fn property(&mut self, subject: &N3Node) -> Result<()> {
        let property = self.property_term()?;
        self.objectlist(subject, &property)
    }

    fn property_term(&mut self) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::Punct('a') => {
                self.bump()?;
                Ok(N3Node::iri(ns::rdf::TYPE))
            }
            Token::PNameLN(..) | Token::PNameNS(_) | Token::IriRef(_) => self.iri_node(),
            Token::BlankNodeLabel(label) => {
                self.bump()?;
                Ok(N3Node::blank(self.blanks.from_label(&label)))
            }
            Token::Punct('[') => self.blanknodepropertylist(),
            Token::Implies => {
                self.bump()?;
                Ok(N3Node::iri(ns::log::IMPLIES))
            }
            Token::ReverseImplies => {
                self.bump()?;
                Ok(N3Node::iri(ns::log::REVERSE_IMPLIES))
            }
            Token::Punct('=') => {
                self.bump()?;
                Ok(N3Node::iri(ns::owl::SAME_AS))
            }
            _ => self.fail("expected 'a' or uri as property"),
        }
    }

    fn objectlist(&mut self, subject: &N3Node, property: &N3Node) -> Result<()> {
        if !is_object_start(&self.lookahead) {
            return self.fail("expected object");
        }
        let obj = self.object()?;
        let obj = self.path(obj)?;
        self.sink.triple(subject, property, &obj);
        while self.lookahead == Token::Punct(',') {
            self.bump()?;
            if !is_object_start(&self.lookahead) {
                return self.fail("expected object after ','");
            }
            let obj = self.object()?;
            let obj = self.path(obj)?;
            self.sink.triple(subject, property, &obj);
        }
        Ok(())
    }

    fn blanknodepropertylist(&mut self) -> Result<N3Node> {
        let node = self.fresh_blank();
        self.expect_punct('[')?;
        self.propertylistopt(&node)?;
        self.expect_punct(']')?;
        Ok(node)
    }

    fn collection(&mut self) -> Result<N3Node> {
        self.expect_punct('(')?;
        let mut items = Vec::new();
        while self.lookahead != Token::Punct(')') {
            let obj = self.object()?;
            let obj = self.path(obj)?;
            items.push(obj);
        }
        self.expect_punct(')')?;
        Ok(self.desugar_collection_top(items))
    }

    /// Desugars a parenthesized collection into a fresh-blank-per-cons-cell
    /// `rdf:first`/`rdf:rest` chain terminated by `rdf:nil`, per the
    /// specified collection semantics (see `SPEC_FULL.md` §4.3). The
    /// reference build instead keeps collections as a first-class list term
    /// all the way to the writer; here that representation survives only as
    /// [`N3Node::List`], which this production never constructs.
    fn desugar_collection_top(&mut self, items: Vec<N3Node>) -> N3Node {
        if items.is_empty() {
            return N3Node::iri(ns::rdf::NIL);
        }
        let cells: Vec<String> = (0..items.len()).map(|_| self.blanks.fresh()).collect();
        for (i, item) in items.into_iter().enumerate() {
            let cell = N3Node::blank(cells[i].clone());
            let rest = match cells.get(i + 1) {
                Some(next) => N3Node::blank(next.clone()),
                None => N3Node::iri(ns::rdf::NIL),
            };
            self.sink.triple(&cell, &N3Node::iri(ns::rdf::FIRST), &item);
            self.sink.triple(&cell, &N3Node::iri(ns::rdf::REST), &rest);
        }
        N3Node::blank(cells[0].clone())
    }

    fn path(&mut self, mut subject: N3Node) -> Result<N3Node> {
        loop {
            let forward = match self.lookahead {
                Token::Punct('!') => true,
                Token::Punct('^') => false,
                _ => break,
            };
            self.bump()?;
            let property = self.path_property()?;
            let blank = self.fresh_blank();
            if forward {
                self.sink.triple(&subject, &property, &blank);
            } else {
                self.sink.triple(&blank, &property, &subject);
            }
            subject = blank;
        }
        Ok(subject)
    }

    fn path_property(&mut self) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::PNameLN(..) | Token::PNameNS(_) | Token::IriRef(_) => self.iri_node(),
            Token::BlankNodeLabel(label) => {
                self.bump()?;
                Ok(N3Node::blank(self.blanks.from_label(&label)))
            }
            Token::Punct('[') => self.blanknodepropertylist(),
            _ => self.fail("expected IRI ref, prefixed name or blanknode as path"),
        }
    }

    // -- graph template grammar ---------------------------------------------

    fn graph_template(&mut self) -> Result<N3Node> {
        self.graph_counter += 1;
        let mut graph = GraphTemplate::new(self.graph_counter.to_string());
        self.expect_punct('{')?;

        while self.lookahead != Token::Punct('}') {
            if self.lookahead == Token::Punct('[') {
                let s = self.blanknodepropertylistvar(&mut graph)?;
                let s = self.path_var(s, &mut graph)?;
                self.propertylistoptvar(&mut graph, &s)?;
            } else if is_subjectorvar_start(&self.lookahead) {
                let s = self.subjectorvar(&mut graph)?;
                let s = self.path_var(s, &mut graph)?;
                self.propertylistvar(&mut graph, &s)?;
            } else {
                return self.fail("expected triple or '}'");
            }

            if self.lookahead == Token::Punct('.') {
                self.bump()?;
            }
        }

        self.expect_punct('}')?;
        Ok(N3Node::GraphTemplate(graph))
    }

    fn subjectorvar(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        if let Token::Var(name) = self.lookahead.clone() {
            self.bump()?;
            return Ok(N3Node::Var(name));
        }
        self.subject_in_graph(graph)
    }

    fn subject_in_graph(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::Punct('(') => self.collection_var(graph),
            _ => self.subject(),
        }
    }

    fn objectorvar(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        if let Token::Var(name) = self.lookahead.clone() {
            self.bump()?;
            return Ok(N3Node::Var(name));
        }
        self.object_in_graph(graph)
    }

    fn object_in_graph(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        match self.lookahead.clone() {
            Token::Punct('[') => self.blanknodepropertylistvar(graph),
            Token::Punct('(') => self.collection_var(graph),
            _ => self.subject(),
        }
    }

    fn propertylistvar(&mut self, graph: &mut GraphTemplate, subject: &N3Node) -> Result<()> {
        if !is_property_start_var(&self.lookahead) {
            return self.fail("expected var or uri as property");
        }
        self.propertyorvar(graph, subject)?;
        while self.lookahead == Token::Punct(';') {
            self.bump()?;
            if is_property_start_var(&self.lookahead) {
                self.propertyorvar(graph, subject)?;
            }
        }
        Ok(())
    }

    fn propertylistoptvar(&mut self, graph: &mut GraphTemplate, subject: &N3Node) -> Result<()> {
        if is_property_start_var(&self.lookahead) {
            self.propertylistvar(graph, subject)
        } else {
            Ok(())
        }
    }

    fn propertyorvar(&mut self, graph: &mut GraphTemplate, subject: &N3Node) -> Result<()> {
        let property = match self.lookahead.clone() {
            Token::Var(name) => {
                self.bump()?;
                N3Node::Var(name)
            }
            Token::Punct('a') => {
                self.bump()?;
                N3Node::iri(ns::rdf::TYPE)
            }
            Token::PNameLN(..) | Token::PNameNS(_) | Token::IriRef(_) => self.iri_node()?,
            Token::BlankNodeLabel(label) => {
                self.bump()?;
                N3Node::blank(self.blanks.from_label(&label))
            }
            Token::Punct('[') => self.blanknodepropertylistvar(graph)?,
            Token::Implies => {
                self.bump()?;
                N3Node::iri(ns::log::IMPLIES)
            }
            Token::ReverseImplies => {
                self.bump()?;
                N3Node::iri(ns::log::REVERSE_IMPLIES)
            }
            Token::Punct('=') => {
                self.bump()?;
                N3Node::iri(ns::owl::SAME_AS)
            }
            _ => return self.fail("expected var or uri as property"),
        };
        self.objectlistvar(graph, subject, &property)
    }

    fn objectlistvar(
        &mut self,
        graph: &mut GraphTemplate,
        subject: &N3Node,
        property: &N3Node,
    ) -> Result<()> {
        if !is_objectorvar_start(&self.lookahead) {
            return self.fail("expected object");
        }
        self.add_triple(graph, subject, property)?;
        while self.lookahead == Token::Punct(',') {
            self.bump()?;
            if !is_objectorvar_start(&self.lookahead) {
                return self.fail("expected object after ','");
            }
            self.add_triple(graph, subject, property)?;
        }
        Ok(())
    }

    fn add_triple(
        &mut self,
        graph: &mut GraphTemplate,
        subject: &N3Node,
        property: &N3Node,
    ) -> Result<()> {
        let obj = self.objectorvar(graph)?;
        let obj = self.path_var(obj, graph)?;
        graph.push(TriplePattern::new(subject.clone(), property.clone(), obj));
        Ok(())
    }

    fn blanknodepropertylistvar(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        let node = self.fresh_blank();
        self.expect_punct('[')?;
        self.propertylistoptvar(graph, &node)?;
        self.expect_punct(']')?;
        Ok(node)
    }

    fn collection_var(&mut self, graph: &mut GraphTemplate) -> Result<N3Node> {
        self.expect_punct('(')?;
        let mut items = Vec::new();
        while self.lookahead != Token::Punct(')') {
            let obj = self.objectorvar(graph)?;
            let obj = self.path_var(obj, graph)?;
            items.push(obj);
        }
        self.expect_punct(')')?;
        Ok(self.desugar_collection_var(graph, items))
    }

    fn desugar_collection_var(&mut self, graph: &mut GraphTemplate, items: Vec<N3Node>) -> N3Node {
        if items.is_empty() {
            return N3Node::iri(ns::rdf::NIL);
        }
        let cells: Vec<String> = (0..items.len()).map(|_| self.blanks.fresh()).collect();
        for (i, item) in items.into_iter().enumerate() {
            let cell = N3Node::blank(cells[i].clone());
            let rest = match cells.get(i + 1) {
                Some(next) => N3Node::blank(next.clone()),
                None => N3Node::iri(ns::rdf::NIL),
            };
            graph.push(TriplePattern::new(
                cell.clone(),
                N3Node::iri(ns::rdf::FIRST),
                item,
            ));
            graph.push(TriplePattern::new(cell, N3Node::iri(ns::rdf::REST), rest));
        }
        N3Node::blank(cells[0].clone())
    }

    fn path_var(&mut self, mut subject: N3Node, graph: &mut GraphTemplate) -> Result<N3Node> {
        loop {
            let forward = match self.lookahead {
                Token::Punct('!') => true,
                Token::Punct('^') => false,
                _ => break,
            };
            self.bump()?;
            let property = self.path_property()?;
            let blank = self.fresh_blank();
            let pattern = if forward {
                TriplePattern::new(subject, property, blank.clone())
            } else {
                TriplePattern::new(blank.clone(), property, subject)
            };
            graph.push(pattern);
            subject = blank;
        }
        Ok(subject)
    }
}

fn is_subject_start(tok: &Token) -> bool {
    matches!(
        tok,
        Token::PNameLN(..)
            | Token::PNameNS(_)
            | Token::IriRef(_)
            | Token::BlankNodeLabel(_)
            | Token::Punct('{')
            | Token::Punct('(')
            | Token::StringLiteral(_)
            | Token::True
            | Token::False
            | Token::Integer(_)
            | Token::Decimal(_)
            | Token::Double(_)
    )
}

fn is_object_start(tok: &Token) -> bool {
    is_subject_start(tok) || matches!(tok, Token::Punct('['))
}

fn is_subjectorvar_start(tok: &Token) -> bool {
    is_subject_start(tok) || matches!(tok, Token::Var(_))
}

fn is_objectorvar_start(tok: &Token) -> bool {
    is_object_start(tok) || matches!(tok, Token::Var(_))
}

fn is_property_start(tok: &Token) -> bool {
    matches!(
        tok,
        Token::Punct('a')
            | Token::PNameLN(..)
            | Token::PNameNS(_)
            | Token::IriRef(_)
            | Token::BlankNodeLabel(_)
            | Token::Punct('[')
            | Token::Punct('=')
            | Token::Implies
            | Token::ReverseImplies
    )
}

fn is_property_start_var(tok: &Token) -> bool {
    is_property_start(tok) || matches!(tok, Token::Var(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_count(input: &str) -> Result<u32> {
        let lexer = Lexer::new(input);
        let mut sink = CountingSink::default();
        let mut parser = Parser::new(lexer, "http://example.org/", &mut sink)?;
        parser.parse()?;
        Ok(sink.count())
    }

    #[test]
    fn empty_document_has_no_triples() {
        assert_eq!(parse_count("").unwrap(), 0);
    }

    #[test]
    fn single_triple() {
        assert_eq!(
            parse_count("<http://example.org/a> <http://example.org/b> <http://example.org/c> .")
                .unwrap(),
            1
        );
    }

    #[test]
    fn prefixed_names_and_a_keyword() {
        assert_eq!(
            parse_count("@prefix ex: <http://example.org/> .\nex:a a ex:Thing .").unwrap(),
            1
        );
    }

    #[test]
    fn semicolon_and_comma_lists() {
        assert_eq!(
            parse_count(
                "@prefix ex: <http://example.org/> .\nex:a ex:p ex:b, ex:c ; ex:q ex:d ."
            )
            .unwrap(),
            3
        );
    }

    #[test]
    fn collection_desugars_to_first_rest_nil() {
        // 2 elements -> 2 cells * 2 triples (first, rest) = 4, plus the
        // enclosing triple that points at the list head.
        assert_eq!(
            parse_count(
                "@prefix ex: <http://example.org/> .\nex:a ex:p (ex:x ex:y) ."
            )
            .unwrap(),
            5
        );
    }

    #[test]
    fn empty_collection_is_rdf_nil() {
        assert_eq!(
            parse_count("@prefix ex: <http://example.org/> .\nex:a ex:p () .").unwrap(),
            1
        );
    }

    #[test]
    fn blank_node_property_list() {
        assert_eq!(
            parse_count(
                "@prefix ex: <http://example.org/> .\nex:a ex:p [ ex:q ex:r ] ."
            )
            .unwrap(),
            2
        );
    }

    #[test]
    fn graph_template_does_not_push_inner_triples_to_sink() {
        // only the outer `ex:a log:implies { ... }` triple should reach the
        // top-level sink; the template's own contents stay internal.
        assert_eq!(
            parse_count(
                "@prefix ex: <http://example.org/> .\nex:a ex:p { ex:b ex:c ex:d . } ."
            )
            .unwrap(),
            1
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_count("@@@").is_err());
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        assert!(parse_count("ex:a ex:p ex:o .").is_err());
    }
}
