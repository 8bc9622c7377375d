//! Renders [`N3Node`]s as N3P terms, matching `CN3Writer.cc`'s
//! `N3PFormatter` visitor methods term for term.
//!
//! String and IRI escaping, numeric literal repair, and the skolem/
//! universal-variable choice for blank nodes are all ported from that file;
//! see its `visit(...)` overloads for the term this module's functions are
//! each grounded on.

use crate::ast::{GraphTemplate, Literal, N3Node};
use crate::escape::{self, AstralEncoding};

/// The namespace skolem IRIs mint blank node identifiers under, in
/// non-rule-mode output.
pub const SKOLEM_PREFIX: &str = "https://melgi.github.io/.well-known/genid/#";

/// How astral characters are encoded in emitted strings and IRIs.
pub type CesuMode = AstralEncoding;

/// How decimal literals are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalMode {
    /// `123.45` repaired the same way doubles are (`.45` -> `0.45`, etc).
    Literal,
    /// `12345 rdiv 100`, SWI-Prolog's exact rational syntax.
    Rational,
}

/// Formatting options threaded through every render call.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Astral-character encoding for strings and IRIs.
    pub cesu: CesuMode,
    /// Decimal literal rendering mode.
    pub decimal: DecimalMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            cesu: CesuMode::Utf8,
            decimal: DecimalMode::Literal,
        }
    }
}

/// Renders terms to N3P, given whether the current context is a rule body
/// (in which case blank nodes render as universal variables, not skolem
/// IRIs).
pub struct N3PFormatter {
    options: FormatOptions,
}

impl N3PFormatter {
    /// Build a formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        N3PFormatter { options }
    }

    /// Render `node` as an N3P term. `rule` selects universal-variable
    /// rendering for blank nodes (inside rule bodies/heads) over skolem IRI
    /// rendering (everywhere else).
    pub fn format(&self, node: &N3Node, rule: bool) -> String {
        self.format_in(node, rule, None)
    }

    /// Like [`format`](Self::format), but `graph_id` names the enclosing
    /// graph template (if any), whose ordinal disambiguates blank-node
    /// renderings between positions, per `CN3Writer::genid`.
    fn format_in(&self, node: &N3Node, rule: bool, graph_id: Option<&str>) -> String {
        match node {
            N3Node::Iri(uri) => self.format_uri_resource(uri),
            N3Node::Blank(id) => self.format_blank(id, rule, graph_id),
            N3Node::Var(name) => format!("_{}", name),
            N3Node::Literal(lit) => self.format_literal(lit),
            N3Node::List(items) => self.format_list(items, rule, graph_id),
            N3Node::GraphTemplate(graph) => self.format_graph(graph, true, rule),
        }
    }

    fn format_uri_resource(&self, uri: &str) -> String {
        format!("'<{}>'", self.output_uri(uri))
    }

    fn format_blank(&self, id: &str, rule: bool, graph_id: Option<&str>) -> String {
        if rule {
            // Strip the session prefix up to (and including) its first
            // dash, leaving the per-session-unique suffix, and append the
            // enclosing graph's ordinal so same-named blanks in different
            // rule bodies don't collide as the same Prolog variable.
            let suffix = id.splitn(2, '-').nth(1).unwrap_or(id);
            match graph_id {
                Some(gid) => format!("V{}_{}", suffix.replace('-', "_"), gid),
                None => format!("V{}", suffix.replace('-', "_")),
            }
        } else {
            match graph_id {
                Some(gid) => format!("'<{}{}_{}>'", SKOLEM_PREFIX, self.output_uri(id), gid),
                None => format!("'<{}{}>'", SKOLEM_PREFIX, self.output_uri(id)),
            }
        }
    }

    fn format_list(&self, items: &[N3Node], rule: bool, graph_id: Option<&str>) -> String {
        let rendered: Vec<String> = items
            .iter()
            .map(|item| self.format_in(item, rule, graph_id))
            .collect();
        format!("[{}]", rendered.join(","))
    }

    /// Render a quoted graph template. `wrap` controls whether a
    /// multi-triple body gets parenthesized (the writer suppresses this
    /// when the template is itself the sole argument of `implies/3`, which
    /// already supplies the parens). `rule` selects universal-variable vs.
    /// skolem rendering for the template's own blank nodes; it does not
    /// affect nested graph templates, which always render their own
    /// contents in rule mode once this one does (see `DESIGN.md`).
    pub fn format_graph(&self, graph: &GraphTemplate, wrap: bool, rule: bool) -> String {
        if graph.is_empty() {
            return "true".to_string();
        }
        let gid = graph.id();
        let triples: Vec<String> = graph
            .iter()
            .map(|t| self.format_goal(t, rule, gid))
            .collect();
        if triples.len() == 1 {
            return triples.into_iter().next().unwrap();
        }
        let body = triples.join(", ");
        if wrap {
            format!("({})", body)
        } else {
            body
        }
    }

    /// Render one pattern from inside a [`GraphTemplate`] as a single goal,
    /// applying the same predicate-shaped dispatch the writer uses at the
    /// top level (generic IRI functor, `exopred/3` for a variable property,
    /// and the `Head :- Body` shape for a nested `log:reverseImplies`
    /// pattern) rather than flattening every pattern to `p(s, o)`.
    ///
    /// A nested `log:implies` pattern gets no equivalent special case: per
    /// `CN3Writer::outputTriple`, the 3-ary `implies/3` treatment (and its
    /// `'<source>'` argument) only applies when the triple is emitted at
    /// the top level, not when quoted inside another template; nested, it
    /// falls through to the generic arm below like any other IRI-predicate
    /// pattern.
    fn format_goal(&self, t: &crate::ast::TriplePattern, rule: bool, gid: &str) -> String {
        match t.property() {
            N3Node::Var(name) => format!(
                "exopred(_{}, {}, {})",
                name,
                self.format_in(t.subject(), rule, Some(gid)),
                self.format_in(t.object(), rule, Some(gid)),
            ),
            N3Node::Iri(uri) if uri == crate::ns::log::REVERSE_IMPLIES => {
                let head = match t.subject() {
                    N3Node::GraphTemplate(g) => self.format_graph(g, true, rule),
                    other => self.format_in(other, rule, Some(gid)),
                };
                let body = match t.object() {
                    N3Node::GraphTemplate(g) => self.format_graph(g, false, rule),
                    other => self.format_in(other, rule, Some(gid)),
                };
                format!("({} :- {})", head, body)
            }
            other => format!(
                "{}({}, {})",
                self.format_in(other, rule, Some(gid)),
                self.format_in(t.subject(), rule, Some(gid)),
                self.format_in(t.object(), rule, Some(gid)),
            ),
        }
    }

    fn format_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Integer(lexical) => lexical.clone(),
            Literal::Boolean(value) => (if *value { "true" } else { "false" }).to_string(),
            Literal::Double(lexical) => repair_double(lexical),
            Literal::Decimal(lexical) => self.format_decimal(lexical),
            Literal::String { lexical, lang } => match lang {
                Some(lang) => format!(
                    "literal('{}',lang('{}'))",
                    self.output_string(lexical),
                    lang
                ),
                None => format!(
                    "literal('{}',type('<{}>'))",
                    self.output_string(lexical),
                    crate::ast::xsd::STRING
                ),
            },
            Literal::Other { lexical, datatype } => format!(
                "literal('{}',type('<{}>'))",
                self.output_string(lexical),
                self.output_uri(datatype)
            ),
        }
    }

    fn format_decimal(&self, lexical: &str) -> String {
        match self.options.decimal {
            DecimalMode::Literal => repair_double(lexical),
            DecimalMode::Rational => rational_decimal(lexical),
        }
    }

    /// Escape a string for N3P's `'...'`-quoted atom form, per
    /// `N3PFormatter::output(string&)`: control characters use named
    /// escapes or `\u00HH`, quotes and backslashes are backslash-escaped,
    /// and astral characters are re-encoded per `self.options.cesu`.
    pub fn output_string(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{08}' => out.push_str("\\b"),
                '\u{0C}' => out.push_str("\\f"),
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
                c => escape::push_char(&mut out, c, self.options.cesu),
            }
        }
        out
    }

    /// Escape an IRI for N3P's `'...'`-quoted atom form. Only `'` needs
    /// escaping (IRIs never contain raw control characters or unescaped
    /// backslashes by construction), but astral characters still respect
    /// `self.options.cesu`.
    pub fn output_uri(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                c => escape::push_char(&mut out, c, self.options.cesu),
            }
        }
        out
    }
}

/// Repairs the lexical form of a double/decimal so SWI-Prolog accepts it
/// as a float literal: a leading bare `.` gets a `0`, a trailing bare `.`
/// gets a trailing `0`, and a `.` immediately followed by an exponent
/// marker gets a `0` inserted between them.
fn repair_double(lexical: &str) -> String {
    let (sign, rest) = match lexical.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", lexical.strip_prefix('+').unwrap_or(lexical)),
    };

    let rest = if let Some(stripped) = rest.strip_prefix('.') {
        format!("0.{}", stripped)
    } else {
        rest.to_string()
    };

    let rest = if let Some(dot_idx) = rest.find('.') {
        let after_dot = &rest[dot_idx + 1..];
        if after_dot.is_empty() {
            format!("{}0", rest)
        } else if after_dot.starts_with('e') || after_dot.starts_with('E') {
            format!("{}0{}", &rest[..=dot_idx], after_dot)
        } else {
            rest
        }
    } else {
        rest
    };

    format!("{}{}", sign, rest)
}

/// Renders a decimal lexical form as an exact SWI-Prolog rational: `N rdiv
/// 1` if there's no fractional part, else `N rdiv 10^d` with the decimal
/// point shifted out, per `N3PFormatter::visit(DecimalLiteral&)`'s
/// rational-mode branch.
fn rational_decimal(lexical: &str) -> String {
    let (sign, rest) = match lexical.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", lexical.strip_prefix('+').unwrap_or(lexical)),
    };

    match rest.find('.') {
        None => format!("{}{} rdiv 1", sign, rest),
        Some(dot_idx) => {
            let int_part = &rest[..dot_idx];
            let frac_part = &rest[dot_idx + 1..];
            let numerator = format!("{}{}{}", sign, int_part, frac_part);
            let denominator = format!("1{}", "0".repeat(frac_part.len()));
            format!("{} rdiv {}", numerator, denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TriplePattern;

    fn formatter() -> N3PFormatter {
        N3PFormatter::new(FormatOptions::default())
    }

    #[test]
    fn formats_iri() {
        assert_eq!(
            formatter().format(&N3Node::iri("http://example.org/a"), false),
            "'<http://example.org/a>'"
        );
    }

    #[test]
    fn formats_skolem_blank() {
        let out = formatter().format(&N3Node::blank("abc123-0"), false);
        assert_eq!(out, format!("'<{}abc123-0>'", SKOLEM_PREFIX));
    }

    #[test]
    fn formats_universal_variable_blank_in_rule_mode() {
        let out = formatter().format(&N3Node::blank("abc123-0"), true);
        assert_eq!(out, "V0");
    }

    #[test]
    fn formats_var() {
        assert_eq!(formatter().format(&N3Node::Var("x".into()), true), "_x");
    }

    #[test]
    fn blank_in_graph_template_gets_graph_id_suffix() {
        let mut graph = GraphTemplate::new("3");
        graph.push(TriplePattern::new(
            N3Node::blank("abc123-0"),
            N3Node::iri("http://example.org/p"),
            N3Node::iri("http://example.org/o"),
        ));
        let out = formatter().format_graph(&graph, true, true);
        assert!(out.contains("V0_3"));
    }

    #[test]
    fn skolem_blank_in_graph_template_gets_graph_id_suffix() {
        let mut graph = GraphTemplate::new("3");
        graph.push(TriplePattern::new(
            N3Node::blank("abc123-0"),
            N3Node::iri("http://example.org/p"),
            N3Node::iri("http://example.org/o"),
        ));
        let out = formatter().format_graph(&graph, true, false);
        assert!(out.contains(&format!("'<{}abc123-0_3>'", SKOLEM_PREFIX)));
    }

    #[test]
    fn formats_boolean_literal_as_bare_keyword_not_digit() {
        let out = formatter().format(&N3Node::Literal(Literal::Boolean(true)), false);
        assert_eq!(out, "true");
        let out = formatter().format(&N3Node::Literal(Literal::Boolean(false)), false);
        assert_eq!(out, "false");
    }

    #[test]
    fn formats_integer_literal_as_bare_lexical() {
        let out = formatter().format(&N3Node::Literal(Literal::Integer("42".into())), false);
        assert_eq!(out, "42");
    }

    #[test]
    fn formats_double_literal_as_bare_repaired_lexical() {
        let out = formatter().format(&N3Node::Literal(Literal::Double("5.".into())), false);
        assert_eq!(out, "5.0");
    }

    #[test]
    fn formats_decimal_literal_mode_as_bare_repaired_lexical() {
        let out = formatter().format(&N3Node::Literal(Literal::Decimal("1.25".into())), false);
        assert_eq!(out, "1.25");
        let out = formatter().format(&N3Node::Literal(Literal::Decimal("5.".into())), false);
        assert_eq!(out, "5.0");
    }

    #[test]
    fn repairs_leading_dot_double() {
        assert_eq!(repair_double(".5"), "0.5");
        assert_eq!(repair_double("-.5"), "-0.5");
    }

    #[test]
    fn repairs_trailing_dot_double() {
        assert_eq!(repair_double("5."), "5.0");
    }

    #[test]
    fn repairs_dot_before_exponent() {
        assert_eq!(repair_double("5.E0"), "5.0E0");
    }

    #[test]
    fn decimal_rational_mode_with_fraction() {
        assert_eq!(rational_decimal("1.25"), "125 rdiv 100");
    }

    #[test]
    fn decimal_rational_mode_without_fraction() {
        assert_eq!(rational_decimal("42"), "42 rdiv 1");
    }

    #[test]
    fn formats_string_with_language_tag() {
        let lit = Literal::String {
            lexical: "bonjour".into(),
            lang: Some("fr".into()),
        };
        assert_eq!(
            formatter().format(&N3Node::Literal(lit), false),
            "literal('bonjour',lang('fr'))"
        );
    }

    #[test]
    fn empty_graph_template_is_true() {
        let graph = GraphTemplate::new("1");
        assert_eq!(formatter().format_graph(&graph, true, true), "true");
    }

    #[test]
    fn single_triple_graph_is_unwrapped() {
        let mut graph = GraphTemplate::new("1");
        graph.push(TriplePattern::new(
            N3Node::iri("http://example.org/a"),
            N3Node::iri("http://example.org/b"),
            N3Node::iri("http://example.org/c"),
        ));
        let out = formatter().format_graph(&graph, true, true);
        assert!(!out.starts_with('('));
    }

    #[test]
    fn multi_triple_graph_is_wrapped_when_requested() {
        let mut graph = GraphTemplate::new("1");
        graph.push(TriplePattern::new(
            N3Node::iri("http://example.org/a"),
            N3Node::iri("http://example.org/b"),
            N3Node::iri("http://example.org/c"),
        ));
        graph.push(TriplePattern::new(
            N3Node::iri("http://example.org/d"),
            N3Node::iri("http://example.org/e"),
            N3Node::iri("http://example.org/f"),
        ));
        let out = formatter().format_graph(&graph, true, true);
        assert!(out.starts_with('(') && out.ends_with(')'));
    }
}
