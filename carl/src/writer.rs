//! Drives an [`io::Write`] with the N3P prologue, one clause per triple,
//! and the epilogue, mirroring `CN3Writer.cc`'s `start`/`triple`/`end` and
//! its `outputTriple` predicate dispatch.

use std::io::{self, Write};

use crate::ast::N3Node;
use crate::format::{FormatOptions, N3PFormatter};
use crate::ns;
use crate::parse::TripleSink;

/// Writes N3P to any [`io::Write`], counting triples as
/// [`crate::parse::TripleSink`] requires.
pub struct Writer<W: Write> {
    out: W,
    formatter: N3PFormatter,
    source: String,
    count: u32,
    crlf: bool,
}

impl<W: Write> Writer<W> {
    /// Build a writer over `out`. `source` becomes the `scope('<source>').`
    /// fact emitted by [`TripleSink::document`].
    pub fn new(out: W, options: FormatOptions) -> Self {
        Writer {
            out,
            formatter: N3PFormatter::new(options),
            source: String::new(),
            count: 0,
            crlf: cfg!(windows),
        }
    }

    fn newline(&mut self) -> io::Result<()> {
        if self.crlf {
            self.out.write_all(b"\r\n")
        } else {
            self.out.write_all(b"\n")
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.newline()
    }

    fn write_prologue(&mut self) -> io::Result<()> {
        self.write_line(":- style_check(-discontiguous).")?;
        self.write_line(":- style_check(-singleton).")?;
        self.write_line(":- multifile(exopred/3).")?;
        self.write_line(":- multifile(implies/3).")?;
        self.write_line(":- multifile(pfx/2).")?;
        self.write_line(":- multifile(pred/1).")?;
        self.write_line(":- multifile(prfstep/8).")?;
        self.write_line(":- multifile(scope/1).")?;
        self.write_line(":- multifile(scount/1).")?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/fl-rules#mu>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/fl-rules#pi>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/fl-rules#sigma>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#biconditional>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#conditional>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#reflexive>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#relabel>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#tactic>'/2).",
        )?;
        self.write_line(
            ":- multifile('<http://eulersharp.sourceforge.net/2003/03swap/log-rules#transaction>'/2).",
        )?;
        self.write_line(&format!(":- multifile('<{}>'/2).", ns::rdf::FIRST))?;
        self.write_line(&format!(":- multifile('<{}>'/2).", ns::rdf::REST))?;
        self.write_line(&format!(":- multifile('<{}>'/2).", ns::rdf::TYPE))?;
        self.write_line(&format!(":- multifile('<{}>'/2).", ns::log::IMPLIES))?;
        self.write_line(
            ":- multifile('<http://www.w3.org/2000/10/swap/log#outputString>'/2).",
        )?;
        self.write_line(&format!(":- multifile('<{}>'/2).", ns::owl::SAME_AS))?;
        self.write_line(&format!(
            "flag('no-skolem', '{}').",
            crate::format::SKOLEM_PREFIX
        ))
    }

    fn write_epilogue(&mut self) -> io::Result<()> {
        self.write_line(&format!("scount({}).", self.count))?;
        self.write_line("end_of_file.")?;
        self.out.flush()
    }

    fn output_triple(&mut self, subject: &N3Node, property: &N3Node, object: &N3Node) -> io::Result<()> {
        match property {
            N3Node::Iri(uri) if uri == ns::log::IMPLIES => self.output_implies(subject, object),
            N3Node::Iri(uri) if uri == ns::log::REVERSE_IMPLIES => {
                self.output_reverse_implies(subject, object)
            }
            N3Node::Iri(uri) => {
                let line = format!(
                    "'<{}>'({}, {}).",
                    self.formatter.output_uri(uri),
                    self.formatter.format(subject, false),
                    self.formatter.format(object, false),
                );
                self.write_line(&line)
            }
            N3Node::Var(name) => {
                let line = format!(
                    "exopred(_{}, {}, {}).",
                    name,
                    self.formatter.format(subject, false),
                    self.formatter.format(object, false),
                );
                self.write_line(&line)
            }
            other => {
                let line = format!(
                    "{}({}, {}).",
                    self.formatter.format(other, false),
                    self.formatter.format(subject, false),
                    self.formatter.format(object, false),
                );
                self.write_line(&line)
            }
        }
    }

    fn output_implies(&mut self, subject: &N3Node, object: &N3Node) -> io::Result<()> {
        // Each side gets its own conditional wrap (none for empty/single-
        // triple templates, parens for multi-triple ones) from
        // `format_graph`'s `wrap` argument; unlike `output_reverse_implies`
        // below, `implies/3` never suppresses that wrap.
        let body = match subject {
            N3Node::GraphTemplate(g) => self.formatter.format_graph(g, true, true),
            other => self.formatter.format(other, true),
        };
        let head = match object {
            N3Node::GraphTemplate(g) => self.formatter.format_graph(g, true, true),
            other => self.formatter.format(other, true),
        };
        let source = self.formatter.output_uri(&self.source);
        let line = format!("implies({}, {}, '<{}>').", body, head, source);
        self.write_line(&line)
    }

    fn output_reverse_implies(&mut self, subject: &N3Node, object: &N3Node) -> io::Result<()> {
        if let Some(predicate) = extract_predicate(subject) {
            let line = format!("cpred('<{}>').", self.formatter.output_uri(predicate));
            self.write_line(&line)?;
        }

        let head = match subject {
            N3Node::GraphTemplate(g) => self.formatter.format_graph(g, true, true),
            other => self.formatter.format(other, true),
        };
        let body = match object {
            N3Node::GraphTemplate(g) => self.formatter.format_graph(g, false, true),
            other => self.formatter.format(other, true),
        };
        let line = format!("{} :- {}.", head, body);
        self.write_line(&line)
    }

    /// Consume the writer, returning the wrapped `io::Write`.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// If `node` is a single-triple [`N3Node::GraphTemplate`] whose property is
/// a plain IRI, returns that IRI (the predicate `cpred/1` announces before
/// a `Head :- Body.` rule). Mirrors `CN3Writer::extractPredicate`.
fn extract_predicate(node: &N3Node) -> Option<&str> {
    let graph = node.as_graph_template()?;
    if graph.len() != 1 {
        return None;
    }
    graph.iter().next()?.property().as_iri()
}

impl<W: Write> TripleSink for Writer<W> {
    fn start(&mut self) {
        let _ = self.write_prologue();
    }

    fn end(&mut self) {
        let _ = self.write_epilogue();
    }

    fn document(&mut self, source: &str) {
        self.source = source.to_string();
        let line = format!("scope('<{}>').", self.formatter.output_uri(source));
        let _ = self.write_line(&line);
    }

    fn prefix(&mut self, prefix: &str, ns: &str) {
        let line = format!(
            "pfx('{}:','<{}>').",
            self.formatter.output_string(prefix),
            self.formatter.output_uri(ns)
        );
        let _ = self.write_line(&line);
    }

    fn triple(&mut self, subject: &N3Node, property: &N3Node, object: &N3Node) {
        self.count += 1;
        let _ = self.output_triple(subject, property, object);
    }

    fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{GraphTemplate, TriplePattern};

    fn render(f: impl FnOnce(&mut Writer<Vec<u8>>)) -> String {
        let mut writer = Writer::new(Vec::new(), FormatOptions::default());
        f(&mut writer);
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn generic_predicate_is_an_applied_atom() {
        let out = render(|w| {
            w.triple(
                &N3Node::iri("http://example.org/a"),
                &N3Node::iri("http://example.org/p"),
                &N3Node::iri("http://example.org/b"),
            );
        });
        assert!(out.contains("'<http://example.org/p>'('<http://example.org/a>', '<http://example.org/b>')."));
    }

    #[test]
    fn log_implies_renders_implies_predicate() {
        let out = render(|w| {
            w.triple(
                &N3Node::iri("http://example.org/body"),
                &N3Node::iri(ns::log::IMPLIES),
                &N3Node::iri("http://example.org/head"),
            );
        });
        assert!(out.contains("implies("));
    }

    #[test]
    fn log_reverse_implies_renders_horn_rule() {
        let out = render(|w| {
            w.triple(
                &N3Node::iri("http://example.org/head"),
                &N3Node::iri(ns::log::REVERSE_IMPLIES),
                &N3Node::iri("http://example.org/body"),
            );
        });
        assert!(out.contains(":-"));
    }

    #[test]
    fn cpred_is_declared_for_single_triple_graph_subject() {
        let mut graph = GraphTemplate::new("1");
        graph.push(TriplePattern::new(
            N3Node::Var("x".into()),
            N3Node::iri("http://example.org/p"),
            N3Node::Var("y".into()),
        ));
        let out = render(|w| {
            w.triple(
                &N3Node::GraphTemplate(graph),
                &N3Node::iri(ns::log::REVERSE_IMPLIES),
                &N3Node::iri("http://example.org/body"),
            );
        });
        assert!(out.contains("cpred('<http://example.org/p>')."));
    }

    #[test]
    fn var_property_renders_exopred() {
        let out = render(|w| {
            w.triple(
                &N3Node::iri("http://example.org/s"),
                &N3Node::Var("p".into()),
                &N3Node::iri("http://example.org/o"),
            );
        });
        assert!(out.contains("exopred(_p,"));
    }

    #[test]
    fn prologue_declares_skolem_flag() {
        let out = render(|w| {
            w.start();
        });
        assert!(out.contains("flag('no-skolem'"));
    }

    #[test]
    fn epilogue_reports_triple_count() {
        let out = render(|w| {
            w.triple(
                &N3Node::iri("http://example.org/a"),
                &N3Node::iri("http://example.org/p"),
                &N3Node::iri("http://example.org/b"),
            );
            w.end();
        });
        assert!(out.contains("scount(1)."));
        assert!(out.contains("end_of_file."));
    }
}
