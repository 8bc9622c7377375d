//! A reference [`TokenSource`] implementation.
//!
//! Not part of the translator's specified core (lexer construction is an
//! external collaborator's job, per the interface in [`crate::token`]) but
//! needed for a runnable binary. Terminal regexes are adapted from the
//! bundled Turtle/N3 terminal grammars this crate's parser descends from.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ParseError;
use crate::token::{Token, TokenSource};

lazy_static! {
    static ref WS_OR_COMMENT: Regex = Regex::new(r"^(?:[ \t\r\n]+|#[^\n]*)").unwrap();
    static ref IRIREF: Regex =
        Regex::new(r#"^<((?:[^\x00-\x20<>"{}|^`\\])|(?:\\u[0-9A-Fa-f]{4})|(?:\\U[0-9A-Fa-f]{8}))*>"#)
            .unwrap();
    static ref PNAME_NS: Regex = Regex::new(
        r"^([A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}][-.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}]*)?:"
    ).unwrap();
    static ref PN_LOCAL: Regex = Regex::new(
        r"^(?:[:0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}]|%[0-9A-Fa-f]{2}|\\[-_~.!$&'()*+,;=/?#@%])(?:[-.:0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}]|%[0-9A-Fa-f]{2}|\\[-_~.!$&'()*+,;=/?#@%])*"
    ).unwrap();
    static ref BLANK_NODE_LABEL: Regex = Regex::new(
        r"^_:[0-9_A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}](?:[-.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}]*[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}])?)?"
    ).unwrap();
    static ref VARNAME: Regex = Regex::new(
        r"^\?[0-9_A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}][0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}]*"
    ).unwrap();
    static ref LANGTAG: Regex = Regex::new(r"^@[A-Za-z]+(?:-[0-9A-Za-z]+)*").unwrap();
    static ref DOUBLE: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+\.[0-9]*[eE][+-]?[0-9]+|\.[0-9]+[eE][+-]?[0-9]+|[0-9]+[eE][+-]?[0-9]+)"
    )
    .unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?[0-9]*\.[0-9]+").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+").unwrap();
    static ref STRING_LONG_QUOTE: Regex =
        Regex::new(r#"^"""(?:"|"")?(?:[^"\\]|\\.)*?"""#).unwrap();
    static ref STRING_LONG_SINGLE: Regex =
        Regex::new(r"^'''(?:'|'')?(?:[^'\\]|\\.)*?'''").unwrap();
    static ref STRING_QUOTE: Regex = Regex::new(r#"^"(?:[^"\\\n\r]|\\.)*""#).unwrap();
    static ref STRING_SINGLE: Regex = Regex::new(r"^'(?:[^'\\\n\r]|\\.)*'").unwrap();
}

/// Scans a complete in-memory document into [`Token`]s.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    /// Start scanning `input` from its beginning.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        self.line += self.input[self.pos..self.pos + n].matches('\n').count() as u32;
        self.pos += n;
    }

    fn skip_trivia(&mut self) {
        while let Some(m) = WS_OR_COMMENT.find(self.rest()) {
            if m.end() == 0 {
                break;
            }
            self.advance(m.end());
        }
    }

    fn strip_string_escapes(&self, lexeme: &str, quote_len: usize) -> String {
        lexeme[quote_len..lexeme.len() - quote_len].to_string()
    }
}

impl<'a> TokenSource for Lexer<'a> {
    type Error = ParseError;

    fn line(&self) -> u32 {
        self.line
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();
        let rest = self.rest();

        if rest.is_empty() {
            return Ok(Token::Eof);
        }

        macro_rules! punct {
            ($c:expr) => {{
                self.advance(1);
                return Ok(Token::Punct($c));
            }};
        }

        let first = rest.chars().next().unwrap();
        match first {
            '.' if rest.as_bytes().get(1).map_or(false, u8::is_ascii_digit) => {
                let m = DECIMAL
                    .find(rest)
                    .ok_or_else(|| ParseError::at("malformed numeric literal", self.line))?;
                let text = m.as_str().to_string();
                self.advance(m.end());
                Ok(Token::Decimal(text))
            }
            '.' | ';' | ',' | '{' | '}' | '(' | ')' | '[' | ']' | '!' => punct!(first),
            '<' => {
                if let Some(m) = IRIREF.find(rest) {
                    let text = crate::escape::unescape(&m.as_str()[1..m.end() - 1], false)?;
                    self.advance(m.end());
                    return Ok(Token::IriRef(text));
                }
                if rest.starts_with("<=") {
                    self.advance(2);
                    return Ok(Token::ReverseImplies);
                }
                Err(ParseError::at("malformed IRIREF", self.line))
            }
            '=' => {
                if rest.starts_with("=>") {
                    self.advance(2);
                    return Ok(Token::Implies);
                }
                punct!('=')
            }
            '^' => {
                if rest.starts_with("^^") {
                    self.advance(2);
                    return Ok(Token::CaretCaret);
                }
                punct!('^')
            }
            '?' => {
                if let Some(m) = VARNAME.find(rest) {
                    let name = m.as_str()[1..].to_string();
                    self.advance(m.end());
                    return Ok(Token::Var(name));
                }
                Err(ParseError::at("malformed variable", self.line))
            }
            '_' if rest.starts_with("_:") => {
                let m = BLANK_NODE_LABEL
                    .find(rest)
                    .ok_or_else(|| ParseError::at("malformed blank node label", self.line))?;
                let label = m.as_str()[2..].to_string();
                self.advance(m.end());
                Ok(Token::BlankNodeLabel(label))
            }
            '@' => {
                if let Some(m) = LANGTAG.find(rest) {
                    let tag = m.as_str()[1..].to_string();
                    self.advance(m.end());
                    return Ok(Token::LangTag(tag));
                }
                if rest.starts_with("@prefix") {
                    self.advance(7);
                    return Ok(Token::Prefix);
                }
                if rest.starts_with("@base") {
                    self.advance(5);
                    return Ok(Token::Base);
                }
                Err(ParseError::at("malformed @ directive", self.line))
            }
            '"' => {
                if let Some(m) = STRING_LONG_QUOTE.find(rest) {
                    let text = crate::escape::unescape(&self.strip_string_escapes(m.as_str(), 3), true)?;
                    self.advance(m.end());
                    return Ok(Token::StringLiteral(text));
                }
                if let Some(m) = STRING_QUOTE.find(rest) {
                    let text = crate::escape::unescape(&self.strip_string_escapes(m.as_str(), 1), true)?;
                    self.advance(m.end());
                    return Ok(Token::StringLiteral(text));
                }
                Err(ParseError::at("unterminated string literal", self.line))
            }
            '\'' => {
                if let Some(m) = STRING_LONG_SINGLE.find(rest) {
                    let text = crate::escape::unescape(&self.strip_string_escapes(m.as_str(), 3), true)?;
                    self.advance(m.end());
                    return Ok(Token::StringLiteral(text));
                }
                if let Some(m) = STRING_SINGLE.find(rest) {
                    let text = crate::escape::unescape(&self.strip_string_escapes(m.as_str(), 1), true)?;
                    self.advance(m.end());
                    return Ok(Token::StringLiteral(text));
                }
                Err(ParseError::at("unterminated string literal", self.line))
            }
            c if c.is_ascii_digit() || ((c == '+' || c == '-') && rest.len() > 1) => {
                if let Some(m) = DOUBLE.find(rest) {
                    let text = m.as_str().to_string();
                    self.advance(m.end());
                    return Ok(Token::Double(text));
                }
                if let Some(m) = DECIMAL.find(rest) {
                    let text = m.as_str().to_string();
                    self.advance(m.end());
                    return Ok(Token::Decimal(text));
                }
                if let Some(m) = INTEGER.find(rest) {
                    let text = m.as_str().to_string();
                    self.advance(m.end());
                    return Ok(Token::Integer(text));
                }
                Err(ParseError::at("malformed numeric literal", self.line))
            }
            'a' if rest.len() == 1 || !is_pn_continuation(rest.as_bytes()[1]) => {
                self.advance(1);
                Ok(Token::Punct('a'))
            }
            _ => {
                if rest.starts_with("PREFIX") && !follows_pn(rest, 6) {
                    self.advance(6);
                    return Ok(Token::SparqlPrefix);
                }
                if rest.starts_with("BASE") && !follows_pn(rest, 4) {
                    self.advance(4);
                    return Ok(Token::SparqlBase);
                }
                if rest.starts_with("true") && !follows_pn(rest, 4) {
                    self.advance(4);
                    return Ok(Token::True);
                }
                if rest.starts_with("false") && !follows_pn(rest, 5) {
                    self.advance(5);
                    return Ok(Token::False);
                }
                if let Some(m) = PNAME_NS.find(rest) {
                    let prefix = m.as_str()[..m.end() - 1].to_string();
                    let after = &rest[m.end()..];
                    if let Some(local) = PN_LOCAL.find(after) {
                        if local.end() > 0 {
                            let local_text = local.as_str().to_string();
                            self.advance(m.end() + local.end());
                            return Ok(Token::PNameLN(prefix, local_text));
                        }
                    }
                    self.advance(m.end());
                    return Ok(Token::PNameNS(prefix));
                }
                Err(ParseError::at(
                    format!("unexpected character '{}'", first),
                    self.line,
                ))
            }
        }
    }
}

fn is_pn_continuation(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_' || b == b':'
}

fn follows_pn(rest: &str, keyword_len: usize) -> bool {
    rest.as_bytes()
        .get(keyword_len)
        .map(|&b| is_pn_continuation(b))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok == Token::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn scans_prefixed_name() {
        assert_eq!(
            tokens(":foo ."),
            vec![
                Token::PNameLN("".into(), "foo".into()),
                Token::Punct('.'),
                Token::Eof
            ]
        );
    }

    #[test]
    fn scans_iriref() {
        assert_eq!(
            tokens("<http://example.org/>"),
            vec![Token::IriRef("http://example.org/".into()), Token::Eof]
        );
    }

    #[test]
    fn scans_variable() {
        assert_eq!(
            tokens("?x"),
            vec![Token::Var("x".into()), Token::Eof]
        );
    }

    #[test]
    fn scans_boolean_keywords() {
        assert_eq!(tokens("true false"), vec![Token::True, Token::False, Token::Eof]);
    }

    #[test]
    fn scans_numeric_literals() {
        assert_eq!(
            tokens("1 1.5 1.5e3"),
            vec![
                Token::Integer("1".into()),
                Token::Decimal("1.5".into()),
                Token::Double("1.5e3".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn scans_implies_arrows() {
        assert_eq!(
            tokens("=> <="),
            vec![Token::Implies, Token::ReverseImplies, Token::Eof]
        );
    }

    #[test]
    fn scans_string_with_escape() {
        assert_eq!(
            tokens(r#""a\tb""#),
            vec![Token::StringLiteral("a\tb".into()), Token::Eof]
        );
    }

    #[test]
    fn scans_decimal_with_no_leading_digit() {
        assert_eq!(
            tokens(".5 ."),
            vec![Token::Decimal(".5".into()), Token::Punct('.'), Token::Eof]
        );
    }

    #[test]
    fn a_keyword_is_rdf_type_shorthand() {
        assert_eq!(tokens("a"), vec![Token::Punct('a'), Token::Eof]);
    }
}
