//! IRI absoluteness testing and relative-reference resolution.
//!
//! Purely functional, as specified: no state is kept between calls. The
//! parser calls [`resolve`] on every IRI reference and on the value of
//! `@base`/`BASE` directives.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    static ref SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap();
}

/// `true` iff `s` has a scheme, per RFC 3986's `URI` (not `relative-ref`)
/// production.
pub fn absolute(s: &str) -> bool {
    SCHEME.is_match(s)
}

/// Resolve `reference` against `base`, per RFC 3986 §5.3, omitting the
/// query/fragment-of-base-only cases that §4.3's directive/IRI-reference
/// contexts never exercise (a bare base with no reference is never asked
/// for).
///
/// Returns `reference` unchanged (as an owned `String`) when it is already
/// absolute.
pub fn resolve(base: &str, reference: &str) -> String {
    if absolute(reference) {
        return reference.to_string();
    }

    let (base_scheme, rest) = split_scheme(base);

    if let Some(stripped) = reference.strip_prefix("//") {
        // network-path reference: keep the scheme, replace the authority.
        return format!("{}://{}", base_scheme, stripped);
    }

    let (base_authority, base_path_etc) = split_authority(rest);

    if reference.starts_with('/') {
        // absolute-path reference: keep scheme+authority, replace the path.
        return format!(
            "{}://{}{}",
            base_scheme,
            base_authority,
            remove_dot_segments(reference)
        );
    }

    if reference.is_empty() {
        return base.to_string();
    }

    if reference.starts_with('#') || reference.starts_with('?') {
        let base_no_frag = base.split('#').next().unwrap_or(base);
        let base_no_query = if reference.starts_with('?') {
            base_no_frag.split('?').next().unwrap_or(base_no_frag)
        } else {
            base_no_frag
        };
        return format!("{}{}", base_no_query, reference);
    }

    // relative-path reference: merge with the base path.
    let base_path = base_path_etc.split(['?', '#'].as_ref()).next().unwrap_or("");
    let merged = merge_paths(base_authority, base_path, reference);
    let resolved_path = remove_dot_segments(&merged);

    format!("{}://{}{}", base_scheme, base_authority, resolved_path)
}

fn split_scheme(uri: &str) -> (&str, &str) {
    match uri.find(':') {
        Some(idx) => (&uri[..idx], &uri[idx + 1..]),
        None => ("", uri),
    }
}

fn split_authority(rest: &str) -> (&str, &str) {
    if let Some(stripped) = rest.strip_prefix("//") {
        let end = stripped
            .find(|c| c == '/' || c == '?' || c == '#')
            .unwrap_or(stripped.len());
        (&stripped[..end], &stripped[end..])
    } else {
        ("", rest)
    }
}

fn merge_paths(base_authority: &str, base_path: &str, reference_path: &str) -> String {
    if !base_authority.is_empty() && base_path.is_empty() {
        return format!("/{}", reference_path);
    }
    match base_path.rfind('/') {
        Some(idx) => format!("{}{}", &base_path[..=idx], reference_path),
        None => reference_path.to_string(),
    }
}

fn remove_dot_segments(path: &str) -> String {
    let mut input: Vec<&str> = Vec::new();
    // Split while keeping track of a leading slash and trailing slash.
    let leading_slash = path.starts_with('/');
    for seg in path.split('/') {
        input.push(seg);
    }
    if leading_slash && input.first() == Some(&"") {
        input.remove(0);
    }

    let mut output: Vec<&str> = Vec::new();
    for seg in input {
        match seg {
            "." => {}
            ".." => {
                output.pop();
            }
            other => output.push(other),
        }
    }

    let mut result = String::new();
    if leading_slash {
        result.push('/');
    }
    result.push_str(&output.join("/"));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.org/" => true)]
    #[test_case("https://example.org/a/b" => true)]
    #[test_case("urn:isbn:0451450523" => true)]
    #[test_case("/relative/path" => false)]
    #[test_case("relative" => false)]
    #[test_case("#frag" => false)]
    fn absoluteness(s: &str) -> bool {
        absolute(s)
    }

    #[test]
    fn resolve_absolute_passes_through() {
        assert_eq!(
            resolve("http://example.org/", "http://other.org/x"),
            "http://other.org/x"
        );
    }

    #[test]
    fn resolve_relative_path() {
        assert_eq!(
            resolve("http://example.org/a/b", "c"),
            "http://example.org/a/c"
        );
    }

    #[test]
    fn resolve_absolute_path() {
        assert_eq!(
            resolve("http://example.org/a/b", "/c"),
            "http://example.org/c"
        );
    }

    #[test]
    fn resolve_dot_segments() {
        assert_eq!(
            resolve("http://example.org/a/b/c", "../d"),
            "http://example.org/a/d"
        );
    }

    #[test]
    fn resolve_fragment_only() {
        assert_eq!(
            resolve("http://example.org/a", "#frag"),
            "http://example.org/a#frag"
        );
    }

    #[test]
    fn resolve_empty_reference_returns_base() {
        assert_eq!(resolve("http://example.org/a", ""), "http://example.org/a");
    }
}
