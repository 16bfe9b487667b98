//! HTML sanitization for user-supplied résumé text.
//!
//! Two policies, both built on `ammonia`:
//! - plain text: every tag is removed, `<script>`/`<style>` lose their content too.
//! - rich text: an allow-list of formatting tags survives, everything else is removed.
//!
//! Both treat absent input as the empty string and are idempotent.

use std::collections::HashSet;

use ammonia::Builder;

/// Formatting tags permitted in rich-text fields (e.g. professional experience).
const RICH_TEXT_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "s", "ul", "ol", "li", "h1", "h2", "h3", "h4",
    "h5", "h6", "blockquote", "a", "span",
];

const RICH_TEXT_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Elements removed together with everything inside them.
const STRIPPED_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Named references an HTML parser decodes in text even without a trailing `;`.
const LEGACY_NAMED_REFERENCES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
    "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy",
    "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14",
    "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt",
    "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
    "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg",
    "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

const ESCAPED_AMPERSAND: &str = "&amp;";

fn plain_text_policy() -> Builder<'static> {
    let mut builder = Builder::empty();
    builder.clean_content_tags(STRIPPED_CONTENT_TAGS.iter().copied().collect::<HashSet<_>>());
    builder
}

fn rich_text_policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(RICH_TEXT_TAGS.iter().copied().collect::<HashSet<_>>())
        .clean_content_tags(STRIPPED_CONTENT_TAGS.iter().copied().collect::<HashSet<_>>())
        .url_schemes(RICH_TEXT_URL_SCHEMES.iter().copied().collect::<HashSet<_>>())
        .link_rel(Some("noopener noreferrer"));
    builder
}

/// Strips all markup from a short free-text field, keeping visible text.
///
/// `<` and `>` come back as `&lt;`/`&gt;`. A bare `&` stays as typed, so
/// `?a=1&b=2` survives; it is only escaped where a parser would otherwise read
/// it as the start of a character reference.
pub fn sanitize_plain_text<'a>(input: impl Into<Option<&'a str>>) -> String {
    let input = input.into().unwrap_or_default();
    if input.is_empty() {
        return String::new();
    }
    unescape_bare_ampersands(&plain_text_policy().clean(input).to_string())
}

fn unescape_bare_ampersands(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find(ESCAPED_AMPERSAND) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + ESCAPED_AMPERSAND.len()..];
        if reads_as_char_reference(after) {
            out.push_str(ESCAPED_AMPERSAND);
        } else {
            out.push('&');
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Whether text following a raw `&` would be decoded as a character reference.
/// Errs towards `true`; keeping an ampersand escaped never breaks idempotence.
fn reads_as_char_reference(after: &str) -> bool {
    if after.starts_with('#') {
        return true;
    }
    let name_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    if name_len == 0 {
        return false;
    }
    if after[name_len..].starts_with(';') {
        return true;
    }
    LEGACY_NAMED_REFERENCES
        .iter()
        .any(|name| after.starts_with(name))
}

/// Sanitizes a rich-text field against the formatting allow-list.
/// Event handler attributes and non-http(s)/mailto links never survive.
pub fn sanitize_rich_text<'a>(input: impl Into<Option<&'a str>>) -> String {
    let input = input.into().unwrap_or_default();
    if input.is_empty() {
        return String::new();
    }
    rich_text_policy().clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_keeps_ordinary_text() {
        assert_eq!(sanitize_plain_text("Ana Souza"), "Ana Souza");
        assert_eq!(sanitize_plain_text("ana@example.com"), "ana@example.com");
        assert_eq!(sanitize_plain_text("+55 (11) 91234-5678"), "+55 (11) 91234-5678");
    }

    #[test]
    fn test_plain_text_drops_script_and_its_content() {
        let out = sanitize_plain_text("Ana<script>alert(1)</script>");
        assert_eq!(out, "Ana");
    }

    #[test]
    fn test_plain_text_removes_all_tags() {
        assert_eq!(sanitize_plain_text("<b>Ana</b> <i>Souza</i>"), "Ana Souza");
    }

    #[test]
    fn test_plain_text_removes_event_handlers() {
        let out = sanitize_plain_text(r#"<img src="x" onerror="alert(1)">Ana"#);
        assert_eq!(out, "Ana");
    }

    #[test]
    fn test_plain_text_removes_javascript_links() {
        let out = sanitize_plain_text(r#"<a href="javascript:alert(1)">site</a>"#);
        assert_eq!(out, "site");
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn test_plain_text_keeps_ampersands() {
        assert_eq!(
            sanitize_plain_text("https://ana.dev/?a=1&b=2"),
            "https://ana.dev/?a=1&b=2"
        );
        assert_eq!(sanitize_plain_text("Ana & Bruno"), "Ana & Bruno");
        assert_eq!(sanitize_plain_text("P&D"), "P&D");
    }

    #[test]
    fn test_plain_text_still_escapes_angle_brackets() {
        assert_eq!(sanitize_plain_text("a < b > c"), "a &lt; b &gt; c");
        assert_eq!(
            sanitize_plain_text("&lt;script&gt;alert(1)&lt;/script&gt;"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_plain_text_keeps_reference_lookalikes_escaped() {
        // Decoded text "&copy=1" must not turn into "©=1" on a second pass.
        assert_eq!(sanitize_plain_text("?x=1&amp;copy=1"), "?x=1&amp;copy=1");
        assert_eq!(sanitize_plain_text("&amp;amp;"), "&amp;amp;");
        assert_eq!(sanitize_plain_text("&amp;#39;"), "&amp;#39;");
    }

    #[test]
    fn test_plain_text_is_idempotent() {
        let inputs = [
            "https://ana.dev/?a=1&b=2&lang=pt",
            "?x=1&amp;copy=1&not=2",
            "&amp;amp;",
            "& &&nbsp;&#",
            "Tom & Jerry",
            "a < b > c",
            "<script>x</script>Ana",
            "&lt;script&gt;",
            r#"<p style="color:red" onclick="x()">hi</p>"#,
        ];
        for input in inputs {
            let once = sanitize_plain_text(input);
            assert_eq!(sanitize_plain_text(once.as_str()), once, "input: {input}");
        }
    }

    #[test]
    fn test_absent_input_is_empty() {
        assert_eq!(sanitize_plain_text(None), "");
        assert_eq!(sanitize_rich_text(None), "");
        assert_eq!(sanitize_plain_text(""), "");
    }

    #[test]
    fn test_rich_text_strips_script() {
        let out = sanitize_rich_text("<p>dev</p><script>alert(1)</script>");
        assert_eq!(out, "<p>dev</p>");
    }

    #[test]
    fn test_rich_text_keeps_formatting() {
        let input = "<p><strong>Backend</strong> at <em>ACME</em></p><ul><li>Rust</li><li>SQL</li></ul>";
        assert_eq!(sanitize_rich_text(input), input);
    }

    #[test]
    fn test_rich_text_drops_handlers() {
        let out = sanitize_rich_text(r#"<p onclick="steal()">hi</p>"#);
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn test_rich_text_unwraps_disallowed_elements() {
        let out = sanitize_rich_text(r#"<div><iframe src="https://evil"></iframe>texto</div>"#);
        assert!(!out.contains("iframe"));
        assert!(!out.contains("div"));
        assert!(out.contains("texto"));
    }

    #[test]
    fn test_rich_text_rejects_javascript_href() {
        let out = sanitize_rich_text(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!out.contains("javascript"));
        assert!(out.contains(">x</a>"));
    }

    #[test]
    fn test_rich_text_keeps_https_link() {
        let out = sanitize_rich_text(r#"<a href="https://example.com">site</a>"#);
        assert!(out.contains(r#"href="https://example.com""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_rich_text_only_allow_listed_tags_survive() {
        let out = sanitize_rich_text(
            r#"<p>a</p><img src=x><object></object><form><input></form><style>p{}</style><b>b</b>"#,
        );
        assert_eq!(out, "<p>a</p><b>b</b>");
    }

    #[test]
    fn test_rich_text_is_idempotent() {
        let inputs = [
            "<p>dev</p><script>alert(1)</script>",
            r#"<a href="https://example.com" target="_blank">x</a>"#,
            "<ul><li>one<li>two</ul>",
            "5 < 6 & 7 > 3",
            r#"<p onmouseover="x()">unclosed <b>bold"#,
        ];
        for input in inputs {
            let once = sanitize_rich_text(input);
            assert_eq!(sanitize_rich_text(once.as_str()), once, "input: {input}");
        }
    }
}
