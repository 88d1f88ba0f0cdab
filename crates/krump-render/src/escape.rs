//! XML escaping for text and attribute values.

use std::borrow::Cow;

/// Characters with a meaning in XML markup.
const RESERVED: [char; 5] = ['&', '<', '>', '"', '\''];

/// Escape `& < > " '` for embedding in SVG text or attributes.
///
/// Strings without reserved characters are returned borrowed and unchanged.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(RESERVED) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    escape_into(&mut out, s);
    Cow::Owned(out)
}

/// Escape `s` into an existing buffer.
pub fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_reserved_chars() {
        assert_eq!(
            escape_xml(r#"<b a="1">Tom & 'Jerry'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/b&gt;"
        );
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_xml("bell state 🔥"), Cow::Borrowed(_)));
    }

    #[test]
    fn escaping_twice_escapes_the_ampersands() {
        let once = escape_xml("a<b").into_owned();
        assert_eq!(escape_xml(&once), "a&amp;lt;b");
    }
}
