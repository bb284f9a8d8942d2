//! Presentation view models for the results step.
//!
//! - [`ResultsReport`](summary::ResultsReport): patient summary and ranked match cards
//! - [`VisualizationGraph`](graph::VisualizationGraph): symptom/condition node-link diagram
//! - [`palette`]: category display colors
//!
//! Nothing here affects matching; it only shapes results for display.

pub mod graph;
pub mod palette;
pub mod summary;

pub use graph::VisualizationGraph;
pub use summary::{MatchCard, ResultsReport};

/// Format an integer with comma thousands separators (`2310` -> `"2,310"`)
#[must_use]
pub fn format_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percent-encode a URL component, leaving only unreserved characters
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`) as-is
#[must_use]
pub fn percent_encode(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Escape text for inclusion in HTML or SVG markup
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(31_870_410), "31,870,410");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Common Cold"), "Common%20Cold");
        assert_eq!(percent_encode("a/b&c"), "a%2Fb%26c");
        assert_eq!(percent_encode("(ok)"), "(ok)");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Pain in groin/pelvis"), "Pain in groin/pelvis");
    }
}
