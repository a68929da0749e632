//! String transforms that undo the escaping applied by the portal's
//! client-side `pageSanitizer`, plus the lenient number parsing the
//! table cells need.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEX_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\x([0-9A-Fa-f]{2})").expect("hex escape pattern"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&[a-z]+;|&#[0-9]+;").expect("entity pattern"));

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("int pattern"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("float pattern")
});

/// Reverses the backslash escapes of a single-quoted JavaScript literal.
///
/// The replacements run in a fixed order and `\\` must come last, otherwise
/// the backslash it produces would be consumed by one of the earlier rules.
pub fn unescape(raw: &str) -> String {
    raw.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\'", "'")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Replaces every `\xHH` sequence with the character of that byte value.
pub fn decode_hex(raw: &str) -> String {
    HEX_ESCAPE
        .replace_all(raw, |caps: &Captures| {
            u8::from_str_radix(&caps[1], 16)
                .map(|byte| char::from(byte).to_string())
                .unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Resolves the handful of entities the portal emits. Anything else,
/// numeric references included, is left as written.
pub fn resolve_entities(raw: &str) -> String {
    ENTITY
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[0];
            match entity {
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                "&#39;" => "'",
                "&nbsp;" => " ",
                _ => entity,
            }
            .to_string()
        })
        .into_owned()
}

/// Parses the integer prefix of `text`, so `"12 hrs"` yields 12.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the decimal prefix of `text`, so `"87.5%"` yields 87.5.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
