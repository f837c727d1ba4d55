//! Error-text normalization.

/// Make error text safe for a single physical report line.
///
/// Every `\n` and `\r` becomes one space, then surrounding whitespace is
/// trimmed. Nothing else is touched: tabs, commas, and quotes are left for the
/// exporter to escape.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}
