//! Input normalization applied before any handler sees a message.

/// A message reduced to ASCII letters, digits, whitespace and hyphens, with
/// surrounding whitespace trimmed.
///
/// Hyphens survive so that `YYYY-MM-DD` dates stay intact. This is not a
/// parser: handlers still validate structure themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedMessage {
    text: String,
    lowered: String,
}

impl SanitizedMessage {
    /// The sanitized text, case preserved.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The sanitized text in lowercase, for keyword matching.
    #[must_use]
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Whether the lowercase text contains any of `keywords`.
    #[must_use]
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.lowered.contains(keyword))
    }
}

/// Sanitizes a raw inbound message.
#[must_use]
pub fn sanitize(raw: &str) -> SanitizedMessage {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let text = kept.trim().to_owned();
    let lowered = text.to_lowercase();
    SanitizedMessage { text, lowered }
}
