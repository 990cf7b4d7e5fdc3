//! Envelope matchers.
//!
//! An [`EventMatcher`] decides whether an envelope that already passed the
//! category gate is claimed by a handler. The set of variants is closed:
//!
//! | Variant                      | Claims when                                        |
//! |------------------------------|----------------------------------------------------|
//! | `TypeOnly`                   | always                                             |
//! | `ExactString`                | the extracted text equals the expected string      |
//! | `RegexPattern`               | the pattern finds a match anywhere in the text     |
//! | `StructuredPostbackPattern`  | the pattern finds a match in the postback payload  |
//!
//! Which text is extracted is controlled by [`TextSource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use hooksmith_framework::{EventMatcher, TextSource};
//!
//! let hello = EventMatcher::exact("hello", TextSource::MessageText).ignore_case();
//! let yes = EventMatcher::regex("ye+s", TextSource::MessageText)?;
//! let buy = EventMatcher::postback_pattern("^BUY_[0-9]+$")?;
//! ```

use std::fmt;

use regex::Regex;

use crate::error::{MatcherError, MatcherResult};
use hooksmith_core::{Envelope, EventCategory};

// =============================================================================
// Text Source
// =============================================================================

/// The envelope field a string matcher inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextSource {
    /// `message.text`
    #[default]
    MessageText,
    /// `message.quick_reply.payload`
    QuickReplyPayload,
    /// `postback.payload`
    PostbackPayload,
}

impl TextSource {
    /// The natural text for handlers registered on `category`.
    pub fn for_category(category: EventCategory) -> Self {
        match category {
            EventCategory::QuickReplyMessage => Self::QuickReplyPayload,
            EventCategory::Postback => Self::PostbackPayload,
            _ => Self::MessageText,
        }
    }

    /// Extracts the selected field, `""` when absent.
    pub fn extract<'a>(&self, envelope: &'a Envelope) -> &'a str {
        match self {
            Self::MessageText => envelope.message_text(),
            Self::QuickReplyPayload => envelope.quick_reply_payload(),
            Self::PostbackPayload => envelope.postback_payload(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MessageText => "message_text",
            Self::QuickReplyPayload => "quick_reply_payload",
            Self::PostbackPayload => "postback_payload",
        }
    }
}

// =============================================================================
// Event Matcher
// =============================================================================

/// Decides whether a handler claims an envelope.
#[derive(Debug, Clone, Default)]
pub enum EventMatcher {
    /// Claims every envelope of the handler's category.
    #[default]
    TypeOnly,
    /// Equality on the extracted text.
    ExactString {
        expected: String,
        case_sensitive: bool,
        source: TextSource,
    },
    /// Unanchored regular expression search on the extracted text.
    RegexPattern { pattern: Regex, source: TextSource },
    /// Unanchored regular expression search on the postback payload.
    StructuredPostbackPattern { pattern: Regex },
}

impl EventMatcher {
    /// Case-sensitive equality against `source`.
    pub fn exact(expected: impl Into<String>, source: TextSource) -> Self {
        Self::ExactString {
            expected: expected.into(),
            case_sensitive: true,
            source,
        }
    }

    /// Case-insensitive equality against `source`.
    pub fn exact_ignore_case(expected: impl Into<String>, source: TextSource) -> Self {
        Self::exact(expected, source).ignore_case()
    }

    /// Compiles `pattern` into a search on `source`.
    pub fn regex(pattern: &str, source: TextSource) -> MatcherResult<Self> {
        let pattern = compile(pattern)?;
        Ok(Self::RegexPattern { pattern, source })
    }

    /// Wraps an already compiled regular expression.
    pub fn from_regex(pattern: Regex, source: TextSource) -> Self {
        Self::RegexPattern { pattern, source }
    }

    /// Compiles `pattern` into a search on the postback payload.
    pub fn postback_pattern(pattern: &str) -> MatcherResult<Self> {
        let pattern = compile(pattern)?;
        Ok(Self::StructuredPostbackPattern { pattern })
    }

    /// Turns an exact matcher case-insensitive. Other variants are returned
    /// unchanged.
    pub fn ignore_case(self) -> Self {
        match self {
            Self::ExactString {
                expected, source, ..
            } => Self::ExactString {
                expected,
                case_sensitive: false,
                source,
            },
            other => other,
        }
    }

    /// Returns `true` if this matcher claims `envelope`.
    pub fn matches(&self, envelope: &Envelope) -> bool {
        match self {
            Self::TypeOnly => true,
            Self::ExactString {
                expected,
                case_sensitive,
                source,
            } => {
                let actual = source.extract(envelope);
                if *case_sensitive {
                    actual == expected
                } else {
                    actual.to_lowercase() == expected.to_lowercase()
                }
            }
            Self::RegexPattern { pattern, source } => pattern.is_match(source.extract(envelope)),
            Self::StructuredPostbackPattern { pattern } => {
                pattern.is_match(envelope.postback_payload())
            }
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeOnly => "type_only",
            Self::ExactString { .. } => "exact",
            Self::RegexPattern { .. } => "regex",
            Self::StructuredPostbackPattern { .. } => "postback_pattern",
        }
    }
}

impl fmt::Display for EventMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeOnly => f.write_str("type_only"),
            Self::ExactString {
                expected,
                case_sensitive,
                source,
            } => {
                let mode = if *case_sensitive { "exact" } else { "exact_ci" };
                write!(f, "{mode}({}={expected:?})", source.as_str())
            }
            Self::RegexPattern { pattern, source } => {
                write!(f, "regex({}=/{}/)", source.as_str(), pattern.as_str())
            }
            Self::StructuredPostbackPattern { pattern } => {
                write!(f, "postback_pattern(/{}/)", pattern.as_str())
            }
        }
    }
}

fn compile(pattern: &str) -> MatcherResult<Regex> {
    Regex::new(pattern).map_err(|e| MatcherError::invalid_pattern(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(text: &str) -> Envelope {
        Envelope::from_value(json!({ "message": { "text": text } })).unwrap()
    }

    fn postback(payload: &str) -> Envelope {
        Envelope::from_value(json!({ "postback": { "payload": payload } })).unwrap()
    }

    #[test]
    fn test_type_only_matches_everything() {
        assert!(EventMatcher::TypeOnly.matches(&text("anything")));
        assert!(EventMatcher::default().matches(&Envelope::default()));
    }

    #[test]
    fn test_exact_case_insensitive() {
        let matcher = EventMatcher::exact_ignore_case("HELLO", TextSource::MessageText);
        assert!(matcher.matches(&text("Hello")));
        assert!(matcher.matches(&text("hello")));
        assert!(!matcher.matches(&text("Hell")));
    }

    #[test]
    fn test_exact_case_sensitive() {
        let matcher = EventMatcher::exact("HELLO", TextSource::MessageText);
        assert!(matcher.matches(&text("HELLO")));
        assert!(!matcher.matches(&text("Hello")));
    }

    #[test]
    fn test_exact_absent_field_is_empty() {
        let empty = EventMatcher::exact("", TextSource::PostbackPayload);
        assert!(empty.matches(&text("hello")));

        let hello = EventMatcher::exact("hello", TextSource::PostbackPayload);
        assert!(!hello.matches(&text("hello")));
    }

    #[test]
    fn test_regex_is_unanchored() {
        let matcher = EventMatcher::regex("ye+s", TextSource::MessageText).unwrap();
        assert!(matcher.matches(&text("say yes please")));
        assert!(matcher.matches(&text("yeees")));
        assert!(!matcher.matches(&text("nope")));
    }

    #[test]
    fn test_invalid_regex() {
        let err = EventMatcher::regex("(unclosed", TextSource::MessageText).unwrap_err();
        let MatcherError::InvalidPattern { pattern, .. } = err;
        assert_eq!(pattern, "(unclosed");

        assert!(EventMatcher::postback_pattern("[").is_err());
    }

    #[test]
    fn test_postback_pattern_reads_payload() {
        let matcher = EventMatcher::postback_pattern("^BUY_[0-9]+$").unwrap();
        assert!(matcher.matches(&postback("BUY_42")));
        assert!(!matcher.matches(&postback("BUY_NOW")));
        assert!(!matcher.matches(&text("BUY_42")));
    }

    #[test]
    fn test_quick_reply_source() {
        let envelope = Envelope::from_value(json!({
            "message": { "text": "Yes please", "quick_reply": { "payload": "CONFIRM" } }
        }))
        .unwrap();

        let by_payload = EventMatcher::exact("CONFIRM", TextSource::QuickReplyPayload);
        let by_text = EventMatcher::exact("CONFIRM", TextSource::MessageText);
        assert!(by_payload.matches(&envelope));
        assert!(!by_text.matches(&envelope));
    }

    #[test]
    fn test_ignore_case_leaves_regex_alone() {
        let matcher = EventMatcher::regex("abc", TextSource::MessageText)
            .unwrap()
            .ignore_case();
        assert!(!matcher.matches(&text("ABC")));
    }

    #[test]
    fn test_text_source_for_category() {
        assert_eq!(
            TextSource::for_category(EventCategory::QuickReplyMessage),
            TextSource::QuickReplyPayload
        );
        assert_eq!(
            TextSource::for_category(EventCategory::Postback),
            TextSource::PostbackPayload
        );
        assert_eq!(
            TextSource::for_category(EventCategory::Any),
            TextSource::MessageText
        );
    }

    #[test]
    fn test_display() {
        let matcher = EventMatcher::exact_ignore_case("hi", TextSource::MessageText);
        assert_eq!(matcher.to_string(), "exact_ci(message_text=\"hi\")");
        assert_eq!(EventMatcher::TypeOnly.to_string(), "type_only");
    }
}
