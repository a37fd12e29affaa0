//! Error taxonomy for the decoder and encoder.

use core::fmt;

use bstr::BString;
use thiserror::Error;

/// Most input bytes a [`DecodeError`] excerpt will capture.
pub(crate) const EXCERPT_LEN: usize = 20;

/// Why a document was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The document contained only whitespace.
    #[error("empty json buffer")]
    EmptyBuffer,
    /// Shorter than two bytes, no container at the top level, or no JSONP
    /// payload to extract.
    #[error("invalid json buffer")]
    InvalidBuffer,
    /// Bytes remained after the top-level container closed.
    #[error("trailing data after document")]
    TrailingData,
    /// A comma where an element or key was required, or doubled up.
    #[error("misplaced comma")]
    MisplacedComma,
    /// An array opened and the input ended before any element.
    #[error("the `[` character appears repeatedly")]
    DuplicateArrayOpen,
    /// A second `{` where an object key was required.
    #[error("the `{{` character appears repeatedly")]
    DuplicateObjectOpen,
    /// Input ended inside an array that already held elements.
    #[error("unterminated array")]
    UnterminatedArray,
    /// Input ended inside an object.
    #[error("unterminated object")]
    UnterminatedObject,
    /// Input ended before a string's closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// No `:` between an object key and its value.
    #[error("missing `:` after object key")]
    MissingColon,
    /// A bare literal that was not `true`, `false`, or `null`, or such a
    /// literal not followed by a delimiter.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A numeric literal neither host parser accepted.
    #[error("invalid number")]
    InvalidNumber,
    /// A numeric literal ran past forty characters.
    #[error("number longer than 40 characters")]
    NumberTooLong,
    /// A second `+` or `-` inside one numeric literal.
    #[error("duplicate sign in number")]
    DuplicateSign,
    /// Containers nested beyond the configured depth limit.
    #[error("maximum nesting depth exceeded")]
    MaxDepthExceeded,
}

/// A rejected document.
///
/// Carries the failure classification and a short excerpt of the raw input
/// starting at the byte where decoding stopped, so callers can log where a
/// document went wrong without retaining the whole buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    excerpt: BString,
}

impl DecodeError {
    pub(crate) fn at(kind: DecodeErrorKind, input: &[u8], pos: usize) -> Self {
        let start = pos.min(input.len());
        let end = (start + EXCERPT_LEN).min(input.len());
        Self {
            kind,
            excerpt: BString::from(&input[start..end]),
        }
    }

    /// The failure classification.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Raw input bytes starting at the point of failure, at most twenty.
    #[must_use]
    pub fn excerpt(&self) -> &[u8] {
        &self.excerpt
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.excerpt.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} near `{}`", self.kind, self.excerpt)
        }
    }
}

impl core::error::Error for DecodeError {}

/// Failure to serialize a [`Value`](crate::Value) tree.
///
/// The encoder discards all buffered output on failure; there is no partial
/// result to observe.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Object keys must be integers, floats, or strings.
    #[error("invalid key type `{type_name}`")]
    InvalidKeyType {
        /// Type name of the offending key.
        type_name: &'static str,
    },
    /// Only arrays and objects can form a document.
    #[error("invalid value type `{type_name}`")]
    InvalidValueType {
        /// Type name of the offending value.
        type_name: &'static str,
    },
    /// NaN and infinities have no JSON form.
    #[error("cannot serialise number: must not be NaN or Infinity")]
    NonFiniteNumber,
}
