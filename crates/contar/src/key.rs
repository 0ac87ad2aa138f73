//! Event categories and dedupe keys.
//!
//! Tracked calls are bucketed by an [`EventKey`]: the category the call came
//! through plus a signature derived from its first argument. Keys are plain
//! structs everywhere in memory; the flat `"<category>: <signature>"` string
//! form exists only at the storage boundary.

use std::fmt;

/// Signature recorded for calls that carried no arguments.
pub const EMPTY_SIGNATURE: &str = "<empty>";

/// Event category, typically the name of the wrapped logging method.
///
/// Categories are compared and ordered verbatim. The storage encoding splits
/// at the first `:`, so a category must not contain one; signatures may.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    /// Creates a category from a method name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Category name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::borrow::Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Composite dedupe key: category plus message signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    /// Category the call arrived through
    pub category: Category,
    /// First line of the call's first argument
    pub signature: String,
}

impl EventKey {
    /// Creates a key from already-extracted parts.
    #[must_use]
    pub fn new(category: Category, signature: impl Into<String>) -> Self {
        Self {
            category,
            signature: signature.into(),
        }
    }

    /// Derives the key for a call: the signature is the first line of the
    /// first argument, or [`EMPTY_SIGNATURE`] when there are no arguments.
    #[must_use]
    pub fn from_call(category: Category, args: &[&str]) -> Self {
        let signature = args.first().map_or_else(
            || EMPTY_SIGNATURE.to_string(),
            |first| signature_of(first),
        );
        Self {
            category,
            signature,
        }
    }

    /// Flat string form used as the JSON map key.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}: {}", self.category, self.signature)
    }

    /// Parses the flat string form back into a key.
    ///
    /// Splits at the first `:` and trims leading whitespace off the
    /// signature. A key with no `:` (hand-edited store) is treated as a
    /// bare category with an empty signature rather than rejected.
    #[must_use]
    pub fn parse_storage_key(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((category, signature)) => Self {
                category: Category::new(category),
                signature: signature.trim_start().to_string(),
            },
            None => Self {
                category: Category::new(raw),
                signature: String::new(),
            },
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.signature)
    }
}

/// First line of a message, with any trailing carriage return removed.
#[must_use]
pub fn signature_of(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or("");
    first_line.to_string()
}
