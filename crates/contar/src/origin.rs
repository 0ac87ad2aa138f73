//! Origin identities for tracked calls.
//!
//! An origin names the file a call was issued from, reduced to its last two
//! path segments so reports stay readable across checkouts with different
//! absolute roots. Resolution is pluggable: the host framework knows which
//! test file is active, this crate only asks.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Origin recorded when resolution fails or yields nothing.
pub const UNKNOWN_ORIGIN: &str = "<unknown>";

/// Identifier for the file a tracked call originated from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Origin(String);

impl Origin {
    /// Creates an origin from an already-reduced identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel origin for unresolvable calls.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_ORIGIN.to_string())
    }

    /// Reduces a path to its last two segments, joined with `/`.
    ///
    /// A single-segment path is kept as-is; an empty path maps to the
    /// unknown sentinel.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let segments: Vec<&str> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();
        match segments.as_slice() {
            [] => Self::unknown(),
            [only] => Self((*only).to_string()),
            [.., dir, file] => Self(format!("{dir}/{file}")),
        }
    }

    /// Whether this is the unknown sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_ORIGIN
    }

    /// Origin identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Strategy for naming the file behind the call currently being tracked.
///
/// Returning `None` is not an error: the tracker records the call under the
/// unknown sentinel and moves on. Resolution must never panic or block the
/// wrapped call.
pub trait OriginResolver {
    /// The origin of the call in flight, if one can be named.
    fn resolve(&self) -> Option<Origin>;
}

/// Resolver that pins every call to one origin.
///
/// Useful for single-file workers and tests.
#[derive(Debug, Clone)]
pub struct FixedOrigin(Origin);

impl FixedOrigin {
    /// Creates a resolver that always answers with `origin`.
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self(origin)
    }
}

impl OriginResolver for FixedOrigin {
    fn resolve(&self) -> Option<Origin> {
        Some(self.0.clone())
    }
}

/// Resolver backed by a host callback that names the active test file.
pub struct CallbackResolver {
    lookup: Box<dyn Fn() -> Option<PathBuf> + Send>,
}

impl CallbackResolver {
    /// Wraps a callback returning the path of the file currently running.
    #[must_use]
    pub fn new(lookup: impl Fn() -> Option<PathBuf> + Send + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl OriginResolver for CallbackResolver {
    fn resolve(&self) -> Option<Origin> {
        (self.lookup)().map(|path| Origin::from_path(&path))
    }
}

impl fmt::Debug for CallbackResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackResolver").finish_non_exhaustive()
    }
}
