//! Event interception.
//!
//! An [`EventTracker`] wraps a set of named callables (typically a logger's
//! methods) and is handed back to the caller as the object to invoke instead
//! of the originals. Each call is tallied into a worker-local buffer and then
//! forwarded to the wrapped callable unmodified. Tallying is strictly
//! side-channel: it never panics the call, never blocks it, and when tracking
//! is disabled the wrapper is a plain pass-through.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::key::{Category, EventKey};
use crate::origin::{Origin, OriginResolver};
use crate::result::{ContarError, ContarResult};
use crate::snapshot::TallySnapshot;

/// Wrapped callable: receives the original argument list.
pub type SourceFn = Box<dyn FnMut(&[&str]) + Send>;

/// Per-worker interceptor and local tally buffer.
pub struct EventTracker {
    sources: BTreeMap<Category, SourceFn>,
    buffer: TallySnapshot,
    resolver: Box<dyn OriginResolver + Send>,
    enabled: bool,
}

impl EventTracker {
    /// Creates a tracker with no wrapped sources yet.
    #[must_use]
    pub fn new(resolver: impl OriginResolver + Send + 'static, enabled: bool) -> Self {
        Self {
            sources: BTreeMap::new(),
            buffer: TallySnapshot::new(),
            resolver: Box::new(resolver),
            enabled,
        }
    }

    /// Registers `source` under `category`, replacing any previous one.
    pub fn wrap(&mut self, category: Category, source: impl FnMut(&[&str]) + Send + 'static) {
        let _ = self.sources.insert(category, Box::new(source));
    }

    /// Invokes the wrapped source for `category` with `args`, tallying the
    /// call first when tracking is enabled.
    ///
    /// The signature is the first line of `args[0]`; a call without
    /// arguments tallies under the empty-signature sentinel. Origin
    /// resolution failure tallies under the unknown sentinel. In every case
    /// the original callable then runs with the unmodified arguments.
    ///
    /// # Errors
    ///
    /// [`ContarError::UnknownCategory`] when no source is registered under
    /// `category`; nothing is tallied and nothing is invoked.
    pub fn emit(&mut self, category: &str, args: &[&str]) -> ContarResult<()> {
        if !self.sources.contains_key(category) {
            return Err(ContarError::unknown_category(category));
        }
        if self.enabled {
            let key = EventKey::from_call(Category::new(category), args);
            let origin = self.resolver.resolve().unwrap_or_else(Origin::unknown);
            self.buffer.record(key, origin);
        }
        if let Some(source) = self.sources.get_mut(category) {
            source(args);
        }
        Ok(())
    }

    /// Whether calls are currently being tallied.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Categories with a registered source, in order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sources.keys()
    }

    /// The local buffer accumulated since the last flush.
    #[must_use]
    pub fn buffer(&self) -> &TallySnapshot {
        &self.buffer
    }

    /// Takes the local buffer for flushing, leaving an empty one behind.
    #[must_use]
    pub fn take_buffer(&mut self) -> TallySnapshot {
        let buffer = std::mem::take(&mut self.buffer);
        debug!(calls = buffer.total_calls(), "taking worker tally buffer");
        buffer
    }
}

impl fmt::Debug for EventTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTracker")
            .field("categories", &self.sources.keys().collect::<Vec<_>>())
            .field("buffered_calls", &self.buffer.total_calls())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::origin::{CallbackResolver, FixedOrigin};
    use std::sync::{Arc, Mutex};

    fn fixed(origin: &str) -> FixedOrigin {
        FixedOrigin::new(Origin::new(origin))
    }

    fn capture() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&[&str]) + Send + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let source = move |args: &[&str]| {
            sink.lock().unwrap().push(args.join(" "));
        };
        (calls, source)
    }

    mod forwarding_tests {
        use super::*;

        #[test]
        fn enabled_tracker_tallies_then_forwards() {
            let (calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("error"), source);

            tracker.emit("error", &["boom", "code=1"]).unwrap();

            assert_eq!(calls.lock().unwrap().as_slice(), ["boom code=1"]);
            let key = EventKey::new(Category::new("error"), "boom");
            assert_eq!(tracker.buffer().count_of(&key), 1);
        }

        #[test]
        fn disabled_tracker_forwards_without_tallying() {
            let (calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), false);
            tracker.wrap(Category::new("warn"), source);

            tracker.emit("warn", &["careful"]).unwrap();

            assert_eq!(calls.lock().unwrap().len(), 1);
            assert!(tracker.buffer().is_empty());
        }

        #[test]
        fn wrap_registers_categories_in_order() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("warn"), source);
            let (_more, second) = capture();
            tracker.wrap(Category::new("error"), second);

            let names: Vec<&str> = tracker.categories().map(Category::as_str).collect();
            assert_eq!(names, ["error", "warn"]);
            assert!(tracker.is_enabled());
        }

        #[test]
        fn unknown_category_invokes_nothing() {
            let (calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("error"), source);

            let err = tracker.emit("shout", &["hey"]).unwrap_err();
            assert!(matches!(err, ContarError::UnknownCategory { .. }));
            assert!(calls.lock().unwrap().is_empty());
            assert!(tracker.buffer().is_empty());
        }
    }

    mod keying_tests {
        use super::*;

        #[test]
        fn multiline_message_keys_on_first_line() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("error"), source);

            tracker.emit("error", &["timeout\nstack trace here"]).unwrap();

            let key = EventKey::new(Category::new("error"), "timeout");
            assert_eq!(tracker.buffer().count_of(&key), 1);
        }

        #[test]
        fn no_args_uses_empty_signature_sentinel() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("warn"), source);

            tracker.emit("warn", &[]).unwrap();

            let key = EventKey::new(Category::new("warn"), crate::key::EMPTY_SIGNATURE);
            assert_eq!(tracker.buffer().count_of(&key), 1);
        }

        #[test]
        fn repeated_message_accumulates_one_key() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("error"), source);

            for _ in 0..3 {
                tracker.emit("error", &["timeout"]).unwrap();
            }

            let key = EventKey::new(Category::new("error"), "timeout");
            assert_eq!(tracker.buffer().count_of(&key), 3);
            assert_eq!(tracker.buffer().counts().len(), 1);
        }
    }

    mod origin_tests {
        use super::*;

        #[test]
        fn resolution_failure_records_unknown() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(CallbackResolver::new(|| None), true);
            tracker.wrap(Category::new("error"), source);

            tracker.emit("error", &["boom"]).unwrap();

            let key = EventKey::new(Category::new("error"), "boom");
            let origins = tracker.buffer().origins_of(&key).unwrap();
            assert_eq!(origins[&Origin::unknown()], 1);
        }
    }

    mod buffer_tests {
        use super::*;

        #[test]
        fn take_buffer_leaves_an_empty_one() {
            let (_calls, source) = capture();
            let mut tracker = EventTracker::new(fixed("suite/a.test.js"), true);
            tracker.wrap(Category::new("error"), source);
            tracker.emit("error", &["boom"]).unwrap();

            let taken = tracker.take_buffer();
            assert_eq!(taken.total_calls(), 1);
            assert!(tracker.buffer().is_empty());

            tracker.emit("error", &["boom"]).unwrap();
            assert_eq!(tracker.buffer().total_calls(), 1);
        }
    }
}
