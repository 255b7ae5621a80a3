//! Live cursors over a [`Headers`](crate::http::headers::Headers) store.
//!
//! A cursor is an index plus a weak handle on the store. It takes no
//! snapshot: each advance sorts the names currently present and reads the
//! element at its index, so names added or removed between two calls shift
//! what comes next.

use std::cell::RefCell;
use std::rc::Weak;

use log::{debug, trace};

use crate::error::{HeadersError, Result};
use crate::http::headers::HeaderStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterKind {
    Key,
    Value,
    KeyValue,
}

#[derive(Debug, Clone)]
struct Cursor {
    store: Weak<RefCell<HeaderStore>>,
    kind: IterKind,
    index: usize,
}

impl Cursor {
    fn new(store: Weak<RefCell<HeaderStore>>, kind: IterKind) -> Self {
        Self { store, kind, index: 0 }
    }

    fn advance(&mut self) -> Result<Option<(String, Option<String>)>> {
        let store = self.store.upgrade().ok_or(HeadersError::InvalidIteratorReceiver)?;
        let pair = store.borrow().nth_sorted(self.index, self.kind);
        match pair {
            Some(pair) => {
                self.index += 1;
                Ok(Some(pair))
            }
            None => {
                trace!("{:?} cursor exhausted at index {}", self.kind, self.index);
                Ok(None)
            }
        }
    }

    fn remaining(&self) -> usize {
        self.store
            .upgrade()
            .map(|store| store.borrow().len().saturating_sub(self.index))
            .unwrap_or(0)
    }
}

// `Iterator::next` has no error channel: a dropped store ends the iteration.
fn end_on_dead_store<T>(result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(item) => item,
        Err(err) => {
            debug!("header cursor stopped: {err}");
            None
        }
    }
}

macro_rules! cursor_type {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $item:ty, |$pair:ident| $map:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            cursor: Cursor,
        }

        impl $name {
            pub(crate) fn new(store: Weak<RefCell<HeaderStore>>) -> Self {
                Self {
                    cursor: Cursor::new(store, $kind),
                }
            }

            /// Advances the cursor, failing with
            /// [`HeadersError::InvalidIteratorReceiver`] once the headers it
            /// was created from have been dropped.
            pub fn try_next(&mut self) -> Result<Option<$item>> {
                Ok(self.cursor.advance()?.map(|$pair| $map))
            }
        }

        impl Iterator for $name {
            type Item = $item;

            fn next(&mut self) -> Option<$item> {
                end_on_dead_store(self.try_next())
            }

            // The store may grow between advances, so no upper bound.
            fn size_hint(&self) -> (usize, Option<usize>) {
                (self.cursor.remaining(), None)
            }
        }
    };
}

cursor_type!(
    /// Sorted header names, see [`Headers::keys`](crate::http::headers::Headers::keys).
    Keys, IterKind::Key, String, |pair| pair.0
);

cursor_type!(
    /// Joined values in name order, see [`Headers::values`](crate::http::headers::Headers::values).
    Values, IterKind::Value, String, |pair| pair.1.unwrap_or_default()
);

cursor_type!(
    /// `(name, joined value)` pairs in name order; the default iteration of
    /// [`Headers`](crate::http::headers::Headers).
    Entries, IterKind::KeyValue, (String, String), |pair| (pair.0, pair.1.unwrap_or_default())
);

#[cfg(test)]
mod tests {
    use crate::error::HeadersError;
    use crate::http::headers::Headers;

    fn sample() -> Headers {
        let headers = Headers::new();
        headers.append("b", "2").unwrap();
        headers.append("c", "3").unwrap();
        headers.append("a", "1").unwrap();
        headers.append("A", "1b").unwrap();
        headers
    }

    #[test]
    fn test_modes() {
        let headers = sample();
        assert_eq!(headers.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(headers.values().collect::<Vec<_>>(), ["1,1b", "2", "3"]);
        assert_eq!(
            headers.entries().collect::<Vec<_>>(),
            [
                ("a".to_string(), "1,1b".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_added_name_is_visited() {
        let headers = sample();
        let mut keys = headers.keys();
        assert_eq!(keys.next().as_deref(), Some("a"));
        headers.set("bb", "x").unwrap();
        assert_eq!(keys.collect::<Vec<_>>(), ["b", "bb", "c"]);
    }

    #[test]
    fn test_removed_name_shifts_index() {
        let headers = sample();
        let mut values = headers.values();
        assert_eq!(values.next().as_deref(), Some("1,1b"));
        headers.delete("a").unwrap();
        // sorted list is now [b, c]; index 1 points at c
        assert_eq!(values.next().as_deref(), Some("3"));
        assert_eq!(values.next(), None);
    }

    #[test]
    fn test_exhausted_cursor_resumes_after_growth() {
        let headers = sample();
        let mut keys = headers.keys();
        assert_eq!(keys.by_ref().count(), 3);
        headers.set("d", "4").unwrap();
        assert_eq!(keys.next().as_deref(), Some("d"));
    }

    #[test]
    fn test_dropped_store_is_invalid_receiver() {
        let headers = sample();
        let mut entries = headers.entries();
        drop(headers);

        assert_eq!(entries.try_next(), Err(HeadersError::InvalidIteratorReceiver));
        assert_eq!(entries.next(), None);
        assert_eq!(entries.size_hint(), (0, None));
    }

    #[test]
    fn test_size_hint_tracks_store() {
        let headers = sample();
        let mut keys = headers.keys();
        assert_eq!(keys.size_hint(), (3, None));
        keys.next();
        assert_eq!(keys.size_hint(), (2, None));
        headers.delete("b").unwrap();
        headers.delete("c").unwrap();
        assert_eq!(keys.size_hint(), (0, None));
    }
}
