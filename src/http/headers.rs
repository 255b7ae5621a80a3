//! Case-insensitive, multi-valued HTTP header collection.
//!
//! Names are sanitized and stored lowercase, each one mapping to the ordered
//! list of values appended under it. Reading a name back joins its values
//! with a single comma.
//!
//! [`Headers`] is a handle over a store that it owns alone. Mutating methods
//! take `&self` so that the cursors returned by [`Headers::keys`],
//! [`Headers::values`] and [`Headers::entries`] can keep observing the store
//! while it changes: every advance recomputes the name-sorted list from the
//! current state. Nothing here is thread-safe; the owner of a `Headers`
//! must not share it between concurrent mutators.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::error::Result;
use crate::http::iter::{Entries, IterKind, Keys, Values};
use crate::http::sanitizer::Sanitizer;

/// Normalized name to values, in first insertion order of the names
pub type RawHeaders = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HeaderStore {
    map: RawHeaders,
}

impl HeaderStore {
    fn get(&self, name: &str) -> Option<String> {
        self.map.get(name).map(|values| values.join(","))
    }

    fn set(&mut self, name: String, value: String) {
        self.map.insert(name, vec![value]);
    }

    fn append(&mut self, name: String, value: String) {
        match self.map.get_mut(&name) {
            Some(values) => values.push(value),
            None => self.set(name, value),
        }
    }

    fn delete(&mut self, name: &str) {
        self.map.shift_remove(name);
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Element `index` of the name-sorted pair list, with the joined value
    /// unless only the name is asked for.
    pub(crate) fn nth_sorted(&self, index: usize, kind: IterKind) -> Option<(String, Option<String>)> {
        let mut names: Vec<&String> = self.map.keys().collect();
        names.sort_unstable();

        let name = names.get(index)?;
        let value = match kind {
            IterKind::Key => None,
            IterKind::Value | IterKind::KeyValue => self.get(name),
        };
        Some((name.to_string(), value))
    }
}

pub struct Headers {
    store: Rc<RefCell<HeaderStore>>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(HeaderStore::default())),
        }
    }

    /// Returns every value stored under `name` joined with `,`, or `None`
    /// when the name is absent.
    pub fn get(&self, name: impl AsRef<str>) -> Result<Option<String>> {
        let name = Sanitizer::name(name)?;
        Ok(self.store.borrow().get(&name))
    }

    /// Replaces all values of `name` with `value`.
    ///
    /// Both arguments are sanitized before the store is touched, so a
    /// failure leaves it unchanged.
    pub fn set(&self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<()> {
        let name = Sanitizer::name(name)?;
        let value = Sanitizer::value(value)?;
        self.store.borrow_mut().set(name, value);
        Ok(())
    }

    /// Adds `value` after the values already stored under `name`, or sets
    /// it when the name is absent.
    pub fn append(&self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<()> {
        let name = Sanitizer::name(name)?;
        let value = Sanitizer::value(value)?;
        self.store.borrow_mut().append(name, value);
        Ok(())
    }

    pub fn has(&self, name: impl AsRef<str>) -> Result<bool> {
        let name = Sanitizer::name(name)?;
        Ok(self.store.borrow().map.contains_key(&name))
    }

    /// Removes `name` and all its values. Deleting an absent name is a no-op.
    pub fn delete(&self, name: impl AsRef<str>) -> Result<()> {
        let name = Sanitizer::name(name)?;
        self.store.borrow_mut().delete(&name);
        Ok(())
    }

    /// Read-only view of the underlying map, values not joined.
    ///
    /// Mutating the headers while the returned guard is alive panics.
    pub fn raw(&self) -> Ref<'_, RawHeaders> {
        Ref::map(self.store.borrow(), |store| &store.map)
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Keys {
        Keys::new(self.downgrade())
    }

    pub fn values(&self) -> Values {
        Values::new(self.downgrade())
    }

    pub fn entries(&self) -> Entries {
        Entries::new(self.downgrade())
    }

    /// Calls `callback(value, name, self)` for each pair in name order.
    ///
    /// The sorted list is rebuilt after every call, so mutations made by
    /// the callback decide which pairs are visited next.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&str, &str, &Headers),
    {
        let mut index = 0;
        loop {
            let pair = self.store.borrow().nth_sorted(index, IterKind::KeyValue);
            let Some((name, Some(value))) = pair else {
                break;
            };
            callback(&value, &name, self);
            index += 1;
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<HeaderStore>> {
        Rc::downgrade(&self.store)
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the store; the clone never shares state with `self`.
impl Clone for Headers {
    fn clone(&self) -> Self {
        Self {
            store: Rc::new(RefCell::new(self.store.borrow().clone())),
        }
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        *self.store.borrow() == *other.store.borrow()
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Headers ")?;
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (String, String);
    type IntoIter = Entries;

    fn into_iter(self) -> Entries {
        self.entries()
    }
}
