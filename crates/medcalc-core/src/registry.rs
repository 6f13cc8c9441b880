//! Name-keyed, insertion-ordered collections with unique names.

use crate::error::{MedCalcError, MedCalcResult};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that can be registered by name.
pub trait Named {
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An ordered collection of shared items whose names are unique.
///
/// `kind` labels the items ("rule", "formula") in errors and logs.
pub struct Registry<T: Named + ?Sized> {
    kind: &'static str,
    items: Vec<Arc<T>>,
}

impl<T: Named + ?Sized> Registry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self { kind, items: Vec::new() }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    /// Inserts one item. A duplicate name is rejected and nothing changes.
    pub fn add(&mut self, item: Arc<T>) -> MedCalcResult<()> {
        if self.position(item.name()).is_some() {
            warn!(kind = self.kind, name = item.name(), "Rejected duplicate registration");
            return Err(MedCalcError::duplicate(self.kind, item.name()));
        }
        debug!(kind = self.kind, name = item.name(), "Registered");
        self.items.push(item);
        Ok(())
    }

    /// Inserts items in order, stopping at the first duplicate.
    ///
    /// Items inserted before the failure stay registered; the failing item
    /// and everything after it are not inserted.
    pub fn add_all<I>(&mut self, items: I) -> MedCalcResult<()>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        items.into_iter().try_for_each(|item| self.add(item))
    }

    pub fn get(&self, name: &str) -> MedCalcResult<Arc<T>> {
        self.position(name)
            .map(|idx| Arc::clone(&self.items[idx]))
            .ok_or_else(|| MedCalcError::not_found(self.kind, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.iter()
    }

    /// Item at `index`, if any.
    pub fn at(&self, index: usize) -> Option<&Arc<T>> {
        self.items.get(index)
    }

    /// Replaces the item at `index`, returning the old one.
    ///
    /// The new name may equal the one being replaced but must not collide
    /// with any other entry.
    pub fn replace(&mut self, index: usize, item: Arc<T>) -> MedCalcResult<Arc<T>> {
        let len = self.items.len();
        if index >= len {
            return Err(MedCalcError::IndexOutOfRange { index, len });
        }
        if matches!(self.position(item.name()), Some(existing) if existing != index) {
            warn!(kind = self.kind, index, name = item.name(), "Rejected duplicate registration");
            return Err(MedCalcError::duplicate(self.kind, item.name()));
        }
        debug!(kind = self.kind, index, name = item.name(), "Replaced");
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize) -> MedCalcResult<Arc<T>> {
        let len = self.items.len();
        if index >= len {
            return Err(MedCalcError::IndexOutOfRange { index, len });
        }
        let removed = self.items.remove(index);
        debug!(kind = self.kind, index, name = removed.name(), "Removed");
        Ok(removed)
    }
}

impl<T: Named + ?Sized> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self { kind: self.kind, items: self.items.clone() }
    }
}

impl<T: Named + ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("kind", &self.kind).field("names", &self.names()).finish()
    }
}

impl<'a, T: Named + ?Sized> IntoIterator for &'a Registry<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
