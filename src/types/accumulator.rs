use crate::types::NoteVec;
use core::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heading placed above accumulated notes when they are appended to a detail.
pub const DIAGNOSTICS_HEADING: &str = "[smarterr diagnostics]";

/// Ordered collection of internal notes raised while handling one call.
///
/// Each runtime envelope owns exactly one accumulator. Notes are appended to
/// the rendered detail under [`DIAGNOSTICS_HEADING`] once rendering is done.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Accumulator<T> {
    items: NoteVec<T>,
}

impl<T> Accumulator<T> {
    /// Creates a new empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: NoteVec::new(),
        }
    }

    /// Adds a single item to the accumulator.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Extends the accumulator with items from an iterator.
    #[inline]
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }

    /// Returns true if the accumulator is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in the accumulator.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the accumulator and returns the underlying storage.
    #[inline]
    pub fn into_inner(self) -> NoteVec<T> {
        self.items
    }
}

impl<T: PartialEq> Accumulator<T> {
    /// Adds an item unless an equal one was already recorded.
    ///
    /// Returns `true` when the item was added.
    pub fn push_unique(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }
}

impl<T: Display> Accumulator<T> {
    /// Renders the notes as a `[smarterr diagnostics]` section.
    ///
    /// Returns `None` when nothing was recorded.
    pub fn render_section(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let mut out = String::from(DIAGNOSTICS_HEADING);
        for item in &self.items {
            out.push_str("\n- ");
            out.push_str(&item.to_string());
        }
        Some(out)
    }

    /// Appends the rendered section to `detail`, separated by a blank line.
    pub fn append_to(&self, detail: &mut String) {
        if let Some(section) = self.render_section() {
            if !detail.is_empty() {
                detail.push_str("\n\n");
            }
            detail.push_str(&section);
        }
    }
}

impl<T> FromIterator<T> for Accumulator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Accumulator<T> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<[T; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Accumulator<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
