//! # Finite ordered source with independent replays.
//!
//! [`Source`] holds an immutable, fully known sequence of items. Each call
//! to [`Source::replay`] yields an independent pass over all items paired
//! with their zero-based positions; there is no shared cursor, so any
//! number of subscriptions can replay the same source concurrently without
//! synchronization.
//!
//! ## Example
//! ```
//! use ordflow::Source;
//!
//! let source = Source::from_iter(["a", "b", "c"]);
//! let replayed: Vec<(usize, &str)> = source.replay().collect();
//! assert_eq!(replayed, vec![(0, "a"), (1, "b"), (2, "c")]);
//! ```

use std::sync::Arc;

/// Immutable ordered sequence of items, shareable across subscriptions.
///
/// Cloning a `Source` is cheap (the underlying storage is reference
/// counted) and never copies items. The sequence is read-only after
/// construction.
#[derive(Debug)]
pub struct Source<T> {
    items: Arc<[T]>,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Clone> Source<T> {
    /// Builds a source from any iterator of items.
    pub fn from_iter(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Number of items in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the sequence holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `position`, if within bounds.
    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Independent, fully ordered pass over all items.
    ///
    /// Every call starts from position 0 and yields `(position, item)`
    /// pairs in emission order. Positions are dense: `0..len()`.
    pub fn replay(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.items.iter().cloned().enumerate()
    }
}

impl<T: Clone> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_are_independent() {
        let source = Source::from_iter([10, 20, 30]);

        let mut first = source.replay();
        let mut second = source.replay();

        assert_eq!(first.next(), Some((0, 10)));
        assert_eq!(first.next(), Some((1, 20)));
        // The second replay still starts from position 0.
        assert_eq!(second.next(), Some((0, 10)));
        assert_eq!(first.next(), Some((2, 30)));
        assert_eq!(first.next(), None);
        assert_eq!(second.next(), Some((1, 20)));
    }

    #[test]
    fn test_clone_shares_items_without_copying() {
        let source = Source::from_iter(["x".to_string(), "y".to_string()]);
        let other = source.clone();

        assert_eq!(source.len(), other.len());
        assert_eq!(source.get(1), other.get(1));
    }

    #[test]
    fn test_empty_source() {
        let source: Source<u32> = Source::from_iter([]);
        assert!(source.is_empty());
        assert_eq!(source.replay().count(), 0);
    }
}
