//! Change notifications raised by [`ObservableCollection`](super::ObservableCollection).

/// What a single mutation did to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    /// An item was inserted at `index`.
    Inserted { index: usize },
    /// The item at `index` was removed.
    Removed { index: usize },
    /// The item at `index` was swapped for an equal-identity item.
    Replaced { index: usize },
    /// An item moved from `from` to `to`.
    Moved { from: usize, to: usize },
    /// Every item was removed.
    Cleared,
}

impl CollectionChange {
    /// True when the shape of the collection changed (count or order).
    ///
    /// Listeners that only cache row labels can skip in-place replacements.
    pub fn is_structural(&self) -> bool {
        !matches!(self, CollectionChange::Replaced { .. })
    }
}

/// Callback invoked after every mutation, in registration order.
pub type ChangeListener = Box<dyn FnMut(&CollectionChange)>;

/// A mutation the collection is about to make, handed to the validation hook.
#[derive(Debug)]
pub enum PendingChange<'a, T> {
    Insert { index: usize, item: &'a T },
    Replace { index: usize, item: &'a T },
}

impl<'a, T> PendingChange<'a, T> {
    pub fn item(&self) -> &'a T {
        match self {
            PendingChange::Insert { item, .. } | PendingChange::Replace { item, .. } => item,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PendingChange::Insert { index, .. } | PendingChange::Replace { index, .. } => *index,
        }
    }

    /// Item count once this change is applied to a collection of `current` items.
    pub fn resulting_len(&self, current: usize) -> usize {
        match self {
            PendingChange::Insert { .. } => current + 1,
            PendingChange::Replace { .. } => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_replacement_is_non_structural() {
        assert!(CollectionChange::Inserted { index: 0 }.is_structural());
        assert!(CollectionChange::Removed { index: 0 }.is_structural());
        assert!(CollectionChange::Moved { from: 0, to: 1 }.is_structural());
        assert!(CollectionChange::Cleared.is_structural());
        assert!(!CollectionChange::Replaced { index: 0 }.is_structural());
    }

    #[test]
    fn resulting_len_counts_inserts_only() {
        let item = 7;
        assert_eq!(PendingChange::Insert { index: 0, item: &item }.resulting_len(3), 4);
        assert_eq!(PendingChange::Replace { index: 0, item: &item }.resulting_len(3), 3);
    }
}
