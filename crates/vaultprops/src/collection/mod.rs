//! # Observable Collections
//!
//! [`ObservableCollection`] is an ordered, exclusively-owned list of items
//! that validates every insertion, tells its listeners about every mutation,
//! and projects its contents as a property view.
//!
//! What varies between collections is captured by a [`CollectionKind`]:
//!
//! - the collection-level validation hook (e.g. a maximum count),
//! - the per-item projection into a [`PropertyRow`],
//! - the component caption and the noun used in summaries.
//!
//! Concrete collections are type aliases over a kind, e.g.
//! `TagCollection = ObservableCollection<TagRules>`.
//!
//! ## Invariants
//!
//! 1. A failed validation leaves the collection untouched.
//! 2. Listeners run after the mutation is applied, in registration order.
//! 3. `property_view()` is rebuilt on each call and has one row per item.
//! 4. Only [`ObservableCollection::add_or_replace`] deduplicates; `add` and
//!    `insert_at` keep whatever they are given.
//!
//! Mutators take `&mut self` and listeners are owned by the collection, so a
//! listener cannot reach back into the collection it is observing.

mod change;

use std::fmt;

use tracing::{debug, warn};

use crate::error::{Result, VaultPropsError};
use crate::format::pluralize;
use crate::property::{EditableProperties, PropertyRow, PropertySource};

pub use change::{ChangeListener, CollectionChange, PendingChange};

/// The behavior that distinguishes one concrete collection from another.
pub trait CollectionKind {
    /// Item type. Equality is the item's identity for `add_or_replace`.
    type Item: Clone + PartialEq + fmt::Debug;

    /// Caption shown for the whole collection.
    fn component_name(&self) -> String;

    /// Singular noun used in summaries ("tag" -> "3 tags").
    fn item_noun(&self) -> &'static str;

    /// Collection-level validation, run before every insert or replace.
    fn validate(&self, _items: &[Self::Item], _pending: &PendingChange<'_, Self::Item>) -> Result<()> {
        Ok(())
    }

    /// Property row for one item.
    fn project(&self, item: &Self::Item) -> PropertyRow;

    /// The item stored when `add_or_replace` finds `existing` with the same
    /// identity as `incoming`. Defaults to `incoming` as given.
    fn replacement(&self, _existing: &Self::Item, incoming: Self::Item) -> Self::Item {
        incoming
    }
}

pub struct ObservableCollection<K: CollectionKind> {
    kind: K,
    items: Vec<K::Item>,
    listeners: Vec<ChangeListener>,
}

impl<K: CollectionKind> ObservableCollection<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            items: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Build a collection from an existing sequence, validating each item in order.
    pub fn from_items<I>(kind: K, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = K::Item>,
    {
        let mut collection = Self::new(kind);
        for item in items {
            collection.add(item)?;
        }
        Ok(collection)
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&K::Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K::Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[K::Item] {
        &self.items
    }

    /// Consume the collection, dropping its listeners.
    pub fn into_items(self) -> Vec<K::Item> {
        self.items
    }

    /// Index of the first item equal to `item` under the item's own equality.
    pub fn position(&self, item: &K::Item) -> Option<usize> {
        self.items.iter().position(|existing| existing == item)
    }

    pub fn contains(&self, item: &K::Item) -> bool {
        self.position(item).is_some()
    }

    /// Register another change listener. Listeners accumulate.
    pub fn set_change_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&CollectionChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn insert_at(&mut self, index: usize, item: K::Item) -> Result<()> {
        if index > self.items.len() {
            return Err(VaultPropsError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.check(&PendingChange::Insert { index, item: &item })?;
        debug!(
            component = %self.kind.component_name(),
            index,
            item = ?item,
            "inserting item"
        );
        self.items.insert(index, item);
        self.notify(CollectionChange::Inserted { index });
        Ok(())
    }

    pub fn add(&mut self, item: K::Item) -> Result<()> {
        self.insert_at(self.items.len(), item)
    }

    /// Overwrite the item at `index`, keeping its position.
    pub fn set_at(&mut self, index: usize, item: K::Item) -> Result<()> {
        if index >= self.items.len() {
            return Err(VaultPropsError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.check(&PendingChange::Replace { index, item: &item })?;
        debug!(
            component = %self.kind.component_name(),
            index,
            item = ?item,
            "replacing item"
        );
        self.items[index] = item;
        self.notify(CollectionChange::Replaced { index });
        Ok(())
    }

    /// Replace the item with the same identity in place, or append a new one.
    ///
    /// What "replace" stores is up to [`CollectionKind::replacement`].
    ///
    /// Returns the index the item ended up at.
    pub fn add_or_replace(&mut self, item: K::Item) -> Result<usize> {
        match self.position(&item) {
            Some(index) => {
                let item = self.kind.replacement(&self.items[index], item);
                self.set_at(index, item)?;
                Ok(index)
            }
            None => {
                let index = self.items.len();
                self.insert_at(index, item)?;
                Ok(index)
            }
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<K::Item> {
        if index >= self.items.len() {
            return Err(VaultPropsError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        debug!(
            component = %self.kind.component_name(),
            index,
            item = ?removed,
            "removed item"
        );
        self.notify(CollectionChange::Removed { index });
        Ok(removed)
    }

    /// Remove the first item equal to `item`, if any.
    pub fn remove(&mut self, item: &K::Item) -> Option<K::Item> {
        let index = self.position(item)?;
        self.remove_at(index).ok()
    }

    /// Move the item at `from` so that it ends up at `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(VaultPropsError::IndexOutOfRange {
                index: from.max(to),
                len,
            });
        }
        if from == to {
            return Ok(());
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        debug!(component = %self.kind.component_name(), from, to, "moved item");
        self.notify(CollectionChange::Moved { from, to });
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        debug!(component = %self.kind.component_name(), "cleared collection");
        self.notify(CollectionChange::Cleared);
    }

    /// Collapsed text for the collection as a whole, e.g. "3 tags".
    pub fn display_summary(&self) -> String {
        pluralize(self.items.len(), self.kind.item_noun())
    }

    fn check(&self, pending: &PendingChange<'_, K::Item>) -> Result<()> {
        self.kind.validate(&self.items, pending).inspect_err(|err| {
            warn!(
                component = %self.kind.component_name(),
                index = pending.index(),
                error = %err,
                "rejected collection change"
            );
        })
    }

    fn notify(&mut self, change: CollectionChange) {
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl<K: CollectionKind> PropertySource for ObservableCollection<K> {
    fn component_name(&self) -> String {
        self.kind.component_name()
    }

    fn property_view(&self) -> Vec<PropertyRow> {
        self.items.iter().map(|item| self.kind.project(item)).collect()
    }
}

/// Item rows are projections. Edit items through the collection's mutators
/// or an edit session, not through the grid.
impl<K: CollectionKind> EditableProperties for ObservableCollection<K> {
    fn set_property(&mut self, name: &str, _value: Option<&str>) -> Result<()> {
        match self.property(name) {
            Some(row) => Err(VaultPropsError::ReadOnlyProperty(row.name)),
            None => Err(VaultPropsError::UnknownProperty(name.to_string())),
        }
    }
}

impl<K: CollectionKind + Clone> Clone for ObservableCollection<K> {
    /// Clones the kind and items. Listeners stay with the original.
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            items: self.items.clone(),
            listeners: Vec::new(),
        }
    }
}

impl<K: CollectionKind + fmt::Debug> fmt::Debug for ObservableCollection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("kind", &self.kind)
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<K: CollectionKind> std::ops::Index<usize> for ObservableCollection<K> {
    type Output = K::Item;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a, K: CollectionKind> IntoIterator for &'a ObservableCollection<K> {
    type Item = &'a K::Item;
    type IntoIter = std::slice::Iter<'a, K::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Integers, at most `max` of them, never negative.
    #[derive(Debug, Clone)]
    struct Bounded {
        max: usize,
    }

    impl CollectionKind for Bounded {
        type Item = i32;

        fn component_name(&self) -> String {
            "Numbers".to_string()
        }

        fn item_noun(&self) -> &'static str {
            "number"
        }

        fn validate(&self, items: &[i32], pending: &PendingChange<'_, i32>) -> Result<()> {
            if *pending.item() < 0 {
                return Err(VaultPropsError::CollectionConstraintViolation(
                    "negative".to_string(),
                ));
            }
            if pending.resulting_len(items.len()) > self.max {
                return Err(VaultPropsError::CollectionConstraintViolation(format!(
                    "at most {}",
                    self.max
                )));
            }
            Ok(())
        }

        fn project(&self, item: &i32) -> PropertyRow {
            PropertyRow::read_only(format!("#{}", item), item.to_string())
        }
    }

    fn numbers(items: &[i32]) -> ObservableCollection<Bounded> {
        ObservableCollection::from_items(Bounded { max: 3 }, items.to_vec()).unwrap()
    }

    fn recorder(collection: &mut ObservableCollection<Bounded>) -> Rc<RefCell<Vec<CollectionChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        collection.set_change_listener(move |change| sink.borrow_mut().push(*change));
        seen
    }

    #[test]
    fn insert_at_positions_item_and_notifies() {
        let mut c = numbers(&[1, 3]);
        let seen = recorder(&mut c);

        c.insert_at(1, 2).unwrap();

        assert_eq!(c.items(), &[1, 2, 3]);
        assert_eq!(*seen.borrow(), vec![CollectionChange::Inserted { index: 1 }]);
    }

    #[test]
    fn rejected_insert_leaves_state_and_listeners_untouched() {
        let mut c = numbers(&[1, 2, 3]);
        let seen = recorder(&mut c);

        let err = c.insert_at(0, 4).unwrap_err();

        assert!(matches!(err, VaultPropsError::CollectionConstraintViolation(_)));
        assert_eq!(c.items(), &[1, 2, 3]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn insert_past_end_is_out_of_range() {
        let mut c = numbers(&[1]);
        assert!(matches!(
            c.insert_at(5, 2),
            Err(VaultPropsError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn add_does_not_dedupe() {
        let mut c = numbers(&[1]);
        c.add(1).unwrap();
        assert_eq!(c.items(), &[1, 1]);
    }

    #[test]
    fn add_or_replace_replaces_in_place_when_full() {
        let mut c = numbers(&[1, 2, 3]);
        let seen = recorder(&mut c);

        let index = c.add_or_replace(2).unwrap();

        assert_eq!(index, 1);
        assert_eq!(c.len(), 3);
        assert_eq!(*seen.borrow(), vec![CollectionChange::Replaced { index: 1 }]);
        assert!(!seen.borrow()[0].is_structural());
    }

    #[test]
    fn add_or_replace_appends_new_identity() {
        let mut c = numbers(&[1]);
        assert_eq!(c.add_or_replace(5).unwrap(), 1);
        assert_eq!(c.items(), &[1, 5]);
    }

    #[test]
    fn replace_runs_validation_hook() {
        let mut c = numbers(&[1]);
        assert!(c.set_at(0, -1).is_err());
        assert_eq!(c.items(), &[1]);
    }

    #[test]
    fn listeners_accumulate_in_registration_order() {
        let mut c = numbers(&[]);
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let sink = Rc::clone(&order);
            c.set_change_listener(move |_| sink.borrow_mut().push(id));
        }

        c.add(1).unwrap();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn remove_move_and_clear_notify() {
        let mut c = numbers(&[1, 2, 3]);
        let seen = recorder(&mut c);

        c.move_item(0, 2).unwrap();
        assert_eq!(c.items(), &[2, 3, 1]);
        assert_eq!(c.remove(&3), Some(3));
        assert_eq!(c.remove(&9), None);
        c.clear();
        c.clear();

        assert!(c.is_empty());
        assert_eq!(
            *seen.borrow(),
            vec![
                CollectionChange::Moved { from: 0, to: 2 },
                CollectionChange::Removed { index: 1 },
                CollectionChange::Cleared,
            ]
        );
    }

    #[test]
    fn move_to_same_index_is_silent() {
        let mut c = numbers(&[1, 2]);
        let seen = recorder(&mut c);
        c.move_item(1, 1).unwrap();
        assert!(seen.borrow().is_empty());
        assert!(c.move_item(0, 2).is_err());
    }

    #[test]
    fn property_view_tracks_contents() {
        let mut c = numbers(&[1, 2]);
        assert_eq!(c.property_view().len(), 2);

        c.remove_at(0).unwrap();
        let view = c.property_view();
        assert_eq!(view.len(), c.len());
        assert_eq!(view[0], PropertyRow::read_only("#2", "2"));
        assert_eq!(c.component_name(), "Numbers");
        assert_eq!(c.display_summary(), "1 number");
    }

    #[test]
    fn grid_writes_to_item_rows_are_refused() {
        let mut c = numbers(&[1, 2]);

        assert!(matches!(
            c.set_property("#2", Some("5")),
            Err(VaultPropsError::ReadOnlyProperty(name)) if name == "#2"
        ));
        assert!(matches!(
            c.set_property("#9", Some("5")),
            Err(VaultPropsError::UnknownProperty(_))
        ));
        assert_eq!(c.items(), &[1, 2]);
    }

    #[test]
    fn from_items_enforces_hook() {
        let err = ObservableCollection::from_items(Bounded { max: 1 }, vec![1, 2]).unwrap_err();
        assert!(matches!(err, VaultPropsError::CollectionConstraintViolation(_)));
    }

    #[test]
    fn clone_drops_listeners() {
        let mut c = numbers(&[1]);
        let seen = recorder(&mut c);
        let mut copy = c.clone();
        copy.add(2).unwrap();
        assert!(seen.borrow().is_empty());
        assert_eq!(c.len(), 1);
    }
}
