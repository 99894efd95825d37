//! # Edit Sessions
//!
//! A [`CollectionEditSession`] wraps one bulk edit of a collection (the
//! add/remove/reorder dialog a property grid opens) and tells the host
//! afterwards whether anything changed.
//!
//! ## Protocol
//!
//! 1. The host hands over its current collection as an `Rc`.
//! 2. The session gives the [`EditSurface`] a detached [`WorkingCopy`].
//! 3. The surface edits the copy and reports [`EditCompletion`]. Every
//!    successful mutation on the copy sets its changed flag.
//! 4. Unchanged or cancelled: the session returns the original `Rc`.
//!    Changed: it rebuilds a new collection of the same kind from the edited
//!    items and returns a new `Rc`.
//!
//! Hosts that cache a display keyed on `Rc::ptr_eq` therefore see a new
//! pointer exactly when the contents changed. The original collection is
//! never mutated, so an error from the surface leaves the host's state as it
//! was.

use std::rc::Rc;

use tracing::debug;

use crate::collection::{CollectionKind, ObservableCollection};
use crate::error::{Result, VaultPropsError};
use crate::property::{PropertyRow, PropertySource};

/// How the edit surface was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCompletion {
    Committed,
    Cancelled,
}

/// The post-edit item sequence plus whether anything changed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome<T> {
    pub items: Vec<T>,
    pub changed: bool,
}

/// A detached copy of a collection that records whether it was mutated.
///
/// Mutations are validated by the same collection rules as the original.
#[derive(Debug)]
pub struct WorkingCopy<K: CollectionKind> {
    collection: ObservableCollection<K>,
    changed: bool,
}

impl<K: CollectionKind + Clone> WorkingCopy<K> {
    fn of(original: &ObservableCollection<K>) -> Self {
        Self {
            collection: original.clone(),
            changed: false,
        }
    }
}

impl<K: CollectionKind> WorkingCopy<K> {
    pub fn collection(&self) -> &ObservableCollection<K> {
        &self.collection
    }

    pub fn items(&self) -> &[K::Item] {
        self.collection.items()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn property_view(&self) -> Vec<PropertyRow> {
        self.collection.property_view()
    }

    pub fn insert_at(&mut self, index: usize, item: K::Item) -> Result<()> {
        self.collection.insert_at(index, item)?;
        self.changed = true;
        Ok(())
    }

    pub fn add(&mut self, item: K::Item) -> Result<()> {
        self.collection.add(item)?;
        self.changed = true;
        Ok(())
    }

    pub fn set_at(&mut self, index: usize, item: K::Item) -> Result<()> {
        self.collection.set_at(index, item)?;
        self.changed = true;
        Ok(())
    }

    pub fn add_or_replace(&mut self, item: K::Item) -> Result<usize> {
        let index = self.collection.add_or_replace(item)?;
        self.changed = true;
        Ok(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<K::Item> {
        let removed = self.collection.remove_at(index)?;
        self.changed = true;
        Ok(removed)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.collection.move_item(from, to)?;
        if from != to {
            self.changed = true;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.collection.is_empty() {
            self.collection.clear();
            self.changed = true;
        }
    }

    pub fn finish(self) -> EditOutcome<K::Item> {
        EditOutcome {
            changed: self.changed,
            items: self.collection.into_items(),
        }
    }
}

/// The host's multi-item editor.
pub trait EditSurface<K: CollectionKind> {
    fn edit(&mut self, copy: &mut WorkingCopy<K>) -> Result<EditCompletion>;
}

impl<K, F> EditSurface<K> for F
where
    K: CollectionKind,
    F: FnMut(&mut WorkingCopy<K>) -> Result<EditCompletion>,
{
    fn edit(&mut self, copy: &mut WorkingCopy<K>) -> Result<EditCompletion> {
        self(copy)
    }
}

/// What a session hands back to the host.
#[derive(Debug)]
pub enum Edited<C> {
    /// Nothing changed; this is the caller's own `Rc`.
    Unchanged(Rc<C>),
    /// Contents changed; this is a freshly built collection.
    Replaced(Rc<C>),
}

impl<C> Edited<C> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Edited::Replaced(_))
    }

    pub fn collection(&self) -> &Rc<C> {
        match self {
            Edited::Unchanged(c) | Edited::Replaced(c) => c,
        }
    }

    pub fn into_inner(self) -> Rc<C> {
        match self {
            Edited::Unchanged(c) | Edited::Replaced(c) => c,
        }
    }
}

pub struct CollectionEditSession<K: CollectionKind> {
    original: Rc<ObservableCollection<K>>,
}

impl<K: CollectionKind + Clone> CollectionEditSession<K> {
    pub fn new(original: Rc<ObservableCollection<K>>) -> Self {
        Self { original }
    }

    pub fn original(&self) -> &Rc<ObservableCollection<K>> {
        &self.original
    }

    /// Run `surface` against a working copy and resolve the result.
    pub fn run<S>(self, surface: &mut S) -> Result<Edited<ObservableCollection<K>>>
    where
        S: EditSurface<K> + ?Sized,
    {
        let component = self.original.component_name();
        let mut copy = WorkingCopy::of(&*self.original);
        let completion = surface.edit(&mut copy)?;
        let outcome = copy.finish();

        if completion == EditCompletion::Cancelled || !outcome.changed {
            debug!(%component, ?completion, "edit session left collection unchanged");
            return Ok(Edited::Unchanged(self.original));
        }

        let rebuilt = ObservableCollection::from_items(self.original.kind().clone(), outcome.items)
            .map_err(|err| VaultPropsError::ReconstructionFailed(err.to_string()))?;
        debug!(%component, items = rebuilt.len(), "edit session replaced collection");
        Ok(Edited::Replaced(Rc::new(rebuilt)))
    }
}
