//! # vaultprops
//!
//! An in-memory data layer behind a property-inspection UI for secret
//! metadata: the tags on a secret and the lifetime actions on a certificate.
//!
//! The crate does three things for a host UI:
//!
//! 1. **Validates** items as their fields are assigned, and collections as
//!    items are inserted.
//! 2. **Projects** every item as named property rows a generic grid can show.
//! 3. **Signals** mutation, both to live listeners and, through edit
//!    sessions, by handing back a fresh collection when an edit changed
//!    something.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sessions (session/)                                        │
//! │  - Run one bulk edit against a detached working copy        │
//! │  - Return the original Rc, or a rebuilt one on change       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collections (collection/, tags/, lifetime/)                │
//! │  - ObservableCollection<K> + per-kind rules                 │
//! │  - TagCollection (bounded), LifetimeActionCollection        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Items and views (tags/, lifetime/, property/)              │
//! │  - TagItem, LifetimeActionItem                              │
//! │  - PropertySource / EditableProperties                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No UI Assumptions
//!
//! Nothing here renders, prompts, or persists. Errors are returned, never
//! displayed; the host decides how to present them. Size limits arrive as
//! [`config::MetadataLimits`] values rather than process-wide constants.
//!
//! Everything is single-threaded: collections own boxed `FnMut` listeners
//! and sessions share collections through `Rc`.
//!
//! ## Module Overview
//!
//! - [`collection`]: the generic observable collection and its change events
//! - [`tags`]: tag items, validation, and the bounded tag collection
//! - [`lifetime`]: certificate lifetime actions and their collection
//! - [`property`]: property rows and the read/write view traits
//! - [`session`]: edit sessions and the edit-surface seam
//! - [`config`]: size limits, loaded with `confique`
//! - [`format`]: display helpers
//! - [`error`]: the crate error type

pub mod collection;
pub mod config;
pub mod error;
pub mod format;
pub mod lifetime;
pub mod property;
pub mod session;
pub mod tags;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use collection::{CollectionChange, CollectionKind, ObservableCollection};
pub use config::MetadataLimits;
pub use error::{Result, VaultPropsError};
pub use lifetime::{LifetimeActionCollection, LifetimeActionItem};
pub use property::{EditableProperties, PropertyRow, PropertySource};
pub use session::{CollectionEditSession, EditCompletion, EditSurface, Edited, WorkingCopy};
pub use tags::{TagCollection, TagItem};
