//! Secret tags.
//!
//! A tag is a name/value annotation on a secret. Tags are validated field by
//! field as they are assigned (see [`validation`]), and a [`TagCollection`]
//! caps how many a secret may carry.
//!
//! ## Identity
//!
//! Two tags are the same tag when their names match ignoring case. Values do
//! not take part in identity, which is what lets
//! [`add_or_replace`](crate::collection::ObservableCollection::add_or_replace)
//! update `Env` when handed `env`. The stored spelling of the name is kept
//! and only the value changes. Hashing folds case the same way, so tags
//! behave consistently as keys in hashed containers.
//!
//! Case folding is per character and ordinal: a character folds to its
//! uppercase form only when that form is a single character. `ß` stays `ß`,
//! and the Kelvin sign (U+212A) does not match `k`.

pub mod validation;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::collection::{CollectionKind, ObservableCollection, PendingChange};
use crate::config::MetadataLimits;
use crate::error::{Result, VaultPropsError};
use crate::property::{EditableProperties, PropertyRow, PropertySource};

pub use validation::{validate_tag_name, validate_tag_value, FieldValidationError};

/// Row labels used by a single tag's property view.
pub const NAME_PROPERTY: &str = "Name";
pub const VALUE_PROPERTY: &str = "Value";

/// A single validated tag.
#[derive(Debug, Clone)]
pub struct TagItem {
    name: String,
    value: String,
    limits: MetadataLimits,
}

impl TagItem {
    pub fn new(name: &str, value: &str, limits: MetadataLimits) -> Result<Self> {
        let mut tag = Self {
            name: String::new(),
            value: String::new(),
            limits,
        };
        tag.set_name(name)?;
        tag.set_value(value)?;
        Ok(tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn limits(&self) -> &MetadataLimits {
        &self.limits
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.assign_name(Some(name))
    }

    pub fn set_value(&mut self, value: &str) -> Result<()> {
        self.assign_value(Some(value))
    }

    fn assign_name(&mut self, name: Option<&str>) -> Result<()> {
        let name = validate_tag_name(name, self.limits.max_tag_name_length)?;
        self.name = name.to_string();
        Ok(())
    }

    fn assign_value(&mut self, value: Option<&str>) -> Result<()> {
        let value = validate_tag_value(value, self.limits.max_tag_value_length)?;
        self.value = value.to_string();
        Ok(())
    }

    fn folded_name(&self) -> impl Iterator<Item = char> + '_ {
        fold(&self.name)
    }
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn fold(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().map(fold_char)
}

impl PartialEq for TagItem {
    fn eq(&self, other: &Self) -> bool {
        self.folded_name().eq(other.folded_name())
    }
}

impl Eq for TagItem {}

impl Hash for TagItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded_name() {
            c.hash(state);
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for TagItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PropertySource for TagItem {
    fn component_name(&self) -> String {
        self.name.clone()
    }

    fn property_view(&self) -> Vec<PropertyRow> {
        vec![
            PropertyRow::editable(NAME_PROPERTY, self.name.clone()),
            PropertyRow::editable(VALUE_PROPERTY, self.value.clone()),
        ]
    }
}

impl EditableProperties for TagItem {
    fn set_property(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match name {
            NAME_PROPERTY => self.assign_name(value),
            VALUE_PROPERTY => self.assign_value(value),
            other => Err(VaultPropsError::UnknownProperty(other.to_string())),
        }
    }
}

/// Collection rules for tags: a bounded count and name/value rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagRules {
    limits: MetadataLimits,
}

impl TagRules {
    pub fn new(limits: MetadataLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &MetadataLimits {
        &self.limits
    }
}

impl CollectionKind for TagRules {
    type Item = TagItem;

    fn component_name(&self) -> String {
        "Tags".to_string()
    }

    fn item_noun(&self) -> &'static str {
        "tag"
    }

    fn validate(&self, items: &[TagItem], pending: &PendingChange<'_, TagItem>) -> Result<()> {
        // items may have been built under other limits
        let item = pending.item();
        validate_tag_name(Some(item.name.as_str()), self.limits.max_tag_name_length)?;
        validate_tag_value(Some(item.value.as_str()), self.limits.max_tag_value_length)?;

        let max = self.limits.max_number_of_tags;
        if pending.resulting_len(items.len()) > max {
            return Err(VaultPropsError::CollectionConstraintViolation(format!(
                "Too many tags, maximum number of tags per secret is {}",
                max
            )));
        }
        Ok(())
    }

    fn project(&self, item: &TagItem) -> PropertyRow {
        PropertyRow::read_only(item.name.clone(), item.value.clone())
    }

    /// Keeps the stored spelling of the name and takes the new value.
    fn replacement(&self, existing: &TagItem, incoming: TagItem) -> TagItem {
        TagItem {
            name: existing.name.clone(),
            ..incoming
        }
    }
}

pub type TagCollection = ObservableCollection<TagRules>;

impl Default for TagCollection {
    fn default() -> Self {
        Self::with_limits(MetadataLimits::default())
    }
}

impl TagCollection {
    pub fn with_limits(limits: MetadataLimits) -> Self {
        ObservableCollection::new(TagRules::new(limits))
    }

    /// Build a collection from a secret's tag dictionary, ordered by name.
    pub fn from_tag_map(tags: &HashMap<String, String>, limits: MetadataLimits) -> Result<Self> {
        let mut entries: Vec<_> = tags.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let items = entries
            .into_iter()
            .map(|(name, value)| TagItem::new(name, value, limits))
            .collect::<Result<Vec<_>>>()?;
        ObservableCollection::from_items(TagRules::new(limits), items)
    }

    /// Export as a tag dictionary.
    pub fn to_tag_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|tag| (tag.name.clone(), tag.value.clone()))
            .collect()
    }

    /// Find a tag by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&TagItem> {
        self.iter().find(|tag| tag.folded_name().eq(fold(name)))
    }

    /// Validate and upsert a name/value pair using this collection's limits.
    pub fn upsert(&mut self, name: &str, value: &str) -> Result<usize> {
        let tag = TagItem::new(name, value, *self.kind().limits())?;
        self.add_or_replace(tag)
    }
}
