//! # Configuration
//!
//! Size limits for tag metadata are managed by [`confique`], which layers
//! environment variables and an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `VAULTPROPS_MAX_NUMBER_OF_TAGS`, etc.
//! 2. **Config file**: the path passed to [`MetadataLimits::load`], if any.
//! 3. **Compiled defaults**: the vault service limits.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_number_of_tags` | `15` | Tags allowed on a single secret |
//! | `max_tag_name_length` | `256` | Characters allowed in a tag name |
//! | `max_tag_value_length` | `256` | Characters allowed in a tag value |
//!
//! Limits are plain values: they are handed to [`TagItem`](crate::tags::TagItem)
//! and [`TagCollection`](crate::tags::TagCollection) constructors, so two
//! collections in the same process may run with different limits.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultPropsError};

pub const DEFAULT_MAX_NUMBER_OF_TAGS: usize = 15;
pub const DEFAULT_MAX_TAG_NAME_LENGTH: usize = 256;
pub const DEFAULT_MAX_TAG_VALUE_LENGTH: usize = 256;

/// Size limits applied to tags and tag collections.
///
/// The `#[config(default)]` literals must match the `DEFAULT_*` constants.
#[derive(Config, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataLimits {
    /// Maximum number of tags in one collection
    #[config(env = "VAULTPROPS_MAX_NUMBER_OF_TAGS", default = 15)]
    pub max_number_of_tags: usize,

    /// Maximum tag name length, in characters
    #[config(env = "VAULTPROPS_MAX_TAG_NAME_LENGTH", default = 256)]
    pub max_tag_name_length: usize,

    /// Maximum tag value length, in characters
    #[config(env = "VAULTPROPS_MAX_TAG_VALUE_LENGTH", default = 256)]
    pub max_tag_value_length: usize,
}

impl Default for MetadataLimits {
    fn default() -> Self {
        Self {
            max_number_of_tags: DEFAULT_MAX_NUMBER_OF_TAGS,
            max_tag_name_length: DEFAULT_MAX_TAG_NAME_LENGTH,
            max_tag_value_length: DEFAULT_MAX_TAG_VALUE_LENGTH,
        }
    }
}

impl MetadataLimits {
    /// Load limits from the environment, then `path` (when given), then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let limits = builder.load()?;
        limits.validate()?;
        tracing::debug!(?limits, "loaded metadata limits");
        Ok(limits)
    }

    /// Every limit must be positive.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("max_number_of_tags", self.max_number_of_tags),
            ("max_tag_name_length", self.max_tag_name_length),
            ("max_tag_value_length", self.max_tag_value_length),
        ];
        match checks.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(VaultPropsError::InvalidLimits(format!(
                "{} must be greater than zero",
                key
            ))),
            None => Ok(()),
        }
    }
}
