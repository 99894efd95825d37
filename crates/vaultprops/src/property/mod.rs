//! # Property Views
//!
//! A property view is the flat list of rows a property grid renders for one
//! object. Instead of discovering fields at runtime, every item kind states
//! its rows explicitly:
//!
//! - [`PropertySource`]: the read side. A component name plus an ordered list
//!   of [`PropertyRow`]s, rebuilt on every call.
//! - [`EditableProperties`]: the write side. Sets a field by row name from raw
//!   grid input, validating eagerly.
//!
//! Rows are owned snapshots. Holding on to one does not keep the item alive
//! and does not track later changes; call `property_view()` again instead.

use serde::Serialize;

use crate::error::Result;

/// One name/value row in a property grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    /// Label shown in the name column
    pub name: String,
    /// Text shown in the value column
    pub value: String,
    /// Whether the grid may write this row back
    pub read_only: bool,
}

impl PropertyRow {
    pub fn read_only(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            read_only: true,
        }
    }

    pub fn editable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            read_only: false,
        }
    }
}

/// Something a property grid can display.
pub trait PropertySource {
    /// Caption for the object as a whole.
    fn component_name(&self) -> String;

    /// Current rows, in display order.
    fn property_view(&self) -> Vec<PropertyRow>;

    /// Look up a single row by name.
    fn property(&self, name: &str) -> Option<PropertyRow> {
        self.property_view().into_iter().find(|row| row.name == name)
    }
}

/// Something a property grid can write back to, one field at a time.
///
/// `value` is `None` when the grid submits an absent value; implementors map
/// that to the same errors their typed setters raise.
pub trait EditableProperties: PropertySource {
    fn set_property(&mut self, name: &str, value: Option<&str>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultPropsError;

    struct Sample {
        label: String,
    }

    impl PropertySource for Sample {
        fn component_name(&self) -> String {
            "Sample".to_string()
        }

        fn property_view(&self) -> Vec<PropertyRow> {
            vec![
                PropertyRow::editable("Label", self.label.clone()),
                PropertyRow::read_only("Length", self.label.len().to_string()),
            ]
        }
    }

    impl EditableProperties for Sample {
        fn set_property(&mut self, name: &str, value: Option<&str>) -> Result<()> {
            match name {
                "Label" => {
                    self.label = value
                        .ok_or(VaultPropsError::NullArgument { field: "Label" })?
                        .to_string();
                    Ok(())
                }
                "Length" => Err(VaultPropsError::ReadOnlyProperty(name.to_string())),
                other => Err(VaultPropsError::UnknownProperty(other.to_string())),
            }
        }
    }

    #[test]
    fn property_lookup_by_name() {
        let sample = Sample {
            label: "abc".into(),
        };
        let row = sample.property("Length").unwrap();
        assert_eq!(row.value, "3");
        assert!(row.read_only);
        assert!(sample.property("Missing").is_none());
    }

    #[test]
    fn view_reflects_writes() {
        let mut sample = Sample {
            label: "abc".into(),
        };
        sample.set_property("Label", Some("abcdef")).unwrap();
        assert_eq!(sample.property("Length").unwrap().value, "6");
        assert!(matches!(
            sample.set_property("Length", Some("1")),
            Err(VaultPropsError::ReadOnlyProperty(_))
        ));
    }
}
