//! Certificate lifetime actions.
//!
//! A lifetime action says what happens to a certificate and when: so many
//! days before expiry, or once a percentage of its lifetime has elapsed.
//! Either trigger may be unset. Nothing here is validated beyond the types.

use std::fmt;

use crate::collection::{CollectionKind, ObservableCollection};
use crate::error::{Result, VaultPropsError};
use crate::format::{optional_to_string, parse_optional_int};
use crate::property::{EditableProperties, PropertyRow, PropertySource};

/// Well-known action kinds.
pub mod action_type {
    pub const AUTO_RENEW: &str = "AutoRenew";
    pub const EMAIL_CONTACTS: &str = "EmailContacts";
}

pub const TYPE_PROPERTY: &str = "Type";
pub const DAYS_BEFORE_EXPIRY_PROPERTY: &str = "DaysBeforeExpiry";
pub const LIFETIME_PERCENTAGE_PROPERTY: &str = "LifetimePercentage";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LifetimeActionItem {
    pub action_type: String,
    pub days_before_expiry: Option<i32>,
    pub lifetime_percentage: Option<i32>,
}

impl LifetimeActionItem {
    pub fn new(
        action_type: impl Into<String>,
        days_before_expiry: Option<i32>,
        lifetime_percentage: Option<i32>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            days_before_expiry,
            lifetime_percentage,
        }
    }

    pub fn before_expiry(action_type: impl Into<String>, days: i32) -> Self {
        Self::new(action_type, Some(days), None)
    }

    pub fn at_lifetime_percentage(action_type: impl Into<String>, percentage: i32) -> Self {
        Self::new(action_type, None, Some(percentage))
    }

    /// Both triggers, with `(none)` standing in for unset values.
    pub fn summary(&self) -> String {
        format!(
            "{}={}, {}={}",
            DAYS_BEFORE_EXPIRY_PROPERTY,
            optional_to_string(self.days_before_expiry),
            LIFETIME_PERCENTAGE_PROPERTY,
            optional_to_string(self.lifetime_percentage)
        )
    }
}

impl fmt::Display for LifetimeActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.action_type, self.summary())
    }
}

impl PropertySource for LifetimeActionItem {
    fn component_name(&self) -> String {
        self.action_type.clone()
    }

    fn property_view(&self) -> Vec<PropertyRow> {
        vec![
            PropertyRow::editable(TYPE_PROPERTY, self.action_type.clone()),
            PropertyRow::editable(
                DAYS_BEFORE_EXPIRY_PROPERTY,
                optional_to_string(self.days_before_expiry),
            ),
            PropertyRow::editable(
                LIFETIME_PERCENTAGE_PROPERTY,
                optional_to_string(self.lifetime_percentage),
            ),
        ]
    }
}

impl EditableProperties for LifetimeActionItem {
    fn set_property(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match name {
            TYPE_PROPERTY => {
                let value = value.ok_or(VaultPropsError::NullArgument {
                    field: TYPE_PROPERTY,
                })?;
                self.action_type = value.to_string();
            }
            DAYS_BEFORE_EXPIRY_PROPERTY => {
                self.days_before_expiry = parse_trigger(DAYS_BEFORE_EXPIRY_PROPERTY, value)?;
            }
            LIFETIME_PERCENTAGE_PROPERTY => {
                self.lifetime_percentage = parse_trigger(LIFETIME_PERCENTAGE_PROPERTY, value)?;
            }
            other => return Err(VaultPropsError::UnknownProperty(other.to_string())),
        }
        Ok(())
    }
}

fn parse_trigger(field: &'static str, value: Option<&str>) -> Result<Option<i32>> {
    parse_optional_int(value).map_err(|_| VaultPropsError::InvalidNumber {
        field,
        value: value.unwrap_or_default().to_string(),
    })
}

/// Collection rules for lifetime actions: unbounded, one summary row per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifetimeActionRules;

impl CollectionKind for LifetimeActionRules {
    type Item = LifetimeActionItem;

    fn component_name(&self) -> String {
        "Lifetime Actions".to_string()
    }

    fn item_noun(&self) -> &'static str {
        "lifetime action"
    }

    fn project(&self, item: &LifetimeActionItem) -> PropertyRow {
        PropertyRow::read_only(item.action_type.clone(), item.summary())
    }
}

pub type LifetimeActionCollection = ObservableCollection<LifetimeActionRules>;

impl Default for LifetimeActionCollection {
    fn default() -> Self {
        ObservableCollection::new(LifetimeActionRules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_sentinel_for_unset_triggers() {
        let renew = LifetimeActionItem::at_lifetime_percentage(action_type::AUTO_RENEW, 80);
        assert_eq!(
            renew.summary(),
            "DaysBeforeExpiry=(none), LifetimePercentage=80"
        );
        assert_eq!(
            renew.to_string(),
            "AutoRenew (DaysBeforeExpiry=(none), LifetimePercentage=80)"
        );
    }

    #[test]
    fn any_combination_is_accepted() {
        let mut actions = LifetimeActionCollection::default();
        actions.add(LifetimeActionItem::new("", None, None)).unwrap();
        actions
            .add(LifetimeActionItem::new("Custom", Some(-5), Some(400)))
            .unwrap();
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn collection_has_no_maximum() {
        let mut actions = LifetimeActionCollection::default();
        for days in 0..100 {
            actions
                .add(LifetimeActionItem::before_expiry(
                    action_type::EMAIL_CONTACTS,
                    days,
                ))
                .unwrap();
        }
        assert_eq!(actions.len(), 100);
        assert_eq!(actions.display_summary(), "100 lifetime actions");
    }

    #[test]
    fn property_view_pairs_type_with_summary() {
        let mut actions = LifetimeActionCollection::default();
        actions
            .add(LifetimeActionItem::before_expiry(
                action_type::EMAIL_CONTACTS,
                30,
            ))
            .unwrap();

        let view = actions.property_view();
        assert_eq!(
            view,
            vec![PropertyRow::read_only(
                "EmailContacts",
                "DaysBeforeExpiry=30, LifetimePercentage=(none)"
            )]
        );
    }

    #[test]
    fn set_property_parses_triggers() {
        let mut action = LifetimeActionItem::before_expiry(action_type::AUTO_RENEW, 30);

        action
            .set_property(LIFETIME_PERCENTAGE_PROPERTY, Some("90"))
            .unwrap();
        action
            .set_property(DAYS_BEFORE_EXPIRY_PROPERTY, Some("(none)"))
            .unwrap();

        assert_eq!(action.days_before_expiry, None);
        assert_eq!(action.lifetime_percentage, Some(90));
        assert_eq!(
            action.property(DAYS_BEFORE_EXPIRY_PROPERTY).unwrap().value,
            "(none)"
        );
    }

    #[test]
    fn set_property_rejects_bad_input() {
        let mut action = LifetimeActionItem::default();
        assert!(matches!(
            action.set_property(DAYS_BEFORE_EXPIRY_PROPERTY, Some("soon")),
            Err(VaultPropsError::InvalidNumber { .. })
        ));
        assert!(matches!(
            action.set_property(TYPE_PROPERTY, None),
            Err(VaultPropsError::NullArgument { .. })
        ));
        assert!(matches!(
            action.set_property("Trigger", Some("x")),
            Err(VaultPropsError::UnknownProperty(_))
        ));
    }
}
