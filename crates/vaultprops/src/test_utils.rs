use crate::config::MetadataLimits;
use crate::lifetime::{action_type, LifetimeActionCollection, LifetimeActionItem};
use crate::tags::{TagCollection, TagItem};

/// Builder for tag collections used across tests.
pub struct TagFixture {
    pub limits: MetadataLimits,
    pub tags: Vec<(String, String)>,
}

impl Default for TagFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TagFixture {
    pub fn new() -> Self {
        Self {
            limits: MetadataLimits::default(),
            tags: Vec::new(),
        }
    }

    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.limits.max_number_of_tags = max;
        self
    }

    pub fn with_tag(mut self, name: &str, value: &str) -> Self {
        self.tags.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds `count` tags named `tag-1`, `tag-2`, ...
    pub fn with_tags(mut self, count: usize) -> Self {
        for i in 0..count {
            self.tags
                .push((format!("tag-{}", i + 1), format!("value {}", i + 1)));
        }
        self
    }

    pub fn item(&self, name: &str, value: &str) -> TagItem {
        TagItem::new(name, value, self.limits).expect("fixture tag must be valid")
    }

    pub fn build(&self) -> TagCollection {
        let mut collection = TagCollection::with_limits(self.limits);
        for (name, value) in &self.tags {
            collection
                .add(self.item(name, value))
                .expect("fixture collection must fit its limits");
        }
        collection
    }
}

/// A renew-at-80% action followed by an email-30-days-before action.
pub fn sample_lifetime_actions() -> LifetimeActionCollection {
    let mut actions = LifetimeActionCollection::default();
    for item in [
        LifetimeActionItem::at_lifetime_percentage(action_type::AUTO_RENEW, 80),
        LifetimeActionItem::before_expiry(action_type::EMAIL_CONTACTS, 30),
    ] {
        actions.add(item).expect("lifetime actions are unbounded");
    }
    actions
}
