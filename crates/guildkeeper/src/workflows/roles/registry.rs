use std::collections::BTreeSet;

use super::{RoleCategory, ROLE_CATALOG};
use crate::config::RoleBindings;
use crate::ids::RoleId;

/// Catalog entry resolved against configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub emoji: Option<&'static str>,
    pub role_id: Option<RoleId>,
}

impl RoleEntry {
    pub fn is_configured(&self) -> bool {
        self.role_id.is_some()
    }
}

/// One selectable option of a published picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub label: &'static str,
    pub value: &'static str,
    pub emoji: Option<&'static str>,
}

/// Multi-select picker for a category; users may pick anywhere from zero to all options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePicker {
    pub category: RoleCategory,
    pub options: Vec<PickerOption>,
}

impl RolePicker {
    pub const MIN_VALUES: u8 = 0;

    pub fn max_values(&self) -> u8 {
        u8::try_from(self.options.len()).unwrap_or(u8::MAX)
    }
}

/// Immutable lookup table built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    game: Vec<RoleEntry>,
    notification: Vec<RoleEntry>,
}

impl RoleRegistry {
    pub fn from_bindings(bindings: &RoleBindings) -> Self {
        let resolve = |category: RoleCategory| {
            ROLE_CATALOG
                .iter()
                .filter(|definition| definition.category == category)
                .map(|definition| RoleEntry {
                    key: definition.key,
                    name: definition.name,
                    emoji: definition.emoji,
                    role_id: bindings.get(definition.env_key),
                })
                .collect::<Vec<_>>()
        };

        Self {
            game: resolve(RoleCategory::Game),
            notification: resolve(RoleCategory::Notification),
        }
    }

    pub fn entries(&self, category: RoleCategory) -> &[RoleEntry] {
        match category {
            RoleCategory::Game => &self.game,
            RoleCategory::Notification => &self.notification,
        }
    }

    pub fn configured(&self, category: RoleCategory) -> impl Iterator<Item = &RoleEntry> {
        self.entries(category)
            .iter()
            .filter(|entry| entry.is_configured())
    }

    pub fn configured_ids(&self, category: RoleCategory) -> BTreeSet<RoleId> {
        self.configured(category)
            .filter_map(|entry| entry.role_id)
            .collect()
    }

    /// Only configured entries resolve; an unconfigured key behaves like an unknown one.
    pub fn lookup(&self, category: RoleCategory, key: &str) -> Option<&RoleEntry> {
        self.configured(category).find(|entry| entry.key == key)
    }

    /// `None` when nothing in the category is configured, which disables its panel.
    pub fn picker(&self, category: RoleCategory) -> Option<RolePicker> {
        let options: Vec<PickerOption> = self
            .configured(category)
            .map(|entry| PickerOption {
                label: entry.name,
                value: entry.key,
                emoji: entry.emoji,
            })
            .collect();

        if options.is_empty() {
            None
        } else {
            Some(RolePicker { category, options })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&'static str, u64)]) -> RoleBindings {
        pairs
            .iter()
            .map(|(key, id)| (*key, RoleId(*id)))
            .collect()
    }

    #[test]
    fn unconfigured_entries_are_skipped_in_picker() {
        let registry = RoleRegistry::from_bindings(&bindings(&[
            ("ROLE_ID_CS2", 10),
            ("ROLE_ID_GTA", 13),
        ]));

        let picker = registry.picker(RoleCategory::Game).expect("game picker enabled");
        let values: Vec<_> = picker.options.iter().map(|option| option.value).collect();
        assert_eq!(values, vec!["cs2", "gta"]);
        assert_eq!(picker.max_values(), 2);
        assert_eq!(RolePicker::MIN_VALUES, 0);
        assert_eq!(registry.entries(RoleCategory::Game).len(), 4);
    }

    #[test]
    fn category_without_configured_roles_has_no_picker() {
        let registry = RoleRegistry::from_bindings(&bindings(&[("ROLE_ID_CS2", 10)]));
        assert!(registry.picker(RoleCategory::Notification).is_none());
        assert!(registry.configured_ids(RoleCategory::Notification).is_empty());
    }

    #[test]
    fn notification_options_carry_emoji() {
        let registry = RoleRegistry::from_bindings(&bindings(&[("ROLE_ID_NEWS", 30)]));
        let picker = registry
            .picker(RoleCategory::Notification)
            .expect("notification picker enabled");
        assert_eq!(
            picker.options,
            vec![PickerOption {
                label: "📰 Новости",
                value: "news",
                emoji: Some("📰"),
            }]
        );
    }

    #[test]
    fn lookup_ignores_other_category_and_unconfigured_keys() {
        let registry = RoleRegistry::from_bindings(&bindings(&[
            ("ROLE_ID_CS2", 10),
            ("ROLE_ID_EVENTS", 21),
        ]));
        assert!(registry.lookup(RoleCategory::Game, "cs2").is_some());
        assert!(registry.lookup(RoleCategory::Game, "events").is_none());
        assert!(registry.lookup(RoleCategory::Game, "valorant").is_none());
        assert!(registry.lookup(RoleCategory::Notification, "events").is_some());
    }

    #[test]
    fn category_slugs_round_trip() {
        for category in RoleCategory::ordered() {
            assert_eq!(RoleCategory::from_slug(category.slug()), Some(category));
        }
        assert_eq!(RoleCategory::from_slug("staff"), None);
    }
}
