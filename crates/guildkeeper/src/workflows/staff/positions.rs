use crate::config::RoleBindings;
use crate::ids::RoleId;

/// Static description of an open staff position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub env_key: &'static str,
}

pub const POSITION_CATALOG: [PositionDefinition; 3] = [
    PositionDefinition {
        key: "helper",
        name: "👥 Хелпер",
        description: "Помощь новичкам и поддержка пользователей",
        env_key: "ROLE_ID_HELPER",
    },
    PositionDefinition {
        key: "moderator",
        name: "🛡️ Модератор",
        description: "Модерация чата и поддержание порядка",
        env_key: "ROLE_ID_MODERATOR",
    },
    PositionDefinition {
        key: "admin",
        name: "⚡ Администратор",
        description: "Управление сервером и командой",
        env_key: "ROLE_ID_ADMIN",
    },
];

/// Position resolved against configuration. `role_id` is granted on approval when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPosition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub role_id: Option<RoleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRegistry {
    positions: Vec<StaffPosition>,
}

impl PositionRegistry {
    /// Every position is always offered; only the granted role depends on configuration.
    pub fn from_bindings(bindings: &RoleBindings) -> Self {
        let positions = POSITION_CATALOG
            .iter()
            .map(|definition| StaffPosition {
                key: definition.key,
                name: definition.name,
                description: definition.description,
                role_id: bindings.get(definition.env_key),
            })
            .collect();

        Self { positions }
    }

    pub fn get(&self, key: &str) -> Option<&StaffPosition> {
        self.positions.iter().find(|position| position.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaffPosition> {
        self.positions.iter()
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.positions.iter().position(|position| position.key == key)
    }

    /// Display name for `key`, or the key itself when the position is unknown.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map_or(key, |position| position.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_offered_even_without_roles() {
        let registry = PositionRegistry::from_bindings(&RoleBindings::default());
        let keys: Vec<_> = registry.iter().map(|position| position.key).collect();
        assert_eq!(keys, vec!["helper", "moderator", "admin"]);
        assert!(registry.iter().all(|position| position.role_id.is_none()));
    }

    #[test]
    fn granted_role_comes_from_bindings() {
        let bindings: RoleBindings = [("ROLE_ID_MODERATOR", RoleId(77))].into_iter().collect();
        let registry = PositionRegistry::from_bindings(&bindings);
        assert_eq!(
            registry.get("moderator").and_then(|position| position.role_id),
            Some(RoleId(77))
        );
        assert_eq!(registry.get("helper").and_then(|position| position.role_id), None);
    }

    #[test]
    fn unknown_keys_label_as_themselves() {
        let registry = PositionRegistry::from_bindings(&RoleBindings::default());
        assert_eq!(registry.label_for("helper"), "👥 Хелпер");
        assert_eq!(registry.label_for("designer"), "designer");
    }
}
