//! Self-service role pickers for the two independent role categories.

mod picker;
mod registry;

pub use picker::{apply_selection, RoleChangePlan, RoleSelectionOutcome};
pub use registry::{PickerOption, RoleEntry, RolePicker, RoleRegistry};

use serde::{Deserialize, Serialize};

/// Independent role groups, each with its own replace-on-select picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Game,
    Notification,
}

impl RoleCategory {
    pub const fn ordered() -> [Self; 2] {
        [Self::Game, Self::Notification]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Game => "Игровые роли",
            Self::Notification => "Роли оповещений",
        }
    }

    /// Payload used in the picker's component id.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Notification => "notifications",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.slug() == slug)
    }
}

/// Static description of a pickable role; the id comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    pub category: RoleCategory,
    pub key: &'static str,
    pub name: &'static str,
    pub emoji: Option<&'static str>,
    pub env_key: &'static str,
}

pub const ROLE_CATALOG: [RoleDefinition; 8] = [
    RoleDefinition {
        category: RoleCategory::Game,
        key: "cs2",
        name: "Counter-Strike 2",
        emoji: None,
        env_key: "ROLE_ID_CS2",
    },
    RoleDefinition {
        category: RoleCategory::Game,
        key: "valorant",
        name: "Valorant",
        emoji: None,
        env_key: "ROLE_ID_VALORANT",
    },
    RoleDefinition {
        category: RoleCategory::Game,
        key: "minecraft",
        name: "Minecraft",
        emoji: None,
        env_key: "ROLE_ID_MINECRAFT",
    },
    RoleDefinition {
        category: RoleCategory::Game,
        key: "gta",
        name: "GTA V",
        emoji: None,
        env_key: "ROLE_ID_GTA",
    },
    RoleDefinition {
        category: RoleCategory::Notification,
        key: "updates",
        name: "📢 Обновления",
        emoji: Some("📢"),
        env_key: "ROLE_ID_UPDATES",
    },
    RoleDefinition {
        category: RoleCategory::Notification,
        key: "events",
        name: "🎉 События",
        emoji: Some("🎉"),
        env_key: "ROLE_ID_EVENTS",
    },
    RoleDefinition {
        category: RoleCategory::Notification,
        key: "news",
        name: "📰 Новости",
        emoji: Some("📰"),
        env_key: "ROLE_ID_NEWS",
    },
    RoleDefinition {
        category: RoleCategory::Notification,
        key: "giveaways",
        name: "🎁 Розыгрыши",
        emoji: Some("🎁"),
        env_key: "ROLE_ID_GIVEAWAYS",
    },
];
