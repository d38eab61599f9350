use tracing::info;

use super::{RoleCategory, RoleRegistry};
use crate::gateway::{CommunityGateway, GatewayError};
use crate::ids::{RoleId, UserId};

/// Role mutations needed to make a member's category roles equal to a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangePlan {
    pub remove: Vec<RoleId>,
    pub add: Vec<RoleId>,
    pub granted: Vec<&'static str>,
}

impl RoleRegistry {
    /// Full replace: every held role of the category goes, every selected one comes back.
    pub fn plan_selection(
        &self,
        category: RoleCategory,
        held: &[RoleId],
        selected: &[String],
    ) -> RoleChangePlan {
        let category_ids = self.configured_ids(category);
        let remove = held
            .iter()
            .copied()
            .filter(|role| category_ids.contains(role))
            .collect();

        let mut add = Vec::new();
        let mut granted = Vec::new();
        for key in selected {
            if let Some(entry) = self.lookup(category, key) {
                if let Some(role_id) = entry.role_id {
                    if !add.contains(&role_id) {
                        add.push(role_id);
                        granted.push(entry.name);
                    }
                }
            }
        }

        RoleChangePlan {
            remove,
            add,
            granted,
        }
    }
}

/// Result shown to the member after a picker interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelectionOutcome {
    pub category: RoleCategory,
    pub granted: Vec<&'static str>,
}

impl RoleSelectionOutcome {
    pub fn summary(&self) -> String {
        if self.granted.is_empty() {
            return match self.category {
                RoleCategory::Game => {
                    "✅ **Все игровые роли сняты**\n🎮 У вас больше нет игровых ролей".to_string()
                }
                RoleCategory::Notification => {
                    "✅ **Все роли оповещений сняты**\n🔔 Вы больше не будете получать уведомления"
                        .to_string()
                }
            };
        }

        let names = self.granted.join(", ");
        match self.category {
            RoleCategory::Game => format!("✅ **Игровые роли обновлены!**\n🎮 Выданы роли: {names}"),
            RoleCategory::Notification => {
                format!("✅ **Роли оповещений обновлены!**\n🔔 Выданы роли: {names}")
            }
        }
    }
}

/// Replaces the member's roles in `category` with `selected`. Empty mutation lists skip their call.
pub async fn apply_selection<G>(
    gateway: &G,
    registry: &RoleRegistry,
    category: RoleCategory,
    user: UserId,
    held: &[RoleId],
    selected: &[String],
) -> Result<RoleSelectionOutcome, GatewayError>
where
    G: CommunityGateway + ?Sized,
{
    let plan = registry.plan_selection(category, held, selected);

    if !plan.remove.is_empty() {
        gateway.remove_roles(user, &plan.remove).await?;
    }
    if !plan.add.is_empty() {
        gateway.add_roles(user, &plan.add).await?;
    }

    info!(
        %user,
        ?category,
        removed = plan.remove.len(),
        added = plan.add.len(),
        "role selection applied"
    );

    Ok(RoleSelectionOutcome {
        category,
        granted: plan.granted,
    })
}
