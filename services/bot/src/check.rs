use guildkeeper::config::AppConfig;
use guildkeeper::error::AppError;
use guildkeeper::workflows::roles::{RoleCategory, RoleRegistry};
use guildkeeper::workflows::staff::PositionRegistry;

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    println!("{}", summary(&config));
    Ok(())
}

/// Human-readable report of what the current configuration enables.
pub(crate) fn summary(config: &AppConfig) -> String {
    let mut lines = vec![
        format!("guild: {}", config.discord.guild_id),
        format!("review channel: {}", config.guild.review_channel_id),
        match config.guild.reviewer_role_id {
            Some(role) => format!("reviewer mention: role {role}"),
            None => "reviewer mention: omitted (ADMIN_ROLE_ID unset)".to_string(),
        },
    ];

    let roles = RoleRegistry::from_bindings(&config.guild.role_bindings);
    for category in RoleCategory::ordered() {
        let entries = roles.entries(category);
        let bound = roles.configured(category).count();
        let state = if bound == 0 { "panel disabled" } else { "panel enabled" };
        lines.push(format!(
            "{}: {bound}/{} roles bound, {state}",
            category.slug(),
            entries.len()
        ));
        for entry in entries {
            let binding = entry
                .role_id
                .map_or_else(|| "unbound".to_string(), |role| role.to_string());
            lines.push(format!("  {} -> {binding}", entry.key));
        }
    }

    let positions = PositionRegistry::from_bindings(&config.guild.role_bindings);
    lines.push("staff positions:".to_string());
    for position in positions.iter() {
        let grant = position
            .role_id
            .map_or_else(|| "no role granted".to_string(), |role| format!("grants {role}"));
        lines.push(format!("  {} -> {grant}", position.key));
    }

    lines.join("\n")
}
