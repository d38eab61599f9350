use chrono::Utc;
use poise::CreateReply;
use tracing::{error, info, warn};

use super::{views, Context, Data, HandlerError};
use crate::workflows::roles::RoleCategory;

pub(super) fn all() -> Vec<poise::Command<Data, HandlerError>> {
    vec![
        setup_roles(),
        setup_staff(),
        staff_stats(),
        clear_applications(),
    ]
}

async fn reply_ephemeral(ctx: Context<'_>, content: &str) -> Result<(), HandlerError> {
    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;
    Ok(())
}

/// Создать панель выбора ролей
#[poise::command(
    slash_command,
    rename = "setup-roles",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
async fn setup_roles(ctx: Context<'_>) -> Result<(), HandlerError> {
    ctx.defer_ephemeral().await?;

    let reply = match post_role_panels(ctx).await {
        Ok(0) => views::ROLE_PANELS_EMPTY,
        Ok(_) => views::ROLE_PANELS_CREATED,
        Err(error) => {
            error!(%error, channel = %ctx.channel_id(), "role panels could not be posted");
            views::ROLE_PANELS_FAILED
        }
    };
    reply_ephemeral(ctx, reply).await
}

async fn post_role_panels(ctx: Context<'_>) -> Result<usize, HandlerError> {
    let data = ctx.data();
    let mut posted = 0;

    for category in RoleCategory::ordered() {
        let Some(picker) = data.roles.picker(category) else {
            warn!(?category, "no roles configured for category, panel skipped");
            continue;
        };
        let message = views::role_panel(&picker, data.panels.roles_image_url.as_deref());
        ctx.channel_id().send_message(ctx.http(), message).await?;
        posted += 1;
    }

    info!(channel = %ctx.channel_id(), posted, "role panels posted");
    Ok(posted)
}

/// Создать панель набора в стафф
#[poise::command(
    slash_command,
    rename = "setup-staff",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
async fn setup_staff(ctx: Context<'_>) -> Result<(), HandlerError> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let message = views::staff_panel(
        data.staff.positions(),
        data.panels.staff_image_url.as_deref(),
    );
    let reply = match ctx.channel_id().send_message(ctx.http(), message).await {
        Ok(_) => {
            info!(channel = %ctx.channel_id(), "staff panel posted");
            views::STAFF_PANEL_CREATED
        }
        Err(error) => {
            error!(%error, channel = %ctx.channel_id(), "staff panel could not be posted");
            views::STAFF_PANEL_FAILED
        }
    };
    reply_ephemeral(ctx, reply).await
}

/// Показать статистику заявок
#[poise::command(
    slash_command,
    rename = "staff-stats",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
async fn staff_stats(ctx: Context<'_>) -> Result<(), HandlerError> {
    let stats = ctx.data().staff.stats()?;
    ctx.send(
        CreateReply::default()
            .embed(views::stats_embed(&stats, Utc::now()))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Очистить все заявки из памяти
#[poise::command(
    slash_command,
    rename = "clear-applications",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
async fn clear_applications(ctx: Context<'_>) -> Result<(), HandlerError> {
    let removed = ctx.data().staff.clear()?;
    info!(removed, admin = %ctx.author().id, "applications cleared by command");
    ctx.send(
        CreateReply::default()
            .embed(views::cleared_embed(removed))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
