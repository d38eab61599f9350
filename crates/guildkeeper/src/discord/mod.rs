//! Discord adapter: slash commands, component routing and the REST gateway.
//!
//! Everything SDK-specific lives here. Handlers translate interactions into
//! workflow calls and workflow results back into embeds.

mod commands;
mod components;
mod gateway;
mod presence;
pub mod views;

pub use gateway::DiscordGateway;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use crate::config::PanelConfig;
use crate::gateway::GatewayError;
use crate::ids::GuildId;
use crate::interaction::ComponentIdError;
use crate::workflows::roles::RoleRegistry;
use crate::workflows::staff::{
    InMemoryApplicationStore, StaffApplicationError, StaffApplicationService,
};

pub type StaffService = StaffApplicationService<InMemoryApplicationStore, DiscordGateway>;

/// Shared state handed to every command and interaction handler.
pub struct Data {
    pub roles: Arc<RoleRegistry>,
    pub staff: Arc<StaffService>,
    pub gateway: Arc<DiscordGateway>,
    pub panels: PanelConfig,
    pub guild_id: GuildId,
    pub expected_application_id: Option<u64>,
    pub readiness: Arc<AtomicBool>,
}

pub type Context<'a> = poise::Context<'a, Data, HandlerError>;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Discord(#[from] serenity::Error),
    #[error(transparent)]
    Staff(#[from] StaffApplicationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    ComponentId(#[from] ComponentIdError),
    #[error("interaction arrived outside the managed guild")]
    MissingGuildContext,
    #[error("component '{0}' does not accept this interaction")]
    UnexpectedComponent(String),
}

/// Builds the poise framework: guild command registration, component routing, presence.
pub fn framework(data: Data) -> poise::Framework<Data, HandlerError> {
    let guild_id = serenity::GuildId::new(data.guild_id.get());

    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(event_handler(ctx, event, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                if let Some(expected) = data.expected_application_id {
                    let connected = ready.application.id.get();
                    if connected != expected {
                        warn!(expected, connected, "CLIENT_ID does not match the connected application");
                    }
                }

                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;
                presence::spawn_rotation(ctx.clone());
                data.readiness.store(true, Ordering::Release);

                info!(
                    bot = %ready.user.name,
                    guild = %data.guild_id,
                    commands = framework.options().commands.len(),
                    "guildkeeper connected"
                );
                Ok(data)
            })
        })
        .build()
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), HandlerError> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        components::dispatch(ctx, interaction, data).await;
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, HandlerError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(%error, "bot setup failed");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().qualified_name, %error, "command failed");
            let reply = poise::CreateReply::default()
                .content(views::GENERIC_FAILURE)
                .ephemeral(true);
            if let Err(reply_error) = ctx.send(reply).await {
                warn!(%reply_error, "failure reply could not be sent");
            }
        }
        other => {
            if let Err(error) = poise::builtins::on_error(other).await {
                error!(%error, "error while handling framework error");
            }
        }
    }
}
