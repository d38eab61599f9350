use poise::serenity_prelude as serenity;
use serenity::{
    ActionRowComponent, ComponentInteraction, ComponentInteractionDataKind,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    Interaction, ModalInteraction,
};
use tracing::{error, warn};

use super::{views, Data, HandlerError};
use crate::ids::{ChannelId, MessageId, RoleId, UserId};
use crate::interaction::ComponentId;
use crate::workflows::roles::{apply_selection, RoleCategory};
use crate::workflows::staff::{
    Applicant, ApplicationForm, ApplicationId, FormOffer, ReviewCardRef, Reviewer,
    StaffApplicationError, Verdict, APPLICATION_NOT_FOUND,
};

/// Routes component and modal interactions; failures are logged and acknowledged.
pub(super) async fn dispatch(ctx: &serenity::Context, interaction: &Interaction, data: &Data) {
    let result = match interaction {
        Interaction::Component(component) => handle_component(ctx, component, data).await,
        Interaction::Modal(modal) => handle_modal(ctx, modal, data).await,
        _ => return,
    };

    if let Err(error) = result {
        error!(%error, "interaction handling failed");
        acknowledge_failure(ctx, interaction).await;
    }
}

fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

fn deferred() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true))
}

fn display_name(user: &serenity::User) -> String {
    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}

fn ensure_guild(guild: Option<serenity::GuildId>, data: &Data) -> Result<(), HandlerError> {
    match guild {
        Some(guild) if guild.get() == data.guild_id.get() => Ok(()),
        _ => Err(HandlerError::MissingGuildContext),
    }
}

async fn handle_component(
    ctx: &serenity::Context,
    component: &ComponentInteraction,
    data: &Data,
) -> Result<(), HandlerError> {
    let id: ComponentId = component.data.custom_id.parse()?;

    match (id, &component.data.kind) {
        (ComponentId::RolePicker(category), ComponentInteractionDataKind::StringSelect { values }) => {
            role_selection(ctx, component, data, category, values).await
        }
        (ComponentId::PositionPicker, ComponentInteractionDataKind::StringSelect { values }) => {
            position_selection(ctx, component, data, values).await
        }
        (
            ComponentId::Review {
                verdict,
                application_id,
            },
            ComponentInteractionDataKind::Button,
        ) => review_decision(ctx, component, data, verdict, application_id).await,
        (other, _) => Err(HandlerError::UnexpectedComponent(other.to_string())),
    }
}

async fn role_selection(
    ctx: &serenity::Context,
    component: &ComponentInteraction,
    data: &Data,
    category: RoleCategory,
    values: &[String],
) -> Result<(), HandlerError> {
    ensure_guild(component.guild_id, data)?;
    let member = component
        .member
        .as_ref()
        .ok_or(HandlerError::MissingGuildContext)?;
    let held: Vec<RoleId> = member.roles.iter().map(|role| RoleId(role.get())).collect();

    component.create_response(&ctx.http, deferred()).await?;
    let outcome = apply_selection(
        data.gateway.as_ref(),
        &data.roles,
        category,
        UserId(component.user.id.get()),
        &held,
        values,
    )
    .await?;

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(outcome.summary()),
        )
        .await?;
    Ok(())
}

async fn position_selection(
    ctx: &serenity::Context,
    component: &ComponentInteraction,
    data: &Data,
    values: &[String],
) -> Result<(), HandlerError> {
    ensure_guild(component.guild_id, data)?;
    let position = values
        .first()
        .ok_or_else(|| HandlerError::UnexpectedComponent(component.data.custom_id.clone()))?;

    let response = match data
        .staff
        .offer_form(UserId(component.user.id.get()), position)?
    {
        FormOffer::Open(spec) => CreateInteractionResponse::Modal(views::application_modal(&spec)),
        FormOffer::AlreadyPending(existing) => ephemeral(existing.already_pending_notice()),
    };
    component.create_response(&ctx.http, response).await?;
    Ok(())
}

async fn review_decision(
    ctx: &serenity::Context,
    component: &ComponentInteraction,
    data: &Data,
    verdict: Verdict,
    application_id: ApplicationId,
) -> Result<(), HandlerError> {
    ensure_guild(component.guild_id, data)?;
    component.create_response(&ctx.http, deferred()).await?;

    let reviewer = Reviewer {
        user_id: UserId(component.user.id.get()),
        display_name: display_name(&component.user),
    };
    let card = ReviewCardRef {
        channel_id: ChannelId(component.channel_id.get()),
        message_id: MessageId(component.message.id.get()),
    };

    let content = match data
        .staff
        .decide(&application_id, verdict, reviewer, card)
        .await
    {
        Ok(report) => report.reviewer_summary(),
        Err(StaffApplicationError::NotFound(id)) => {
            warn!(application_id = %id, "decision on unknown or processed application");
            APPLICATION_NOT_FOUND.to_string()
        }
        Err(other) => return Err(other.into()),
    };

    component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;
    Ok(())
}

async fn handle_modal(
    ctx: &serenity::Context,
    modal: &ModalInteraction,
    data: &Data,
) -> Result<(), HandlerError> {
    let ComponentId::ApplicationForm { position } = modal.data.custom_id.parse::<ComponentId>()?
    else {
        return Err(HandlerError::UnexpectedComponent(modal.data.custom_id.clone()));
    };
    ensure_guild(modal.guild_id, data)?;

    let inputs = modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.as_str(),
                input.value.as_deref().unwrap_or_default(),
            )),
            _ => None,
        });
    let form = ApplicationForm::from_fields(inputs).map_err(StaffApplicationError::MissingField)?;

    modal.create_response(&ctx.http, deferred()).await?;

    let applicant = Applicant {
        user_id: UserId(modal.user.id.get()),
        username: modal.user.name.clone(),
        display_name: display_name(&modal.user),
        avatar_url: Some(modal.user.face()),
    };

    let reply = match data.staff.submit(applicant, &position, form).await {
        Ok(submission) => EditInteractionResponse::new()
            .embed(views::submission_confirmation(&submission.application)),
        Err(StaffApplicationError::AlreadyPending(existing)) => {
            EditInteractionResponse::new().content(existing.already_pending_notice())
        }
        Err(other) => return Err(other.into()),
    };

    modal.edit_response(&ctx.http, reply).await?;
    Ok(())
}

/// Best-effort generic error reply. A deferred interaction gets its placeholder edited instead.
async fn acknowledge_failure(ctx: &serenity::Context, interaction: &Interaction) {
    let outcome = match interaction {
        Interaction::Component(component) => {
            match component
                .create_response(&ctx.http, ephemeral(views::GENERIC_FAILURE))
                .await
            {
                Ok(()) => Ok(()),
                Err(_) => component
                    .edit_response(
                        &ctx.http,
                        EditInteractionResponse::new().content(views::GENERIC_FAILURE),
                    )
                    .await
                    .map(|_| ()),
            }
        }
        Interaction::Modal(modal) => {
            match modal
                .create_response(&ctx.http, ephemeral(views::GENERIC_FAILURE))
                .await
            {
                Ok(()) => Ok(()),
                Err(_) => modal
                    .edit_response(
                        &ctx.http,
                        EditInteractionResponse::new().content(views::GENERIC_FAILURE),
                    )
                    .await
                    .map(|_| ()),
            }
        }
        _ => Ok(()),
    };

    if let Err(error) = outcome {
        warn!(%error, "failure acknowledgement could not be delivered");
    }
}
