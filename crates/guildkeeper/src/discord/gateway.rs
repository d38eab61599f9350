use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use serenity::{CreateMessage, EditMessage, Http};

use super::views;
use crate::gateway::{CommunityGateway, GatewayError};
use crate::ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
use crate::workflows::staff::{DecisionNotice, ReviewAudit, ReviewCardRef, ReviewPost};

const AUDIT_REASON: &str = "guildkeeper";

/// [`CommunityGateway`] backed by the Discord REST API.
pub struct DiscordGateway {
    http: Arc<Http>,
    guild_id: serenity::GuildId,
    review_channel: serenity::ChannelId,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, guild_id: GuildId, review_channel: ChannelId) -> Self {
        Self {
            http,
            guild_id: serenity::GuildId::new(guild_id.get()),
            review_channel: serenity::ChannelId::new(review_channel.get()),
        }
    }
}

fn request(error: serenity::Error) -> GatewayError {
    GatewayError::Request(error.to_string())
}

#[async_trait]
impl CommunityGateway for DiscordGateway {
    async fn add_roles(&self, user: UserId, roles: &[RoleId]) -> Result<(), GatewayError> {
        let member = serenity::UserId::new(user.get());
        for role in roles {
            self.http
                .add_member_role(
                    self.guild_id,
                    member,
                    serenity::RoleId::new(role.get()),
                    Some(AUDIT_REASON),
                )
                .await
                .map_err(request)?;
        }
        Ok(())
    }

    async fn remove_roles(&self, user: UserId, roles: &[RoleId]) -> Result<(), GatewayError> {
        let member = serenity::UserId::new(user.get());
        for role in roles {
            self.http
                .remove_member_role(
                    self.guild_id,
                    member,
                    serenity::RoleId::new(role.get()),
                    Some(AUDIT_REASON),
                )
                .await
                .map_err(request)?;
        }
        Ok(())
    }

    async fn post_review(&self, post: &ReviewPost) -> Result<ReviewCardRef, GatewayError> {
        let message = self
            .review_channel
            .send_message(&self.http, views::review_message(post))
            .await
            .map_err(|error| {
                GatewayError::Unreachable(format!("review channel {}: {error}", self.review_channel))
            })?;

        Ok(ReviewCardRef {
            channel_id: ChannelId(message.channel_id.get()),
            message_id: MessageId(message.id.get()),
        })
    }

    async fn send_direct(
        &self,
        user: UserId,
        notice: &DecisionNotice,
    ) -> Result<(), GatewayError> {
        let channel = serenity::UserId::new(user.get())
            .create_dm_channel(&self.http)
            .await
            .map_err(request)?;
        channel
            .id
            .send_message(
                &self.http,
                CreateMessage::new().embed(views::decision_embed(notice)),
            )
            .await
            .map_err(request)?;
        Ok(())
    }

    async fn close_review(
        &self,
        card: ReviewCardRef,
        audit: &ReviewAudit,
    ) -> Result<(), GatewayError> {
        serenity::ChannelId::new(card.channel_id.get())
            .edit_message(
                &self.http,
                serenity::MessageId::new(card.message_id.get()),
                EditMessage::new()
                    .embed(views::closed_review_embed(audit))
                    .components(Vec::new()),
            )
            .await
            .map_err(request)?;
        Ok(())
    }
}
