//! Outbound platform port used by the workflows.

use async_trait::async_trait;

use crate::ids::{RoleId, UserId};
use crate::workflows::staff::{DecisionNotice, ReviewAudit, ReviewCardRef, ReviewPost};

/// Failure reported by the platform for a single outbound call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("platform request failed: {0}")]
    Request(String),
    #[error("{0} is not reachable")]
    Unreachable(String),
}

/// Everything the workflows ask of the chat platform.
#[async_trait]
pub trait CommunityGateway: Send + Sync {
    async fn add_roles(&self, user: UserId, roles: &[RoleId]) -> Result<(), GatewayError>;

    async fn remove_roles(&self, user: UserId, roles: &[RoleId]) -> Result<(), GatewayError>;

    /// Posts the application card with decision controls to the review channel.
    async fn post_review(&self, post: &ReviewPost) -> Result<ReviewCardRef, GatewayError>;

    async fn send_direct(&self, user: UserId, notice: &DecisionNotice)
        -> Result<(), GatewayError>;

    /// Rewrites the review card with its final status and strips the controls.
    async fn close_review(
        &self,
        card: ReviewCardRef,
        audit: &ReviewAudit,
    ) -> Result<(), GatewayError>;
}
