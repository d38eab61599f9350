use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::clock::FixedClock;
use crate::config::RoleBindings;
use crate::gateway::{CommunityGateway, GatewayError};
use crate::ids::{ChannelId, MessageId, RoleId, UserId};
use crate::workflows::staff::{
    Applicant, ApplicationForm, DecisionNotice, InMemoryApplicationStore, PositionRegistry,
    ReviewAudit, ReviewCardRef, ReviewPost, Reviewer, StaffApplicationService,
};

pub(super) const HELPER_ROLE: RoleId = RoleId(501);
pub(super) const REVIEWER_ROLE: RoleId = RoleId(900);
pub(super) const REVIEW_CHANNEL: ChannelId = ChannelId(2200);

pub(super) type TestService = StaffApplicationService<InMemoryApplicationStore, RecordingGateway>;

/// Gateway double that records every call and fails on demand.
#[derive(Default)]
pub(super) struct RecordingGateway {
    pub(super) fail_post: bool,
    pub(super) fail_roles: bool,
    pub(super) fail_direct: bool,
    pub(super) fail_close: bool,
    pub(super) posts: Mutex<Vec<ReviewPost>>,
    pub(super) grants: Mutex<Vec<(UserId, Vec<RoleId>)>>,
    pub(super) notices: Mutex<Vec<(UserId, DecisionNotice)>>,
    pub(super) closed: Mutex<Vec<(ReviewCardRef, ReviewAudit)>>,
}

impl RecordingGateway {
    pub(super) fn posts(&self) -> Vec<ReviewPost> {
        self.posts.lock().expect("posts mutex poisoned").clone()
    }

    pub(super) fn grants(&self) -> Vec<(UserId, Vec<RoleId>)> {
        self.grants.lock().expect("grants mutex poisoned").clone()
    }

    pub(super) fn notices(&self) -> Vec<(UserId, DecisionNotice)> {
        self.notices.lock().expect("notices mutex poisoned").clone()
    }

    pub(super) fn closed(&self) -> Vec<(ReviewCardRef, ReviewAudit)> {
        self.closed.lock().expect("closed mutex poisoned").clone()
    }
}

#[async_trait]
impl CommunityGateway for RecordingGateway {
    async fn add_roles(&self, user: UserId, roles: &[RoleId]) -> Result<(), GatewayError> {
        if self.fail_roles {
            return Err(GatewayError::Request("Missing Permissions".to_string()));
        }
        self.grants
            .lock()
            .expect("grants mutex poisoned")
            .push((user, roles.to_vec()));
        Ok(())
    }

    async fn remove_roles(&self, _user: UserId, _roles: &[RoleId]) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn post_review(&self, post: &ReviewPost) -> Result<ReviewCardRef, GatewayError> {
        if self.fail_post {
            return Err(GatewayError::Unreachable(format!(
                "review channel {REVIEW_CHANNEL}"
            )));
        }
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        posts.push(post.clone());
        Ok(ReviewCardRef {
            channel_id: REVIEW_CHANNEL,
            message_id: MessageId(posts.len() as u64),
        })
    }

    async fn send_direct(
        &self,
        user: UserId,
        notice: &DecisionNotice,
    ) -> Result<(), GatewayError> {
        if self.fail_direct {
            return Err(GatewayError::Request(
                "Cannot send messages to this user".to_string(),
            ));
        }
        self.notices
            .lock()
            .expect("notices mutex poisoned")
            .push((user, notice.clone()));
        Ok(())
    }

    async fn close_review(
        &self,
        card: ReviewCardRef,
        audit: &ReviewAudit,
    ) -> Result<(), GatewayError> {
        if self.fail_close {
            return Err(GatewayError::Request("Unknown Message".to_string()));
        }
        self.closed
            .lock()
            .expect("closed mutex poisoned")
            .push((card, audit.clone()));
        Ok(())
    }
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
}

pub(super) fn positions() -> Arc<PositionRegistry> {
    let bindings: RoleBindings = [("ROLE_ID_HELPER", HELPER_ROLE)].into_iter().collect();
    Arc::new(PositionRegistry::from_bindings(&bindings))
}

pub(super) fn service_with(gateway: RecordingGateway) -> (TestService, Arc<RecordingGateway>) {
    let gateway = Arc::new(gateway);
    let service = StaffApplicationService::with_clock(
        Arc::new(InMemoryApplicationStore::new()),
        gateway.clone(),
        positions(),
        Some(REVIEWER_ROLE),
        Arc::new(FixedClock::new(submitted_at())),
    );
    (service, gateway)
}

pub(super) fn service() -> (TestService, Arc<RecordingGateway>) {
    service_with(RecordingGateway::default())
}

pub(super) fn applicant(user: u64) -> Applicant {
    Applicant {
        user_id: UserId(user),
        username: format!("ann{user}"),
        display_name: format!("Ann {user}"),
        avatar_url: Some(format!("https://cdn.example/avatars/{user}.png")),
    }
}

pub(super) fn form(experience: Option<&str>) -> ApplicationForm {
    ApplicationForm {
        name: "Ann".to_string(),
        age: "19".to_string(),
        why_us: "X".to_string(),
        hobbies: "Y".to_string(),
        experience: experience.map(str::to_string),
    }
}

pub(super) fn reviewer() -> Reviewer {
    Reviewer {
        user_id: UserId(42),
        display_name: "Админ".to_string(),
    }
}

pub(super) fn card(message: u64) -> ReviewCardRef {
    ReviewCardRef {
        channel_id: REVIEW_CHANNEL,
        message_id: MessageId(message),
    }
}
