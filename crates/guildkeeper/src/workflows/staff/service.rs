use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, StaffApplication};
use super::positions::PositionRegistry;
use super::repository::{ApplicationStore, StoreError};
use crate::clock::{Clock, SystemClock};
use crate::gateway::CommunityGateway;
use crate::ids::RoleId;

/// Service composing the store, the platform gateway, and the position registry.
///
/// Intake lives in `intake.rs`, decisions in `review.rs`, admin utilities in `admin.rs`.
pub struct StaffApplicationService<S, G> {
    pub(super) store: Arc<S>,
    pub(super) gateway: Arc<G>,
    pub(super) positions: Arc<PositionRegistry>,
    pub(super) reviewer_role: Option<RoleId>,
    pub(super) clock: Arc<dyn Clock>,
    sequence: ApplicationSequence,
}

impl<S, G> StaffApplicationService<S, G>
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    pub fn new(
        store: Arc<S>,
        gateway: Arc<G>,
        positions: Arc<PositionRegistry>,
        reviewer_role: Option<RoleId>,
    ) -> Self {
        Self::with_clock(store, gateway, positions, reviewer_role, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<S>,
        gateway: Arc<G>,
        positions: Arc<PositionRegistry>,
        reviewer_role: Option<RoleId>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            gateway,
            positions,
            reviewer_role,
            clock,
            sequence: ApplicationSequence::default(),
        }
    }

    pub fn positions(&self) -> &PositionRegistry {
        &self.positions
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub(super) fn next_application_id(&self, now: DateTime<Utc>) -> ApplicationId {
        self.sequence.next(now)
    }
}

/// Millisecond-clock ids, bumped when two submissions land in the same millisecond.
#[derive(Debug, Default)]
struct ApplicationSequence {
    last: AtomicI64,
}

impl ApplicationSequence {
    fn next(&self, now: DateTime<Utc>) -> ApplicationId {
        let candidate = now.timestamp_millis();
        let step = |previous: i64| candidate.max(previous.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |previous| {
                Some(step(previous))
            }) {
            Ok(previous) | Err(previous) => previous,
        };
        ApplicationId(step(previous).to_string())
    }
}

/// Error raised by the staff application service.
#[derive(Debug, thiserror::Error)]
pub enum StaffApplicationError {
    #[error("unknown staff position '{0}'")]
    UnknownPosition(String),
    #[error("application form is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("user already has pending application {}", .0.id)]
    AlreadyPending(Box<StaffApplication>),
    #[error("application {0} not found or already processed")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
