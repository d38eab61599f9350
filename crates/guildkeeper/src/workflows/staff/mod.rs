//! Staff recruitment: intake form, review card, decision, and admin utilities.

mod admin;
pub mod domain;
mod intake;
pub mod positions;
pub mod repository;
mod review;
mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use admin::{ApplicationStats, PositionCount};
pub use domain::{
    Applicant, ApplicationForm, ApplicationId, DecisionNotice, FieldStyle, FormField,
    ReviewAudit, ReviewCardRef, ReviewPost, Reviewer, StaffApplication, Verdict,
    EXPERIENCE_PLACEHOLDER, FORM_FIELDS,
};
pub use intake::{ApplicationFormSpec, FormOffer, Submission};
pub use positions::{PositionDefinition, PositionRegistry, StaffPosition, POSITION_CATALOG};
pub use repository::{ApplicationStore, InMemoryApplicationStore, StoreError};
pub use review::{DecisionReport, SideEffect, APPLICATION_NOT_FOUND};
pub use router::stats_router;
pub use service::{StaffApplicationError, StaffApplicationService};
