//! Component identifiers carried by select menus, modals and buttons.
//!
//! The grammar is `namespace:action[:payload]`. Every identifier the bot
//! emits is produced by [`ComponentId`]'s `Display` and read back through
//! `FromStr`, so the two can never drift apart.

use std::fmt;
use std::str::FromStr;

use crate::workflows::roles::RoleCategory;
use crate::workflows::staff::{ApplicationId, Verdict};

const ROLES: &str = "roles";
const STAFF: &str = "staff";
const REVIEW: &str = "review";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentId {
    /// Multi-select of one role category.
    RolePicker(RoleCategory),
    /// Single-select of the staff recruitment panel.
    PositionPicker,
    /// Modal opened for a position.
    ApplicationForm { position: String },
    /// Approve or reject button on a review card.
    Review {
        verdict: Verdict,
        application_id: ApplicationId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentIdError {
    #[error("component id '{0}' is not recognised")]
    Unknown(String),
    #[error("component id '{0}' is missing its payload")]
    MissingPayload(String),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::RolePicker(category) => write!(f, "{ROLES}:{}", category.slug()),
            ComponentId::PositionPicker => write!(f, "{STAFF}:position"),
            ComponentId::ApplicationForm { position } => write!(f, "{STAFF}:form:{position}"),
            ComponentId::Review {
                verdict,
                application_id,
            } => {
                let action = match verdict {
                    Verdict::Approved => "approve",
                    Verdict::Rejected => "reject",
                };
                write!(f, "{REVIEW}:{action}:{application_id}")
            }
        }
    }
}

impl FromStr for ComponentId {
    type Err = ComponentIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unknown = || ComponentIdError::Unknown(raw.to_string());
        let mut parts = raw.splitn(3, ':');
        let namespace = parts.next().ok_or_else(unknown)?;
        let action = parts.next().ok_or_else(unknown)?;
        let payload = parts.next();

        let required = |payload: Option<&str>| match payload {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ComponentIdError::MissingPayload(raw.to_string())),
        };

        match (namespace, action) {
            (ROLES, slug) if payload.is_none() => RoleCategory::from_slug(slug)
                .map(ComponentId::RolePicker)
                .ok_or_else(unknown),
            (STAFF, "position") if payload.is_none() => Ok(ComponentId::PositionPicker),
            (STAFF, "form") => Ok(ComponentId::ApplicationForm {
                position: required(payload)?,
            }),
            (REVIEW, "approve") => Ok(ComponentId::Review {
                verdict: Verdict::Approved,
                application_id: ApplicationId(required(payload)?),
            }),
            (REVIEW, "reject") => Ok(ComponentId::Review {
                verdict: Verdict::Rejected,
                application_id: ApplicationId(required(payload)?),
            }),
            _ => Err(unknown()),
        }
    }
}
