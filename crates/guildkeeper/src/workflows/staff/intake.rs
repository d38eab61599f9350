use tracing::{info, warn};

use super::domain::{
    Applicant, ApplicationForm, FormField, ReviewCardRef, ReviewPost, StaffApplication,
    FORM_FIELDS,
};
use super::positions::StaffPosition;
use super::repository::{ApplicationStore, StoreError};
use super::service::{StaffApplicationError, StaffApplicationService};
use crate::gateway::CommunityGateway;
use crate::ids::UserId;

/// Answer to a position selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOffer {
    Open(ApplicationFormSpec),
    AlreadyPending(StaffApplication),
}

/// Modal the user fills in for a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFormSpec {
    pub position: StaffPosition,
    pub title: String,
    pub fields: &'static [FormField],
}

/// Stored application plus where its review card landed, if it was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub application: StaffApplication,
    pub review_card: Option<ReviewCardRef>,
}

impl<S, G> StaffApplicationService<S, G>
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    /// Opens the form unless the user already has a pending application.
    pub fn offer_form(
        &self,
        user: UserId,
        position_key: &str,
    ) -> Result<FormOffer, StaffApplicationError> {
        let position = self.position(position_key)?;

        if let Some(existing) = self.store.find_by_user(user)? {
            info!(%user, application_id = %existing.id, "form refused, application pending");
            return Ok(FormOffer::AlreadyPending(existing));
        }

        Ok(FormOffer::Open(ApplicationFormSpec {
            title: format!("Заявка: {}", position.name),
            position: position.clone(),
            fields: &FORM_FIELDS,
        }))
    }

    /// Stores the application and announces it in the review channel.
    ///
    /// A failed announcement is logged and otherwise ignored: the applicant is
    /// still confirmed and the record stays pending.
    pub async fn submit(
        &self,
        applicant: Applicant,
        position_key: &str,
        form: ApplicationForm,
    ) -> Result<Submission, StaffApplicationError> {
        let position = self.position(position_key)?;
        let submitted_at = self.clock.now();
        let experience = form.experience_or_placeholder();

        let record = StaffApplication {
            id: self.next_application_id(submitted_at),
            applicant,
            position: position.key.to_string(),
            position_name: position.name.to_string(),
            name: form.name,
            age: form.age,
            why_us: form.why_us,
            hobbies: form.hobbies,
            experience,
            submitted_at,
        };

        let application = match self.store.insert_if_absent_for_user(record) {
            Ok(stored) => stored,
            Err(StoreError::DuplicateUser(existing)) => {
                return Err(StaffApplicationError::AlreadyPending(existing));
            }
            Err(other) => return Err(other.into()),
        };

        info!(
            application_id = %application.id,
            user = %application.user_id(),
            position = %application.position,
            "staff application submitted"
        );

        let post = ReviewPost {
            application: application.clone(),
            mention: self.reviewer_role,
        };
        let review_card = match self.gateway.post_review(&post).await {
            Ok(card) => Some(card),
            Err(error) => {
                warn!(
                    application_id = %application.id,
                    %error,
                    "review channel post failed, application kept pending"
                );
                None
            }
        };

        Ok(Submission {
            application,
            review_card,
        })
    }

    fn position(&self, key: &str) -> Result<&StaffPosition, StaffApplicationError> {
        self.positions
            .get(key)
            .ok_or_else(|| StaffApplicationError::UnknownPosition(key.to_string()))
    }
}
