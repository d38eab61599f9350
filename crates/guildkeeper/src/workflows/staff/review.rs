use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::domain::{
    ApplicationId, DecisionNotice, ReviewAudit, ReviewCardRef, Reviewer, StaffApplication,
    Verdict,
};
use super::repository::ApplicationStore;
use super::service::{StaffApplicationError, StaffApplicationService};
use crate::gateway::{CommunityGateway, GatewayError};
use crate::markup;

/// Shown to a reviewer acting on a card whose application is gone.
pub const APPLICATION_NOT_FOUND: &str =
    "❌ **Заявка не найдена**\nВозможно, она уже была обработана или удалена.";

/// Outcome of a best-effort step of a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Completed,
    Skipped,
    Failed(String),
}

impl SideEffect {
    fn from_result(result: Result<(), GatewayError>) -> Self {
        match result {
            Ok(()) => SideEffect::Completed,
            Err(error) => SideEffect::Failed(error.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SideEffect::Completed)
    }
}

/// What a decision did. Removal from the store always happened; the side effects may not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionReport {
    pub application: StaffApplication,
    pub verdict: Verdict,
    pub reviewer: Reviewer,
    pub decided_at: DateTime<Utc>,
    pub role_grant: SideEffect,
    pub notification: SideEffect,
    pub audit: SideEffect,
}

impl DecisionReport {
    /// Private reply to the reviewer.
    pub fn reviewer_summary(&self) -> String {
        let mut lines = vec![
            match self.verdict {
                Verdict::Approved => "✅ **Заявка одобрена!**".to_string(),
                Verdict::Rejected => "❌ **Заявка отклонена**".to_string(),
            },
            format!(
                "👤 Кандидат: {}",
                markup::user_mention(self.application.user_id())
            ),
            format!("💼 Должность: **{}**", self.application.position_name),
        ];

        match &self.role_grant {
            SideEffect::Completed => lines.push("🎭 Роль автоматически выдана".to_string()),
            SideEffect::Failed(_) => lines.push("⚠️ Не удалось выдать роль".to_string()),
            SideEffect::Skipped => {}
        }

        lines.push(match self.notification {
            SideEffect::Completed => "📨 Уведомление отправлено в личные сообщения".to_string(),
            _ => "⚠️ Не удалось отправить уведомление в личные сообщения".to_string(),
        });

        if let SideEffect::Failed(_) = self.audit {
            lines.push("⚠️ Не удалось обновить карточку заявки".to_string());
        }

        lines.join("\n")
    }
}

impl<S, G> StaffApplicationService<S, G>
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    /// Closes out an application.
    ///
    /// The record is removed first, so a second decision on the same id
    /// (another reviewer, a stale card) sees `NotFound`. Role grant, the
    /// applicant's DM and the card edit are best-effort and never undo the
    /// removal.
    pub async fn decide(
        &self,
        application_id: &ApplicationId,
        verdict: Verdict,
        reviewer: Reviewer,
        card: ReviewCardRef,
    ) -> Result<DecisionReport, StaffApplicationError> {
        let application = self
            .store
            .take(application_id)?
            .ok_or_else(|| StaffApplicationError::NotFound(application_id.clone()))?;
        let decided_at = self.clock.now();

        let granted_role = match verdict {
            Verdict::Approved => self
                .positions
                .get(&application.position)
                .and_then(|position| position.role_id),
            Verdict::Rejected => None,
        };
        let role_grant = match granted_role {
            Some(role) => {
                let result = self
                    .gateway
                    .add_roles(application.user_id(), &[role])
                    .await;
                if let Err(error) = &result {
                    warn!(
                        application_id = %application.id,
                        %role,
                        %error,
                        "staff role grant failed"
                    );
                }
                SideEffect::from_result(result)
            }
            None => SideEffect::Skipped,
        };

        let notice = DecisionNotice {
            verdict,
            application_id: application.id.clone(),
            position_name: application.position_name.clone(),
            reviewer_name: reviewer.display_name.clone(),
            decided_at,
            role_granted: role_grant.is_completed(),
        };
        let notification = {
            let result = self
                .gateway
                .send_direct(application.user_id(), &notice)
                .await;
            if let Err(error) = &result {
                warn!(
                    application_id = %application.id,
                    user = %application.user_id(),
                    %error,
                    "decision notification could not be delivered"
                );
            }
            SideEffect::from_result(result)
        };

        let audit_entry = ReviewAudit {
            application: application.clone(),
            verdict,
            reviewer: reviewer.clone(),
            decided_at,
        };
        let audit = {
            let result = self.gateway.close_review(card, &audit_entry).await;
            if let Err(error) = &result {
                error!(
                    application_id = %application.id,
                    %error,
                    "review card could not be closed"
                );
            }
            SideEffect::from_result(result)
        };

        info!(
            application_id = %application.id,
            ?verdict,
            reviewer = %reviewer.user_id,
            "staff application decided"
        );

        Ok(DecisionReport {
            application,
            verdict,
            reviewer,
            decided_at,
            role_grant,
            notification,
            audit,
        })
    }
}
