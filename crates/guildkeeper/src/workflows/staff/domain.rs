use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, MessageId, RoleId, UserId};
use crate::markup::{self, TimestampStyle};

/// Stored when the optional experience field is submitted empty.
pub const EXPERIENCE_PLACEHOLDER: &str = "Не указано";

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of the submitting user, captured at submission time and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    Short,
    Paragraph,
}

/// One text input of the application modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub style: FieldStyle,
    pub required: bool,
    pub max_length: u16,
    pub placeholder: &'static str,
}

pub const FIELD_NAME: &str = "applicant_name";
pub const FIELD_AGE: &str = "applicant_age";
pub const FIELD_WHY_US: &str = "why_us";
pub const FIELD_HOBBIES: &str = "hobbies";
pub const FIELD_EXPERIENCE: &str = "experience";

pub const FORM_FIELDS: [FormField; 5] = [
    FormField {
        id: FIELD_NAME,
        label: "Ваше имя",
        style: FieldStyle::Short,
        required: true,
        max_length: 50,
        placeholder: "Введите ваше реальное имя",
    },
    FormField {
        id: FIELD_AGE,
        label: "Ваш возраст",
        style: FieldStyle::Short,
        required: true,
        max_length: 3,
        placeholder: "Введите ваш возраст (цифрами)",
    },
    FormField {
        id: FIELD_WHY_US,
        label: "Почему именно мы?",
        style: FieldStyle::Paragraph,
        required: true,
        max_length: 1000,
        placeholder: "Расскажите, что привлекает вас в нашем сервере...",
    },
    FormField {
        id: FIELD_HOBBIES,
        label: "Чем увлекаетесь?",
        style: FieldStyle::Paragraph,
        required: true,
        max_length: 500,
        placeholder: "Опишите ваши увлечения и интересы...",
    },
    FormField {
        id: FIELD_EXPERIENCE,
        label: "Опыт работы в данной сфере",
        style: FieldStyle::Paragraph,
        required: false,
        max_length: 1000,
        placeholder: "Расскажите о вашем опыте (необязательно)...",
    },
];

/// Raw values of a submitted application modal. Lengths are bounded by the modal itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub name: String,
    pub age: String,
    pub why_us: String,
    pub hobbies: String,
    pub experience: Option<String>,
}

impl ApplicationForm {
    /// Collects modal inputs by field id. A missing required field yields its id as the error.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let values: HashMap<&str, &str> = fields.into_iter().collect();
        let required = |id: &'static str| {
            values
                .get(id)
                .map(|value| value.to_string())
                .ok_or(id)
        };

        Ok(Self {
            name: required(FIELD_NAME)?,
            age: required(FIELD_AGE)?,
            why_us: required(FIELD_WHY_US)?,
            hobbies: required(FIELD_HOBBIES)?,
            experience: values.get(FIELD_EXPERIENCE).map(|value| value.to_string()),
        })
    }

    pub fn experience_or_placeholder(&self) -> String {
        match self.experience.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => EXPERIENCE_PLACEHOLDER.to_string(),
        }
    }
}

/// A staff-position submission awaiting a single accept/reject decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffApplication {
    pub id: ApplicationId,
    pub applicant: Applicant,
    pub position: String,
    pub position_name: String,
    pub name: String,
    pub age: String,
    pub why_us: String,
    pub hobbies: String,
    pub experience: String,
    pub submitted_at: DateTime<Utc>,
}

impl StaffApplication {
    pub fn user_id(&self) -> UserId {
        self.applicant.user_id
    }

    /// Shown instead of the form when the user already has a pending application.
    pub fn already_pending_notice(&self) -> String {
        format!(
            "❌ **У вас уже есть активная заявка!**\n\n📋 **ID заявки:** `{}`\n💼 **Должность:** {}\n⏰ **Подана:** {}\n\n⏳ Дождитесь рассмотрения текущей заявки перед подачей новой.",
            self.id,
            self.position_name,
            markup::timestamp(self.submitted_at, TimestampStyle::Relative),
        )
    }
}

/// Final decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub const fn is_approved(self) -> bool {
        matches!(self, Verdict::Approved)
    }

    /// Status stamp used in the review card footer.
    pub const fn stamp(self) -> &'static str {
        match self {
            Verdict::Approved => "✅ ПРИНЯТО",
            Verdict::Rejected => "❌ ОТКЛОНЕНО",
        }
    }
}

/// Admin acting on a review card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub user_id: UserId,
    pub display_name: String,
}

/// Location of a posted review card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCardRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Review channel post announcing a new application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPost {
    pub application: StaffApplication,
    /// Reviewer role to ping; omitted entirely when unset.
    pub mention: Option<RoleId>,
}

/// Direct message telling the applicant how their application was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionNotice {
    pub verdict: Verdict,
    pub application_id: ApplicationId,
    pub position_name: String,
    pub reviewer_name: String,
    pub decided_at: DateTime<Utc>,
    pub role_granted: bool,
}

/// Final state written back onto the review card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAudit {
    pub application: StaffApplication,
    pub verdict: Verdict,
    pub reviewer: Reviewer,
    pub decided_at: DateTime<Utc>,
}
