//! Discord message markup helpers shared by every view.

use chrono::{DateTime, Utc};

use crate::ids::{RoleId, UserId};

/// Maximum length of an embed field value.
pub const EMBED_FIELD_LIMIT: usize = 1024;

const ELLIPSIS: &str = "...";

/// Rendering style of a `<t:...>` timestamp tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// "5 minutes ago"
    Relative,
    /// Full weekday, date and time.
    LongDateTime,
}

impl TimestampStyle {
    const fn flag(self) -> char {
        match self {
            TimestampStyle::Relative => 'R',
            TimestampStyle::LongDateTime => 'F',
        }
    }
}

pub fn timestamp(at: DateTime<Utc>, style: TimestampStyle) -> String {
    format!("<t:{}:{}>", at.timestamp(), style.flag())
}

pub fn user_mention(user: UserId) -> String {
    format!("<@{user}>")
}

pub fn role_mention(role: RoleId) -> String {
    format!("<@&{role}>")
}

/// Clips `value` to the embed field limit, counting characters rather than bytes.
pub fn truncate_field(value: &str) -> String {
    if value.chars().count() <= EMBED_FIELD_LIMIT {
        return value.to_string();
    }

    let keep = EMBED_FIELD_LIMIT - ELLIPSIS.len();
    let mut clipped: String = value.chars().take(keep).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}
