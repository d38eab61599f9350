//! Platform snowflake identifiers used by the workflow layer.
//!
//! The workflows never touch SDK types directly; the Discord adapter converts
//! at the boundary so the core can be exercised without a gateway connection.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake!(
    /// Member or user account.
    UserId
);
snowflake!(
    /// Guild role.
    RoleId
);
snowflake!(
    /// Text channel, including the review channel.
    ChannelId
);
snowflake!(
    /// Message inside a channel.
    MessageId
);
snowflake!(
    /// The guild the bot manages.
    GuildId
);
