//! Community management bot for a single Discord guild.
//!
//! Members pick their own game and notification roles from select-menu
//! panels; candidates apply for staff positions through a modal form and
//! reviewers accept or reject them from a card in the review channel.

pub mod clock;
pub mod config;
pub mod discord;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod interaction;
pub mod markup;
pub mod telemetry;
pub mod workflows;
