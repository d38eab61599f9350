use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::ids::{ChannelId, GuildId, RoleId};
use crate::workflows::roles::ROLE_CATALOG;
use crate::workflows::staff::POSITION_CATALOG;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the bot and its ops server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub discord: DiscordConfig,
    pub guild: GuildConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment =
            AppEnvironment::from_str(&read("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let host = read("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = read("APP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = read("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let token = read("DISCORD_TOKEN").ok_or(ConfigError::Missing {
            key: "DISCORD_TOKEN",
        })?;
        let application_id = optional_snowflake(&read, "CLIENT_ID")?;
        let guild_id = GuildId(required_snowflake(&read, "GUILD_ID")?);
        let review_channel_id = ChannelId(required_snowflake(&read, "ADMIN_CHANNEL_ID")?);
        let reviewer_role_id = optional_snowflake(&read, "ADMIN_ROLE_ID")?.map(RoleId);

        let mut role_bindings = BTreeMap::new();
        let env_keys = ROLE_CATALOG
            .iter()
            .map(|definition| definition.env_key)
            .chain(POSITION_CATALOG.iter().map(|definition| definition.env_key));
        for key in env_keys {
            if let Some(id) = optional_snowflake(&read, key)? {
                role_bindings.insert(key, RoleId(id));
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            discord: DiscordConfig {
                token,
                application_id,
                guild_id,
            },
            guild: GuildConfig {
                review_channel_id,
                reviewer_role_id,
                role_bindings: RoleBindings(role_bindings),
                panels: PanelConfig {
                    roles_image_url: read("ROLE_PANEL_IMAGE_URL"),
                    staff_image_url: read("STAFF_PANEL_IMAGE_URL"),
                },
            },
        })
    }
}

fn required_snowflake<F>(read: &F, key: &'static str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional_snowflake(read, key)?.ok_or(ConfigError::Missing { key })
}

fn optional_snowflake<F>(read: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = read(key) else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(id) if id != 0 => Ok(Some(id)),
        _ => Err(ConfigError::InvalidIdentifier { key, value: raw }),
    }
}

/// Settings controlling the ops HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Gateway credentials and the guild commands are registered in.
#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub application_id: Option<u64>,
    pub guild_id: GuildId,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// Guild-specific identifiers. Every optional id disables its feature when absent.
#[derive(Debug, Clone)]
pub struct GuildConfig {
    pub review_channel_id: ChannelId,
    pub reviewer_role_id: Option<RoleId>,
    pub role_bindings: RoleBindings,
    pub panels: PanelConfig,
}

/// Role ids keyed by the environment variable that supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleBindings(BTreeMap<&'static str, RoleId>);

impl RoleBindings {
    pub fn get(&self, env_key: &str) -> Option<RoleId> {
        self.0.get(env_key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(&'static str, RoleId)> for RoleBindings {
    fn from_iter<T: IntoIterator<Item = (&'static str, RoleId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Optional artwork for the published panels.
#[derive(Debug, Clone, Default)]
pub struct PanelConfig {
    pub roles_image_url: Option<String>,
    pub staff_image_url: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Missing { key: &'static str },
    InvalidIdentifier { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Missing { key } => write!(f, "{key} must be set"),
            ConfigError::InvalidIdentifier { key, value } => {
                write!(f, "{key} must be a non-zero snowflake id, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::Missing { .. }
            | ConfigError::InvalidIdentifier { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DISCORD_TOKEN", "token"),
        ("GUILD_ID", "1100"),
        ("ADMIN_CHANNEL_ID", "2200"),
    ];

    #[test]
    fn load_uses_defaults_when_optional_values_missing() {
        let config = AppConfig::from_source(source(&REQUIRED)).expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.discord.guild_id, GuildId(1100));
        assert_eq!(config.guild.review_channel_id, ChannelId(2200));
        assert_eq!(config.guild.reviewer_role_id, None);
        assert!(config.guild.role_bindings.is_empty());
        assert!(config.guild.panels.roles_image_url.is_none());
    }

    #[test]
    fn missing_token_is_reported_by_key() {
        let err = AppConfig::from_source(source(&[("GUILD_ID", "1"), ("ADMIN_CHANNEL_ID", "2")]))
            .expect_err("token is required");
        assert!(matches!(err, ConfigError::Missing { key: "DISCORD_TOKEN" }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ROLE_ID_CS2", "   "));
        pairs.push(("ADMIN_ROLE_ID", ""));
        let config = AppConfig::from_source(source(&pairs)).expect("config loads");
        assert_eq!(config.guild.role_bindings.get("ROLE_ID_CS2"), None);
        assert_eq!(config.guild.reviewer_role_id, None);
    }

    #[test]
    fn zero_or_non_numeric_ids_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ROLE_ID_HELPER", "0"));
        let err = AppConfig::from_source(source(&pairs)).expect_err("zero id rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier {
                key: "ROLE_ID_HELPER",
                ..
            }
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ADMIN_ROLE_ID", "moderators"));
        let err = AppConfig::from_source(source(&pairs)).expect_err("text id rejected");
        assert_eq!(
            err.to_string(),
            "ADMIN_ROLE_ID must be a non-zero snowflake id, got 'moderators'"
        );
    }

    #[test]
    fn role_and_position_ids_are_bound_by_env_key() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ROLE_ID_VALORANT", "501"));
        pairs.push(("ROLE_ID_NEWS", "502"));
        pairs.push(("ROLE_ID_MODERATOR", "503"));
        pairs.push(("ADMIN_ROLE_ID", "900"));
        let config = AppConfig::from_source(source(&pairs)).expect("config loads");

        let bindings = &config.guild.role_bindings;
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.get("ROLE_ID_VALORANT"), Some(RoleId(501)));
        assert_eq!(bindings.get("ROLE_ID_NEWS"), Some(RoleId(502)));
        assert_eq!(bindings.get("ROLE_ID_MODERATOR"), Some(RoleId(503)));
        assert_eq!(config.guild.reviewer_role_id, Some(RoleId(900)));
    }

    #[test]
    fn accepts_localhost_host() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("APP_HOST", "localhost"));
        let config = AppConfig::from_source(source(&pairs)).expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let config = AppConfig::from_source(source(&REQUIRED)).expect("config loads");
        let rendered = format!("{:?}", config.discord);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"token\""));
    }
}
