use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_ops_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use guildkeeper::config::AppConfig;
use guildkeeper::discord::{self, Data, DiscordGateway};
use guildkeeper::error::AppError;
use guildkeeper::telemetry;
use guildkeeper::workflows::roles::RoleRegistry;
use guildkeeper::workflows::staff::{
    InMemoryApplicationStore, PositionRegistry, StaffApplicationService,
};
use poise::serenity_prelude as serenity;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{error, info};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let http = Arc::new(serenity::Http::new(&config.discord.token));
    let gateway = Arc::new(DiscordGateway::new(
        http,
        config.discord.guild_id,
        config.guild.review_channel_id,
    ));
    let roles = Arc::new(RoleRegistry::from_bindings(&config.guild.role_bindings));
    let positions = Arc::new(PositionRegistry::from_bindings(
        &config.guild.role_bindings,
    ));
    let staff = Arc::new(StaffApplicationService::new(
        Arc::new(InMemoryApplicationStore::new()),
        gateway.clone(),
        positions,
        config.guild.reviewer_role_id,
    ));

    let app = with_ops_routes(staff.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "ops server listening");
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app).await {
            error!(%error, "ops server stopped");
        }
    });

    let framework = discord::framework(Data {
        roles,
        staff,
        gateway,
        panels: config.guild.panels.clone(),
        guild_id: config.discord.guild_id,
        expected_application_id: config.discord.application_id,
        readiness: readiness_flag,
    });

    let mut client =
        serenity::ClientBuilder::new(&config.discord.token, serenity::GatewayIntents::GUILDS)
            .framework(framework)
            .await?;

    info!(
        environment = ?config.environment,
        guild = %config.discord.guild_id,
        role_bindings = config.guild.role_bindings.len(),
        "connecting to discord"
    );
    client.start().await?;
    Ok(())
}
