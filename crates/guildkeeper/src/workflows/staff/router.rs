use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::admin::ApplicationStats;
use super::repository::ApplicationStore;
use super::service::StaffApplicationService;
use crate::error::AppError;
use crate::gateway::CommunityGateway;

/// Read-only HTTP view of the pending application queue.
pub fn stats_router<S, G>(service: Arc<StaffApplicationService<S, G>>) -> Router
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    Router::new()
        .route("/api/v1/applications/stats", get(stats_handler::<S, G>))
        .with_state(service)
}

pub(crate) async fn stats_handler<S, G>(
    State(service): State<Arc<StaffApplicationService<S, G>>>,
) -> Result<Json<ApplicationStats>, AppError>
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    Ok(Json(service.stats()?))
}
