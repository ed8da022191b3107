use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::role::RequireAdmin;
use crate::modules::stats::model::DashboardStats;
use crate::modules::stats::service::StatsService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    responses((status = 200, description = "Headline counts for the admin dashboard", body = DashboardStats)),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = StatsService::dashboard(&state.db).await?;
    Ok(Json(stats))
}
