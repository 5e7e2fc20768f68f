// src/api/handlers/report_handler.rs
use crate::api::dto::report_dto::{TaskStatsDto, TaskStatsQuery};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::authorization::require_manage;
use axum::{
    extract::{Json, Query, State},
    routing::get,
    Router,
};

pub fn report_router() -> Router<AppState> {
    Router::new().route("/reports/task-stats", get(task_stats_handler))
}

/// ステータス別タスク数の集計（admin/manager）
pub async fn task_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<TaskStatsQuery>,
) -> AppResult<Json<TaskStatsDto>> {
    require_manage(&user)?;

    let stats = app_state.report_service.task_stats(query.project_id).await?;
    Ok(Json(stats))
}
