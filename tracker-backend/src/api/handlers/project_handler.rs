// src/api/handlers/project_handler.rs
use crate::api::dto::common::SearchQuery;
use crate::api::dto::project_dto::{
    AddParticipantDto, AssignLeaderDto, CreateProjectDto, ProjectDetailDto, ProjectDto,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::authorization::require_manage;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use tracing::info;
use uuid::Uuid;

pub fn project_router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects_handler))
        .route("/projects", post(create_project_handler))
        .route("/projects/search", get(search_projects_handler))
        .route("/projects/{id}", get(get_project_handler))
        .route("/projects/{id}", delete(delete_project_handler))
        .route("/projects/{id}/detail", get(get_project_detail_handler))
        .route("/projects/{id}/participants", post(add_participant_handler))
        .route(
            "/projects/{id}/participants/{user_id}",
            delete(remove_participant_handler),
        )
        .route("/projects/{id}/leader", post(assign_leader_handler))
}

/// プロジェクト一覧（認証済みなら誰でも）
pub async fn list_projects_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<ProjectDto>>> {
    let projects = app_state.project_service.list_projects().await?;
    Ok(Json(projects))
}

/// プロジェクト作成（admin/manager）
pub async fn create_project_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProjectDto>,
) -> AppResult<impl IntoResponse> {
    require_manage(&user)?;

    info!(user_id = %user.user_id, name = %payload.name, "Creating project");

    let project = app_state.project_service.create_project(payload).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// プロジェクト名の部分一致検索
pub async fn search_projects_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ProjectDto>>> {
    let projects = app_state
        .project_service
        .search_projects(&query.query)
        .await?;
    Ok(Json(projects))
}

pub async fn get_project_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ProjectDto>> {
    let project = app_state.project_service.get_project(id).await?;
    Ok(Json(project))
}

/// プロジェクト詳細（タスクと参加者を集約）
pub async fn get_project_detail_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ProjectDetailDto>> {
    let detail = app_state.project_service.get_project_detail(id).await?;
    Ok(Json(detail))
}

/// プロジェクト削除（admin/manager）
pub async fn delete_project_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<StatusCode> {
    require_manage(&user)?;

    app_state.project_service.delete_project(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 参加者追加（冪等、admin/manager）
pub async fn add_participant_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<AddParticipantDto>,
) -> AppResult<StatusCode> {
    require_manage(&user)?;

    app_state
        .project_service
        .add_participant(id, payload.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 参加者削除（admin/manager）
pub async fn remove_participant_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    require_manage(&user)?;

    app_state
        .project_service
        .remove_participant(id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// リーダー割り当て（admin/manager）
pub async fn assign_leader_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<AssignLeaderDto>,
) -> AppResult<Json<ProjectDto>> {
    require_manage(&user)?;

    let project = app_state
        .project_service
        .assign_leader(id, payload.user_id)
        .await?;

    Ok(Json(project))
}
