// src/handlers/activities.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        activity::{Activity, ActivityFilters, CreateActivityPayload, UpdateActivityPayload},
        Paginated,
    },
};

// GET /api/activities
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "Activities",
    params(ActivityFilters),
    responses(
        (status = 200, description = "Listagem paginada de atividades", body = Paginated<Activity>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
    Query(filters): Query<ActivityFilters>,
) -> Result<Json<Paginated<Activity>>, AppError> {
    let (items, total) = app_state.activity_repo.find_all(&filters).await?;

    Ok(Json(Paginated {
        items,
        total,
        page: filters.page(),
        limit: filters.limit(),
    }))
}

// GET /api/activities/{id}
#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    tag = "Activities",
    params(("id" = Uuid, Path, description = "ID da atividade")),
    responses(
        (status = 200, description = "Atividade encontrada", body = Activity),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_activity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, AppError> {
    let activity = app_state
        .activity_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Atividade".to_string()))?;

    Ok(Json(activity))
}

// POST /api/activities
#[utoipa::path(
    post,
    path = "/api/activities",
    tag = "Activities",
    request_body = CreateActivityPayload,
    responses(
        (status = 201, description = "Atividade criada", body = Activity)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_activity(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state.activity_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

// PUT /api/activities/{id}
#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    tag = "Activities",
    params(("id" = Uuid, Path, description = "ID da atividade")),
    request_body = UpdateActivityPayload,
    responses(
        (status = 200, description = "Atividade atualizada", body = Activity),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_activity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateActivityPayload>,
) -> Result<Json<Activity>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state.activity_repo.update(id, &payload).await?;

    Ok(Json(activity))
}

// DELETE /api/activities/{id}
#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    tag = "Activities",
    params(("id" = Uuid, Path, description = "ID da atividade")),
    responses(
        (status = 204, description = "Atividade removida"),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_activity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.activity_repo.delete(id).await?;
    if !removed {
        return Err(AppError::ResourceNotFound("Atividade".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
