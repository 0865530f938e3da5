// src/handlers/activity_types.rs

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
        activity::{
            ActivityType, ActivityTypeFilters, CreateActivityTypePayload,
            UpdateActivityTypePayload,
        },
        Paginated,
    },
};

// GET /api/activity-types
#[utoipa::path(
    get,
    path = "/api/activity-types",
    tag = "Activity Types",
    params(ActivityTypeFilters),
    responses(
        (status = 200, description = "Listagem paginada de tipos de atividade", body = Paginated<ActivityType>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_activity_types(
    State(app_state): State<AppState>,
    Query(filters): Query<ActivityTypeFilters>,
) -> Result<Json<Paginated<ActivityType>>, AppError> {
    let (items, total) = app_state.activity_type_repo.find_all(&filters).await?;

    Ok(Json(Paginated {
        items,
        total,
        page: filters.page(),
        limit: filters.limit(),
    }))
}

// GET /api/activity-types/{id}
#[utoipa::path(
    get,
    path = "/api/activity-types/{id}",
    tag = "Activity Types",
    params(("id" = Uuid, Path, description = "ID do tipo de atividade")),
    responses(
        (status = 200, description = "Tipo de atividade encontrado", body = ActivityType),
        (status = 404, description = "Tipo de atividade não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_activity_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActivityType>, AppError> {
    let activity_type = app_state
        .activity_type_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Tipo de atividade".to_string()))?;

    Ok(Json(activity_type))
}

// POST /api/activity-types
#[utoipa::path(
    post,
    path = "/api/activity-types",
    tag = "Activity Types",
    request_body = CreateActivityTypePayload,
    responses(
        (status = 201, description = "Tipo de atividade criado", body = ActivityType)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_activity_type(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateActivityTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity_type = app_state.activity_type_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(activity_type)))
}

// PUT /api/activity-types/{id}
#[utoipa::path(
    put,
    path = "/api/activity-types/{id}",
    tag = "Activity Types",
    params(("id" = Uuid, Path, description = "ID do tipo de atividade")),
    request_body = UpdateActivityTypePayload,
    responses(
        (status = 200, description = "Tipo de atividade atualizado", body = ActivityType),
        (status = 404, description = "Tipo de atividade não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_activity_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateActivityTypePayload>,
) -> Result<Json<ActivityType>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity_type = app_state.activity_type_repo.update(id, &payload).await?;

    Ok(Json(activity_type))
}

// DELETE /api/activity-types/{id}
#[utoipa::path(
    delete,
    path = "/api/activity-types/{id}",
    tag = "Activity Types",
    params(("id" = Uuid, Path, description = "ID do tipo de atividade")),
    responses(
        (status = 204, description = "Tipo de atividade removido"),
        (status = 404, description = "Tipo de atividade não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_activity_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.activity_type_repo.delete(id).await?;
    if !removed {
        return Err(AppError::ResourceNotFound("Tipo de atividade".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
