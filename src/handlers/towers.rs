// src/handlers/towers.rs

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
        tower::{CreateTowerPayload, Tower, TowerFilters, UpdateTowerPayload},
        Paginated,
    },
};

// GET /api/towers
#[utoipa::path(
    get,
    path = "/api/towers",
    tag = "Towers",
    params(TowerFilters),
    responses(
        (status = 200, description = "Listagem paginada de torres", body = Paginated<Tower>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_towers(
    State(app_state): State<AppState>,
    Query(filters): Query<TowerFilters>,
) -> Result<Json<Paginated<Tower>>, AppError> {
    let (items, total) = app_state.tower_repo.find_all(&filters).await?;

    Ok(Json(Paginated {
        items,
        total,
        page: filters.page(),
        limit: filters.limit(),
    }))
}

// GET /api/towers/{id}
#[utoipa::path(
    get,
    path = "/api/towers/{id}",
    tag = "Towers",
    params(("id" = Uuid, Path, description = "ID da torre")),
    responses(
        (status = 200, description = "Torre encontrada", body = Tower),
        (status = 404, description = "Torre não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tower(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tower>, AppError> {
    let tower = app_state
        .tower_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Torre".to_string()))?;

    Ok(Json(tower))
}

// POST /api/towers
#[utoipa::path(
    post,
    path = "/api/towers",
    tag = "Towers",
    request_body = CreateTowerPayload,
    responses(
        (status = 201, description = "Torre criada", body = Tower)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tower(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTowerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tower = app_state.tower_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(tower)))
}

// PUT /api/towers/{id}
#[utoipa::path(
    put,
    path = "/api/towers/{id}",
    tag = "Towers",
    params(("id" = Uuid, Path, description = "ID da torre")),
    request_body = UpdateTowerPayload,
    responses(
        (status = 200, description = "Torre atualizada", body = Tower),
        (status = 404, description = "Torre não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tower(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTowerPayload>,
) -> Result<Json<Tower>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tower = app_state.tower_repo.update(id, &payload).await?;

    Ok(Json(tower))
}

// DELETE /api/towers/{id}
#[utoipa::path(
    delete,
    path = "/api/towers/{id}",
    tag = "Towers",
    params(("id" = Uuid, Path, description = "ID da torre")),
    responses(
        (status = 204, description = "Torre removida"),
        (status = 404, description = "Torre não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tower(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.tower_repo.delete(id).await?;
    if !removed {
        return Err(AppError::ResourceNotFound("Torre".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
