// src/handlers/apartments.rs

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
        apartment::{Apartment, ApartmentFilters, CreateApartmentPayload, UpdateApartmentPayload},
        Paginated,
    },
};

// GET /api/apartments
#[utoipa::path(
    get,
    path = "/api/apartments",
    tag = "Apartments",
    params(ApartmentFilters),
    responses(
        (status = 200, description = "Listagem paginada de apartamentos", body = Paginated<Apartment>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_apartments(
    State(app_state): State<AppState>,
    Query(filters): Query<ApartmentFilters>,
) -> Result<Json<Paginated<Apartment>>, AppError> {
    let (items, total) = app_state.apartment_repo.find_all(&filters).await?;

    Ok(Json(Paginated {
        items,
        total,
        page: filters.page(),
        limit: filters.limit(),
    }))
}

// GET /api/apartments/{id}
#[utoipa::path(
    get,
    path = "/api/apartments/{id}",
    tag = "Apartments",
    params(("id" = Uuid, Path, description = "ID do apartamento")),
    responses(
        (status = 200, description = "Apartamento encontrado", body = Apartment),
        (status = 404, description = "Apartamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_apartment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Apartment>, AppError> {
    let apartment = app_state
        .apartment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Apartamento".to_string()))?;

    Ok(Json(apartment))
}

// POST /api/apartments
#[utoipa::path(
    post,
    path = "/api/apartments",
    tag = "Apartments",
    request_body = CreateApartmentPayload,
    responses(
        (status = 201, description = "Apartamento criado", body = Apartment)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_apartment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateApartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let apartment = app_state.apartment_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(apartment)))
}

// PUT /api/apartments/{id}
#[utoipa::path(
    put,
    path = "/api/apartments/{id}",
    tag = "Apartments",
    params(("id" = Uuid, Path, description = "ID do apartamento")),
    request_body = UpdateApartmentPayload,
    responses(
        (status = 200, description = "Apartamento atualizado", body = Apartment),
        (status = 404, description = "Apartamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_apartment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApartmentPayload>,
) -> Result<Json<Apartment>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let apartment = app_state.apartment_repo.update(id, &payload).await?;

    Ok(Json(apartment))
}

// DELETE /api/apartments/{id}
#[utoipa::path(
    delete,
    path = "/api/apartments/{id}",
    tag = "Apartments",
    params(("id" = Uuid, Path, description = "ID do apartamento")),
    responses(
        (status = 204, description = "Apartamento removido"),
        (status = 404, description = "Apartamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_apartment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.apartment_repo.delete(id).await?;
    if !removed {
        return Err(AppError::ResourceNotFound("Apartamento".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
