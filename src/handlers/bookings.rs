// src/handlers/bookings.rs

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
        activity::CreateActivityPayload,
        booking::{
            AvailabilityQuery, AvailabilityReport, Booking, BookingFilters, BookingPatch,
            BookingWithActivity, CreateBookingPayload, LinkedActivityData,
        },
        Paginated,
    },
};

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(BookingFilters),
    responses(
        (status = 200, description = "Listagem paginada de reservas", body = Paginated<Booking>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<Paginated<Booking>>, AppError> {
    let (items, total) = app_state.booking_service.list(&filters).await?;

    Ok(Json(Paginated {
        items,
        total,
        page: filters.page(),
        limit: filters.limit(),
    }))
}

// GET /api/bookings/availability
#[utoipa::path(
    get,
    path = "/api/bookings/availability",
    tag = "Bookings",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Relatório de disponibilidade do intervalo", body = AvailabilityReport),
        (status = 400, description = "Intervalo de datas inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_availability(
    State(app_state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityReport>, AppError> {
    if query.check_out <= query.check_in {
        return Err(AppError::InvalidDateRange);
    }

    let report = app_state
        .booking_service
        .check_availability(query.apartment_id, query.check_in, query.check_out, None)
        .await?;

    Ok(Json(report))
}

// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva encontrada", body = Booking),
        (status = 404, description = "Reserva não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = app_state.booking_service.get(id).await?;

    Ok(Json(booking))
}

// POST /api/bookings
// Criação via admissão; opcionalmente cria uma atividade vinculada. A
// atividade NÃO participa da admissão: se a criação dela falhar, a
// reserva já admitida permanece e o erro sobe para o chamador.
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva admitida", body = BookingWithActivity),
        (status = 400, description = "Datas inválidas ou check-in no passado"),
        (status = 409, description = "Conflito com reservas existentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let booking = app_state.booking_service.create(&payload.booking).await?;

    let activity = match (&payload.activity_data, payload.create_activity) {
        (Some(data), true) => Some(
            app_state
                .activity_repo
                .create(&linked_activity(&booking, data))
                .await?,
        ),
        _ => None,
    };

    Ok((StatusCode::CREATED, Json(BookingWithActivity { booking, activity })))
}

// Preenche os padrões da atividade vinculada a partir da reserva recém
// admitida: apartamento/torre da reserva, usuário da reserva quando não
// indicado, data programada no check-in.
fn linked_activity(booking: &Booking, data: &LinkedActivityData) -> CreateActivityPayload {
    CreateActivityPayload {
        name: data.name.clone(),
        type_id: data.type_id,
        description: data.description.clone(),
        apartment_id: Some(booking.apartment_id),
        tower_id: Some(booking.tower_id),
        assigned_user_id: Some(data.assigned_user_id.unwrap_or(booking.user_id)),
        status: None,
        priority: data.priority,
        scheduled_date: Some(data.scheduled_date.unwrap_or(booking.check_in)),
        completed_date: None,
        notes: Some(data.notes.clone().unwrap_or_else(|| {
            format!("Atividade criada automaticamente para a reserva {}", booking.id)
        })),
    }
}

// PUT /api/bookings/{id}
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    request_body = BookingPatch,
    responses(
        (status = 200, description = "Reserva atualizada", body = Booking),
        (status = 400, description = "Datas inválidas"),
        (status = 404, description = "Reserva não encontrada"),
        (status = 409, description = "Conflito com reservas existentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookingPatch>,
) -> Result<Json<Booking>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let booking = app_state.booking_service.update(id, &payload).await?;

    Ok(Json(booking))
}

// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva removida"),
        (status = 404, description = "Reserva não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
