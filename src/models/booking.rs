// src/models/booking.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::activity::ActivityPriority;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

// --- Entidade central ---

// Reservas canceladas liberam o intervalo de datas para reuso;
// todas as demais participam da checagem de conflito.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub apartment_id: Uuid,
    pub tower_id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "2024-03-15")]
    pub check_in: NaiveDate,
    #[schema(example = "2024-03-20")]
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    // Derivado das datas pelo repositório; nunca vem do chamador
    #[schema(example = 5)]
    pub nights: i32,
    #[schema(example = "150.00")]
    pub nightly_rate: Decimal,
    #[schema(example = "30.00")]
    pub cleaning_fee: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

fn rate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("rate_positive"))
    }
}

fn fee_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("fee_non_negative"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub apartment_id: Uuid,
    pub tower_id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "2024-03-15")]
    pub check_in: NaiveDate,
    #[schema(example = "2024-03-20")]
    pub check_out: NaiveDate,
    // Ausente => pending
    pub status: Option<BookingStatus>,
    #[validate(custom(function = rate_positive, message = "A tarifa por noite deve ser positiva"))]
    #[schema(example = "150.00")]
    pub nightly_rate: Decimal,
    #[validate(custom(function = fee_non_negative, message = "A taxa de limpeza não pode ser negativa"))]
    #[schema(example = "30.00")]
    pub cleaning_fee: Decimal,
    #[validate(length(max = 500, message = "As observações não podem superar 500 caracteres"))]
    pub notes: Option<String>,
}

// Distingue "campo ausente no JSON" (mantém o valor) de "campo enviado
// como null" (limpa o valor). Só o nível externo do Option é controlado
// pelo serde; o interno vem do próprio JSON.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// Patch explícito: um slot opcional por campo mutável. O serviço de
// admissão consulta `touches_schedule` para decidir se refaz a checagem
// de conflito.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    pub apartment_id: Option<Uuid>,
    pub tower_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    #[validate(custom(function = rate_positive, message = "A tarifa por noite deve ser positiva"))]
    pub nightly_rate: Option<Decimal>,
    #[validate(custom(function = fee_non_negative, message = "A taxa de limpeza não pode ser negativa"))]
    pub cleaning_fee: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl BookingPatch {
    /// Algum campo que participa da checagem de conflito foi enviado?
    pub fn touches_schedule(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some() || self.apartment_id.is_some()
    }

    pub fn dates_changed(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }
}

// --- Filtros de listagem ---

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingFilters {
    /// Busca textual em observações, apartamento, torre e usuário
    pub search: Option<String>,
    pub apartment_id: Option<Uuid>,
    pub tower_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    /// Intervalo sobre a data de criação da reserva
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    /// Intervalo sobre a data de check-in
    pub check_in_from: Option<NaiveDate>,
    pub check_in_to: Option<NaiveDate>,
    /// Intervalo sobre a data de check-out
    pub check_out_from: Option<NaiveDate>,
    pub check_out_to: Option<NaiveDate>,
    /// Página 1-indexada
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl BookingFilters {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

// --- Disponibilidade ---

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub apartment_id: Uuid,
    #[param(example = "2024-03-15")]
    pub check_in: NaiveDate,
    #[param(example = "2024-03-20")]
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflicts: Vec<Booking>,
    pub apartment_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

// --- Reserva com atividade vinculada ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedActivityData {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub type_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub description: String,
    pub assigned_user_id: Option<Uuid>,
    pub priority: Option<ActivityPriority>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub booking: NewBooking,
    /// Cria uma atividade vinculada após a reserva ser admitida
    #[serde(default)]
    pub create_activity: bool,
    #[validate(nested)]
    pub activity_data: Option<LinkedActivityData>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithActivity {
    pub booking: Booking,
    pub activity: Option<crate::models::activity::Activity>,
}
