pub mod activity;
pub mod apartment;
pub mod auth;
pub mod booking;
pub mod tower;
pub mod user;

use serde::Serialize;
use utoipa::ToSchema;

// Envelope padrão das listagens paginadas
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
