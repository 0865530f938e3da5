// src/models/tower.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tower {
    pub id: Uuid,
    #[schema(example = "Torre Norte Premium")]
    pub name: String,
    #[schema(example = "T001")]
    pub number: String,
    pub description: String,
    pub address: String,
    #[schema(example = 25)]
    pub floors: i32,
    #[schema(example = 4)]
    pub apartments_per_floor: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTowerPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(length(min = 1, message = "required"))]
    pub number: String,
    #[validate(length(min = 1, message = "required"))]
    pub description: String,
    #[validate(length(min = 1, message = "required"))]
    pub address: String,
    #[validate(range(min = 1, message = "A torre deve ter pelo menos um andar"))]
    pub floors: i32,
    #[validate(range(min = 1, message = "Cada andar deve ter pelo menos um apartamento"))]
    pub apartments_per_floor: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTowerPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub number: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 1, message = "A torre deve ter pelo menos um andar"))]
    pub floors: Option<i32>,
    #[validate(range(min = 1, message = "Cada andar deve ter pelo menos um apartamento"))]
    pub apartments_per_floor: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TowerFilters {
    pub search: Option<String>,
    pub number: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TowerFilters {
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
