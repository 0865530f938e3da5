// src/db/activity_type_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{
        ActivityType, ActivityTypeFilters, CreateActivityTypePayload, UpdateActivityTypePayload,
    },
};

#[derive(Clone)]
pub struct ActivityTypeRepository {
    pool: PgPool,
}

impl ActivityTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        filters: &ActivityTypeFilters,
    ) -> Result<(Vec<ActivityType>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        const WHERE_CLAUSE: &str = r#"
            FROM activity_types
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
              AND ($2::bool IS NULL OR active = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(filters.active)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, ActivityType>(&format!(
            "SELECT * {WHERE_CLAUSE} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(&search)
        .bind(filters.active)
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ActivityType>, AppError> {
        let activity_type =
            sqlx::query_as::<_, ActivityType>("SELECT * FROM activity_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(activity_type)
    }

    pub async fn create(
        &self,
        data: &CreateActivityTypePayload,
    ) -> Result<ActivityType, AppError> {
        let activity_type = sqlx::query_as::<_, ActivityType>(
            r#"
            INSERT INTO activity_types (name, description, active)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(activity_type)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateActivityTypePayload,
    ) -> Result<ActivityType, AppError> {
        let activity_type = sqlx::query_as::<_, ActivityType>(
            r#"
            UPDATE activity_types SET
                name        = COALESCE($2, name),
                description = COALESCE($3, description),
                active      = COALESCE($4, active),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await?;

        activity_type.ok_or_else(|| AppError::ResourceNotFound("Tipo de atividade".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activity_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
