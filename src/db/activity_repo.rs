// src/db/activity_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{
        Activity, ActivityFilters, ActivityPriority, ActivityStatus, CreateActivityPayload,
        UpdateActivityPayload,
    },
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        filters: &ActivityFilters,
    ) -> Result<(Vec<Activity>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        const WHERE_CLAUSE: &str = r#"
            FROM activities
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1 OR notes ILIKE $1)
              AND ($2::uuid IS NULL OR type_id = $2)
              AND ($3::activity_status IS NULL OR status = $3)
              AND ($4::uuid IS NULL OR apartment_id = $4)
              AND ($5::uuid IS NULL OR tower_id = $5)
              AND ($6::uuid IS NULL OR assigned_user_id = $6)
              AND ($7::date IS NULL OR scheduled_date >= $7)
              AND ($8::date IS NULL OR scheduled_date <= $8)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(filters.type_id)
            .bind(filters.status)
            .bind(filters.apartment_id)
            .bind(filters.tower_id)
            .bind(filters.assigned_user_id)
            .bind(filters.scheduled_from)
            .bind(filters.scheduled_to)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Activity>(&format!(
            "SELECT * {WHERE_CLAUSE} ORDER BY created_at DESC LIMIT $9 OFFSET $10"
        ))
        .bind(&search)
        .bind(filters.type_id)
        .bind(filters.status)
        .bind(filters.apartment_id)
        .bind(filters.tower_id)
        .bind(filters.assigned_user_id)
        .bind(filters.scheduled_from)
        .bind(filters.scheduled_to)
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(activity)
    }

    pub async fn create(&self, data: &CreateActivityPayload) -> Result<Activity, AppError> {
        let status = data.status.unwrap_or(ActivityStatus::Pending);
        let priority = data.priority.unwrap_or(ActivityPriority::Medium);

        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (name, type_id, description, apartment_id, tower_id, assigned_user_id,
                 status, priority, scheduled_date, completed_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.type_id)
        .bind(&data.description)
        .bind(data.apartment_id)
        .bind(data.tower_id)
        .bind(data.assigned_user_id)
        .bind(status)
        .bind(priority)
        .bind(data.scheduled_date)
        .bind(data.completed_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateActivityPayload) -> Result<Activity, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities SET
                name             = COALESCE($2, name),
                type_id          = COALESCE($3, type_id),
                description      = COALESCE($4, description),
                apartment_id     = COALESCE($5, apartment_id),
                tower_id         = COALESCE($6, tower_id),
                assigned_user_id = COALESCE($7, assigned_user_id),
                status           = COALESCE($8, status),
                priority         = COALESCE($9, priority),
                scheduled_date   = COALESCE($10, scheduled_date),
                completed_date   = COALESCE($11, completed_date),
                notes            = COALESCE($12, notes),
                updated_at       = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.type_id)
        .bind(&data.description)
        .bind(data.apartment_id)
        .bind(data.tower_id)
        .bind(data.assigned_user_id)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.scheduled_date)
        .bind(data.completed_date)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await?;

        activity.ok_or_else(|| AppError::ResourceNotFound("Atividade".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
