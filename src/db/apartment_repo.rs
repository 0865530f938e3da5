// src/db/apartment_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::apartment::{
        Apartment, ApartmentFilters, CreateApartmentPayload, UpdateApartmentPayload,
    },
};

#[derive(Clone)]
pub struct ApartmentRepository {
    pool: PgPool,
}

impl ApartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        filters: &ApartmentFilters,
    ) -> Result<(Vec<Apartment>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        const WHERE_CLAUSE: &str = r#"
            FROM apartments
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
              AND ($2::text IS NULL OR number = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(&filters.number)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Apartment>(&format!(
            "SELECT * {WHERE_CLAUSE} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(&search)
        .bind(&filters.number)
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Apartment>, AppError> {
        let apartment = sqlx::query_as::<_, Apartment>("SELECT * FROM apartments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(apartment)
    }

    pub async fn create(&self, data: &CreateApartmentPayload) -> Result<Apartment, AppError> {
        let apartment = sqlx::query_as::<_, Apartment>(
            r#"
            INSERT INTO apartments (name, number, description, tower_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.number)
        .bind(&data.description)
        .bind(data.tower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(apartment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateApartmentPayload,
    ) -> Result<Apartment, AppError> {
        let apartment = sqlx::query_as::<_, Apartment>(
            r#"
            UPDATE apartments SET
                name        = COALESCE($2, name),
                number      = COALESCE($3, number),
                description = COALESCE($4, description),
                tower_id    = COALESCE($5, tower_id),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.number)
        .bind(&data.description)
        .bind(data.tower_id)
        .fetch_optional(&self.pool)
        .await?;

        apartment.ok_or_else(|| AppError::ResourceNotFound("Apartamento".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM apartments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
