// src/db/tower_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tower::{CreateTowerPayload, Tower, TowerFilters, UpdateTowerPayload},
};

// O repositório de torres, responsável por todas as interações com a
// tabela 'towers'
#[derive(Clone)]
pub struct TowerRepository {
    pool: PgPool,
}

impl TowerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, filters: &TowerFilters) -> Result<(Vec<Tower>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        const WHERE_CLAUSE: &str = r#"
            FROM towers
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1 OR address ILIKE $1)
              AND ($2::text IS NULL OR number = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(&filters.number)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Tower>(&format!(
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

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tower>, AppError> {
        let tower = sqlx::query_as::<_, Tower>("SELECT * FROM towers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tower)
    }

    pub async fn create(&self, data: &CreateTowerPayload) -> Result<Tower, AppError> {
        let tower = sqlx::query_as::<_, Tower>(
            r#"
            INSERT INTO towers (name, number, description, address, floors, apartments_per_floor)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.number)
        .bind(&data.description)
        .bind(&data.address)
        .bind(data.floors)
        .bind(data.apartments_per_floor)
        .fetch_one(&self.pool)
        .await?;

        Ok(tower)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTowerPayload) -> Result<Tower, AppError> {
        let tower = sqlx::query_as::<_, Tower>(
            r#"
            UPDATE towers SET
                name                 = COALESCE($2, name),
                number               = COALESCE($3, number),
                description          = COALESCE($4, description),
                address              = COALESCE($5, address),
                floors               = COALESCE($6, floors),
                apartments_per_floor = COALESCE($7, apartments_per_floor),
                updated_at           = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.number)
        .bind(&data.description)
        .bind(&data.address)
        .bind(data.floors)
        .bind(data.apartments_per_floor)
        .fetch_optional(&self.pool)
        .await?;

        tower.ok_or_else(|| AppError::ResourceNotFound("Torre".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM towers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
