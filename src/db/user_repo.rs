// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::user::{CreateUserPayload, UpdateUserPayload, User, UserFilters, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a
// tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_all(&self, filters: &UserFilters) -> Result<(Vec<User>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        const WHERE_CLAUSE: &str = r#"
            FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
              AND ($2::text IS NULL OR email = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(&filters.email)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, User>(&format!(
            "SELECT * {WHERE_CLAUSE} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(&search)
        .bind(&filters.email)
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    // Cria um usuário via CRUD (sem senha; ele não consegue logar até
    // passar pelo registro)
    pub async fn create(&self, data: &CreateUserPayload) -> Result<User, AppError> {
        let role = data.role.unwrap_or(UserRole::User);

        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, age, role) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.age)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    // Cria um novo usuário com credenciais (fluxo de registro)
    pub async fn create_with_password(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
        age: Option<i32>,
        role: UserRole,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, age, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(age)
        .bind(role)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateUserPayload) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name       = COALESCE($2, name),
                email      = COALESCE($3, email),
                age        = COALESCE($4, age),
                role       = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.age)
        .bind(data.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)?;

        user.ok_or_else(|| AppError::ResourceNotFound("Usuário".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Converte erro de violação de chave única em um erro mais amigável
fn map_unique_email(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    AppError::DatabaseError(e)
}
