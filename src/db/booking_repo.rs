// src/db/booking_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{dates, error::AppError},
    models::booking::{Booking, BookingFilters, BookingPatch, BookingStatus, NewBooking},
};

// Contrato do armazenamento de reservas. A invariante de não-sobreposição
// pertence a esta camada: uma implementação conforme rejeita de forma
// atômica a segunda de duas escritas concorrentes sobre o mesmo
// apartamento, mesmo que o serviço de admissão não tenha visto conflito.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Listagem com filtros e paginação. Retorna (itens, total).
    async fn find_all(&self, filters: &BookingFilters) -> Result<(Vec<Booking>, i64), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError>;

    /// Persiste uma nova reserva. Atribui id, timestamps e `nights`.
    /// Não refaz a consulta de conflito da admissão; apenas a restrição
    /// da própria engine de armazenamento pode rejeitar aqui.
    async fn create(&self, data: &NewBooking) -> Result<Booking, AppError>;

    /// Aplica somente os campos enviados; recomputa `nights` quando
    /// qualquer das datas muda.
    async fn update(&self, id: Uuid, patch: &BookingPatch) -> Result<Booking, AppError>;

    /// `true` se uma linha foi removida.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Reservas ativas (não canceladas) do apartamento cujo intervalo
    /// sobrepõe [check_in, check_out), em ordem crescente de check-in.
    async fn find_conflicting(
        &self,
        apartment_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError>;
}

// O repositório Postgres, responsável por todas as interações com a
// tabela 'bookings'
#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// A restrição de exclusão de intervalo (btree_gist) dispara com SQLSTATE
// 23P01 quando duas escritas concorrentes passam pela checagem de
// admissão. O conjunto de conflitos vai vazio: a consulta de admissão já
// não via nenhum, a restrição é o desempate.
fn map_booking_db_err(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("23P01") {
            return AppError::BookingConflict(Vec::new());
        }
    }
    AppError::DatabaseError(e)
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_all(&self, filters: &BookingFilters) -> Result<(Vec<Booking>, i64), AppError> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        // Uma única query com filtros opcionais; LEFT JOIN só para a
        // busca textual alcançar nomes de apartamento/torre/usuário.
        const WHERE_CLAUSE: &str = r#"
            FROM bookings b
            LEFT JOIN apartments a ON b.apartment_id = a.id
            LEFT JOIN towers t ON b.tower_id = t.id
            LEFT JOIN users u ON b.user_id = u.id
            WHERE ($1::text IS NULL
                   OR b.notes ILIKE $1 OR a.name ILIKE $1 OR a.number ILIKE $1
                   OR t.name ILIKE $1 OR u.name ILIKE $1)
              AND ($2::uuid IS NULL OR b.apartment_id = $2)
              AND ($3::uuid IS NULL OR b.tower_id = $3)
              AND ($4::uuid IS NULL OR b.user_id = $4)
              AND ($5::booking_status IS NULL OR b.status = $5)
              AND ($6::date IS NULL OR b.created_at::date >= $6)
              AND ($7::date IS NULL OR b.created_at::date <= $7)
              AND ($8::date IS NULL OR b.check_in >= $8)
              AND ($9::date IS NULL OR b.check_in <= $9)
              AND ($10::date IS NULL OR b.check_out >= $10)
              AND ($11::date IS NULL OR b.check_out <= $11)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {WHERE_CLAUSE}"))
            .bind(&search)
            .bind(filters.apartment_id)
            .bind(filters.tower_id)
            .bind(filters.user_id)
            .bind(filters.status)
            .bind(filters.created_from)
            .bind(filters.created_to)
            .bind(filters.check_in_from)
            .bind(filters.check_in_to)
            .bind(filters.check_out_from)
            .bind(filters.check_out_to)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Booking>(&format!(
            "SELECT b.* {WHERE_CLAUSE} ORDER BY b.created_at DESC LIMIT $12 OFFSET $13"
        ))
        .bind(&search)
        .bind(filters.apartment_id)
        .bind(filters.tower_id)
        .bind(filters.user_id)
        .bind(filters.status)
        .bind(filters.created_from)
        .bind(filters.created_to)
        .bind(filters.check_in_from)
        .bind(filters.check_in_to)
        .bind(filters.check_out_from)
        .bind(filters.check_out_to)
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn create(&self, data: &NewBooking) -> Result<Booking, AppError> {
        let status = data.status.unwrap_or(BookingStatus::Pending);
        let nights = dates::nights(data.check_in, data.check_out);

        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (apartment_id, tower_id, user_id, check_in, check_out,
                 status, nights, nightly_rate, cleaning_fee, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.apartment_id)
        .bind(data.tower_id)
        .bind(data.user_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(status)
        .bind(nights)
        .bind(data.nightly_rate)
        .bind(data.cleaning_fee)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_booking_db_err)
    }

    async fn update(&self, id: Uuid, patch: &BookingPatch) -> Result<Booking, AppError> {
        // COALESCE aplica só o que veio no patch. `nights` é recalculado
        // a partir das datas efetivas: a invariante nights =
        // check_out - check_in vale em qualquer combinação.
        let notes_supplied = patch.notes.is_some();
        let notes_value = patch.notes.clone().flatten();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET
                apartment_id = COALESCE($2, apartment_id),
                tower_id     = COALESCE($3, tower_id),
                user_id      = COALESCE($4, user_id),
                check_in     = COALESCE($5, check_in),
                check_out    = COALESCE($6, check_out),
                status       = COALESCE($7, status),
                nightly_rate = COALESCE($8, nightly_rate),
                cleaning_fee = COALESCE($9, cleaning_fee),
                notes        = CASE WHEN $10 THEN $11 ELSE notes END,
                nights       = COALESCE($6, check_out) - COALESCE($5, check_in),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.apartment_id)
        .bind(patch.tower_id)
        .bind(patch.user_id)
        .bind(patch.check_in)
        .bind(patch.check_out)
        .bind(patch.status)
        .bind(patch.nightly_rate)
        .bind(patch.cleaning_fee)
        .bind(notes_supplied)
        .bind(notes_value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_booking_db_err)?;

        booking.ok_or_else(|| AppError::ResourceNotFound("Reserva".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_conflicting(
        &self,
        apartment_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError> {
        // Semântica semiaberta: check-out no dia do check-in vizinho não
        // conflita.
        let conflicts = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE apartment_id = $1
              AND status <> 'cancelled'
              AND NOT ($3 <= check_in OR $2 >= check_out)
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY check_in
            "#,
        )
        .bind(apartment_id)
        .bind(check_in)
        .bind(check_out)
        .bind(exclude_booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(conflicts)
    }
}
