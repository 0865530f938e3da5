// src/db/memory_booking_repo.rs

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{dates, error::AppError},
    db::booking_repo::BookingRepository,
    models::booking::{Booking, BookingFilters, BookingPatch, BookingStatus, NewBooking},
};

// Implementação em memória do armazenamento de reservas. O estado vive
// atrás de um handle injetado (cada teste constrói a sua instância), em
// vez de uma coleção global do processo.
//
// O lock de escrita faz o papel da restrição de exclusão do Postgres:
// checagem e inserção acontecem sob o mesmo lock, então de duas escritas
// concorrentes sobrepostas no mesmo apartamento só uma é aceita.
#[derive(Clone, Default)]
pub struct MemoryBookingRepository {
    state: Arc<RwLock<Vec<Booking>>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn conflicts_of(
        bookings: &[Booking],
        apartment_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Vec<Booking> {
        let mut conflicts: Vec<Booking> = bookings
            .iter()
            .filter(|b| {
                b.apartment_id == apartment_id
                    && b.status != BookingStatus::Cancelled
                    && Some(b.id) != exclude
                    && dates::overlaps(check_in, check_out, b.check_in, b.check_out)
            })
            .cloned()
            .collect();
        conflicts.sort_by_key(|b| b.check_in);
        conflicts
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn find_all(&self, filters: &BookingFilters) -> Result<(Vec<Booking>, i64), AppError> {
        let bookings = self.state.read().unwrap();

        let mut filtered: Vec<Booking> = bookings
            .iter()
            .filter(|b| {
                if let Some(search) = &filters.search {
                    let term = search.to_lowercase();
                    let hit = b
                        .notes
                        .as_ref()
                        .is_some_and(|n| n.to_lowercase().contains(&term));
                    if !hit {
                        return false;
                    }
                }
                if filters.apartment_id.is_some_and(|id| b.apartment_id != id) {
                    return false;
                }
                if filters.tower_id.is_some_and(|id| b.tower_id != id) {
                    return false;
                }
                if filters.user_id.is_some_and(|id| b.user_id != id) {
                    return false;
                }
                if filters.status.is_some_and(|s| b.status != s) {
                    return false;
                }
                if filters.created_from.is_some_and(|d| b.created_at.date_naive() < d) {
                    return false;
                }
                if filters.created_to.is_some_and(|d| b.created_at.date_naive() > d) {
                    return false;
                }
                if filters.check_in_from.is_some_and(|d| b.check_in < d) {
                    return false;
                }
                if filters.check_in_to.is_some_and(|d| b.check_in > d) {
                    return false;
                }
                if filters.check_out_from.is_some_and(|d| b.check_out < d) {
                    return false;
                }
                if filters.check_out_to.is_some_and(|d| b.check_out > d) {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        // Mais recentes primeiro, como a listagem do Postgres
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = filtered.len() as i64;
        let items = filtered
            .into_iter()
            .skip(filters.offset() as usize)
            .take(filters.limit() as usize)
            .collect();

        Ok((items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let bookings = self.state.read().unwrap();
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, data: &NewBooking) -> Result<Booking, AppError> {
        let mut bookings = self.state.write().unwrap();

        let status = data.status.unwrap_or(BookingStatus::Pending);

        // Restrição da engine: reserva ativa não pode sobrepor outra
        // ativa do mesmo apartamento. Checada sob o lock de escrita.
        if status != BookingStatus::Cancelled {
            let conflicts = Self::conflicts_of(
                &bookings,
                data.apartment_id,
                data.check_in,
                data.check_out,
                None,
            );
            if !conflicts.is_empty() {
                return Err(AppError::BookingConflict(conflicts));
            }
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            apartment_id: data.apartment_id,
            tower_id: data.tower_id,
            user_id: data.user_id,
            check_in: data.check_in,
            check_out: data.check_out,
            status,
            nights: dates::nights(data.check_in, data.check_out),
            nightly_rate: data.nightly_rate,
            cleaning_fee: data.cleaning_fee,
            notes: data.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update(&self, id: Uuid, patch: &BookingPatch) -> Result<Booking, AppError> {
        let mut bookings = self.state.write().unwrap();

        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".to_string()))?;

        let mut updated = bookings[index].clone();
        if let Some(apartment_id) = patch.apartment_id {
            updated.apartment_id = apartment_id;
        }
        if let Some(tower_id) = patch.tower_id {
            updated.tower_id = tower_id;
        }
        if let Some(user_id) = patch.user_id {
            updated.user_id = user_id;
        }
        if let Some(check_in) = patch.check_in {
            updated.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            updated.check_out = check_out;
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }
        if let Some(nightly_rate) = patch.nightly_rate {
            updated.nightly_rate = nightly_rate;
        }
        if let Some(cleaning_fee) = patch.cleaning_fee {
            updated.cleaning_fee = cleaning_fee;
        }
        if let Some(notes) = &patch.notes {
            updated.notes = notes.clone();
        }

        if patch.dates_changed() {
            updated.nights = dates::nights(updated.check_in, updated.check_out);
        }
        updated.updated_at = Utc::now();

        // Mesma restrição da engine, excluindo a própria linha
        if updated.status != BookingStatus::Cancelled {
            let conflicts = Self::conflicts_of(
                &bookings,
                updated.apartment_id,
                updated.check_in,
                updated.check_out,
                Some(id),
            );
            if !conflicts.is_empty() {
                return Err(AppError::BookingConflict(conflicts));
            }
        }

        bookings[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut bookings = self.state.write().unwrap();
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok(bookings.len() < before)
    }

    async fn find_conflicting(
        &self,
        apartment_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = self.state.read().unwrap();
        Ok(Self::conflicts_of(
            &bookings,
            apartment_id,
            check_in,
            check_out,
            exclude_booking_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft(apartment_id: Uuid, check_in: &str, check_out: &str) -> NewBooking {
        NewBooking {
            apartment_id,
            tower_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in: d(check_in),
            check_out: d(check_out),
            status: None,
            nightly_rate: Decimal::new(15000, 2),
            cleaning_fee: Decimal::new(3000, 2),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_nights_and_default_status() {
        let repo = MemoryBookingRepository::new();
        let booking = repo
            .create(&draft(Uuid::new_v4(), "2024-03-15", "2024-03-20"))
            .await
            .unwrap();

        assert_eq!(booking.nights, 5);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn engine_constraint_rejects_overlapping_insert() {
        let repo = MemoryBookingRepository::new();
        let apartment = Uuid::new_v4();
        repo.create(&draft(apartment, "2024-03-15", "2024-03-20"))
            .await
            .unwrap();

        let err = repo
            .create(&draft(apartment, "2024-03-18", "2024-03-22"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BookingConflict(ref c) if c.len() == 1));
    }

    #[tokio::test]
    async fn find_conflicting_orders_by_check_in_and_skips_cancelled() {
        let repo = MemoryBookingRepository::new();
        let apartment = Uuid::new_v4();

        let late = repo
            .create(&draft(apartment, "2024-04-10", "2024-04-15"))
            .await
            .unwrap();
        let early = repo
            .create(&draft(apartment, "2024-04-01", "2024-04-05"))
            .await
            .unwrap();
        let cancelled = repo
            .create(&NewBooking {
                status: Some(BookingStatus::Cancelled),
                ..draft(apartment, "2024-04-06", "2024-04-09")
            })
            .await
            .unwrap();

        let conflicts = repo
            .find_conflicting(apartment, d("2024-04-01"), d("2024-04-30"), None)
            .await
            .unwrap();

        assert_eq!(
            conflicts.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![early.id, late.id]
        );
        assert!(!conflicts.iter().any(|b| b.id == cancelled.id));
    }

    #[tokio::test]
    async fn update_recomputes_nights_and_refreshes_timestamp() {
        let repo = MemoryBookingRepository::new();
        let booking = repo
            .create(&draft(Uuid::new_v4(), "2024-03-15", "2024-03-20"))
            .await
            .unwrap();

        let patch = BookingPatch {
            check_out: Some(d("2024-03-25")),
            ..Default::default()
        };
        let updated = repo.update(booking.id, &patch).await.unwrap();

        assert_eq!(updated.nights, 10);
        assert!(updated.updated_at >= booking.updated_at);
    }

    #[tokio::test]
    async fn update_distinguishes_absent_notes_from_null_notes() {
        let repo = MemoryBookingRepository::new();
        let booking = repo
            .create(&NewBooking {
                notes: Some("reserva de férias".to_string()),
                ..draft(Uuid::new_v4(), "2024-03-15", "2024-03-20")
            })
            .await
            .unwrap();

        // Ausente: mantém
        let kept = repo
            .update(booking.id, &BookingPatch::default())
            .await
            .unwrap();
        assert_eq!(kept.notes.as_deref(), Some("reserva de férias"));

        // Null explícito: limpa
        let cleared = repo
            .update(
                booking.id,
                &BookingPatch {
                    notes: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.notes, None);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let repo = MemoryBookingRepository::new();
        let err = repo
            .update(Uuid::new_v4(), &BookingPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = MemoryBookingRepository::new();
        let booking = repo
            .create(&draft(Uuid::new_v4(), "2024-03-15", "2024-03-20"))
            .await
            .unwrap();

        assert!(repo.delete(booking.id).await.unwrap());
        assert!(!repo.delete(booking.id).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_filters_and_paginates() {
        let repo = MemoryBookingRepository::new();
        let apartment = Uuid::new_v4();

        for month in 1..=5 {
            repo.create(&draft(
                apartment,
                &format!("2025-{:02}-01", month),
                &format!("2025-{:02}-05", month),
            ))
            .await
            .unwrap();
        }

        let filters = BookingFilters {
            apartment_id: Some(apartment),
            check_in_from: Some(d("2025-02-01")),
            check_in_to: Some(d("2025-04-30")),
            page: Some(1),
            limit: Some(2),
            ..Default::default()
        };
        let (items, total) = repo.find_all(&filters).await.unwrap();

        assert_eq!(total, 3);
        assert_eq!(items.len(), 2);
    }
}
