// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        ActivityRepository, ActivityTypeRepository, ApartmentRepository,
        PostgresBookingRepository, TowerRepository, UserRepository,
    },
    services::{auth_service::AuthService, booking_service::BookingService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub booking_service: BookingService,
    pub tower_repo: TowerRepository,
    pub apartment_repo: ApartmentRepository,
    pub user_repo: UserRepository,
    pub activity_type_repo: ActivityTypeRepository,
    pub activity_repo: ActivityRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);

        let booking_repo = Arc::new(PostgresBookingRepository::new(db_pool.clone()));
        let booking_service = BookingService::new(booking_repo);

        Ok(Self {
            auth_service,
            booking_service,
            tower_repo: TowerRepository::new(db_pool.clone()),
            apartment_repo: ApartmentRepository::new(db_pool.clone()),
            user_repo,
            activity_type_repo: ActivityTypeRepository::new(db_pool.clone()),
            activity_repo: ActivityRepository::new(db_pool.clone()),
            db_pool,
        })
    }
}
