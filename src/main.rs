//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Verificação de token (protegida pelo próprio guarda)
    let auth_verify_routes = Router::new()
        .route("/verify", get(handlers::auth::verify))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tower_routes = Router::new()
        .route(
            "/",
            get(handlers::towers::list_towers).post(handlers::towers::create_tower),
        )
        .route(
            "/{id}",
            get(handlers::towers::get_tower)
                .put(handlers::towers::update_tower)
                .delete(handlers::towers::delete_tower),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let apartment_routes = Router::new()
        .route(
            "/",
            get(handlers::apartments::list_apartments).post(handlers::apartments::create_apartment),
        )
        .route(
            "/{id}",
            get(handlers::apartments::get_apartment)
                .put(handlers::apartments::update_apartment)
                .delete(handlers::apartments::delete_apartment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let activity_type_routes = Router::new()
        .route(
            "/",
            get(handlers::activity_types::list_activity_types)
                .post(handlers::activity_types::create_activity_type),
        )
        .route(
            "/{id}",
            get(handlers::activity_types::get_activity_type)
                .put(handlers::activity_types::update_activity_type)
                .delete(handlers::activity_types::delete_activity_type),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let activity_routes = Router::new()
        .route(
            "/",
            get(handlers::activities::list_activities).post(handlers::activities::create_activity),
        )
        .route(
            "/{id}",
            get(handlers::activities::get_activity)
                .put(handlers::activities::update_activity)
                .delete(handlers::activities::delete_activity),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let booking_routes = Router::new()
        .route(
            "/",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route("/availability", get(handlers::bookings::check_availability))
        .route(
            "/{id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes.merge(auth_verify_routes))
        .nest("/api/towers", tower_routes)
        .nest("/api/apartments", apartment_routes)
        .nest("/api/users", user_routes)
        .nest("/api/activity-types", activity_type_routes)
        .nest("/api/activities", activity_routes)
        .nest("/api/bookings", booking_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
