// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::verify,

        // --- Towers ---
        handlers::towers::list_towers,
        handlers::towers::get_tower,
        handlers::towers::create_tower,
        handlers::towers::update_tower,
        handlers::towers::delete_tower,

        // --- Apartments ---
        handlers::apartments::list_apartments,
        handlers::apartments::get_apartment,
        handlers::apartments::create_apartment,
        handlers::apartments::update_apartment,
        handlers::apartments::delete_apartment,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Activity Types ---
        handlers::activity_types::list_activity_types,
        handlers::activity_types::get_activity_type,
        handlers::activity_types::create_activity_type,
        handlers::activity_types::update_activity_type,
        handlers::activity_types::delete_activity_type,

        // --- Activities ---
        handlers::activities::list_activities,
        handlers::activities::get_activity,
        handlers::activities::create_activity,
        handlers::activities::update_activity,
        handlers::activities::delete_activity,

        // --- Bookings ---
        handlers::bookings::list_bookings,
        handlers::bookings::check_availability,
        handlers::bookings::get_booking,
        handlers::bookings::create_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Users ---
            models::user::UserRole,
            models::user::User,
            models::user::CreateUserPayload,
            models::user::UpdateUserPayload,
            models::Paginated<models::user::User>,

            // --- Towers ---
            models::tower::Tower,
            models::tower::CreateTowerPayload,
            models::tower::UpdateTowerPayload,
            models::Paginated<models::tower::Tower>,

            // --- Apartments ---
            models::apartment::Apartment,
            models::apartment::CreateApartmentPayload,
            models::apartment::UpdateApartmentPayload,
            models::Paginated<models::apartment::Apartment>,

            // --- Activities ---
            models::activity::ActivityStatus,
            models::activity::ActivityPriority,
            models::activity::ActivityType,
            models::activity::CreateActivityTypePayload,
            models::activity::UpdateActivityTypePayload,
            models::activity::Activity,
            models::activity::CreateActivityPayload,
            models::activity::UpdateActivityPayload,
            models::Paginated<models::activity::ActivityType>,
            models::Paginated<models::activity::Activity>,

            // --- Bookings ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::NewBooking,
            models::booking::BookingPatch,
            models::booking::AvailabilityReport,
            models::booking::LinkedActivityData,
            models::booking::CreateBookingPayload,
            models::booking::BookingWithActivity,
            models::Paginated<models::booking::Booking>,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Towers", description = "Gestão de Torres"),
        (name = "Apartments", description = "Gestão de Apartamentos"),
        (name = "Users", description = "Gestão de Usuários"),
        (name = "Activity Types", description = "Tipos de Atividade"),
        (name = "Activities", description = "Atividades de Manutenção e Serviço"),
        (name = "Bookings", description = "Reservas e Disponibilidade")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
