pub mod booking_repo;
pub use booking_repo::{BookingRepository, PostgresBookingRepository};
pub mod memory_booking_repo;
pub use memory_booking_repo::MemoryBookingRepository;
pub mod tower_repo;
pub use tower_repo::TowerRepository;
pub mod apartment_repo;
pub use apartment_repo::ApartmentRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod activity_type_repo;
pub use activity_type_repo::ActivityTypeRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
