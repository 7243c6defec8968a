pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod poi_repo;
pub mod price_repo;
pub mod reservation_repo;
pub mod user_repo;
pub mod vehicle_repo;

mod error;

pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use poi_repo::PostgresPoiRepository;
pub use price_repo::PostgresPriceRepository;
pub use reservation_repo::PostgresReservationRepository;
pub use user_repo::PostgresUserRepository;
pub use vehicle_repo::PostgresVehicleRepository;
