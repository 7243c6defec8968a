use std::sync::Arc;
use wayfare_core::payment::PaymentAdapter;
use wayfare_core::repository::{
    FlightRepository, PoiRepository, PriceRepository, ReservationRepository, StoreHealth,
    UserRepository, VehicleRepository,
};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

/// Every capability is injected as a trait object so tests can swap the
/// Postgres repositories for in-memory fakes. Nothing here is process-global.
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<dyn PriceRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub pois: Arc<dyn PoiRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub store_health: Arc<dyn StoreHealth>,
    pub payments: Arc<dyn PaymentAdapter>,
    pub auth: AuthConfig,
    pub business_rules: wayfare_store::app_config::BusinessRules,
}
