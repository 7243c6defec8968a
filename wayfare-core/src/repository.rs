use async_trait::async_trait;
use uuid::Uuid;
use wayfare_shared::VenueRef;

use crate::error::StoreResult;
use crate::inventory::{
    Flight, FlightFilter, FlightPatch, NewFlight, NewPoi, NewVehicle, Poi, PoiFilter, PoiPatch,
    Vehicle, VehicleFilter, VehiclePatch,
};
use crate::pricing::PriceRecord;
use crate::reservation::{Reservation, ReservationStatus};
use crate::user::{ProfileUpdate, User};

/// Venue price persistence. Deliberately narrow: there is no update and no
/// delete — a minted price is permanent.
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn find_price(&self, venue: &VenueRef) -> StoreResult<Option<PriceRecord>>;

    /// Insert the first (and only) row for this venue. Must surface
    /// `StoreError::Duplicate` when another writer got there first.
    async fn insert_price(
        &self,
        venue: &VenueRef,
        display_name: Option<&str>,
        base_price: i64,
    ) -> StoreResult<PriceRecord>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn list(&self, filter: &FlightFilter) -> StoreResult<Vec<Flight>>;
    async fn get(&self, id: Uuid) -> StoreResult<Option<Flight>>;
    async fn create(&self, flight: &NewFlight) -> StoreResult<Flight>;
    async fn update(&self, id: Uuid, patch: &FlightPatch) -> StoreResult<Option<Flight>>;
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>>;
}

#[async_trait]
pub trait PoiRepository: Send + Sync {
    async fn list(&self, filter: &PoiFilter) -> StoreResult<Vec<Poi>>;
    async fn get(&self, id: Uuid) -> StoreResult<Option<Poi>>;
    async fn create(&self, poi: &NewPoi) -> StoreResult<Poi>;
    async fn update(&self, id: Uuid, patch: &PoiPatch) -> StoreResult<Option<Poi>>;
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>>;
    async fn get(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;
    async fn create(&self, vehicle: &NewVehicle) -> StoreResult<Vehicle>;
    async fn update(&self, id: Uuid, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>>;
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>>;
}

/// Reservations are created fully formed (total already computed) and only
/// their status may change afterwards.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> StoreResult<()>;
    async fn get(&self, id: Uuid) -> StoreResult<Option<Reservation>>;
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Reservation>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> StoreResult<Option<Reservation>>;
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Must surface `StoreError::Duplicate` when username or email is taken.
    async fn insert(&self, user: &User) -> StoreResult<()>;
    /// Look up by username or email, whichever matches.
    async fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn update_profile(&self, id: Uuid, patch: &ProfileUpdate) -> StoreResult<Option<User>>;
}

/// Liveness of the persistence collaborator, for the health surface.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}
