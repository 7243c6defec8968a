use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled flight in the sellable inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    /// Fare per passenger, minor units.
    pub price: i64,
    pub seats_available: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub price: i64,
    pub seats_available: i32,
}

/// Partial update: only supplied fields replace stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_at: Option<DateTime<Utc>>,
    pub arrival_at: Option<DateTime<Utc>>,
    pub price: Option<i64>,
    pub seats_available: Option<i32>,
}

/// Equality filters for flight listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// A point of interest near a venue: restaurant, museum, attraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPoi {
    pub name: String,
    pub category: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiFilter {
    pub category: Option<String>,
}

/// A rentable vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub model: String,
    pub vendor: String,
    pub city: String,
    /// Rate per rental day, minor units.
    pub daily_rate: i64,
    pub seats: i32,
    pub transmission: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub model: String,
    pub vendor: String,
    pub city: String,
    pub daily_rate: i64,
    pub seats: i32,
    pub transmission: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclePatch {
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub city: Option<String>,
    pub daily_rate: Option<i64>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub city: Option<String>,
}
