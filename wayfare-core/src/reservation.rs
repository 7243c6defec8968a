use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which inventory a reservation books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Flight,
    Stay,
    Vehicle,
}

/// Reservation lifecycle. Price fields are frozen at creation; status is the
/// only thing the update path may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Paid,
    Cancelled,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Flight => "flight",
            ProductKind::Stay => "stay",
            ProductKind::Vehicle => "vehicle",
        }
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flight" => Ok(ProductKind::Flight),
            "stay" => Ok(ProductKind::Stay),
            "vehicle" => Ok(ProductKind::Vehicle),
            other => Err(format!("unknown product kind: {other}")),
        }
    }
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Paid => "PAID",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "PAID" => Ok(ReservationStatus::Paid),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// A user's booking of one product, with the total computed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_kind: ProductKind,
    pub product_ref: String,
    pub total_price: i64,
    pub details: serde_json::Value,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        user_id: Uuid,
        product_kind: ProductKind,
        product_ref: String,
        total_price: i64,
        details: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            product_kind,
            product_ref,
            total_price,
            details,
            status: ReservationStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Inputs to the one-time total computation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PricingInputs {
    /// Unit price in minor units: nightly rate, fare, or daily rate.
    pub unit_price: i64,
    /// Nights for a stay, rental days for a vehicle, 1 for a flight.
    pub duration: u32,
    /// Guests or passengers sharing the unit price.
    pub party_size: u32,
    /// Flat extras total (late checkout, child seat, baggage), untaxed.
    #[serde(default)]
    pub extras_total: i64,
}

/// Total = unit * duration * party + extras + tax on the base amount.
/// Called exactly once per reservation; the result is persisted and never
/// recomputed, so later price changes cannot move an existing booking.
pub fn compute_total(pricing: &PricingInputs, tax_rate: f64) -> i64 {
    let base = pricing.unit_price * pricing.duration as i64 * pricing.party_size as i64;
    let tax = (base as f64 * tax_rate).round() as i64;
    base + pricing.extras_total + tax
}
