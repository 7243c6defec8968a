use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use wayfare_shared::VenueRef;

use crate::error::{StoreError, StoreResult};
use crate::repository::PriceRepository;

/// Lower bound of derivable venue prices, in currency minor units.
pub const MIN_BASE_PRICE: i64 = 90_000;

/// Upper bound of derivable venue prices. The modulo arithmetic below makes
/// this value itself unreachable: derived prices live in [MIN, MAX). Changing
/// that would silently reprice every venue already minted, so the half-open
/// range is load-bearing.
pub const MAX_BASE_PRICE: i64 = 340_000;

/// A lazily-minted, permanent price row for one external venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub venue: VenueRef,
    pub display_name: Option<String>,
    pub base_price: i64,
    pub created_at: DateTime<Utc>,
}

/// Derive a stable price for a venue from nothing but its identity.
///
/// Pure function: no clock, no randomness, no state. Independent replicas
/// computing this concurrently always agree, which is what makes the losing
/// side of the ensure-or-create race harmless.
pub fn derive_base_price(venue: &VenueRef) -> i64 {
    let digest = Sha256::digest(venue.canonical().as_bytes());

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let digest_int = u64::from_be_bytes(prefix);

    let span = (MAX_BASE_PRICE - MIN_BASE_PRICE) as u64;
    MIN_BASE_PRICE + (digest_int % span) as i64
}

/// Outcome of an ensure-or-create call. The failure leg of the workflow is
/// the `Err` side of the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created { base_price: i64 },
    AlreadyExists { base_price: i64 },
}

impl EnsureOutcome {
    pub fn base_price(&self) -> i64 {
        match self {
            EnsureOutcome::Created { base_price } => *base_price,
            EnsureOutcome::AlreadyExists { base_price } => *base_price,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, EnsureOutcome::Created { .. })
    }
}

/// Answer "what is the price for this venue", creating the record exactly
/// once if it does not exist yet.
///
/// Safe under concurrent callers across replicas: the only coordination is
/// the database uniqueness constraint on the venue key. A losing inserter
/// re-reads and returns the winner's stored value — never its own derived
/// one, so the stored row stays authoritative even if the derivation ever
/// changes.
pub async fn ensure_price(
    repo: &dyn PriceRepository,
    venue: &VenueRef,
    display_name: Option<&str>,
) -> StoreResult<EnsureOutcome> {
    if let Some(existing) = repo.find_price(venue).await? {
        return Ok(EnsureOutcome::AlreadyExists {
            base_price: existing.base_price,
        });
    }

    let base_price = derive_base_price(venue);

    match repo.insert_price(venue, display_name, base_price).await {
        Ok(record) => {
            tracing::info!(venue = %venue, base_price = record.base_price, "minted venue price");
            Ok(EnsureOutcome::Created {
                base_price: record.base_price,
            })
        }
        Err(StoreError::Duplicate) => {
            // Lost the insert race. The winner's row is ground truth.
            tracing::debug!(venue = %venue, "price insert conflicted, re-reading winner");
            let winner = repo.find_price(venue).await?.ok_or(StoreError::NotFound)?;
            Ok(EnsureOutcome::AlreadyExists {
                base_price: winner.base_price,
            })
        }
        Err(other) => Err(other),
    }
}
