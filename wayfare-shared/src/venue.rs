use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Place types from the external map catalog. Closed set: anything else in a
/// request is a validation error, not a new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Node,
    Way,
    Relation,
}

impl VenueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueKind::Node => "node",
            VenueKind::Way => "way",
            VenueKind::Relation => "relation",
        }
    }
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown venue kind: {0}")]
pub struct UnknownVenueKind(pub String);

impl FromStr for VenueKind {
    type Err = UnknownVenueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(VenueKind::Node),
            "way" => Ok(VenueKind::Way),
            "relation" => Ok(VenueKind::Relation),
            other => Err(UnknownVenueKind(other.to_string())),
        }
    }
}

/// Composite key for an externally-cataloged place. Never minted internally;
/// callers supply both halves and we treat the pair as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueRef {
    pub kind: VenueKind,
    pub external_id: i64,
}

impl VenueRef {
    pub fn new(kind: VenueKind, external_id: i64) -> Self {
        Self { kind, external_id }
    }

    /// Canonical form used as hash input and in log lines: `"{kind}-{id}"`.
    pub fn canonical(&self) -> String {
        format!("{}-{}", self.kind, self.external_id)
    }
}

impl fmt::Display for VenueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.external_id)
    }
}
