use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Processing,
    Succeeded,
    Failed,
}

/// Result of a capture attempt against the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCapture {
    pub id: String, // Provider's ID (e.g., pi_123)
    pub reservation_id: Uuid,
    pub amount: i64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Seam to a payment provider. The only implementation in this system is the
/// mock below; a real gateway integration is out of scope.
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Capture the frozen reservation total.
    async fn capture(
        &self,
        reservation_id: Uuid,
        amount: i64,
    ) -> Result<PaymentCapture, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct MockPaymentAdapter;

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn capture(
        &self,
        reservation_id: Uuid,
        amount: i64,
    ) -> Result<PaymentCapture, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(%reservation_id, amount, "capturing payment (mock)");

        Ok(PaymentCapture {
            id: format!("pi_{}", reservation_id.simple()),
            reservation_id,
            amount,
            status: PaymentStatus::Succeeded,
            created_at: Utc::now(),
        })
    }
}
