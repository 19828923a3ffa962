//! Payment as an injected capability.
//!
//! The flow controller only cares about one contract: authorize payment,
//! then and only then unlock the analysis call. A real provider integration
//! slots in behind `PaymentGate` without touching the state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference: String,
}

#[async_trait]
pub trait PaymentGate: Send + Sync {
    async fn authorize(&self) -> Result<PaymentReceipt, PaymentError>;
}

/// Stand-in gate that approves unconditionally after a fixed delay.
pub struct MockPaymentGate {
    delay: Duration,
    counter: AtomicU64,
}

impl MockPaymentGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            counter: AtomicU64::new(0),
        }
    }

    /// Zero-delay variant for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl PaymentGate for MockPaymentGate {
    async fn authorize(&self) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.delay).await;
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentReceipt {
            reference: format!("mock-{n:06}"),
        })
    }
}
