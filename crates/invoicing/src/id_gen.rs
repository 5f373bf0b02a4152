//! Invoice number generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::period::BillingPeriod;

/// Produces invoice ids of the form `{prefix}-{entity_id}-{YYYYMM}-{suffix}`.
///
/// The suffix only needs practical uniqueness within a batch; it is not a security token.
pub trait InvoiceIdGenerator: Send + Sync {
    fn suffix(&self) -> String;

    fn generate(&self, prefix: &str, entity_id: &str, period: &BillingPeriod) -> String {
        format!(
            "{prefix}-{entity_id}-{}-{}",
            period.period_code(),
            self.suffix()
        )
    }
}

/// Six uppercase characters drawn from a random v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl InvoiceIdGenerator for RandomIdGenerator {
    fn suffix(&self) -> String {
        let mut simple = Uuid::new_v4().simple().to_string();
        simple.truncate(6);
        simple.to_ascii_uppercase()
    }
}

/// Deterministic zero-padded counter (`000001`, `000002`, ...) for tests and replays.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceIdGenerator for SequentialIdGenerator {
    fn suffix(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:06}", n % 1_000_000)
    }
}
