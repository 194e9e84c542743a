#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative order queue for a License to Grill session.
//!
//! The queue presents an endless line of customers backed by a finite
//! buffer. Whenever fewer than the low-water mark of pending orders remain
//! ahead of the cursor, a fresh batch is generated from the queue's own
//! seeded RNG. Served orders stay in the buffer for end-of-round display
//! until [`OrderQueue::retain_served`] evicts them.
//!
//! A queue belongs to exactly one session; run one queue per player rather
//! than sharing a queue behind a lock.

use license_to_grill_core::{
    ConfigError, Construction, CustomerOrder, OrderId, RefillPolicy, Ruleset, ServeOutcome,
};
use license_to_grill_system_order_generation::OrderFactory;
use license_to_grill_system_reconciliation::Reconciliation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const SESSION_SEED_LABEL: &str = "license-to-grill/session";

/// Errors raised by queue operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// No pending order is waiting to be served.
    #[error("no pending order to serve")]
    Empty,
}

/// Endless line of customer orders for one session.
#[derive(Debug)]
pub struct OrderQueue {
    orders: Vec<CustomerOrder>,
    cursor: usize,
    next_id: u64,
    factory: OrderFactory,
    reconciliation: Reconciliation,
    refill: RefillPolicy,
    rng: ChaCha8Rng,
}

impl OrderQueue {
    /// Creates a queue for `ruleset`, seeded for reproducible generation, and
    /// fills it up to the low-water mark.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the ruleset fails validation.
    pub fn new(ruleset: Ruleset, seed: u64) -> Result<Self, ConfigError> {
        ruleset.validate()?;
        let mut queue = Self {
            orders: Vec::new(),
            cursor: 0,
            next_id: 0,
            reconciliation: Reconciliation::new(&ruleset),
            refill: ruleset.refill,
            factory: OrderFactory::new(ruleset.generation),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        queue.top_up();
        Ok(queue)
    }

    /// Creates a queue using the default ruleset.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Ruleset::default(), seed).expect("default ruleset is valid")
    }

    /// Returns up to `count` pending orders starting at the head, without
    /// advancing the queue.
    #[must_use]
    pub fn peek_next(&self, count: usize) -> &[CustomerOrder] {
        let end = self.cursor.saturating_add(count).min(self.orders.len());
        &self.orders[self.cursor..end]
    }

    /// Reconciles `served` against the order at the head of the line, marks
    /// that order served and advances to the next customer.
    ///
    /// The buffer is replenished afterwards if the pending count fell below
    /// the low-water mark.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] when no order is pending.
    pub fn serve_head(&mut self, served: Construction) -> Result<ServeOutcome, QueueError> {
        let order = self.orders.get_mut(self.cursor).ok_or(QueueError::Empty)?;
        let outcome = self.reconciliation.reconcile(order.requested(), &served);
        let recorded = order.record_service(served, outcome.clone());
        debug_assert!(recorded, "orders beyond the cursor are always pending");

        log::debug!(
            "served order {} for {}: score {} tip {}",
            order.id(),
            order.name(),
            outcome.score,
            outcome.tip
        );

        self.cursor += 1;
        self.top_up();
        Ok(outcome)
    }

    /// Number of pending orders ahead of the cursor.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.orders.len() - self.cursor
    }

    /// Evicts served orders older than the most recent `window` served
    /// entries and returns how many were dropped.
    pub fn retain_served(&mut self, window: usize) -> usize {
        let excess = self.cursor.saturating_sub(window);
        if excess == 0 {
            return 0;
        }
        let _ = self.orders.drain(..excess);
        self.cursor -= excess;
        log::debug!("evicted {excess} served orders");
        excess
    }

    fn top_up(&mut self) {
        let mut appended = 0;
        while self.pending_count() < self.refill.low_water_mark {
            self.orders.reserve(self.refill.batch_size);
            for _ in 0..self.refill.batch_size {
                let id = OrderId::new(self.next_id);
                self.next_id += 1;
                let order = self.factory.generate_customer(id, &mut self.rng);
                self.orders.push(order);
            }
            appended += self.refill.batch_size;
        }
        if appended > 0 {
            log::debug!(
                "replenished order queue with {appended} orders, {} pending",
                self.pending_count()
            );
        }
    }
}

/// Derives an independent RNG seed for `session` from a shared global seed.
///
/// Sessions running side by side each own a queue seeded this way, so their
/// customer lines never share random state.
#[must_use]
pub fn derive_session_seed(global_seed: u64, session: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(SESSION_SEED_LABEL.as_bytes());
    hasher.update(session.to_le_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}

/// Query functions that provide read-only access to the queue state.
pub mod query {
    use super::OrderQueue;
    use license_to_grill_core::{CustomerOrder, RoundSummary};

    /// Order currently at the head of the line, if any.
    #[must_use]
    pub fn head(queue: &OrderQueue) -> Option<&CustomerOrder> {
        queue.orders.get(queue.cursor)
    }

    /// Retained served orders, oldest first.
    #[must_use]
    pub fn served_orders(queue: &OrderQueue) -> &[CustomerOrder] {
        &queue.orders[..queue.cursor]
    }

    /// Every retained order, served and pending, in line order.
    #[must_use]
    pub fn orders(queue: &OrderQueue) -> &[CustomerOrder] {
        &queue.orders
    }

    /// Number of orders generated since the queue was created, evicted ones included.
    #[must_use]
    pub fn total_generated(queue: &OrderQueue) -> u64 {
        queue.next_id
    }

    /// Aggregates the outcomes of every retained served order.
    #[must_use]
    pub fn round_summary(queue: &OrderQueue) -> RoundSummary {
        let mut summary = RoundSummary::default();
        for outcome in served_orders(queue)
            .iter()
            .filter_map(CustomerOrder::outcome)
        {
            summary.record(outcome);
        }
        summary
    }
}
