//! Weighted choice over a fixed set of values.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Sum every distribution table's weights must reach.
pub const TOTAL_WEIGHT: u32 = 100;

/// Single value paired with its percentage weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry<T> {
    /// Value returned when the entry is drawn.
    pub value: T,
    /// Percentage of draws that should return the value.
    pub weight: u32,
}

impl<T> DistributionEntry<T> {
    /// Pairs a value with its weight.
    #[must_use]
    pub const fn new(value: T, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// Weighted-choice table whose weights add up to exactly [`TOTAL_WEIGHT`].
///
/// Drawing picks a uniform slot in `[0, TOTAL_WEIGHT)` and returns the value
/// whose contiguous run of slots contains it, so each value appears with
/// probability `weight / TOTAL_WEIGHT`. Draws are independent.
///
/// Tables are validated on construction and on deserialization; a table
/// whose weights miss the total is never observable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<DistributionEntry<T>>",
    into = "Vec<DistributionEntry<T>>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct DistributionTable<T> {
    entries: Vec<DistributionEntry<T>>,
}

impl<T> DistributionTable<T> {
    /// Builds a table from `(value, weight)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DistributionWeights`] when the weights do not
    /// sum to [`TOTAL_WEIGHT`]. Weights are never renormalized.
    pub fn new(entries: Vec<DistributionEntry<T>>) -> Result<Self, ConfigError> {
        let sum = entries
            .iter()
            .map(|entry| u64::from(entry.weight))
            .sum::<u64>();
        if sum != u64::from(TOTAL_WEIGHT) {
            return Err(ConfigError::DistributionWeights { sum });
        }
        Ok(Self { entries })
    }

    /// Convenience constructor from `(value, weight)` pairs.
    ///
    /// # Errors
    ///
    /// See [`DistributionTable::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, weight)| DistributionEntry::new(value, weight))
                .collect(),
        )
    }

    /// Draws one value.
    pub fn draw<R>(&self, rng: &mut R) -> &T
    where
        R: Rng + ?Sized,
    {
        self.value_at(rng.gen_range(0..TOTAL_WEIGHT))
    }

    /// Value occupying `slot` in the virtual `TOTAL_WEIGHT`-slot array.
    ///
    /// Slots at or beyond the total wrap around.
    #[must_use]
    pub fn value_at(&self, slot: u32) -> &T {
        let mut remaining = slot % TOTAL_WEIGHT;
        for entry in &self.entries {
            if remaining < entry.weight {
                return &entry.value;
            }
            remaining -= entry.weight;
        }
        unreachable!("validated weights cover every slot")
    }

    /// Entries in configuration order.
    #[must_use]
    pub fn entries(&self) -> &[DistributionEntry<T>] {
        &self.entries
    }
}

impl<T> TryFrom<Vec<DistributionEntry<T>>> for DistributionTable<T> {
    type Error = ConfigError;

    fn try_from(entries: Vec<DistributionEntry<T>>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl<T> From<DistributionTable<T>> for Vec<DistributionEntry<T>> {
    fn from(table: DistributionTable<T>) -> Self {
        table.entries
    }
}
