//! Tuning surface for order generation, scoring and queue replenishment.
//!
//! Every constant the engine relies on lives here so alternate rulesets
//! (easy or hard shifts) can be loaded as data.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DistributionTable, PattyKind};

/// Largest accepted [`RefillPolicy::low_water_mark`].
pub const MAX_LOW_WATER_MARK: usize = 10_000;

/// Aggregated tuning knobs for one ruleset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// Shapes the burgers customers ask for.
    pub generation: GenerationConfig,
    /// Points removed per complaint.
    pub deductions: DeductionTable,
    /// Heat and cook-level thresholds for served patties.
    pub doneness: DonenessConfig,
    /// Accepted range for the amount of a correctly chosen sauce.
    pub sauce: SauceTolerance,
    /// Base score and tip thresholds.
    pub scoring: ScoringConfig,
    /// Low-water mark and batch size used to replenish the queue.
    pub refill: RefillPolicy,
}

impl Ruleset {
    /// Checks invariants that the type system does not already enforce.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first setting that is non-finite,
    /// an inverted range or an unusable refill policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(
            "generation.requested_sauce_amount",
            self.generation.requested_sauce_amount,
        )?;
        self.doneness.validate()?;
        self.sauce.validate()?;
        self.refill.validate()
    }
}

fn ensure_finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_owned(),
        })
    }
}

fn ensure_range(field: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    ensure_finite(&format!("{field}.min"), min)?;
    ensure_finite(&format!("{field}.max"), max)?;
    if min > max {
        return Err(ConfigError::InvertedRange {
            field: field.to_owned(),
        });
    }
    Ok(())
}

/// Count tables and naming pool used by the order factory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of vegetables per burger.
    pub veg_count: DistributionTable<u32>,
    /// Number of patties per burger.
    pub patty_count: DistributionTable<u32>,
    /// Number of sauces per burger.
    pub sauce_count: DistributionTable<u32>,
    /// Amount recorded on requested sauces.
    pub requested_sauce_amount: f32,
    /// Names handed out to customers. An empty pool falls back to numbered customers.
    pub customer_names: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            veg_count: DistributionTable::from_pairs([(0, 20), (1, 60), (2, 20)])
                .expect("default veg weights sum to 100"),
            patty_count: DistributionTable::from_pairs([(1, 90), (2, 10)])
                .expect("default patty weights sum to 100"),
            sauce_count: DistributionTable::from_pairs([(0, 20), (1, 80)])
                .expect("default sauce weights sum to 100"),
            requested_sauce_amount: 1.0,
            customer_names: [
                "Alex", "Billie", "Casey", "Dana", "Eli", "Frankie", "Gale", "Harper", "Indy",
                "Jordan", "Kit", "Lou", "Morgan", "Noa", "Oakley", "Parker", "Quinn", "Robin",
                "Sam", "Toni",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

/// Points removed for each kind of complaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionTable {
    /// Bread of the wrong variety, reported once per burger.
    pub wrong_bun: u32,
    /// Patty of the wrong variety.
    pub wrong_patty: u32,
    /// Vegetable of the wrong variety.
    pub wrong_veg: u32,
    /// Sauce of the wrong variety.
    pub wrong_sauce: u32,
    /// Requested bun that was not served.
    pub missing_bun: u32,
    /// Requested patty that was not served.
    pub missing_patty: u32,
    /// Requested vegetable that was not served.
    pub missing_veg: u32,
    /// Requested sauce that was not served.
    pub missing_sauce: u32,
    /// Served bun nobody asked for.
    pub extra_bun: u32,
    /// Served patty nobody asked for.
    pub extra_patty: u32,
    /// Served vegetable nobody asked for.
    pub extra_veg: u32,
    /// Served sauce nobody asked for.
    pub extra_sauce: u32,
    /// Sauce dose outside the accepted range.
    pub sauce_amount: u32,
    /// Per undercooked side.
    pub undercooked_per_side: u32,
    /// Per overcooked side.
    pub overcooked_per_side: u32,
    /// Per burnt side.
    pub burnt_per_side: u32,
}

impl Default for DeductionTable {
    fn default() -> Self {
        Self {
            wrong_bun: 10,
            wrong_patty: 25,
            wrong_veg: 10,
            wrong_sauce: 10,
            missing_bun: 20,
            missing_patty: 30,
            missing_veg: 10,
            missing_sauce: 5,
            extra_bun: 10,
            extra_patty: 15,
            extra_veg: 5,
            extra_sauce: 5,
            sauce_amount: 5,
            undercooked_per_side: 15,
            overcooked_per_side: 10,
            burnt_per_side: 15,
        }
    }
}

/// Inclusive cook-level band considered properly cooked.
///
/// Cook levels decrease as a side cooks, so values below `min` are
/// overcooked and values above `max` are undercooked.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CookBand {
    /// Most-cooked acceptable level.
    pub min: f32,
    /// Least-cooked acceptable level.
    pub max: f32,
}

impl CookBand {
    /// Creates a band.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Centre of the band.
    #[must_use]
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) / 2.0
    }
}

/// Thresholds applied to every served patty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonenessConfig {
    /// Heat below which a patty counts as cold.
    pub cold_threshold: f32,
    /// Deduction for a patty at zero heat; colder patties scale linearly towards it.
    pub cold_max_deduction: u32,
    /// Cook level below which a side is burnt rather than merely overcooked.
    pub burnt_floor: f32,
    /// Proper band for beef.
    pub beef: CookBand,
    /// Proper band for chicken.
    pub chicken: CookBand,
    /// Proper band for veggie patties.
    pub veggie: CookBand,
}

impl DonenessConfig {
    /// Checks that thresholds are finite and every band is ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] or [`ConfigError::InvertedRange`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("doneness.cold_threshold", self.cold_threshold)?;
        ensure_finite("doneness.burnt_floor", self.burnt_floor)?;
        ensure_range("doneness.beef", self.beef.min, self.beef.max)?;
        ensure_range("doneness.chicken", self.chicken.min, self.chicken.max)?;
        ensure_range("doneness.veggie", self.veggie.min, self.veggie.max)
    }

    /// Proper band for the provided patty kind.
    #[must_use]
    pub const fn band(&self, kind: PattyKind) -> CookBand {
        match kind {
            PattyKind::Beef => self.beef,
            PattyKind::Chicken => self.chicken,
            PattyKind::Veggie => self.veggie,
        }
    }
}

impl Default for DonenessConfig {
    fn default() -> Self {
        Self {
            cold_threshold: 80.0,
            cold_max_deduction: 10,
            burnt_floor: 0.05,
            beef: CookBand::new(0.2, 0.4),
            chicken: CookBand::new(0.4, 0.6),
            veggie: CookBand::new(0.5, 0.7),
        }
    }
}

/// Accepted range for a sauce that matched its requested kind.
///
/// The upper bound sits above a full dose to absorb dispenser lag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SauceTolerance {
    /// Amounts below this are "not enough sauce".
    pub minimum: f32,
    /// Amounts above this are "too much sauce".
    pub maximum: f32,
}

impl SauceTolerance {
    /// Checks that both bounds are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] or [`ConfigError::InvertedRange`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("sauce.minimum", self.minimum)?;
        ensure_finite("sauce.maximum", self.maximum)?;
        if self.minimum > self.maximum {
            return Err(ConfigError::InvertedRange {
                field: "sauce".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for SauceTolerance {
    fn default() -> Self {
        Self {
            minimum: 0.75,
            maximum: 1.05,
        }
    }
}

/// Base score and tip rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score before deductions.
    pub base: u32,
    /// Tip for a burger with no complaints.
    pub perfect_tip: u32,
    /// Tip for a burger scoring strictly above `good_threshold`.
    pub good_tip: u32,
    /// Score a burger must exceed to earn `good_tip`.
    pub good_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: 100,
            perfect_tip: 20,
            good_tip: 10,
            good_threshold: 80,
        }
    }
}

/// Low-water-mark replenishment of the order queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefillPolicy {
    /// Minimum number of pending orders kept ahead of the cursor.
    pub low_water_mark: usize,
    /// Orders appended each time the pending count drops below the mark.
    pub batch_size: usize,
}

impl RefillPolicy {
    /// Checks that a refill makes progress and stays bounded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroRefillBatch`] when `batch_size` is zero and
    /// [`ConfigError::LowWaterMarkTooHigh`] when the mark exceeds
    /// [`MAX_LOW_WATER_MARK`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroRefillBatch);
        }
        if self.low_water_mark > MAX_LOW_WATER_MARK {
            return Err(ConfigError::LowWaterMarkTooHigh {
                mark: self.low_water_mark,
                limit: MAX_LOW_WATER_MARK,
            });
        }
        Ok(())
    }
}

impl Default for RefillPolicy {
    fn default() -> Self {
        Self {
            low_water_mark: 5,
            batch_size: 10,
        }
    }
}
