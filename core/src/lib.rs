#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the License to Grill order engine.
//!
//! This crate defines the plain data exchanged between the gameplay layer and
//! the engine: the components a burger is built from, the [`Construction`]
//! that orders them, the [`Complaint`] values produced when a served burger is
//! reconciled against its request, and the [`Ruleset`] that tunes generation,
//! scoring and queue replenishment. Systems consume these types and respond
//! with new values; nothing here holds hidden state.

use std::fmt;

use serde::{Deserialize, Serialize};

mod distribution;
mod ruleset;

pub use distribution::{DistributionEntry, DistributionTable, TOTAL_WEIGHT};
pub use ruleset::{
    CookBand, DeductionTable, DonenessConfig, GenerationConfig, RefillPolicy, Ruleset,
    SauceTolerance, ScoringConfig, MAX_LOW_WATER_MARK,
};

/// Errors raised while assembling engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A distribution table whose weights do not add up to [`TOTAL_WEIGHT`].
    #[error("distribution weights sum to {sum}, expected {expected}", expected = TOTAL_WEIGHT)]
    DistributionWeights {
        /// Sum of the weights that were supplied.
        sum: u64,
    },
    /// A refill policy that would append nothing when the queue runs low.
    #[error("refill batch size must be at least one order")]
    ZeroRefillBatch,
    /// A refill policy asking for more pending orders than the queue will buffer.
    #[error("refill low-water mark {mark} exceeds the limit of {limit}")]
    LowWaterMarkTooHigh {
        /// Requested low-water mark.
        mark: usize,
        /// Largest accepted low-water mark.
        limit: usize,
    },
    /// A threshold or amount that is infinite or NaN.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Dotted path of the offending setting.
        field: String,
    },
    /// A range whose minimum lies above its maximum.
    #[error("{field} range is inverted: minimum exceeds maximum")]
    InvertedRange {
        /// Dotted path of the offending range.
        field: String,
    },
}

/// Bread varieties available for the top and bottom of a burger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BunKind {
    /// Soft enriched bun.
    Brioche,
    /// Bun topped with sesame seeds.
    Sesame,
    /// Wholemeal bun.
    Brown,
}

impl BunKind {
    /// Every bun kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Brioche, Self::Sesame, Self::Brown];
}

/// Patty varieties that can be grilled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PattyKind {
    /// Beef patty.
    Beef,
    /// Chicken patty.
    Chicken,
    /// Vegetarian patty.
    Veggie,
}

impl PattyKind {
    /// Every patty kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Beef, Self::Chicken, Self::Veggie];
}

/// Vegetable toppings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegKind {
    /// Lettuce leaf.
    Lettuce,
    /// Tomato slice.
    Tomato,
    /// Pickle slices.
    Pickle,
}

impl VegKind {
    /// Every vegetable kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Lettuce, Self::Tomato, Self::Pickle];
}

/// Sauces dispensed onto a burger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SauceKind {
    /// Tomato ketchup.
    Ketchup,
    /// Barbecue sauce.
    Bbq,
    /// Mustard.
    Mustard,
}

impl SauceKind {
    /// Every sauce kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Ketchup, Self::Bbq, Self::Mustard];
}

impl fmt::Display for BunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brioche => "Brioche",
            Self::Sesame => "Sesame",
            Self::Brown => "Brown",
        };
        f.write_str(name)
    }
}

impl fmt::Display for PattyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Beef => "Beef",
            Self::Chicken => "Chicken",
            Self::Veggie => "Veggie",
        };
        f.write_str(name)
    }
}

impl fmt::Display for VegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lettuce => "Lettuce",
            Self::Tomato => "Tomato",
            Self::Pickle => "Pickle",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SauceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ketchup => "Ketchup",
            Self::Bbq => "BBQ",
            Self::Mustard => "Mustard",
        };
        f.write_str(name)
    }
}

/// Grilled patty together with the physical state reported by the grill.
///
/// `cook_levels` holds one doneness value per side where lower means more
/// cooked. `heat` is the temperature proxy measured when the patty was
/// plated. Requested patties carry zeroes for both; only served patties are
/// assessed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patty {
    /// Variety of the patty.
    pub kind: PattyKind,
    /// Doneness of each side, lower is more cooked.
    pub cook_levels: [f32; 2],
    /// Temperature proxy at plating time.
    pub heat: f32,
}

impl Patty {
    /// Creates a patty that only carries its kind, as requested orders do.
    #[must_use]
    pub const fn requested(kind: PattyKind) -> Self {
        Self {
            kind,
            cook_levels: [0.0, 0.0],
            heat: 0.0,
        }
    }

    /// Creates a patty with explicit grill measurements.
    #[must_use]
    pub const fn grilled(kind: PattyKind, cook_levels: [f32; 2], heat: f32) -> Self {
        Self {
            kind,
            cook_levels,
            heat,
        }
    }
}

/// Dose of sauce; an `amount` of `1.0` is a full dose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sauce {
    /// Variety of the sauce.
    pub kind: SauceKind,
    /// Dispensed amount as a fraction of a full dose.
    pub amount: f32,
}

impl Sauce {
    /// Creates a sauce dose.
    #[must_use]
    pub const fn new(kind: SauceKind, amount: f32) -> Self {
        Self { kind, amount }
    }
}

/// Broad family a [`Component`] belongs to, ignoring its variety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Any bun.
    Bun,
    /// Any patty.
    Patty,
    /// Any vegetable.
    Veg,
    /// Any sauce.
    Sauce,
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bun => "bun",
            Self::Patty => "patty",
            Self::Veg => "veg",
            Self::Sauce => "sauce",
        };
        f.write_str(name)
    }
}

/// Single layer of a burger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Component {
    /// Top or bottom bun.
    Bun(BunKind),
    /// Grilled patty.
    Patty(Patty),
    /// Vegetable topping.
    Veg(VegKind),
    /// Sauce dose.
    Sauce(Sauce),
}

impl Component {
    /// Family the component belongs to.
    #[must_use]
    pub const fn category(&self) -> ComponentCategory {
        match self {
            Self::Bun(_) => ComponentCategory::Bun,
            Self::Patty(_) => ComponentCategory::Patty,
            Self::Veg(_) => ComponentCategory::Veg,
            Self::Sauce(_) => ComponentCategory::Sauce,
        }
    }

    /// Reports whether both components share a family and a variety.
    ///
    /// Numeric state (cook levels, heat, sauce amount) never takes part in
    /// the comparison.
    #[must_use]
    pub fn same_type(&self, other: &Component) -> bool {
        match (self, other) {
            (Self::Bun(a), Self::Bun(b)) => a == b,
            (Self::Patty(a), Self::Patty(b)) => a.kind == b.kind,
            (Self::Veg(a), Self::Veg(b)) => a == b,
            (Self::Sauce(a), Self::Sauce(b)) => a.kind == b.kind,
            _ => false,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bun(kind) => write!(f, "{kind} bun"),
            Self::Patty(patty) => write!(f, "{} patty", patty.kind),
            Self::Veg(kind) => write!(f, "{kind}"),
            Self::Sauce(sauce) => write!(f, "{} ({:.2})", sauce.kind, sauce.amount),
        }
    }
}

/// Ordered stack of components describing one burger.
///
/// Requested constructions are listed top bun first. Served constructions are
/// whatever the player plated, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    items: Vec<Component>,
}

impl Construction {
    /// Creates an empty construction.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a component on top of the stack.
    pub fn push(&mut self, component: Component) {
        self.items.push(component);
    }

    /// Components in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Component] {
        &self.items
    }

    /// Iterator over the components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.items.iter()
    }

    /// Number of components in the construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Reports whether the construction holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counts the components belonging to `category`.
    #[must_use]
    pub fn count(&self, category: ComponentCategory) -> usize {
        self.items
            .iter()
            .filter(|component| component.category() == category)
            .count()
    }
}

impl FromIterator<Component> for Construction {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, component) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Specific discrepancy found while reconciling a served burger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintReason {
    /// The bread differs from the requested variety.
    WrongBun,
    /// A patty differs from the requested variety.
    WrongPatty,
    /// A vegetable differs from the requested variety.
    WrongVeg,
    /// A sauce differs from the requested variety.
    WrongSauce,
    /// A requested bun never arrived.
    MissingBun,
    /// A requested patty never arrived.
    MissingPatty,
    /// The named vegetable was requested but not served.
    MissingVeg(VegKind),
    /// The named sauce was requested but not served.
    MissingSauce(SauceKind),
    /// A bun was served that nobody asked for.
    ExtraBun,
    /// A patty was served that nobody asked for.
    ExtraPatty,
    /// The named vegetable was served but not requested.
    ExtraVeg(VegKind),
    /// The named sauce was served but not requested.
    ExtraSauce(SauceKind),
    /// The right sauce, dispensed too sparingly.
    NotEnoughSauce,
    /// The right sauce, dispensed too generously.
    TooMuchSauce,
    /// A served patty arrived below the heat threshold.
    Cold,
    /// Patty sides left undercooked.
    Undercooked {
        /// Number of affected sides across the burger.
        sides: u32,
    },
    /// Patty sides cooked past the proper band.
    Overcooked {
        /// Number of affected sides across the burger.
        sides: u32,
    },
    /// Patty sides cooked below the burnt floor.
    Burnt {
        /// Number of affected sides across the burger.
        sides: u32,
    },
}

/// Coarse grouping of complaints for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintCategory {
    /// Right family, wrong variety.
    Wrong,
    /// Requested but absent.
    Missing,
    /// Present but not requested.
    Extra,
    /// Sauce dose outside tolerance.
    SauceAmount,
    /// Patty served cold.
    Temperature,
    /// Patty cooked outside its band.
    Doneness,
}

impl ComplaintReason {
    /// Coarse grouping of the reason.
    #[must_use]
    pub const fn category(&self) -> ComplaintCategory {
        match self {
            Self::WrongBun | Self::WrongPatty | Self::WrongVeg | Self::WrongSauce => {
                ComplaintCategory::Wrong
            }
            Self::MissingBun | Self::MissingPatty | Self::MissingVeg(_) | Self::MissingSauce(_) => {
                ComplaintCategory::Missing
            }
            Self::ExtraBun | Self::ExtraPatty | Self::ExtraVeg(_) | Self::ExtraSauce(_) => {
                ComplaintCategory::Extra
            }
            Self::NotEnoughSauce | Self::TooMuchSauce => ComplaintCategory::SauceAmount,
            Self::Cold => ComplaintCategory::Temperature,
            Self::Undercooked { .. } | Self::Overcooked { .. } | Self::Burnt { .. } => {
                ComplaintCategory::Doneness
            }
        }
    }

    /// Component family the reason refers to.
    #[must_use]
    pub const fn component(&self) -> ComponentCategory {
        match self {
            Self::WrongBun | Self::MissingBun | Self::ExtraBun => ComponentCategory::Bun,
            Self::WrongVeg | Self::MissingVeg(_) | Self::ExtraVeg(_) => ComponentCategory::Veg,
            Self::WrongSauce
            | Self::MissingSauce(_)
            | Self::ExtraSauce(_)
            | Self::NotEnoughSauce
            | Self::TooMuchSauce => ComponentCategory::Sauce,
            Self::WrongPatty
            | Self::MissingPatty
            | Self::ExtraPatty
            | Self::Cold
            | Self::Undercooked { .. }
            | Self::Overcooked { .. }
            | Self::Burnt { .. } => ComponentCategory::Patty,
        }
    }
}

impl fmt::Display for ComplaintReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongBun => f.write_str("wrong bun"),
            Self::WrongPatty => f.write_str("wrong patty"),
            Self::WrongVeg => f.write_str("wrong veg"),
            Self::WrongSauce => f.write_str("wrong sauce"),
            Self::MissingBun => f.write_str("missing bun"),
            Self::MissingPatty => f.write_str("missing patty"),
            Self::MissingVeg(kind) => write!(f, "missing veg ({kind})"),
            Self::MissingSauce(kind) => write!(f, "missing sauce ({kind})"),
            Self::ExtraBun => f.write_str("extra bun"),
            Self::ExtraPatty => f.write_str("extra patty"),
            Self::ExtraVeg(kind) => write!(f, "extra veg ({kind})"),
            Self::ExtraSauce(kind) => write!(f, "extra sauce ({kind})"),
            Self::NotEnoughSauce => f.write_str("not enough sauce"),
            Self::TooMuchSauce => f.write_str("too much sauce"),
            Self::Cold => f.write_str("cold"),
            Self::Undercooked { sides } => write!(f, "undercooked ({})", side_label(*sides)),
            Self::Overcooked { sides } => write!(f, "overcooked ({})", side_label(*sides)),
            Self::Burnt { sides } => write!(f, "burnt ({})", side_label(*sides)),
        }
    }
}

fn side_label(sides: u32) -> String {
    if sides == 1 {
        "1 side".to_owned()
    } else {
        format!("{sides} sides")
    }
}

/// Immutable record of a single discrepancy and its point deduction.
///
/// Complaints carry no presentation data; adapters map [`ComplaintReason`]
/// onto their own art and copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Complaint {
    reason: ComplaintReason,
    deduction: u32,
}

impl Complaint {
    /// Creates a complaint carrying the provided deduction.
    #[must_use]
    pub const fn new(reason: ComplaintReason, deduction: u32) -> Self {
        Self { reason, deduction }
    }

    /// Discrepancy described by the complaint.
    #[must_use]
    pub const fn reason(&self) -> ComplaintReason {
        self.reason
    }

    /// Points subtracted from the base score.
    #[must_use]
    pub const fn deduction(&self) -> u32 {
        self.deduction
    }

    /// Coarse grouping of the complaint.
    #[must_use]
    pub const fn category(&self) -> ComplaintCategory {
        self.reason.category()
    }
}

impl fmt::Display for Complaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (-{})", self.reason, self.deduction)
    }
}

/// Result of reconciling one served burger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeOutcome {
    /// Base score minus deductions, floored at zero.
    pub score: u32,
    /// Tip awarded on top of the score.
    pub tip: u32,
    /// Complaints in the order they were raised.
    pub complaints: Vec<Complaint>,
}

impl ServeOutcome {
    /// Sum of all complaint deductions.
    #[must_use]
    pub fn total_deduction(&self) -> u32 {
        self.complaints
            .iter()
            .map(Complaint::deduction)
            .fold(0, u32::saturating_add)
    }

    /// Reports whether the burger drew no complaints at all.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.complaints.is_empty()
    }
}

/// Unique, monotonically increasing identifier of a customer order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates a new order identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a customer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Generated and waiting for a burger.
    Pending,
    /// Burger served and reconciled.
    Served,
}

/// A customer waiting in line together with what they asked for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    id: OrderId,
    name: String,
    requested: Construction,
    served: Option<Construction>,
    outcome: Option<ServeOutcome>,
}

impl CustomerOrder {
    /// Creates a pending order.
    #[must_use]
    pub fn new(id: OrderId, name: String, requested: Construction) -> Self {
        Self {
            id,
            name,
            requested,
            served: None,
            outcome: None,
        }
    }

    /// Identifier assigned when the order was generated.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Customer name shown alongside the order.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Burger the customer asked for.
    #[must_use]
    pub const fn requested(&self) -> &Construction {
        &self.requested
    }

    /// Burger the customer received, once served.
    #[must_use]
    pub const fn served(&self) -> Option<&Construction> {
        self.served.as_ref()
    }

    /// Reconciliation result, once served.
    #[must_use]
    pub const fn outcome(&self) -> Option<&ServeOutcome> {
        self.outcome.as_ref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        if self.served.is_some() {
            OrderStatus::Served
        } else {
            OrderStatus::Pending
        }
    }

    /// Records the served burger and its outcome, moving the order to
    /// [`OrderStatus::Served`].
    ///
    /// Returns `false` and leaves the order untouched when it was already
    /// served.
    #[must_use]
    pub fn record_service(&mut self, served: Construction, outcome: ServeOutcome) -> bool {
        if self.served.is_some() {
            return false;
        }
        self.served = Some(served);
        self.outcome = Some(outcome);
        true
    }
}

/// Aggregate of every served order still retained by a queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Number of orders served.
    pub orders_served: u32,
    /// Orders that drew no complaints.
    pub perfect_orders: u32,
    /// Sum of all scores.
    pub total_score: u64,
    /// Sum of all tips.
    pub total_tips: u64,
    /// Sum of all deductions before flooring.
    pub total_deductions: u64,
}

impl RoundSummary {
    /// Folds a single outcome into the summary.
    pub fn record(&mut self, outcome: &ServeOutcome) {
        self.orders_served = self.orders_served.saturating_add(1);
        if outcome.is_perfect() {
            self.perfect_orders = self.perfect_orders.saturating_add(1);
        }
        self.total_score = self.total_score.saturating_add(u64::from(outcome.score));
        self.total_tips = self.total_tips.saturating_add(u64::from(outcome.tip));
        self.total_deductions = self
            .total_deductions
            .saturating_add(u64::from(outcome.total_deduction()));
    }
}
