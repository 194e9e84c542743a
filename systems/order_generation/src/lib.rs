#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized order generation for the grill line.
//!
//! Counts are drawn from weighted [`DistributionTable`]s while varieties are
//! drawn uniformly. Randomness is always supplied by the caller so a seeded
//! generator replays the same line of customers.
//!
//! [`DistributionTable`]: license_to_grill_core::DistributionTable

use license_to_grill_core::{
    BunKind, Component, ComponentCategory, Construction, CustomerOrder, GenerationConfig, OrderId,
    Patty, PattyKind, Sauce, SauceKind, VegKind,
};
use rand::{seq::SliceRandom, Rng};

const MAX_VEG: usize = 2;
const MIN_PATTIES: usize = 1;
const MAX_PATTIES: usize = 2;
const MAX_SAUCES: usize = 1;

/// Pure system that builds requested burgers and the customers asking for them.
#[derive(Clone, Debug, Default)]
pub struct OrderFactory {
    config: GenerationConfig,
}

impl OrderFactory {
    /// Creates a factory driven by the provided generation tables.
    #[must_use]
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Generation tables in use.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds one requested burger, top bun first.
    ///
    /// The bun variety is drawn once and reused for the bottom bun. Requested
    /// patties carry no grill state and requested sauces carry the configured
    /// full dose.
    pub fn generate_order<R>(&self, rng: &mut R) -> Construction
    where
        R: Rng + ?Sized,
    {
        let mut construction = Construction::new();

        let bun = uniform(rng, &BunKind::ALL);
        construction.push(Component::Bun(bun));

        for _ in 0..*self.config.veg_count.draw(rng) {
            construction.push(Component::Veg(uniform(rng, &VegKind::ALL)));
        }

        for _ in 0..*self.config.patty_count.draw(rng) {
            let kind = uniform(rng, &PattyKind::ALL);
            construction.push(Component::Patty(Patty::requested(kind)));
        }

        for _ in 0..*self.config.sauce_count.draw(rng) {
            let kind = uniform(rng, &SauceKind::ALL);
            construction.push(Component::Sauce(Sauce::new(
                kind,
                self.config.requested_sauce_amount,
            )));
        }

        construction.push(Component::Bun(bun));
        log::trace!("generated order: {construction}");
        construction
    }

    /// Picks a name for the customer placing order `id`.
    pub fn customer_name<R>(&self, id: OrderId, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        match self.config.customer_names.choose(rng) {
            Some(name) => name.clone(),
            None => format!("Customer {}", id.get()),
        }
    }

    /// Generates a pending customer order with the provided identifier.
    pub fn generate_customer<R>(&self, id: OrderId, rng: &mut R) -> CustomerOrder
    where
        R: Rng + ?Sized,
    {
        let name = self.customer_name(id, rng);
        let requested = self.generate_order(rng);
        CustomerOrder::new(id, name, requested)
    }
}

/// Reports whether `construction` has the shape of a requested burger.
///
/// The shape is a bun, up to two vegetables, one or two patties, at most one
/// sauce and a closing bun of the same variety as the first.
#[must_use]
pub fn is_requested_shape(construction: &Construction) -> bool {
    let items = construction.items();
    let (Some(Component::Bun(top)), Some(Component::Bun(bottom))) = (items.first(), items.last())
    else {
        return false;
    };
    if items.len() < 2 || top != bottom {
        return false;
    }

    let middle = &items[1..items.len() - 1];
    let mut cursor = 0;
    let veg = run_length(middle, &mut cursor, ComponentCategory::Veg);
    let patties = run_length(middle, &mut cursor, ComponentCategory::Patty);
    let sauces = run_length(middle, &mut cursor, ComponentCategory::Sauce);

    cursor == middle.len()
        && veg <= MAX_VEG
        && (MIN_PATTIES..=MAX_PATTIES).contains(&patties)
        && sauces <= MAX_SAUCES
}

fn run_length(items: &[Component], cursor: &mut usize, category: ComponentCategory) -> usize {
    let start = *cursor;
    while items
        .get(*cursor)
        .is_some_and(|component| component.category() == category)
    {
        *cursor += 1;
    }
    *cursor - start
}

fn uniform<T, R>(rng: &mut R, options: &[T]) -> T
where
    T: Copy,
    R: Rng + ?Sized,
{
    options[rng.gen_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construction(components: &[Component]) -> Construction {
        components.iter().copied().collect()
    }

    #[test]
    fn shape_accepts_minimal_burger() {
        let burger = construction(&[
            Component::Bun(BunKind::Brown),
            Component::Patty(Patty::requested(PattyKind::Veggie)),
            Component::Bun(BunKind::Brown),
        ]);
        assert!(is_requested_shape(&burger));
    }

    #[test]
    fn shape_rejects_mismatched_buns() {
        let burger = construction(&[
            Component::Bun(BunKind::Brown),
            Component::Patty(Patty::requested(PattyKind::Veggie)),
            Component::Bun(BunKind::Sesame),
        ]);
        assert!(!is_requested_shape(&burger));
    }

    #[test]
    fn shape_rejects_out_of_order_layers() {
        let burger = construction(&[
            Component::Bun(BunKind::Brioche),
            Component::Patty(Patty::requested(PattyKind::Beef)),
            Component::Veg(VegKind::Pickle),
            Component::Bun(BunKind::Brioche),
        ]);
        assert!(!is_requested_shape(&burger));
    }

    #[test]
    fn shape_rejects_missing_patty_and_lone_bun() {
        let no_patty = construction(&[
            Component::Bun(BunKind::Brioche),
            Component::Veg(VegKind::Pickle),
            Component::Bun(BunKind::Brioche),
        ]);
        assert!(!is_requested_shape(&no_patty));

        let lone_bun = construction(&[Component::Bun(BunKind::Brioche)]);
        assert!(!is_requested_shape(&lone_bun));
        assert!(!is_requested_shape(&Construction::new()));
    }

    #[test]
    fn shape_rejects_three_patties() {
        let burger = construction(&[
            Component::Bun(BunKind::Sesame),
            Component::Patty(Patty::requested(PattyKind::Beef)),
            Component::Patty(Patty::requested(PattyKind::Beef)),
            Component::Patty(Patty::requested(PattyKind::Beef)),
            Component::Bun(BunKind::Sesame),
        ]);
        assert!(!is_requested_shape(&burger));
    }
}
