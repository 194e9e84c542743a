//! Scripted cook used to exercise the engine from the command line.
//!
//! The cook plates each order from the bottom bun up. With probability
//! `1 - accuracy` a layer goes wrong: it is forgotten, swapped for another
//! variety or doubled. Grill and dispenser noise also widen as accuracy drops.

use license_to_grill_core::{
    BunKind, Component, Construction, DonenessConfig, Patty, PattyKind, Sauce, SauceKind, VegKind,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const COOK_STREAM: u64 = 1;
const HEAT_HEADROOM: f32 = 30.0;
const MAX_CHILL: f32 = 40.0;

/// Deterministic stand-in for a player at the grill.
#[derive(Debug)]
pub(crate) struct ScriptedCook {
    accuracy: f64,
    rng: ChaCha8Rng,
}

impl ScriptedCook {
    /// Creates a cook that gets each layer right with probability `accuracy`.
    pub(crate) fn new(accuracy: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(COOK_STREAM);
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            rng,
        }
    }

    /// Plates `requested`, bottom layer first.
    pub(crate) fn plate(
        &mut self,
        requested: &Construction,
        doneness: &DonenessConfig,
    ) -> Construction {
        let mut plate = Construction::new();
        for component in requested.items().iter().rev() {
            if self.rng.gen_bool(self.accuracy) {
                plate.push(self.prepare(*component, doneness));
                continue;
            }

            match self.rng.gen_range(0..3) {
                0 => log::trace!("cook forgot {component}"),
                1 => {
                    let swapped = self.swap_variety(*component);
                    plate.push(self.prepare(swapped, doneness));
                }
                _ => {
                    plate.push(self.prepare(*component, doneness));
                    plate.push(self.prepare(*component, doneness));
                }
            }
        }
        plate
    }

    fn prepare(&mut self, component: Component, doneness: &DonenessConfig) -> Component {
        match component {
            Component::Patty(patty) => Component::Patty(self.grill(patty.kind, doneness)),
            Component::Sauce(sauce) => Component::Sauce(Sauce::new(sauce.kind, self.dispense())),
            other => other,
        }
    }

    fn grill(&mut self, kind: PattyKind, doneness: &DonenessConfig) -> Patty {
        let band = doneness.band(kind);
        let sloppiness = (1.0 - self.accuracy) as f32;
        let spread = (band.max - band.min) * 0.45 * (1.0 + 4.0 * sloppiness);
        let cook_levels = [
            band.midpoint() + self.jitter(spread),
            band.midpoint() + self.jitter(spread),
        ];

        let low = doneness.cold_threshold - MAX_CHILL * sloppiness;
        let heat = self
            .rng
            .gen_range(low..=doneness.cold_threshold + HEAT_HEADROOM);
        Patty::grilled(kind, cook_levels, heat)
    }

    fn dispense(&mut self) -> f32 {
        let sloppiness = (1.0 - self.accuracy) as f32;
        1.0 + self.jitter(0.4 * sloppiness)
    }

    fn jitter(&mut self, spread: f32) -> f32 {
        if spread > 0.0 {
            self.rng.gen_range(-spread..spread)
        } else {
            0.0
        }
    }

    fn swap_variety(&mut self, component: Component) -> Component {
        match component {
            Component::Bun(kind) => Component::Bun(self.other_than(&BunKind::ALL, kind)),
            Component::Patty(patty) => {
                Component::Patty(Patty::requested(self.other_than(&PattyKind::ALL, patty.kind)))
            }
            Component::Veg(kind) => Component::Veg(self.other_than(&VegKind::ALL, kind)),
            Component::Sauce(sauce) => Component::Sauce(Sauce::new(
                self.other_than(&SauceKind::ALL, sauce.kind),
                sauce.amount,
            )),
        }
    }

    fn other_than<T>(&mut self, options: &[T], current: T) -> T
    where
        T: Copy + PartialEq,
    {
        let alternatives: Vec<T> = options
            .iter()
            .copied()
            .filter(|option| *option != current)
            .collect();
        alternatives.choose(&mut self.rng).copied().unwrap_or(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use license_to_grill_core::{ComponentCategory, Ruleset};
    use license_to_grill_world::OrderQueue;

    #[test]
    fn flawless_cook_earns_full_marks() {
        let ruleset = Ruleset::default();
        let mut queue = OrderQueue::new(ruleset.clone(), 17).expect("valid ruleset");
        let mut cook = ScriptedCook::new(1.0, 17);

        for _ in 0..100 {
            let requested = queue.peek_next(1)[0].requested().clone();
            let plate = cook.plate(&requested, &ruleset.doneness);
            let outcome = queue.serve_head(plate).expect("pending order");
            assert!(outcome.is_perfect(), "{:?}", outcome.complaints);
        }
    }

    #[test]
    fn plates_are_built_bottom_up() {
        let ruleset = Ruleset::default();
        let requested: Construction = [
            Component::Bun(BunKind::Sesame),
            Component::Veg(VegKind::Tomato),
            Component::Patty(Patty::requested(PattyKind::Beef)),
            Component::Bun(BunKind::Sesame),
        ]
        .into_iter()
        .collect();

        let plate = ScriptedCook::new(1.0, 3).plate(&requested, &ruleset.doneness);
        let categories: Vec<_> = plate.iter().map(Component::category).collect();
        assert_eq!(
            categories,
            vec![
                ComponentCategory::Bun,
                ComponentCategory::Patty,
                ComponentCategory::Veg,
                ComponentCategory::Bun,
            ]
        );
    }

    #[test]
    fn careless_cook_draws_complaints() {
        let ruleset = Ruleset::default();
        let mut queue = OrderQueue::new(ruleset.clone(), 5).expect("valid ruleset");
        let mut cook = ScriptedCook::new(0.0, 5);

        let mut complaints = 0;
        for _ in 0..20 {
            let requested = queue.peek_next(1)[0].requested().clone();
            let plate = cook.plate(&requested, &ruleset.doneness);
            complaints += queue
                .serve_head(plate)
                .expect("pending order")
                .complaints
                .len();
        }
        assert!(complaints > 0);
    }

    #[test]
    fn swapped_variety_always_differs() {
        let mut cook = ScriptedCook::new(0.5, 8);
        for _ in 0..50 {
            let swapped = cook.swap_variety(Component::Veg(VegKind::Pickle));
            assert_ne!(swapped, Component::Veg(VegKind::Pickle));
            assert_eq!(swapped.category(), ComponentCategory::Veg);
        }
    }
}
