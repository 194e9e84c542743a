#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reconciliation of served burgers against the orders that requested them.
//!
//! Matching is greedy and consumes served components left to right: each
//! requested component takes the first unconsumed served component of the
//! same family, whether or not the variety agrees. Anything left over on
//! either side becomes a missing or extra complaint. Served patties are then
//! assessed for heat and doneness independently of what was requested.
//!
//! The result is a scoring function over arbitrary input; no construction is
//! ever rejected.

use license_to_grill_core::{
    Complaint, ComplaintReason, Component, Construction, DeductionTable, DonenessConfig, Patty,
    Ruleset, SauceTolerance, ScoringConfig, ServeOutcome,
};

/// Pure system that turns a requested/served pair into complaints and a score.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    deductions: DeductionTable,
    doneness: DonenessConfig,
    sauce: SauceTolerance,
    scoring: ScoringConfig,
}

impl Reconciliation {
    /// Creates a reconciliation system using the thresholds of `ruleset`.
    #[must_use]
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            deductions: ruleset.deductions,
            doneness: ruleset.doneness,
            sauce: ruleset.sauce,
            scoring: ruleset.scoring,
        }
    }

    /// Reconciles `served` against `requested` and scores the result.
    #[must_use]
    pub fn reconcile(&self, requested: &Construction, served: &Construction) -> ServeOutcome {
        let mut complaints = self.match_components(requested, served);
        complaints.extend(self.assess_doneness(served));
        let outcome = self.score(complaints);
        log::debug!(
            "reconciled burger: score {} tip {} with {} complaints",
            outcome.score,
            outcome.tip,
            outcome.complaints.len()
        );
        outcome
    }

    /// Runs the matching, missing and extra passes.
    ///
    /// Complaints are returned in the order they were raised: mismatches in
    /// requested order, then missing components, then extra components.
    #[must_use]
    pub fn match_components(
        &self,
        requested: &Construction,
        served: &Construction,
    ) -> Vec<Complaint> {
        let mut complaints = Vec::new();
        let mut unconsumed: Vec<Component> = served.items().to_vec();
        let mut unmatched: Vec<Component> = Vec::new();
        let mut bun_seen = false;

        for wanted in requested.iter() {
            let first_bun = matches!(wanted, Component::Bun(_)) && !bun_seen;
            if matches!(wanted, Component::Bun(_)) {
                bun_seen = true;
            }

            let Some(index) = unconsumed
                .iter()
                .position(|candidate| candidate.category() == wanted.category())
            else {
                unmatched.push(*wanted);
                continue;
            };
            let found = unconsumed.remove(index);

            if !wanted.same_type(&found) {
                if let Some(complaint) = self.wrong_variety(wanted, first_bun) {
                    complaints.push(complaint);
                }
                continue;
            }

            if let Component::Sauce(sauce) = found {
                if let Some(complaint) = self.sauce_amount(sauce.amount) {
                    complaints.push(complaint);
                }
            }
        }

        complaints.extend(unmatched.iter().map(|component| self.missing(component)));
        complaints.extend(unconsumed.iter().map(|component| self.extra(component)));
        complaints
    }

    /// Assesses heat and doneness of every patty in `served`.
    ///
    /// Each cold patty raises its own complaint. Undercooked, overcooked and
    /// burnt sides are tallied across the whole burger and reported at most
    /// once each, in that order.
    #[must_use]
    pub fn assess_doneness(&self, served: &Construction) -> Vec<Complaint> {
        let mut complaints = Vec::new();
        let mut tally = SideTally::default();

        for component in served.iter() {
            let Component::Patty(patty) = component else {
                continue;
            };
            if let Some(complaint) = self.cold(patty) {
                complaints.push(complaint);
            }
            self.tally_sides(patty, &mut tally);
        }

        if tally.undercooked > 0 {
            complaints.push(Complaint::new(
                ComplaintReason::Undercooked {
                    sides: tally.undercooked,
                },
                self.deductions
                    .undercooked_per_side
                    .saturating_mul(tally.undercooked),
            ));
        }
        if tally.overcooked > 0 {
            complaints.push(Complaint::new(
                ComplaintReason::Overcooked {
                    sides: tally.overcooked,
                },
                self.deductions
                    .overcooked_per_side
                    .saturating_mul(tally.overcooked),
            ));
        }
        if tally.burnt > 0 {
            complaints.push(Complaint::new(
                ComplaintReason::Burnt { sides: tally.burnt },
                self.deductions.burnt_per_side.saturating_mul(tally.burnt),
            ));
        }

        complaints
    }

    /// Folds complaints into a score and tip.
    ///
    /// The score is the base minus every deduction, floored at zero. A burger
    /// without complaints earns the perfect tip; otherwise a score above the
    /// good threshold earns the good tip.
    #[must_use]
    pub fn score(&self, complaints: Vec<Complaint>) -> ServeOutcome {
        let total = complaints
            .iter()
            .map(|complaint| u64::from(complaint.deduction()))
            .sum::<u64>();
        let score = u64::from(self.scoring.base).saturating_sub(total) as u32;
        let tip = if complaints.is_empty() {
            self.scoring.perfect_tip
        } else if score > self.scoring.good_threshold {
            self.scoring.good_tip
        } else {
            0
        };

        for complaint in &complaints {
            log::trace!("complaint: {complaint}");
        }

        ServeOutcome {
            score,
            tip,
            complaints,
        }
    }

    fn wrong_variety(&self, wanted: &Component, first_bun: bool) -> Option<Complaint> {
        let complaint = match wanted {
            Component::Bun(_) if first_bun => {
                Complaint::new(ComplaintReason::WrongBun, self.deductions.wrong_bun)
            }
            Component::Bun(_) => return None,
            Component::Patty(_) => {
                Complaint::new(ComplaintReason::WrongPatty, self.deductions.wrong_patty)
            }
            Component::Veg(_) => Complaint::new(ComplaintReason::WrongVeg, self.deductions.wrong_veg),
            Component::Sauce(_) => {
                Complaint::new(ComplaintReason::WrongSauce, self.deductions.wrong_sauce)
            }
        };
        Some(complaint)
    }

    fn sauce_amount(&self, amount: f32) -> Option<Complaint> {
        let reason = if amount < self.sauce.minimum {
            ComplaintReason::NotEnoughSauce
        } else if amount > self.sauce.maximum {
            ComplaintReason::TooMuchSauce
        } else {
            return None;
        };
        Some(Complaint::new(reason, self.deductions.sauce_amount))
    }

    fn missing(&self, component: &Component) -> Complaint {
        match component {
            Component::Bun(_) => {
                Complaint::new(ComplaintReason::MissingBun, self.deductions.missing_bun)
            }
            Component::Patty(_) => {
                Complaint::new(ComplaintReason::MissingPatty, self.deductions.missing_patty)
            }
            Component::Veg(kind) => Complaint::new(
                ComplaintReason::MissingVeg(*kind),
                self.deductions.missing_veg,
            ),
            Component::Sauce(sauce) => Complaint::new(
                ComplaintReason::MissingSauce(sauce.kind),
                self.deductions.missing_sauce,
            ),
        }
    }

    fn extra(&self, component: &Component) -> Complaint {
        match component {
            Component::Bun(_) => Complaint::new(ComplaintReason::ExtraBun, self.deductions.extra_bun),
            Component::Patty(_) => {
                Complaint::new(ComplaintReason::ExtraPatty, self.deductions.extra_patty)
            }
            Component::Veg(kind) => {
                Complaint::new(ComplaintReason::ExtraVeg(*kind), self.deductions.extra_veg)
            }
            Component::Sauce(sauce) => Complaint::new(
                ComplaintReason::ExtraSauce(sauce.kind),
                self.deductions.extra_sauce,
            ),
        }
    }

    fn cold(&self, patty: &Patty) -> Option<Complaint> {
        let threshold = self.doneness.cold_threshold;
        if patty.heat >= threshold || patty.heat.is_nan() {
            return None;
        }

        let max = self.doneness.cold_max_deduction as f32;
        let deduction = if threshold > 0.0 {
            (max * (threshold - patty.heat) / threshold).round()
        } else {
            max
        };
        Some(Complaint::new(ComplaintReason::Cold, deduction as u32))
    }

    fn tally_sides(&self, patty: &Patty, tally: &mut SideTally) {
        let band = self.doneness.band(patty.kind);
        for level in patty.cook_levels {
            if level < self.doneness.burnt_floor {
                tally.burnt += 1;
            } else if level < band.min {
                tally.overcooked += 1;
            } else if level > band.max {
                tally.undercooked += 1;
            }
        }
    }
}

#[derive(Debug, Default)]
struct SideTally {
    undercooked: u32,
    overcooked: u32,
    burnt: u32,
}
