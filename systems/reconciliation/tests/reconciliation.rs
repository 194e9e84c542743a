use license_to_grill_core::{
    BunKind, Complaint, ComplaintCategory, ComplaintReason, Component, Construction, Patty,
    PattyKind, Ruleset, Sauce, SauceKind, VegKind,
};
use license_to_grill_system_order_generation::OrderFactory;
use license_to_grill_system_reconciliation::Reconciliation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn burger(components: &[Component]) -> Construction {
    components.iter().copied().collect()
}

fn reasons(complaints: &[Complaint]) -> Vec<ComplaintReason> {
    complaints.iter().map(Complaint::reason).collect()
}

/// Copies a requested burger the way a flawless cook would plate it.
fn perfect_copy(requested: &Construction, ruleset: &Ruleset) -> Construction {
    requested
        .iter()
        .map(|component| match component {
            Component::Patty(patty) => {
                let midpoint = ruleset.doneness.band(patty.kind).midpoint();
                Component::Patty(Patty::grilled(patty.kind, [midpoint, midpoint], 100.0))
            }
            other => *other,
        })
        .collect()
}

fn classic_request() -> Construction {
    burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Veg(VegKind::Lettuce),
        Component::Patty(Patty::requested(PattyKind::Beef)),
        Component::Sauce(Sauce::new(SauceKind::Ketchup, 1.0)),
        Component::Bun(BunKind::Sesame),
    ])
}

#[test]
fn perfect_copies_score_full_marks() {
    let ruleset = Ruleset::default();
    let system = Reconciliation::new(&ruleset);
    let factory = OrderFactory::new(ruleset.generation.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(0xc0ff_ee);

    for _ in 0..500 {
        let requested = factory.generate_order(&mut rng);
        let served = perfect_copy(&requested, &ruleset);
        let outcome = system.reconcile(&requested, &served);
        assert!(
            outcome.complaints.is_empty(),
            "unexpected complaints for {requested}: {:?}",
            outcome.complaints
        );
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.tip, 20);
    }
}

#[test]
fn missing_veg_is_not_also_extra() {
    let system = Reconciliation::default();
    let requested = classic_request();
    let served = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 100.0)),
        Component::Sauce(Sauce::new(SauceKind::Ketchup, 1.0)),
        Component::Bun(BunKind::Sesame),
    ]);

    let outcome = system.reconcile(&requested, &served);
    assert_eq!(
        outcome.complaints,
        vec![Complaint::new(ComplaintReason::MissingVeg(VegKind::Lettuce), 10)]
    );
    assert!(outcome
        .complaints
        .iter()
        .all(|complaint| complaint.category() != ComplaintCategory::Extra));
}

#[test]
fn wrong_bread_is_reported_once() {
    let system = Reconciliation::default();
    let requested = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::requested(PattyKind::Chicken)),
        Component::Bun(BunKind::Sesame),
    ]);
    let served = burger(&[
        Component::Bun(BunKind::Brioche),
        Component::Patty(Patty::grilled(PattyKind::Chicken, [0.5, 0.5], 100.0)),
        Component::Bun(BunKind::Brioche),
    ]);

    let outcome = system.reconcile(&requested, &served);
    assert_eq!(
        outcome.complaints,
        vec![Complaint::new(ComplaintReason::WrongBun, 10)]
    );
    assert_eq!(outcome.score, 90);
    assert_eq!(outcome.tip, 10);
}

#[test]
fn wrong_bottom_bun_alone_goes_unreported() {
    let system = Reconciliation::default();
    let requested = burger(&[
        Component::Bun(BunKind::Brown),
        Component::Patty(Patty::requested(PattyKind::Veggie)),
        Component::Bun(BunKind::Brown),
    ]);
    let served = burger(&[
        Component::Bun(BunKind::Brown),
        Component::Patty(Patty::grilled(PattyKind::Veggie, [0.6, 0.6], 100.0)),
        Component::Bun(BunKind::Sesame),
    ]);

    assert!(system.match_components(&requested, &served).is_empty());
}

#[test]
fn cold_patty_is_judged_without_the_request() {
    let system = Reconciliation::default();
    let served = burger(&[Component::Patty(Patty::grilled(
        PattyKind::Chicken,
        [0.5, 0.45],
        50.0,
    ))]);

    for requested in [Construction::new(), classic_request()] {
        let doneness = system.assess_doneness(&served);
        assert_eq!(doneness, vec![Complaint::new(ComplaintReason::Cold, 4)]);

        let outcome = system.reconcile(&requested, &served);
        let cold: Vec<_> = outcome
            .complaints
            .iter()
            .filter(|complaint| complaint.category() == ComplaintCategory::Temperature)
            .collect();
        assert_eq!(cold.len(), 1);
        assert!(outcome
            .complaints
            .iter()
            .all(|complaint| complaint.category() != ComplaintCategory::Doneness));
    }
}

#[test]
fn partially_built_burger_scores_eighty_five() {
    let system = Reconciliation::default();
    let served = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 90.0)),
        Component::Sauce(Sauce::new(SauceKind::Ketchup, 0.5)),
        Component::Bun(BunKind::Sesame),
    ]);

    let outcome = system.reconcile(&classic_request(), &served);
    assert_eq!(
        reasons(&outcome.complaints),
        vec![
            ComplaintReason::NotEnoughSauce,
            ComplaintReason::MissingVeg(VegKind::Lettuce),
        ]
    );
    assert_eq!(outcome.total_deduction(), 15);
    assert_eq!(outcome.score, 85);
    assert_eq!(outcome.tip, 10);
}

#[test]
fn greedy_matching_flags_later_duplicates_as_extra() {
    let system = Reconciliation::default();
    let requested = burger(&[
        Component::Bun(BunKind::Brioche),
        Component::Veg(VegKind::Tomato),
        Component::Patty(Patty::requested(PattyKind::Beef)),
        Component::Bun(BunKind::Brioche),
    ]);
    // The pickle is consumed first even though a tomato sits further along.
    let served = burger(&[
        Component::Bun(BunKind::Brioche),
        Component::Veg(VegKind::Pickle),
        Component::Veg(VegKind::Tomato),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 100.0)),
        Component::Bun(BunKind::Brioche),
    ]);

    assert_eq!(
        system.match_components(&requested, &served),
        vec![
            Complaint::new(ComplaintReason::WrongVeg, 10),
            Complaint::new(ComplaintReason::ExtraVeg(VegKind::Tomato), 5),
        ]
    );
}

#[test]
fn matching_ignores_plate_order() {
    let system = Reconciliation::default();
    let requested = classic_request();
    let upside_down = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Sauce(Sauce::new(SauceKind::Ketchup, 1.0)),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.25, 0.35], 100.0)),
        Component::Veg(VegKind::Lettuce),
        Component::Bun(BunKind::Sesame),
    ]);

    let outcome = system.reconcile(&requested, &upside_down);
    assert!(outcome.is_perfect(), "{:?}", outcome.complaints);
}

#[test]
fn empty_plate_reports_everything_missing() {
    let system = Reconciliation::default();
    let outcome = system.reconcile(&classic_request(), &Construction::new());
    assert_eq!(
        reasons(&outcome.complaints),
        vec![
            ComplaintReason::MissingBun,
            ComplaintReason::MissingVeg(VegKind::Lettuce),
            ComplaintReason::MissingPatty,
            ComplaintReason::MissingSauce(SauceKind::Ketchup),
            ComplaintReason::MissingBun,
        ]
    );
    assert_eq!(outcome.total_deduction(), 85);
    assert_eq!(outcome.score, 15);
    assert_eq!(outcome.tip, 0);
}

#[test]
fn surplus_components_are_extra() {
    let system = Reconciliation::default();
    let requested = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::requested(PattyKind::Beef)),
        Component::Bun(BunKind::Sesame),
    ]);
    let served = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 100.0)),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 100.0)),
        Component::Sauce(Sauce::new(SauceKind::Bbq, 1.0)),
        Component::Bun(BunKind::Sesame),
        Component::Bun(BunKind::Sesame),
    ]);

    assert_eq!(
        system.match_components(&requested, &served),
        vec![
            Complaint::new(ComplaintReason::ExtraPatty, 15),
            Complaint::new(ComplaintReason::ExtraSauce(SauceKind::Bbq), 5),
            Complaint::new(ComplaintReason::ExtraBun, 10),
        ]
    );
}

#[test]
fn wrong_patty_still_gets_doneness_assessment() {
    let system = Reconciliation::default();
    let requested = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::requested(PattyKind::Beef)),
        Component::Bun(BunKind::Sesame),
    ]);
    // Chicken judged against its own band: 0.3 is past 0.4 and overcooked on both sides.
    let served = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::grilled(PattyKind::Chicken, [0.3, 0.3], 100.0)),
        Component::Bun(BunKind::Sesame),
    ]);

    let outcome = system.reconcile(&requested, &served);
    assert_eq!(
        outcome.complaints,
        vec![
            Complaint::new(ComplaintReason::WrongPatty, 25),
            Complaint::new(ComplaintReason::Overcooked { sides: 2 }, 20),
        ]
    );
    assert_eq!(outcome.score, 55);
}

#[test]
fn doneness_tallies_span_every_patty() {
    let system = Reconciliation::default();
    let served = burger(&[
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.9, 0.3], 70.0)),
        Component::Patty(Patty::grilled(PattyKind::Veggie, [0.8, 0.0], 100.0)),
    ]);

    assert_eq!(
        system.assess_doneness(&served),
        vec![
            Complaint::new(ComplaintReason::Cold, 1),
            Complaint::new(ComplaintReason::Undercooked { sides: 2 }, 30),
            Complaint::new(ComplaintReason::Burnt { sides: 1 }, 15),
        ]
    );
}

#[test]
fn custom_deductions_flow_through() {
    let mut ruleset = Ruleset::default();
    ruleset.deductions.missing_veg = 40;
    ruleset.scoring.good_threshold = 50;
    let system = Reconciliation::new(&ruleset);

    let served = burger(&[
        Component::Bun(BunKind::Sesame),
        Component::Patty(Patty::grilled(PattyKind::Beef, [0.3, 0.3], 100.0)),
        Component::Sauce(Sauce::new(SauceKind::Ketchup, 1.0)),
        Component::Bun(BunKind::Sesame),
    ]);
    let outcome = system.reconcile(&classic_request(), &served);
    assert_eq!(outcome.score, 60);
    assert_eq!(outcome.tip, 10);
}
