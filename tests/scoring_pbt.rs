use proptest::prelude::*;
use reefsim_lib::config::{EngineConfig, ScoringWeights};
use reefsim_lib::engine::EcosystemEngine;
use reefsim_lib::scoring;
use reefsim_lib::state::{
    EnvironmentParameters, InteractionKind, SimulationContext, Species, SpeciesInteraction,
    SpeciesKind,
};
use std::time::Duration;

fn arb_roster(min: usize, max: usize) -> impl Strategy<Value = Vec<Species>> {
    prop::collection::vec(
        (any::<bool>(), 0.0f64..500.0, 0.0f64..=1.0),
        min..=max,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (is_producer, energy, reproduction))| {
                let kind = if is_producer {
                    SpeciesKind::Producer
                } else {
                    SpeciesKind::Consumer
                };
                Species::new(
                    format!("s{idx}"),
                    format!("Species {idx}"),
                    kind,
                    energy,
                    reproduction,
                )
            })
            .collect()
    })
}

prop_compose! {
    fn arb_interaction()(
        kind in prop_oneof![
            Just(InteractionKind::Predation),
            Just(InteractionKind::Competition),
            Just(InteractionKind::Symbiosis),
        ],
        strength in 0.0f64..=1.0,
    ) -> SpeciesInteraction {
        SpeciesInteraction {
            source: "a".into(),
            target: "b".into(),
            kind,
            strength,
        }
    }
}

fn arb_environment() -> impl Strategy<Value = EnvironmentParameters> {
    (
        -10.0f64..=40.0,
        0.0f64..=1000.0,
        0.0f64..=50.0,
        0.0f64..=100.0,
    )
        .prop_map(|(temperature, depth, salinity, light_level)| EnvironmentParameters {
            temperature,
            depth,
            salinity,
            light_level,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn stability_score_always_clamped(
        diversity in -1e6f64..1e6,
        trophic in -1e6f64..1e6,
        stress in -1e6f64..1e6,
        balance in -1e6f64..1e6,
    ) {
        let score = scoring::stability_score(
            diversity, trophic, stress, balance, &ScoringWeights::default(),
        );
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn diversity_zero_when_a_role_is_absent(roster in arb_roster(3, 10)) {
        let producers = roster.iter().filter(|s| s.is_producer()).count();
        let diversity = scoring::species_diversity(&roster);
        if producers == 0 || producers == roster.len() {
            prop_assert_eq!(diversity, 0.0);
        } else {
            prop_assert!(diversity > 0.0);
        }
        prop_assert!(diversity <= 100.0);
    }

    #[test]
    fn interaction_balance_stays_in_range(
        interactions in prop::collection::vec(arb_interaction(), 0..50)
    ) {
        let balance = scoring::interaction_balance(&interactions);
        prop_assert!((0.0..=100.0).contains(&balance));
    }

    #[test]
    fn environmental_stress_is_normalized(env in arb_environment()) {
        let stress = scoring::environmental_stress(&env);
        prop_assert!((0.0..=100.0).contains(&stress));
    }

    #[test]
    fn energy_never_goes_negative(
        roster in arb_roster(3, 10),
        env in arb_environment(),
        steps in 1usize..60,
    ) {
        let context = SimulationContext::new("pbt", Duration::from_secs(600));
        let mut engine = EcosystemEngine::new(context, EngineConfig::default());
        engine.initialize(roster, env).unwrap();
        for _ in 0..steps {
            engine.step().unwrap();
        }
        let state = engine.state().unwrap();
        prop_assert!(state.species.iter().all(|s| s.energy_requirement >= 0.0));
        prop_assert!((0.0..=100.0).contains(&state.stability_score));
    }

    #[test]
    fn species_balance_matches_result_record(
        roster in arb_roster(3, 10),
        steps in 0usize..20,
    ) {
        let context = SimulationContext::new("pbt", Duration::from_secs(600));
        let mut engine = EcosystemEngine::new(context, EngineConfig::default());
        engine.initialize(roster, EnvironmentParameters::default()).unwrap();
        for _ in 0..steps {
            engine.step().unwrap();
        }
        let result = engine.result().unwrap();
        let recomputed = scoring::species_balance(engine.state().unwrap());
        prop_assert_eq!(result.species_balance, recomputed);
        prop_assert!((0.0..=100.0).contains(&result.species_balance));
    }
}
