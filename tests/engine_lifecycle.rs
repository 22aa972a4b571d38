use reefsim_lib::config::EngineConfig;
use reefsim_lib::engine::EcosystemEngine;
use reefsim_lib::scoring;
use reefsim_lib::state::{
    EnvironmentParameters, InteractionKind, SimulationContext, Species, SpeciesKind,
};
use std::time::Duration;

fn context() -> SimulationContext {
    SimulationContext::new("it-tester", Duration::from_secs(300))
}

fn two_producers_one_consumer() -> Vec<Species> {
    vec![
        Species::new("kelp", "Giant Kelp", SpeciesKind::Producer, 40.0, 0.6),
        Species::new("algae", "Red Algae", SpeciesKind::Producer, 20.0, 0.8),
        Species::new("urchin", "Purple Urchin", SpeciesKind::Consumer, 25.0, 0.4),
    ]
}

#[test]
fn reference_scenario_metrics() {
    let env = EnvironmentParameters {
        temperature: 20.0,
        depth: 0.0,
        salinity: 35.0,
        light_level: 100.0,
    };
    let mut engine = EcosystemEngine::new(context(), EngineConfig::default());
    let state = engine
        .initialize(two_producers_one_consumer(), env)
        .unwrap()
        .clone();

    // Two producers and one consumer: 2*1/9 of the maximum diversity.
    let diversity = engine.metrics().species_diversity;
    assert!((diversity - 200.0 / 9.0).abs() < 1e-9);

    // Temperature and light are at their optima; depth contributes nothing
    // at the surface. Salinity alone drives stress: 35/50 / 4 * 100.
    assert!((engine.metrics().environmental_stress - 17.5).abs() < 1e-9);

    assert_eq!(state.interactions.len(), 6);
    let predation = state
        .interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Predation)
        .count();
    let competition = state
        .interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Competition)
        .count();
    let symbiosis = state
        .interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Symbiosis)
        .count();
    assert_eq!(predation, 2);
    assert_eq!(competition, 2);
    assert_eq!(symbiosis, 2);
}

#[test]
fn interaction_count_is_quadratic_for_all_valid_sizes() {
    for n in 3..=10 {
        let species: Vec<Species> = (0..n)
            .map(|i| {
                let kind = if i % 2 == 0 {
                    SpeciesKind::Producer
                } else {
                    SpeciesKind::Consumer
                };
                Species::new(format!("s{i}"), format!("s{i}"), kind, 20.0, 0.5)
            })
            .collect();
        let mut engine = EcosystemEngine::new(context(), EngineConfig::default());
        let state = engine
            .initialize(species, EnvironmentParameters::default())
            .unwrap();
        assert_eq!(state.interactions.len(), n * (n - 1));
    }
}

#[test]
fn producers_feel_depth_and_light_consumers_do_not() {
    // Surface with full light favors producers; deep darkness punishes them.
    let bright = EnvironmentParameters {
        temperature: 20.0,
        depth: 0.0,
        salinity: 35.0,
        light_level: 100.0,
    };
    let dark = EnvironmentParameters {
        temperature: 20.0,
        depth: 900.0,
        salinity: 35.0,
        light_level: 0.0,
    };

    let run = |env: EnvironmentParameters| {
        let mut engine = EcosystemEngine::new(context(), EngineConfig::default());
        engine
            .initialize(two_producers_one_consumer(), env)
            .unwrap();
        engine.step().unwrap();
        let state = engine.state().unwrap();
        let producer_energy = state
            .species
            .iter()
            .find(|s| s.id == "kelp")
            .unwrap()
            .energy_requirement;
        let consumer_energy = state
            .species
            .iter()
            .find(|s| s.id == "urchin")
            .unwrap()
            .energy_requirement;
        (producer_energy, consumer_energy)
    };

    let (producer_bright, consumer_bright) = run(bright);
    let (producer_dark, consumer_dark) = run(dark);

    assert!(producer_bright > producer_dark);
    // Consumers ignore depth and light, so their trajectory is unchanged.
    assert!((consumer_bright - consumer_dark).abs() < 1e-9);
}

#[test]
fn long_run_keeps_invariants() {
    let mut engine = EcosystemEngine::new(context(), EngineConfig::default());
    engine
        .initialize(two_producers_one_consumer(), EnvironmentParameters::default())
        .unwrap();
    for _ in 0..200 {
        engine.step().unwrap();
    }
    let state = engine.state().unwrap();
    assert!(state.species.iter().all(|s| s.energy_requirement >= 0.0));
    assert!((0.0..=100.0).contains(&state.stability_score));
    assert_eq!(engine.metrics().stability_history.len(), 201);
    assert_eq!(
        engine.result().unwrap().species_balance,
        scoring::species_balance(state)
    );
}
