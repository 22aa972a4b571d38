//! Thin orchestration over per-attempt engines.
//!
//! The service owns one engine per attempt and enforces the lifecycle rules
//! the engine itself stays agnostic about: an attempt cannot be completed
//! while its clock still runs and cannot be completed twice. Snapshots and
//! results flow to a pluggable store so a durable persistence collaborator
//! can replace the in-memory default.

use reefsim_core::config::EngineConfig;
use reefsim_core::engine::EcosystemEngine;
use reefsim_core::error::{Result, StateConflict};
use reefsim_core::Telemetry;
use reefsim_data::{
    EcosystemState, EnvironmentParameters, SimulationContext, SimulationResult, Species,
};
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

/// Persistence collaborator contract for attempt checkpoints and results.
pub trait AttemptStore: Send {
    fn save_snapshot(&mut self, id: Uuid, state: &EcosystemState) -> anyhow::Result<()>;
    fn save_result(&mut self, id: Uuid, result: &SimulationResult) -> anyhow::Result<()>;
    fn result(&self, id: Uuid) -> Option<&SimulationResult>;
}

/// Default in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    snapshots: HashMap<Uuid, EcosystemState>,
    results: HashMap<Uuid, SimulationResult>,
}

impl MemoryStore {
    pub fn snapshot(&self, id: Uuid) -> Option<&EcosystemState> {
        self.snapshots.get(&id)
    }
}

impl AttemptStore for MemoryStore {
    fn save_snapshot(&mut self, id: Uuid, state: &EcosystemState) -> anyhow::Result<()> {
        self.snapshots.insert(id, state.clone());
        Ok(())
    }

    fn save_result(&mut self, id: Uuid, result: &SimulationResult) -> anyhow::Result<()> {
        self.results.insert(id, result.clone());
        Ok(())
    }

    fn result(&self, id: Uuid) -> Option<&SimulationResult> {
        self.results.get(&id)
    }
}

struct AttemptSlot {
    engine: EcosystemEngine,
    completed: bool,
}

pub struct SimulationService<S: AttemptStore> {
    config: EngineConfig,
    attempts: HashMap<Uuid, AttemptSlot>,
    store: S,
    telemetry: Telemetry,
}

impl<S: AttemptStore> SimulationService<S> {
    pub fn new(config: EngineConfig, store: S) -> Self {
        Self {
            config,
            attempts: HashMap::new(),
            store,
            telemetry: Telemetry::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Starts a new attempt and returns its id.
    pub fn begin(
        &mut self,
        context: SimulationContext,
        species: Vec<Species>,
        environment: EnvironmentParameters,
    ) -> Result<Uuid> {
        let mut engine = EcosystemEngine::new(context, self.config.clone());
        let state = engine.initialize(species, environment)?.clone();
        let id = engine.simulation_id();
        if let Err(e) = self.store.save_snapshot(id, &state) {
            tracing::warn!(
                simulation_id = %id,
                error = %e,
                "Failed to checkpoint initial state"
            );
        }
        self.telemetry.record_attempt();
        tracing::info!(simulation_id = %id, "Attempt started");
        self.attempts.insert(
            id,
            AttemptSlot {
                engine,
                completed: false,
            },
        );
        Ok(id)
    }

    /// Advances one tick and checkpoints the new state. Returns the current
    /// composite score for polling callers.
    pub fn tick(&mut self, id: Uuid) -> Result<f64> {
        let slot = self
            .attempts
            .get_mut(&id)
            .ok_or(StateConflict::UnknownAttempt(id))?;
        if slot.completed {
            return Err(StateConflict::AlreadyCompleted(id).into());
        }

        let tick_start = Instant::now();
        slot.engine.step()?;
        let score = slot.engine.current_score()?;
        self.telemetry.record_tick(tick_start.elapsed(), score);

        if let Some(state) = slot.engine.state() {
            if let Err(e) = self.store.save_snapshot(id, state) {
                tracing::warn!(simulation_id = %id, error = %e, "Failed to checkpoint state");
            }
        }
        Ok(score)
    }

    /// Current state snapshot for checkpointing or display.
    pub fn snapshot(&self, id: Uuid) -> Result<EcosystemState> {
        let slot = self
            .attempts
            .get(&id)
            .ok_or(StateConflict::UnknownAttempt(id))?;
        slot.engine
            .state()
            .cloned()
            .ok_or_else(|| StateConflict::NotInitialized.into())
    }

    /// Completes an attempt once its clock has run out.
    pub fn complete(&mut self, id: Uuid) -> Result<SimulationResult> {
        let slot = self
            .attempts
            .get_mut(&id)
            .ok_or(StateConflict::UnknownAttempt(id))?;
        if slot.completed {
            return Err(StateConflict::AlreadyCompleted(id).into());
        }
        if !slot.engine.time_expired() {
            return Err(StateConflict::TimeRemaining(id).into());
        }

        let result = slot.engine.result()?;
        slot.completed = true;
        if let Err(e) = self.store.save_result(id, &result) {
            tracing::warn!(simulation_id = %id, error = %e, "Failed to persist result");
        }
        tracing::info!(
            simulation_id = %id,
            score = result.score,
            "Attempt completed"
        );
        Ok(result)
    }

    /// Read access to a live engine, e.g. for the evaluator.
    pub fn engine(&self, id: Uuid) -> Result<&EcosystemEngine> {
        self.attempts
            .get(&id)
            .map(|slot| &slot.engine)
            .ok_or_else(|| StateConflict::UnknownAttempt(id).into())
    }
}
