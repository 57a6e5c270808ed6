//! Predator–prey population dynamics — discrete-time Lotka–Volterra.
//!
//! Each tick applies one Euler step (Δt = 1):
//!
//! ```text
//! dPrey = α·prey − β·prey·predator
//! dPred = δ·prey·predator − γ·predator
//! prey'     = clamp(prey + dPrey, 0, ceiling)
//! predator' = max(predator + dPred, 0)
//! ```
//!
//! There is no stability guard beyond the two clamps; extreme coefficients
//! can still oscillate wildly. The simulator keeps only the most recent
//! `history_window` samples for the chart.
//!
//! Ticking is driven from outside (see `eduscope_core::timer`); this module
//! only knows how to advance one step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::population::*;

/// Model coefficients and display limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopulationParams {
    /// α
    pub prey_growth: f64,
    /// β
    pub predation_rate: f64,
    /// δ
    pub predator_growth: f64,
    /// γ
    pub predator_death: f64,
    pub prey_ceiling: f64,
    pub history_window: usize,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            prey_growth: PREY_GROWTH,
            predation_rate: PREDATION_RATE,
            predator_growth: PREDATOR_GROWTH,
            predator_death: PREDATOR_DEATH,
            prey_ceiling: PREY_CEILING,
            history_window: HISTORY_WINDOW,
        }
    }
}

/// One point on the population chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub tick: u64,
    pub prey: f64,
    pub predator: f64,
}

impl PopulationSample {
    /// The sample every run starts from.
    pub fn seed() -> Self {
        Self {
            tick: 0,
            prey: SEED_PREY,
            predator: SEED_PREDATOR,
        }
    }
}

/// Advance a sample by one tick.
pub fn step(sample: &PopulationSample, params: &PopulationParams) -> PopulationSample {
    let prey = sample.prey;
    let predator = sample.predator;

    let d_prey = params.prey_growth * prey - params.predation_rate * prey * predator;
    let d_predator = params.predator_growth * prey * predator - params.predator_death * predator;

    PopulationSample {
        tick: sample.tick + 1,
        prey: (prey + d_prey).clamp(0.0, params.prey_ceiling),
        predator: (predator + d_predator).max(0.0),
    }
}

/// Sliding window of samples, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationHistory {
    samples: VecDeque<PopulationSample>,
    capacity: usize,
}

impl PopulationHistory {
    /// A history holding only the seed sample.
    pub fn seeded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut samples = VecDeque::with_capacity(capacity + 1);
        samples.push_back(PopulationSample::seed());
        Self { samples, capacity }
    }

    /// Append a sample, evicting the oldest when over capacity.
    pub fn push(&mut self, sample: PopulationSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn latest(&self) -> PopulationSample {
        // never empty: seeded on construction and push only evicts down to capacity >= 1
        self.samples
            .back()
            .copied()
            .unwrap_or_else(PopulationSample::seed)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopulationSample> {
        self.samples.iter()
    }

    /// Highest (prey, predator) counts currently in the window.
    pub fn peak(&self) -> (f64, f64) {
        self.samples.iter().fold((0.0_f64, 0.0_f64), |(p, q), s| {
            (p.max(s.prey), q.max(s.predator))
        })
    }
}

/// Run state of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Stopped,
    Running,
}

/// Predator–prey widget state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSimulator {
    params: PopulationParams,
    history: PopulationHistory,
    state: RunState,
}

impl Default for PopulationSimulator {
    fn default() -> Self {
        Self::new(PopulationParams::default())
    }
}

impl PopulationSimulator {
    pub fn new(params: PopulationParams) -> Self {
        Self {
            history: PopulationHistory::seeded(params.history_window),
            params,
            state: RunState::Stopped,
        }
    }

    pub fn params(&self) -> &PopulationParams {
        &self.params
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn history(&self) -> &PopulationHistory {
        &self.history
    }

    pub fn latest(&self) -> PopulationSample {
        self.history.latest()
    }

    /// Stopped → Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Running → Stopped, keeping history. Returns false if already stopped.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Stopped;
        true
    }

    /// Stop and go back to the seed sample.
    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.history = PopulationHistory::seeded(self.params.history_window);
    }

    /// Advance one tick if running. Returns the new sample.
    pub fn tick(&mut self) -> Option<PopulationSample> {
        if !self.is_running() {
            return None;
        }
        let next = step(&self.history.latest(), &self.params);
        self.history.push(next);
        Some(next)
    }
}
