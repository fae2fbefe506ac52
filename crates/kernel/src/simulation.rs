use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::generation::tick_with;
use crate::rule::Rule;
use crate::world::World;

/// Driver configuration: how long to run and how far back to look for cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Upper bound on generations advanced by [`Simulation::run`].
    pub max_generations: u64,
    /// Number of past generations kept for oscillation detection.
    pub history_limit: usize,
    /// Stop `run` as soon as an oscillation is detected.
    pub stop_on_cycle: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_generations: 100,
            history_limit: 64,
            stop_on_cycle: true,
        }
    }
}

/// Classification of the generation just produced by [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Still changing, no repeat seen within the history window.
    Running,
    /// No live cells remain.
    Extinct,
    /// Identical to the previous generation.
    Stable,
    /// Identical to the generation `period` steps back.
    Oscillating { period: u64 },
}

impl Outcome {
    /// Whether `run` should stop on this outcome.
    pub fn is_terminal(self, stop_on_cycle: bool) -> bool {
        match self {
            Outcome::Running => false,
            Outcome::Extinct | Outcome::Stable => true,
            Outcome::Oscillating { .. } => stop_on_cycle,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Running => write!(f, "running"),
            Outcome::Extinct => write!(f, "extinct"),
            Outcome::Stable => write!(f, "stable"),
            Outcome::Oscillating { period } => write!(f, "oscillating (period {period})"),
        }
    }
}

/// Summary returned by [`Simulation::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub generation: u64,
    pub population: usize,
    pub outcome: Outcome,
}

/// Repeatedly applies a rule to a world, tracking generations and cycles.
///
/// Recent generations are kept with their state hash. The hash picks out
/// candidates and a cell-by-cell comparison confirms them, so `Stable` and
/// `Oscillating` are exact.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    rule: Rule,
    generation: u64,
    config: SimulationConfig,
    /// Recent generations, oldest first.
    history: VecDeque<Snapshot>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    generation: u64,
    hash: u64,
    world: World,
}

impl Simulation {
    /// Start from `world` at generation 0 under Conway's rule.
    pub fn new(world: World) -> Self {
        Self::with_rule(world, Rule::conway(), SimulationConfig::default())
    }

    pub fn with_rule(world: World, rule: Rule, config: SimulationConfig) -> Self {
        let mut history = VecDeque::with_capacity(config.history_limit.max(1));
        history.push_back(Snapshot {
            generation: 0,
            hash: world.state_hash(),
            world: world.clone(),
        });
        Self {
            world,
            rule,
            generation: 0,
            config,
            history,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advance one generation and classify the result.
    pub fn step(&mut self) -> Outcome {
        let next = tick_with(&self.world, &self.rule);
        self.generation += 1;
        let hash = next.state_hash();

        let outcome = if next.is_empty() {
            Outcome::Extinct
        } else if next == self.world {
            Outcome::Stable
        } else if let Some(seen) = self
            .history
            .iter()
            .rev()
            .find(|s| s.hash == hash && s.world == next)
        {
            Outcome::Oscillating {
                period: self.generation - seen.generation,
            }
        } else {
            Outcome::Running
        };

        while self.history.len() >= self.config.history_limit.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(Snapshot {
            generation: self.generation,
            hash,
            world: next.clone(),
        });
        self.world = next;

        tracing::debug!(
            generation = self.generation,
            population = self.world.population(),
            %outcome,
            "step"
        );
        outcome
    }

    /// Step until a terminal outcome or the configured generation limit.
    pub fn run(&mut self) -> RunReport {
        self.run_observed(|_, _| {})
    }

    /// Like [`Simulation::run`], calling `observer` after every step.
    pub fn run_observed<F>(&mut self, mut observer: F) -> RunReport
    where
        F: FnMut(&Simulation, Outcome),
    {
        let _span = tracing::info_span!("run", rule = %self.rule).entered();
        let mut outcome = Outcome::Running;
        while self.generation < self.config.max_generations {
            outcome = self.step();
            observer(self, outcome);
            if outcome.is_terminal(self.config.stop_on_cycle) {
                break;
            }
        }
        let report = RunReport {
            generation: self.generation,
            population: self.world.population(),
            outcome,
        };
        tracing::info!(
            generation = report.generation,
            population = report.population,
            outcome = %report.outcome,
            "run finished"
        );
        report
    }
}
