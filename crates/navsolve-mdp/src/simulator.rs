use navsolve_core::{ActionId, PolicyEntry, SolveError, StateKey, StateKind};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{CompiledGraph, GraphError};

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    Goal,
    Deadend,
    StepLimit,
}

/// Undiscounted cost and length of one simulated episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub total_cost: f64,
    pub steps: usize,
    pub end: EpisodeEnd,
}

#[derive(Debug, Clone)]
/// Seeded simulator that follows a policy over a compiled graph.
pub struct PolicySimulator {
    graph: CompiledGraph,
    rng: ChaCha8Rng,
}

impl PolicySimulator {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(graph: CompiledGraph, seed: u64) -> Self {
        Self {
            graph,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying compiled graph.
    pub fn graph(&self) -> &CompiledGraph {
        &self.graph
    }

    /// Sample one `(next_state, cost)` transition.
    /// Returns `None` if the action is not available in `state`.
    pub fn step(&mut self, state: StateKey, action: ActionId) -> Option<(StateKey, f64)> {
        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        self.graph.sample_transition(state, action, sample)
    }

    /// Follow `policy` from `start` until a terminal state or `max_steps` transitions.
    pub fn run_episode(
        &mut self,
        start: StateKey,
        policy: &[PolicyEntry],
        max_steps: usize,
    ) -> Result<Episode, GraphError> {
        let expected = self.graph.state_count();
        if policy.len() != expected {
            return Err(GraphError::SolutionShape {
                expected,
                found: policy.len(),
            });
        }

        let mut state = start;
        let mut total_cost = 0.0;
        let mut steps = 0;

        loop {
            let kind = self.kind(state)?;
            match kind {
                StateKind::Goal => return Ok(Episode::finished(total_cost, steps, EpisodeEnd::Goal)),
                StateKind::Deadend => {
                    return Ok(Episode::finished(total_cost, steps, EpisodeEnd::Deadend));
                }
                StateKind::Transient => {}
            }
            if steps == max_steps {
                return Ok(Episode::finished(total_cost, steps, EpisodeEnd::StepLimit));
            }

            let action = policy[state.index()]
                .action()
                .ok_or(SolveError::InvalidPolicyEntry { state })?;
            let (next, cost) = self.step(state, action).ok_or(GraphError::UnknownAction {
                action: action.index(),
            })?;

            total_cost += cost;
            steps += 1;
            state = next;
        }
    }

    /// Mean undiscounted cost of `episodes` runs of `policy` from `start`.
    pub fn estimate_cost(
        &mut self,
        start: StateKey,
        policy: &[PolicyEntry],
        episodes: usize,
        max_steps: usize,
    ) -> Result<f64, GraphError> {
        if episodes == 0 {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for _ in 0..episodes {
            total += self.run_episode(start, policy, max_steps)?.total_cost;
        }
        Ok(total / episodes as f64)
    }

    fn kind(&self, state: StateKey) -> Result<StateKind, GraphError> {
        self.graph
            .kind_of(state)
            .ok_or_else(|| GraphError::UnknownState {
                id: state.index().to_string(),
            })
    }
}

impl Episode {
    fn finished(total_cost: f64, steps: usize, end: EpisodeEnd) -> Self {
        Self {
            total_cost,
            steps,
            end,
        }
    }
}
