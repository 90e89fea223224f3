use serde::{Deserialize, Serialize};

use crate::solver::{
    ids::{ActionId, StateKey},
    model::StateKind,
};

/// Policy decision for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyEntry {
    Action(ActionId),
    Goal,
    Deadend,
}

impl PolicyEntry {
    /// Return the sentinel entry for a terminal state, `None` for transient states.
    pub fn terminal(kind: StateKind) -> Option<Self> {
        match kind {
            StateKind::Transient => None,
            StateKind::Goal => Some(PolicyEntry::Goal),
            StateKind::Deadend => Some(PolicyEntry::Deadend),
        }
    }

    /// Return the chosen action, if this entry is one.
    pub fn action(self) -> Option<ActionId> {
        match self {
            PolicyEntry::Action(action) => Some(action),
            PolicyEntry::Goal | PolicyEntry::Deadend => None,
        }
    }
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// A fixed point was reached within `epsilon`.
    Converged,
    /// `max_iterations` ran out before a fixed point was reached.
    IterationCapReached,
    /// The policy is stable but its last evaluation ran out of sweeps.
    EvaluationCapReached,
}

/// Which dynamic-programming algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    ValueIteration,
    PolicyIteration,
}

/// Value function, policy and bookkeeping returned by a solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub values: Vec<f64>,
    pub policy: Vec<PolicyEntry>,
    /// Value-iteration sweeps or policy-iteration rounds performed.
    ///
    /// Value iteration counts the final sweep that confirms convergence, so a
    /// problem solved exactly by the first sweep reports 2.
    pub iterations: usize,
    /// Policy-evaluation sweeps summed over all rounds, 0 for value iteration.
    pub evaluation_sweeps: usize,
    pub status: SolveStatus,
}

impl Solution {
    /// Return whether the solver reached a true fixed point.
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    pub fn value(&self, state: StateKey) -> Option<f64> {
        self.values.get(state.index()).copied()
    }

    pub fn policy_entry(&self, state: StateKey) -> Option<PolicyEntry> {
        self.policy.get(state.index()).copied()
    }

    /// Return the action chosen for a transient state.
    pub fn action(&self, state: StateKey) -> Option<ActionId> {
        self.policy_entry(state).and_then(PolicyEntry::action)
    }
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMetrics {
    pub sweeps: usize,
    pub delta: f64,
    /// The sweep cap stopped evaluation before `delta < epsilon`.
    pub capped: bool,
}

/// Outcome of one policy improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImprovementMetrics {
    pub changed: usize,
}

impl ImprovementMetrics {
    pub fn stable(&self) -> bool {
        self.changed == 0
    }
}

/// Progress notification passed to solver hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveEvent {
    /// One value-iteration sweep finished.
    ValueSweep { iteration: usize, delta: f64 },
    /// One policy-evaluation sweep finished inside round `iteration`.
    EvaluationSweep {
        iteration: usize,
        sweep: usize,
        delta: f64,
    },
    /// Policy improvement finished for round `iteration`.
    Improvement { iteration: usize, changed: usize },
}
