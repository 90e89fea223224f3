use navsolve_core::{Solution, SolveStatus, StateKey};
use serde::{Deserialize, Serialize};

use crate::{CompiledGraph, GraphError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Solver output keyed by the graph's own state ids and action labels.
pub struct PolicyReport {
    pub iterations: usize,
    pub evaluation_sweeps: usize,
    pub status: SolveStatus,
    pub states: Vec<StateReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Value and policy decision of one state.
pub struct StateReport {
    pub id: String,
    pub value: f64,
    /// Action label, or `goal` / `deadend` for terminal states.
    pub policy: String,
}

impl PolicyReport {
    pub(crate) fn from_solution(
        graph: &CompiledGraph,
        solution: &Solution,
    ) -> Result<Self, GraphError> {
        let expected = graph.state_count();
        for found in [solution.values.len(), solution.policy.len()] {
            if found != expected {
                return Err(GraphError::SolutionShape { expected, found });
            }
        }

        let mut states = Vec::with_capacity(expected);
        for (index, (&value, &entry)) in solution.values.iter().zip(&solution.policy).enumerate() {
            let key = StateKey::from(index);
            let id = graph
                .state_id(key)
                .ok_or(GraphError::SolutionShape {
                    expected,
                    found: index + 1,
                })?
                .to_string();
            states.push(StateReport {
                id,
                value,
                policy: graph.policy_label(entry)?.to_string(),
            });
        }

        Ok(Self {
            iterations: solution.iterations,
            evaluation_sweeps: solution.evaluation_sweeps,
            status: solution.status,
            states,
        })
    }

    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    /// Look up the value of a state by id.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.state(id).map(|state| state.value)
    }

    /// Look up the policy label of a state by id.
    pub fn policy(&self, id: &str) -> Option<&str> {
        self.state(id).map(|state| state.policy.as_str())
    }

    fn state(&self, id: &str) -> Option<&StateReport> {
        self.states.iter().find(|state| state.id == id)
    }
}
