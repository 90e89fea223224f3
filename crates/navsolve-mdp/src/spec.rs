use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{CompiledGraph, GraphError, compiled::PROB_TOLERANCE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Serializable state-graph schema used for YAML/JSON IO and validation.
pub struct GraphSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Optional state id that simulated episodes start from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// All state declarations, in enumeration order.
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A single state declaration.
pub struct StateSpec {
    /// Unique state id.
    pub id: String,
    /// Absorbing state with zero future cost.
    #[serde(default, skip_serializing_if = "is_false")]
    pub goal: bool,
    /// Absorbing state excluded from updates.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deadend: bool,
    /// Outgoing stochastic transitions. Ignored for goal and dead-end states.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One successor of a state and the actions that can lead there.
pub struct EdgeSpec {
    pub target: String,
    #[serde(default = "unit_cost")]
    pub cost: f64,
    /// Probability of reaching `target` for each action that can, in listed order.
    #[serde(with = "crate::action_map")]
    pub actions: Vec<(String, f64)>,
}

pub(crate) fn unit_cost() -> f64 {
    1.0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl StateSpec {
    pub fn is_terminal(&self) -> bool {
        self.goal || self.deadend
    }
}

impl GraphSpec {
    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate ids, edge targets, costs and per-action probability mass.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), GraphError> {
        // State ids must be unique.
        let mut ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !ids.insert(state.id.as_str()) {
                return Err(GraphError::DuplicateStateId {
                    id: state.id.clone(),
                });
            }
        }

        if let Some(start) = &self.start {
            if !ids.contains(start.as_str()) {
                return Err(GraphError::UnknownStartState {
                    start: start.clone(),
                });
            }
        }

        for state in &self.states {
            if state.goal && state.deadend {
                return Err(GraphError::ConflictingTerminal {
                    state: state.id.clone(),
                });
            }

            // Every edge must point at a declared state, terminal or not.
            for (edge_index, edge) in state.edges.iter().enumerate() {
                if !ids.contains(edge.target.as_str()) {
                    return Err(GraphError::UnknownTarget {
                        state: state.id.clone(),
                        edge_index,
                        target: edge.target.clone(),
                    });
                }
            }

            if state.is_terminal() {
                continue;
            }

            let mut mass: BTreeMap<&str, f64> = BTreeMap::new();
            for (edge_index, edge) in state.edges.iter().enumerate() {
                if edge.actions.is_empty() {
                    return Err(GraphError::EmptyActionMap {
                        state: state.id.clone(),
                        edge_index,
                    });
                }

                if !edge.cost.is_finite() || edge.cost < 0.0 {
                    return Err(GraphError::InvalidCost {
                        state: state.id.clone(),
                        edge_index,
                        value: edge.cost,
                    });
                }

                for (action, prob) in &edge.actions {
                    let prob = *prob;
                    if !prob.is_finite() || !(0.0..=1.0).contains(&prob) {
                        return Err(GraphError::InvalidProbability {
                            state: state.id.clone(),
                            edge_index,
                            action: action.clone(),
                            value: prob,
                        });
                    }
                    *mass.entry(action.as_str()).or_insert(0.0) += prob;
                }
            }

            if mass.is_empty() {
                return Err(GraphError::NoAvailableActions {
                    state: state.id.clone(),
                });
            }

            // Each action's outcomes across all edges must sum to 1 within tolerance.
            for (action, sum) in mass {
                if (sum - 1.0).abs() > tolerance {
                    return Err(GraphError::ProbabilitySum {
                        state: state.id.clone(),
                        action: action.to_string(),
                        sum,
                        tolerance,
                    });
                }
            }
        }

        Ok(())
    }

    /// Compile this spec into the solver representation.
    pub fn compile(&self) -> Result<CompiledGraph, GraphError> {
        CompiledGraph::from_spec(self)
    }
}
