use std::collections::HashMap;

use log::debug;
use navsolve_core::{
    ActionId, Algorithm, PolicyEntry, Solution, SolverConfig, StateKey, StateKind, Transition,
    TransitionModel,
};

use crate::{GraphError, GraphSpec, interner::ActionInterner, report::PolicyReport};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
/// Solver-ready form of a graph: dense keys, interned actions, per-state action sets.
pub struct CompiledGraph {
    start: Option<StateKey>,
    states: Vec<StateRec>,
    state_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateKey>,
    actions: ActionInterner,
}

#[derive(Debug, Clone)]
struct StateRec {
    kind: StateKind,
    actions: Vec<ActionId>,
    outcomes: Vec<ActionRec>,
}

#[derive(Debug, Clone, Default)]
struct ActionRec {
    transitions: Vec<Transition>,
    cdf: Vec<f64>,
}

impl CompiledGraph {
    /// Validate a spec and regroup its edges by action.
    pub(crate) fn from_spec(spec: &GraphSpec) -> Result<Self, GraphError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let mut state_id_to_key = HashMap::with_capacity(spec.states.len());
        let mut state_ids = Vec::with_capacity(spec.states.len());

        for (idx, state) in spec.states.iter().enumerate() {
            let key = StateKey::from(idx);
            state_id_to_key.insert(state.id.clone(), key);
            state_ids.push(state.id.clone());
        }

        let start = match &spec.start {
            Some(id) => Some(state_id_to_key.get(id).copied().ok_or_else(|| {
                GraphError::UnknownStartState { start: id.clone() }
            })?),
            None => None,
        };

        let mut actions = ActionInterner::new();
        let mut states = Vec::with_capacity(spec.states.len());
        for state in &spec.states {
            let kind = if state.goal {
                StateKind::Goal
            } else if state.deadend {
                StateKind::Deadend
            } else {
                StateKind::Transient
            };

            let mut rec = StateRec {
                kind,
                actions: Vec::new(),
                outcomes: Vec::new(),
            };

            if !kind.is_terminal() {
                for (edge_index, edge) in state.edges.iter().enumerate() {
                    let target = state_id_to_key.get(&edge.target).copied().ok_or_else(|| {
                        GraphError::UnknownTarget {
                            state: state.id.clone(),
                            edge_index,
                            target: edge.target.clone(),
                        }
                    })?;

                    for (label, probability) in &edge.actions {
                        let probability = *probability;
                        if probability == 0.0 {
                            continue;
                        }
                        let action = actions.intern(label);
                        let pos = match rec.actions.iter().position(|a| *a == action) {
                            Some(pos) => pos,
                            None => {
                                rec.actions.push(action);
                                rec.outcomes.push(ActionRec::default());
                                rec.actions.len() - 1
                            }
                        };
                        rec.outcomes[pos].push(Transition {
                            target,
                            probability,
                            cost: edge.cost,
                        });
                    }
                }
            }

            states.push(rec);
        }

        debug!(
            "compiled graph with {} states and {} distinct actions",
            states.len(),
            actions.len()
        );

        Ok(Self {
            start,
            states,
            state_ids,
            state_id_to_key,
            actions,
        })
    }

    /// Return the start state key, if the spec declared one.
    pub fn start(&self) -> Option<StateKey> {
        self.start
    }

    /// Return the number of compiled states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Return the role of a state.
    pub fn kind_of(&self, key: StateKey) -> Option<StateKind> {
        self.states.get(key.index()).map(|state| state.kind)
    }

    /// Convert a state key back to its original string id.
    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    /// Convert a string id into a compiled state key.
    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.state_id_to_key.get(id).copied()
    }

    pub fn action_label(&self, action: ActionId) -> Option<&str> {
        self.actions.label(action)
    }

    pub fn action_id(&self, label: &str) -> Option<ActionId> {
        self.actions.id_of(label)
    }

    /// Return the number of distinct action labels in the graph.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Run a solver on this graph and label the result with state ids and action labels.
    pub fn solve(
        &self,
        algorithm: Algorithm,
        config: &SolverConfig,
    ) -> Result<PolicyReport, GraphError> {
        let solution = navsolve_core::solve(self, algorithm, config)?;
        self.report(&solution)
    }

    /// Translate a solution over this graph into a labeled report.
    pub fn report(&self, solution: &Solution) -> Result<PolicyReport, GraphError> {
        PolicyReport::from_solution(self, solution)
    }

    /// Label for a policy entry: the action label or the `goal` / `deadend` sentinel.
    pub fn policy_label(&self, entry: PolicyEntry) -> Result<&str, GraphError> {
        match entry {
            PolicyEntry::Action(action) => self.action_label(action).ok_or(
                GraphError::UnknownAction {
                    action: action.index(),
                },
            ),
            PolicyEntry::Goal => Ok("goal"),
            PolicyEntry::Deadend => Ok("deadend"),
        }
    }

    /// Sample one transition for `(state, action)` using a uniform sample in `[0, 1)`.
    pub(crate) fn sample_transition(
        &self,
        state: StateKey,
        action: ActionId,
        sample: f64,
    ) -> Option<(StateKey, f64)> {
        let rec = self.states.get(state.index())?;
        let pos = rec.actions.iter().position(|a| *a == action)?;
        let outcomes = &rec.outcomes[pos];
        if outcomes.transitions.is_empty() {
            return None;
        }

        let mut chosen_idx = outcomes.cdf.partition_point(|p| *p < sample);
        if chosen_idx >= outcomes.transitions.len() {
            chosen_idx = outcomes.transitions.len() - 1;
        }

        let transition = &outcomes.transitions[chosen_idx];
        Some((transition.target, transition.cost))
    }
}

impl ActionRec {
    fn push(&mut self, transition: Transition) {
        let cumulative = self.cdf.last().copied().unwrap_or(0.0) + transition.probability;
        self.cdf.push(cumulative);
        self.transitions.push(transition);
    }
}

impl TransitionModel for CompiledGraph {
    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn kind(&self, state: StateKey) -> StateKind {
        self.kind_of(state).unwrap_or_default()
    }

    fn actions(&self, state: StateKey) -> &[ActionId] {
        self.states
            .get(state.index())
            .map(|rec| rec.actions.as_slice())
            .unwrap_or(&[])
    }

    fn transitions(&self, state: StateKey, action: ActionId) -> &[Transition] {
        let Some(rec) = self.states.get(state.index()) else {
            return &[];
        };
        rec.actions
            .iter()
            .position(|a| *a == action)
            .map(|pos| rec.outcomes[pos].transitions.as_slice())
            .unwrap_or(&[])
    }
}
