use serde::{Deserialize, Serialize};

use crate::solver::{
    error::SolveError,
    ids::{ActionId, StateKey},
};

/// Role of a state in a stochastic shortest-path problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    /// Regular state updated by the solvers.
    #[default]
    Transient,
    /// Absorbing state with zero future cost.
    Goal,
    /// Absorbing state that cannot reach a goal.
    Deadend,
}

impl StateKind {
    /// Return whether this state is absorbing.
    pub fn is_terminal(self) -> bool {
        !matches!(self, StateKind::Transient)
    }
}

/// One stochastic outcome of taking an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub target: StateKey,
    pub probability: f64,
    pub cost: f64,
}

/// Read-only view of a finite MDP consumed by the solvers.
///
/// States are addressed by dense keys in `[0, state_count)`. The order of
/// `actions(state)` is the tie-break order: among equally good actions the
/// solvers pick the one listed first.
pub trait TransitionModel {
    /// Return the number of states.
    fn state_count(&self) -> usize;

    /// Return the role of a state.
    fn kind(&self, state: StateKey) -> StateKind;

    /// Return the actions available from a state.
    fn actions(&self, state: StateKey) -> &[ActionId];

    /// Return the outcomes of `action` in `state`, empty if the action is not available there.
    fn transitions(&self, state: StateKey, action: ActionId) -> &[Transition];
}

/// Check that every transient state has actions with well-formed outcome distributions.
pub fn check_model<M>(model: &M, tolerance: f64) -> Result<(), SolveError>
where
    M: TransitionModel + ?Sized,
{
    let state_count = model.state_count();

    for index in 0..state_count {
        let state = StateKey::from(index);
        if model.kind(state).is_terminal() {
            continue;
        }

        let actions = model.actions(state);
        if actions.is_empty() {
            return Err(SolveError::NoAvailableActions { state });
        }

        for &action in actions {
            let transitions = model.transitions(state, action);
            if transitions.is_empty() {
                return Err(SolveError::EmptyAction { state, action });
            }

            let mut sum = 0.0_f64;
            for transition in transitions {
                if transition.target.index() >= state_count {
                    return Err(SolveError::UnknownTarget {
                        state,
                        action,
                        target: transition.target,
                    });
                }
                let p = transition.probability;
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(SolveError::InvalidProbability {
                        state,
                        action,
                        value: p,
                    });
                }
                if !transition.cost.is_finite() {
                    return Err(SolveError::InvalidCost {
                        state,
                        action,
                        value: transition.cost,
                    });
                }
                sum += p;
            }

            if (sum - 1.0).abs() > tolerance {
                return Err(SolveError::ProbabilityMass { state, action, sum });
            }
        }
    }

    Ok(())
}
