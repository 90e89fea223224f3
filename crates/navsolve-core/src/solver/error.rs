use std::fmt;

use crate::solver::ids::{ActionId, StateKey};

/// Error type for model checks and dynamic-programming solves.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Solver configuration violates a constraint.
    InvalidConfig { reason: String },
    /// A non-terminal state exposes no action, so its Bellman minimum is undefined.
    NoAvailableActions { state: StateKey },
    /// An action is listed for a state but has no outcome.
    EmptyAction { state: StateKey, action: ActionId },
    /// A transition points outside the model.
    UnknownTarget {
        state: StateKey,
        action: ActionId,
        target: StateKey,
    },
    /// A transition probability is negative, above one or not finite.
    InvalidProbability {
        state: StateKey,
        action: ActionId,
        value: f64,
    },
    /// Outcome probabilities of an action do not sum to one.
    ProbabilityMass {
        state: StateKey,
        action: ActionId,
        sum: f64,
    },
    /// A transition cost is not finite.
    InvalidCost {
        state: StateKey,
        action: ActionId,
        value: f64,
    },
    /// A policy entry of a transient state is not one of its available actions.
    InvalidPolicyEntry { state: StateKey },
    /// A value or policy table does not have one entry per state.
    TableSize { expected: usize, found: usize },
    /// A value estimate overflowed or became NaN.
    NonFiniteValue { state: StateKey },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidConfig { reason } => write!(f, "invalid solver config: {reason}"),
            SolveError::NoAvailableActions { state } => write!(
                f,
                "state {} is neither goal nor dead-end but has no available action",
                state.index()
            ),
            SolveError::EmptyAction { state, action } => write!(
                f,
                "action {} of state {} has no outcome",
                action.index(),
                state.index()
            ),
            SolveError::UnknownTarget {
                state,
                action,
                target,
            } => write!(
                f,
                "action {} of state {} leads to unknown state {}",
                action.index(),
                state.index(),
                target.index()
            ),
            SolveError::InvalidProbability {
                state,
                action,
                value,
            } => write!(
                f,
                "action {} of state {} has invalid probability {value}",
                action.index(),
                state.index()
            ),
            SolveError::ProbabilityMass { state, action, sum } => write!(
                f,
                "probabilities of action {} in state {} sum to {sum}, expected 1.0",
                action.index(),
                state.index()
            ),
            SolveError::InvalidCost {
                state,
                action,
                value,
            } => write!(
                f,
                "action {} of state {} has invalid cost {value}",
                action.index(),
                state.index()
            ),
            SolveError::InvalidPolicyEntry { state } => write!(
                f,
                "policy entry for state {} is not an available action",
                state.index()
            ),
            SolveError::TableSize { expected, found } => write!(
                f,
                "table has {found} entries but the model has {expected} states"
            ),
            SolveError::NonFiniteValue { state } => {
                write!(f, "value of state {} is no longer finite", state.index())
            }
        }
    }
}

impl std::error::Error for SolveError {}
