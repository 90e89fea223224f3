use navsolve_core::SolveError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for graph loading, validation, compilation, reporting and simulation.
pub enum GraphError {
    #[error("failed to read or write graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("state '{state}' cannot be both goal and dead-end")]
    ConflictingTerminal { state: String },

    #[error("start state '{start}' does not exist")]
    UnknownStartState { start: String },

    #[error("edge {edge_index} of state '{state}' references unknown state '{target}'")]
    UnknownTarget {
        state: String,
        edge_index: usize,
        target: String,
    },

    #[error("edge {edge_index} of state '{state}' lists no action")]
    EmptyActionMap { state: String, edge_index: usize },

    #[error(
        "invalid probability for action '{action}' on edge {edge_index} of state '{state}': {value}"
    )]
    InvalidProbability {
        state: String,
        edge_index: usize,
        action: String,
        value: f64,
    },

    #[error("invalid cost on edge {edge_index} of state '{state}': {value}")]
    InvalidCost {
        state: String,
        edge_index: usize,
        value: f64,
    },

    #[error(
        "probability sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("state '{state}' is neither goal nor dead-end but has no action")]
    NoAvailableActions { state: String },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("unknown state id '{id}'")]
    UnknownState { id: String },

    #[error("solution refers to unknown action id {action}")]
    UnknownAction { action: usize },

    #[error("solution covers {found} states but the graph has {expected}")]
    SolutionShape { expected: usize, found: usize },

    #[error(transparent)]
    Solve(#[from] SolveError),
}
