use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::solver::{error::SolveError, model::StateKind};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// How policy evaluation reads values written earlier in the same sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateScheme {
    /// Gauss-Seidel: later states in a sweep see values already updated in it.
    #[default]
    InPlace,
    /// Jacobi: every state in a sweep reads the values from the start of the sweep.
    Synchronous,
}

/// Hyperparameters shared by value iteration and policy iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Discount applied to successor values, in `(0, 1]`.
    pub gamma: f64,
    /// Largest value change that still counts as a fixed point.
    pub epsilon: f64,
    /// Cap on value-iteration sweeps or policy-iteration rounds.
    pub max_iterations: Option<usize>,
    /// Cap on sweeps inside one policy evaluation.
    pub max_evaluation_sweeps: Option<usize>,
    pub evaluation_update: UpdateScheme,
    /// Fixed value of dead-end states.
    pub deadend_value: f64,
    /// Allowed deviation of an action's probability mass from 1.0.
    pub probability_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            gamma: 0.9,
            epsilon: 1e-6,
            max_iterations: None,
            max_evaluation_sweeps: Some(100_000),
            evaluation_update: UpdateScheme::InPlace,
            deadend_value: 0.0,
            probability_tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        self.check().map_err(SolverConfigError::Invalid)
    }

    pub(crate) fn ensure_valid(&self) -> Result<(), SolveError> {
        self.check()
            .map_err(|reason| SolveError::InvalidConfig { reason })
    }

    /// Value pinned to a state for the whole solve, `None` for transient states.
    pub fn terminal_value(&self, kind: StateKind) -> Option<f64> {
        match kind {
            StateKind::Transient => None,
            StateKind::Goal => Some(0.0),
            StateKind::Deadend => Some(self.deadend_value),
        }
    }

    fn check(&self) -> Result<(), String> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 || self.gamma > 1.0 {
            return Err("gamma must be in (0, 1]".to_string());
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err("epsilon must be finite and > 0".to_string());
        }
        if self.max_iterations == Some(0) {
            return Err("max_iterations must be greater than 0".to_string());
        }
        if self.max_evaluation_sweeps == Some(0) {
            return Err("max_evaluation_sweeps must be greater than 0".to_string());
        }
        if !self.deadend_value.is_finite() {
            return Err("deadend_value must be finite".to_string());
        }
        if !self.probability_tolerance.is_finite() || self.probability_tolerance < 0.0 {
            return Err("probability_tolerance must be finite and >= 0".to_string());
        }
        Ok(())
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {}
