mod solver;

pub use solver::config::{SolverConfig, SolverConfigError, UpdateScheme};
pub use solver::dispatch::{solve, solve_with_hook};
pub use solver::error::SolveError;
pub use solver::evaluator::ActionValueEvaluator;
pub use solver::ids::{ActionId, StateKey};
pub use solver::model::{StateKind, Transition, TransitionModel, check_model};
pub use solver::policy_iteration::PolicyIterationSolver;
pub use solver::solution::{
    Algorithm, EvaluationMetrics, ImprovementMetrics, PolicyEntry, SolveEvent, SolveStatus,
    Solution,
};
pub use solver::value_iteration::ValueIterationSolver;
