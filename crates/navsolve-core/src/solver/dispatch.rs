use crate::solver::{
    config::SolverConfig,
    error::SolveError,
    model::TransitionModel,
    policy_iteration::PolicyIterationSolver,
    solution::{Algorithm, SolveEvent, Solution},
    value_iteration::ValueIterationSolver,
};

/// Run `algorithm` on `model` with its default starting point.
pub fn solve<M>(model: &M, algorithm: Algorithm, config: &SolverConfig) -> Result<Solution, SolveError>
where
    M: TransitionModel + ?Sized,
{
    solve_with_hook(model, algorithm, config, |_| {})
}

/// Run `algorithm` on `model`, forwarding progress events to `on_event`.
pub fn solve_with_hook<M, FHook>(
    model: &M,
    algorithm: Algorithm,
    config: &SolverConfig,
    on_event: FHook,
) -> Result<Solution, SolveError>
where
    M: TransitionModel + ?Sized,
    FHook: FnMut(&SolveEvent),
{
    match algorithm {
        Algorithm::ValueIteration => {
            ValueIterationSolver::new(model, config.clone())?.solve_with_hook(on_event)
        }
        Algorithm::PolicyIteration => {
            PolicyIterationSolver::new(model, config.clone())?.solve_with_hook(on_event)
        }
    }
}
