use log::{debug, trace, warn};

use crate::solver::{
    config::SolverConfig,
    error::SolveError,
    evaluator::ActionValueEvaluator,
    ids::StateKey,
    model::{TransitionModel, check_model},
    solution::{PolicyEntry, SolveEvent, SolveStatus, Solution},
};

/// Bellman-optimality fixed-point iteration with synchronous sweeps.
#[derive(Debug)]
pub struct ValueIterationSolver<'m, M: ?Sized> {
    model: &'m M,
    config: SolverConfig,
}

impl<'m, M> ValueIterationSolver<'m, M>
where
    M: TransitionModel + ?Sized,
{
    /// Create a solver after checking `config` and the shape of `model`.
    pub fn new(model: &'m M, config: SolverConfig) -> Result<Self, SolveError> {
        config.ensure_valid()?;
        check_model(model, config.probability_tolerance)?;
        Ok(Self { model, config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Iterate until the largest value change drops below `epsilon`.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        self.solve_with_hook(|_| {})
    }

    /// Solve and invoke a callback after each sweep.
    pub fn solve_with_hook<FHook>(&self, mut on_event: FHook) -> Result<Solution, SolveError>
    where
        FHook: FnMut(&SolveEvent),
    {
        let state_count = self.model.state_count();
        let mut values = Vec::with_capacity(state_count);
        let mut policy = Vec::with_capacity(state_count);
        for index in 0..state_count {
            let kind = self.model.kind(StateKey::from(index));
            values.push(self.config.terminal_value(kind).unwrap_or(0.0));
            // Overwritten by the first sweep for transient states.
            policy.push(PolicyEntry::terminal(kind).unwrap_or(PolicyEntry::Goal));
        }
        let mut next = values.clone();

        let mut iterations = 0;
        let status = loop {
            let delta = self.sweep(&values, &mut next, &mut policy)?;
            std::mem::swap(&mut values, &mut next);
            iterations += 1;

            trace!("value iteration sweep {iterations}: delta {delta:e}");
            on_event(&SolveEvent::ValueSweep {
                iteration: iterations,
                delta,
            });

            if delta < self.config.epsilon {
                break SolveStatus::Converged;
            }
            if self.config.max_iterations == Some(iterations) {
                warn!(
                    "value iteration stopped at the {iterations}-sweep cap with delta {delta:e}"
                );
                break SolveStatus::IterationCapReached;
            }
        };

        debug!("value iteration finished after {iterations} sweeps: {status:?}");
        Ok(Solution {
            values,
            policy,
            iterations,
            evaluation_sweeps: 0,
            status,
        })
    }

    /// Apply the Bellman operator once, reading `values` and writing `next`.
    ///
    /// Returns the largest change over transient states.
    pub(crate) fn sweep(
        &self,
        values: &[f64],
        next: &mut [f64],
        policy: &mut [PolicyEntry],
    ) -> Result<f64, SolveError> {
        let evaluator = ActionValueEvaluator::new(self.model, self.config.gamma);
        let mut delta = 0.0_f64;

        for index in 0..self.model.state_count() {
            let state = StateKey::from(index);
            let kind = self.model.kind(state);
            if let (Some(value), Some(entry)) =
                (self.config.terminal_value(kind), PolicyEntry::terminal(kind))
            {
                next[index] = value;
                policy[index] = entry;
                continue;
            }

            let (action, value) = evaluator.best_action(state, values)?;
            if !value.is_finite() {
                return Err(SolveError::NonFiniteValue { state });
            }
            delta = delta.max((value - values[index]).abs());
            next[index] = value;
            policy[index] = PolicyEntry::Action(action);
        }

        Ok(delta)
    }
}
