use log::{debug, trace, warn};

use crate::solver::{
    config::{SolverConfig, UpdateScheme},
    error::SolveError,
    evaluator::ActionValueEvaluator,
    ids::StateKey,
    model::{TransitionModel, check_model},
    solution::{
        EvaluationMetrics, ImprovementMetrics, PolicyEntry, SolveEvent, SolveStatus, Solution,
    },
};

/// Alternates policy evaluation and greedy policy improvement until no state changes action.
#[derive(Debug)]
pub struct PolicyIterationSolver<'m, M: ?Sized> {
    model: &'m M,
    config: SolverConfig,
}

impl<'m, M> PolicyIterationSolver<'m, M>
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

    /// Starting policy: the first available action of every transient state.
    pub fn initial_policy(&self) -> Result<Vec<PolicyEntry>, SolveError> {
        (0..self.model.state_count())
            .map(|index| {
                let state = StateKey::from(index);
                let kind = self.model.kind(state);
                match PolicyEntry::terminal(kind) {
                    Some(entry) => Ok(entry),
                    None => self
                        .model
                        .actions(state)
                        .first()
                        .map(|&action| PolicyEntry::Action(action))
                        .ok_or(SolveError::NoAvailableActions { state }),
                }
            })
            .collect()
    }

    /// Starting values: 0 for transient states, the pinned value for terminals.
    pub fn initial_values(&self) -> Vec<f64> {
        (0..self.model.state_count())
            .map(|index| {
                let kind = self.model.kind(StateKey::from(index));
                self.config.terminal_value(kind).unwrap_or(0.0)
            })
            .collect()
    }

    /// Run policy iteration from [`initial_policy`](Self::initial_policy).
    pub fn solve(&self) -> Result<Solution, SolveError> {
        self.solve_with_hook(|_| {})
    }

    /// Run policy iteration and invoke a callback after every sweep and improvement.
    pub fn solve_with_hook<FHook>(&self, on_event: FHook) -> Result<Solution, SolveError>
    where
        FHook: FnMut(&SolveEvent),
    {
        let policy = self.initial_policy()?;
        self.solve_from_with_hook(policy, on_event)
    }

    /// Run policy iteration from a caller-chosen policy.
    pub fn solve_from(&self, policy: Vec<PolicyEntry>) -> Result<Solution, SolveError> {
        self.solve_from_with_hook(policy, |_| {})
    }

    pub fn solve_from_with_hook<FHook>(
        &self,
        mut policy: Vec<PolicyEntry>,
        mut on_event: FHook,
    ) -> Result<Solution, SolveError>
    where
        FHook: FnMut(&SolveEvent),
    {
        self.check_policy(&policy)?;
        let mut values = self.initial_values();

        let mut iterations = 0;
        let mut evaluation_sweeps = 0;
        let status = loop {
            iterations += 1;

            let evaluation = self.evaluate(&policy, &mut values, iterations, &mut on_event)?;
            evaluation_sweeps += evaluation.sweeps;

            let improvement = self.improve_policy(&values, &mut policy)?;
            debug!(
                "policy iteration round {iterations}: {} evaluation sweeps, {} states changed",
                evaluation.sweeps, improvement.changed
            );
            on_event(&SolveEvent::Improvement {
                iteration: iterations,
                changed: improvement.changed,
            });

            if improvement.stable() {
                break if evaluation.capped {
                    SolveStatus::EvaluationCapReached
                } else {
                    SolveStatus::Converged
                };
            }
            if self.config.max_iterations == Some(iterations) {
                warn!(
                    "policy iteration stopped at the {iterations}-round cap with {} states still changing",
                    improvement.changed
                );
                break SolveStatus::IterationCapReached;
            }
        };

        debug!("policy iteration finished after {iterations} rounds: {status:?}");
        Ok(Solution {
            values,
            policy,
            iterations,
            evaluation_sweeps,
            status,
        })
    }

    /// Approximate the value of `policy` in place, starting from `values`.
    ///
    /// Terminal entries of `values` are reset to their pinned value first.
    pub fn evaluate_policy(
        &self,
        policy: &[PolicyEntry],
        values: &mut [f64],
    ) -> Result<EvaluationMetrics, SolveError> {
        self.check_policy(policy)?;
        self.check_size(values.len())?;
        self.evaluate(policy, values, 0, &mut |_: &SolveEvent| {})
    }

    /// Make `policy` greedy with respect to `values`.
    pub fn improve_policy(
        &self,
        values: &[f64],
        policy: &mut [PolicyEntry],
    ) -> Result<ImprovementMetrics, SolveError> {
        self.check_size(values.len())?;
        self.check_size(policy.len())?;

        let evaluator = ActionValueEvaluator::new(self.model, self.config.gamma);
        let mut changed = 0;

        for (index, entry) in policy.iter_mut().enumerate() {
            let state = StateKey::from(index);
            if let Some(terminal) = PolicyEntry::terminal(self.model.kind(state)) {
                *entry = terminal;
                continue;
            }

            let (action, value) = evaluator.best_action(state, values)?;
            if !value.is_finite() {
                return Err(SolveError::NonFiniteValue { state });
            }
            let best = PolicyEntry::Action(action);
            if *entry != best {
                changed += 1;
                *entry = best;
            }
        }

        Ok(ImprovementMetrics { changed })
    }

    fn evaluate<FHook>(
        &self,
        policy: &[PolicyEntry],
        values: &mut [f64],
        iteration: usize,
        on_event: &mut FHook,
    ) -> Result<EvaluationMetrics, SolveError>
    where
        FHook: FnMut(&SolveEvent),
    {
        let evaluator = ActionValueEvaluator::new(self.model, self.config.gamma);
        for (index, value) in values.iter_mut().enumerate() {
            if let Some(pinned) = self.config.terminal_value(self.model.kind(StateKey::from(index)))
            {
                *value = pinned;
            }
        }

        // Jacobi sweeps read from a copy taken at the start of each sweep.
        let mut previous = match self.config.evaluation_update {
            UpdateScheme::Synchronous => Some(values.to_vec()),
            UpdateScheme::InPlace => None,
        };

        let mut sweeps = 0;
        loop {
            let mut delta = 0.0_f64;
            for (index, entry) in policy.iter().enumerate() {
                let state = StateKey::from(index);
                if self.model.kind(state).is_terminal() {
                    continue;
                }
                let action = entry
                    .action()
                    .ok_or(SolveError::InvalidPolicyEntry { state })?;

                let value = match previous.as_deref() {
                    Some(read) => evaluator.action_value(state, action, read)?,
                    None => evaluator.action_value(state, action, values)?,
                };
                if !value.is_finite() {
                    return Err(SolveError::NonFiniteValue { state });
                }
                delta = delta.max((value - values[index]).abs());
                values[index] = value;
            }
            sweeps += 1;

            if let Some(read) = previous.as_mut() {
                read.copy_from_slice(values);
            }

            trace!("policy evaluation round {iteration} sweep {sweeps}: delta {delta:e}");
            on_event(&SolveEvent::EvaluationSweep {
                iteration,
                sweep: sweeps,
                delta,
            });

            if delta < self.config.epsilon {
                return Ok(EvaluationMetrics {
                    sweeps,
                    delta,
                    capped: false,
                });
            }
            if self.config.max_evaluation_sweeps == Some(sweeps) {
                warn!(
                    "policy evaluation in round {iteration} stopped at the {sweeps}-sweep cap with delta {delta:e}"
                );
                return Ok(EvaluationMetrics {
                    sweeps,
                    delta,
                    capped: true,
                });
            }
        }
    }

    fn check_size(&self, found: usize) -> Result<(), SolveError> {
        let expected = self.model.state_count();
        if found != expected {
            return Err(SolveError::TableSize { expected, found });
        }
        Ok(())
    }

    /// Every transient state must map to one of its own available actions.
    fn check_policy(&self, policy: &[PolicyEntry]) -> Result<(), SolveError> {
        self.check_size(policy.len())?;
        for (index, entry) in policy.iter().enumerate() {
            let state = StateKey::from(index);
            if self.model.kind(state).is_terminal() {
                continue;
            }
            match entry.action() {
                Some(action) if self.model.actions(state).contains(&action) => {}
                _ => return Err(SolveError::InvalidPolicyEntry { state }),
            }
        }
        Ok(())
    }
}
