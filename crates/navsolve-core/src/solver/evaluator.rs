use crate::solver::{
    error::SolveError,
    ids::{ActionId, StateKey},
    model::TransitionModel,
};

/// One-step lookahead over a model's transitions.
#[derive(Debug)]
pub struct ActionValueEvaluator<'m, M: ?Sized> {
    model: &'m M,
    gamma: f64,
}

impl<'m, M> ActionValueEvaluator<'m, M>
where
    M: TransitionModel + ?Sized,
{
    pub fn new(model: &'m M, gamma: f64) -> Self {
        Self { model, gamma }
    }

    /// Expected cost of taking `action` in `state` and then following `values`:
    /// `sum p * (cost + gamma * V[target])`.
    ///
    /// An action that is not available in `state` has no outcomes and evaluates to 0.
    pub fn action_value(
        &self,
        state: StateKey,
        action: ActionId,
        values: &[f64],
    ) -> Result<f64, SolveError> {
        let mut total = 0.0;
        for transition in self.model.transitions(state, action) {
            let next = values
                .get(transition.target.index())
                .ok_or(SolveError::UnknownTarget {
                    state,
                    action,
                    target: transition.target,
                })?;
            total += transition.probability * (transition.cost + self.gamma * next);
        }
        Ok(total)
    }

    /// Cheapest available action of `state` and its value.
    ///
    /// Ties go to the action listed first by the model.
    pub fn best_action(
        &self,
        state: StateKey,
        values: &[f64],
    ) -> Result<(ActionId, f64), SolveError> {
        let mut best: Option<(ActionId, f64)> = None;
        for &action in self.model.actions(state) {
            let value = self.action_value(state, action, values)?;
            match best {
                Some((_, best_value)) if value >= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.ok_or(SolveError::NoAvailableActions { state })
    }
}
