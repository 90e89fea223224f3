use std::cell::Cell;

use crate::{ActionId, SolverConfig, StateKey, StateKind, Transition, TransitionModel};

/// Small hand-built model: per state a kind and a list of `(action, outcomes)`.
#[derive(Debug, Default)]
pub(super) struct TableModel {
    kinds: Vec<StateKind>,
    actions: Vec<Vec<ActionId>>,
    outcomes: Vec<Vec<Vec<Transition>>>,
}

impl TableModel {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn add_state(&mut self, kind: StateKind) -> StateKey {
        self.kinds.push(kind);
        self.actions.push(Vec::new());
        self.outcomes.push(Vec::new());
        StateKey::from(self.kinds.len() - 1)
    }

    /// Add an action with `(target, probability, cost)` outcomes.
    pub(super) fn add_action(&mut self, state: StateKey, action: usize, outcomes: &[(usize, f64, f64)]) {
        self.actions[state.index()].push(ActionId::from(action));
        self.outcomes[state.index()].push(
            outcomes
                .iter()
                .map(|&(target, probability, cost)| Transition {
                    target: StateKey::from(target),
                    probability,
                    cost,
                })
                .collect(),
        );
    }
}

impl TransitionModel for TableModel {
    fn state_count(&self) -> usize {
        self.kinds.len()
    }

    fn kind(&self, state: StateKey) -> StateKind {
        self.kinds[state.index()]
    }

    fn actions(&self, state: StateKey) -> &[ActionId] {
        &self.actions[state.index()]
    }

    fn transitions(&self, state: StateKey, action: ActionId) -> &[Transition] {
        self.actions[state.index()]
            .iter()
            .position(|a| *a == action)
            .map(|pos| self.outcomes[state.index()][pos].as_slice())
            .unwrap_or(&[])
    }
}

/// Two identical actions. Whichever action was evaluated last is listed
/// second, so greedy improvement always switches to the other one.
///
/// This model breaks the fixed action order `TransitionModel` promises on
/// purpose; it only exists to drive policy iteration into its round cap.
#[derive(Debug)]
pub(super) struct FlippingModel {
    orders: [[ActionId; 2]; 2],
    outcome: [Transition; 1],
    last_evaluated: Cell<usize>,
}

impl FlippingModel {
    pub(super) fn new() -> Self {
        let a = ActionId::from(0);
        let b = ActionId::from(1);
        Self {
            orders: [[b, a], [a, b]],
            outcome: [Transition {
                target: StateKey::from(1),
                probability: 1.0,
                cost: 1.0,
            }],
            last_evaluated: Cell::new(1),
        }
    }
}

impl TransitionModel for FlippingModel {
    fn state_count(&self) -> usize {
        2
    }

    fn kind(&self, state: StateKey) -> StateKind {
        if state.index() == 0 {
            StateKind::Transient
        } else {
            StateKind::Goal
        }
    }

    fn actions(&self, state: StateKey) -> &[ActionId] {
        if state.index() != 0 {
            return &[];
        }
        &self.orders[self.last_evaluated.get()]
    }

    fn transitions(&self, state: StateKey, action: ActionId) -> &[Transition] {
        if state.index() == 0 && action.index() < 2 {
            self.last_evaluated.set(action.index());
            &self.outcome
        } else {
            &[]
        }
    }
}

pub(super) fn config(gamma: f64, epsilon: f64) -> SolverConfig {
    SolverConfig {
        gamma,
        epsilon,
        ..SolverConfig::default()
    }
}

/// Scenario with one step from `S0` to goal `G` via action 0 at cost 1.
pub(super) fn single_step() -> TableModel {
    let mut model = TableModel::new();
    let s0 = model.add_state(StateKind::Transient);
    model.add_state(StateKind::Goal);
    model.add_action(s0, 0, &[(1, 1.0, 1.0)]);
    model
}

/// `S0 -> S1 -> goal` where each step costs `f64::MAX`, so any value summing both steps overflows.
pub(super) fn overflowing_chain() -> TableModel {
    let mut model = TableModel::new();
    let s0 = model.add_state(StateKind::Transient);
    let s1 = model.add_state(StateKind::Transient);
    model.add_state(StateKind::Goal);
    model.add_action(s0, 0, &[(1, 1.0, f64::MAX)]);
    model.add_action(s1, 0, &[(2, 1.0, f64::MAX)]);
    model
}

/// Slippery corridor `0 -> 1 -> 2 -> goal 3`.
///
/// Action 0 moves forward with probability 0.8 and stays otherwise; action 1
/// moves back. Both cost 1.
pub(super) fn corridor() -> TableModel {
    let mut model = TableModel::new();
    for _ in 0..3 {
        model.add_state(StateKind::Transient);
    }
    model.add_state(StateKind::Goal);
    for s in 0..3 {
        let state = StateKey::from(s);
        model.add_action(state, 0, &[(s + 1, 0.8, 1.0), (s, 0.2, 1.0)]);
        if s > 0 {
            model.add_action(state, 1, &[(s - 1, 1.0, 1.0)]);
        }
    }
    model
}
