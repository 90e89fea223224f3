use approx::assert_abs_diff_eq;

use super::fixtures::{TableModel, corridor};
use crate::{ActionId, ActionValueEvaluator, SolveError, StateKey, StateKind};

#[test]
fn action_value_weights_cost_and_discounted_successor() {
    let model = corridor();
    let evaluator = ActionValueEvaluator::new(&model, 0.5);
    let values = [4.0, 2.0, 6.0, 0.0];

    // 0.8 * (1 + 0.5 * 6) + 0.2 * (1 + 0.5 * 2)
    let forward = evaluator
        .action_value(StateKey::from(1), ActionId::from(0), &values)
        .expect("valid lookup");
    assert_abs_diff_eq!(forward, 3.6, epsilon = 1e-12);

    let back = evaluator
        .action_value(StateKey::from(1), ActionId::from(1), &values)
        .expect("valid lookup");
    assert_abs_diff_eq!(back, 3.0, epsilon = 1e-12);
}

#[test]
fn unavailable_action_contributes_nothing() {
    let model = corridor();
    let evaluator = ActionValueEvaluator::new(&model, 0.9);
    let values = [1.0; 4];

    let value = evaluator
        .action_value(StateKey::from(0), ActionId::from(1), &values)
        .expect("valid lookup");
    assert_eq!(value, 0.0);
}

#[test]
fn best_action_prefers_first_listed_on_ties() {
    let mut model = TableModel::new();
    let s0 = model.add_state(StateKind::Transient);
    model.add_state(StateKind::Goal);
    model.add_action(s0, 7, &[(1, 1.0, 2.0)]);
    model.add_action(s0, 3, &[(1, 1.0, 2.0)]);

    let evaluator = ActionValueEvaluator::new(&model, 1.0);
    let (action, value) = evaluator
        .best_action(s0, &[0.0, 0.0])
        .expect("actions exist");

    assert_eq!(action, ActionId::from(7));
    assert_eq!(value, 2.0);
}

#[test]
fn best_action_picks_cheapest() {
    let model = corridor();
    let evaluator = ActionValueEvaluator::new(&model, 1.0);
    let values = [0.0, 20.0, 50.0, 0.0];

    let (action, value) = evaluator
        .best_action(StateKey::from(2), &values)
        .expect("actions exist");
    assert_eq!(action, ActionId::from(0));
    assert_abs_diff_eq!(value, 0.8 + 0.2 * 51.0, epsilon = 1e-12);
}

#[test]
fn dangling_target_is_reported() {
    let mut model = TableModel::new();
    let s0 = model.add_state(StateKind::Transient);
    model.add_action(s0, 0, &[(4, 1.0, 1.0)]);

    let evaluator = ActionValueEvaluator::new(&model, 1.0);
    let err = evaluator
        .action_value(s0, ActionId::from(0), &[0.0])
        .expect_err("target 4 does not exist");

    assert_eq!(
        err,
        SolveError::UnknownTarget {
            state: s0,
            action: ActionId::from(0),
            target: StateKey::from(4),
        }
    );
}

#[test]
fn state_without_actions_has_no_best_action() {
    let mut model = TableModel::new();
    let s0 = model.add_state(StateKind::Transient);

    let evaluator = ActionValueEvaluator::new(&model, 1.0);
    let err = evaluator.best_action(s0, &[0.0]).expect_err("no actions");
    assert_eq!(err, SolveError::NoAvailableActions { state: s0 });
}
