use std::fs;

use navsolve_core::{
    ActionId, Algorithm, PolicyEntry, SolveError, SolveEvent, SolveStatus, SolverConfig,
    StateKey, StateKind, Transition, TransitionModel, solve, solve_with_hook,
};

const NORTH: usize = 0;
const SOUTH: usize = 1;
const EAST: usize = 2;
const WEST: usize = 3;

/// Square grid where every move slips sideways with probability 0.2.
/// The top-right cell is the goal, the bottom-right cell a dead-end.
struct SlipperyGrid {
    width: usize,
    kinds: Vec<StateKind>,
    actions: Vec<Vec<ActionId>>,
    outcomes: Vec<Vec<Vec<Transition>>>,
}

impl SlipperyGrid {
    fn new(width: usize) -> Self {
        let count = width * width;
        let goal = width - 1;
        let deadend = count - 1;
        let mut grid = SlipperyGrid {
            width,
            kinds: vec![StateKind::Transient; count],
            actions: vec![Vec::new(); count],
            outcomes: vec![Vec::new(); count],
        };
        grid.kinds[goal] = StateKind::Goal;
        grid.kinds[deadend] = StateKind::Deadend;

        for cell in 0..count {
            if grid.kinds[cell].is_terminal() {
                continue;
            }
            for (action, slip) in [(NORTH, EAST), (SOUTH, WEST), (EAST, SOUTH), (WEST, NORTH)] {
                let intended = grid.neighbour(cell, action);
                let slipped = grid.neighbour(cell, slip);
                grid.actions[cell].push(ActionId::from(action));
                grid.outcomes[cell].push(vec![
                    Transition {
                        target: StateKey::from(intended),
                        probability: 0.8,
                        cost: 1.0,
                    },
                    Transition {
                        target: StateKey::from(slipped),
                        probability: 0.2,
                        cost: 1.0,
                    },
                ]);
            }
        }
        grid
    }

    /// Row 0 is the top row; moving off the grid stays in place.
    fn neighbour(&self, cell: usize, action: usize) -> usize {
        let (row, col) = (cell / self.width, cell % self.width);
        match action {
            NORTH if row > 0 => cell - self.width,
            SOUTH if row + 1 < self.width => cell + self.width,
            EAST if col + 1 < self.width => cell + 1,
            WEST if col > 0 => cell - 1,
            _ => cell,
        }
    }
}

impl TransitionModel for SlipperyGrid {
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

fn config() -> SolverConfig {
    SolverConfig {
        gamma: 0.95,
        epsilon: 1e-9,
        deadend_value: 50.0,
        ..SolverConfig::default()
    }
}

#[test]
fn public_solvers_agree_on_grid() {
    let grid = SlipperyGrid::new(4);
    let vi = solve(&grid, Algorithm::ValueIteration, &config()).expect("value iteration");
    let pi = solve(&grid, Algorithm::PolicyIteration, &config()).expect("policy iteration");

    assert!(vi.converged());
    assert!(pi.converged());
    for (a, b) in vi.values.iter().zip(&pi.values) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    // Next to the goal the best move is straight into it.
    assert_eq!(vi.action(StateKey::from(2)), Some(ActionId::from(EAST)));
    assert_eq!(vi.policy[3], PolicyEntry::Goal);
    assert_eq!(vi.policy[15], PolicyEntry::Deadend);
    assert_eq!(vi.values[15], 50.0);
}

#[test]
fn public_values_grow_with_distance_to_goal() {
    let grid = SlipperyGrid::new(4);
    let solution = solve(&grid, Algorithm::ValueIteration, &config()).expect("value iteration");

    // Along the top row every step away from the goal costs more.
    let top_row: Vec<f64> = (0..3).map(|c| solution.values[c]).collect();
    assert!(top_row[0] > top_row[1]);
    assert!(top_row[1] > top_row[2]);
    assert!(top_row[2] > 1.0);
}

#[test]
fn public_hook_reports_every_round() {
    let grid = SlipperyGrid::new(3);
    let mut sweeps = 0;
    let mut rounds = 0;
    let solution = solve_with_hook(&grid, Algorithm::PolicyIteration, &config(), |event| {
        match event {
            SolveEvent::EvaluationSweep { .. } => sweeps += 1,
            SolveEvent::Improvement { .. } => rounds += 1,
            SolveEvent::ValueSweep { .. } => panic!("not a value-iteration run"),
        }
    })
    .expect("policy iteration");

    assert_eq!(rounds, solution.iterations);
    assert_eq!(sweeps, solution.evaluation_sweeps);
}

#[test]
fn public_iteration_cap_is_not_convergence() {
    let grid = SlipperyGrid::new(4);
    let capped = SolverConfig {
        max_iterations: Some(3),
        ..config()
    };
    let solution = solve(&grid, Algorithm::ValueIteration, &capped).expect("value iteration");

    assert_eq!(solution.iterations, 3);
    assert_eq!(solution.status, SolveStatus::IterationCapReached);
    assert!(!solution.converged());
}

#[test]
fn public_invalid_gamma_is_rejected() {
    let grid = SlipperyGrid::new(2);
    let bad = SolverConfig {
        gamma: 1.5,
        ..SolverConfig::default()
    };
    let err = solve(&grid, Algorithm::PolicyIteration, &bad).expect_err("gamma above one");
    assert!(matches!(err, SolveError::InvalidConfig { .. }));
}

#[test]
fn public_config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("navsolve-config-{}.yaml", std::process::id()));
    fs::write(&path, "gamma: 1.0\nepsilon: 0.001\nmax_iterations: 40\n").expect("write config");

    let loaded = SolverConfig::from_yaml_path(&path).expect("config should load");
    fs::remove_file(&path).ok();

    assert_eq!(loaded.gamma, 1.0);
    assert_eq!(loaded.epsilon, 0.001);
    assert_eq!(loaded.max_iterations, Some(40));
}

#[test]
fn public_solution_serializes() {
    let grid = SlipperyGrid::new(2);
    let solution = solve(&grid, Algorithm::ValueIteration, &config()).expect("value iteration");
    let yaml = serde_yaml::to_string(&solution).expect("serialize");

    assert!(yaml.contains("status: converged"));
    assert!(yaml.contains("- goal"));
}
