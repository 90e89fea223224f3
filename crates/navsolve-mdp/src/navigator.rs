use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{EdgeSpec, GraphSpec, StateSpec, spec::unit_cost};

/// Navigator benchmark layout: a JSON object keyed by state id.
pub type NavigatorGraph = BTreeMap<String, NavigatorState>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigatorState {
    #[serde(default)]
    pub goal: bool,
    #[serde(default)]
    pub deadend: bool,
    #[serde(rename = "Adj", default)]
    pub adj: Vec<NavigatorEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorEdge {
    /// Target state id.
    pub name: String,
    #[serde(rename = "A", with = "crate::action_map")]
    pub actions: Vec<(String, f64)>,
    #[serde(default = "unit_cost")]
    pub cost: f64,
}

/// Numeric ids first in numeric order, then the rest lexicographically.
fn natural_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Convert a navigator graph into the native schema.
pub fn navigator_to_spec(graph: &NavigatorGraph) -> GraphSpec {
    let mut ids: Vec<&String> = graph.keys().collect();
    ids.sort_by(|a, b| natural_order(a, b));

    let states = ids
        .into_iter()
        .map(|id| {
            let state = &graph[id];
            StateSpec {
                id: id.clone(),
                goal: state.goal,
                deadend: state.deadend,
                edges: state
                    .adj
                    .iter()
                    .map(|edge| EdgeSpec {
                        target: edge.name.clone(),
                        cost: edge.cost,
                        actions: edge.actions.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    GraphSpec {
        version: Some(1),
        start: None,
        states,
    }
}
