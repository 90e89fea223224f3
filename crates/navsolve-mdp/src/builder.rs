use crate::{CompiledGraph, EdgeSpec, GraphError, GraphSpec, StateSpec};

#[derive(Debug, Clone, Default)]
/// Struct to build state graphs in code
pub struct GraphBuilder {
    start: Option<String>,
    states: Vec<StateSpec>,
}

impl GraphBuilder {
    /// Create a new GraphBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Define the state simulated episodes start from
    pub fn set_start(&mut self, state: impl Into<String>) -> &mut Self {
        self.start = Some(state.into());
        self
    }

    /// Add a regular state
    pub fn add_state(&mut self, id: impl Into<String>) -> &mut Self {
        self.push_state(id.into(), false, false)
    }

    /// Add an absorbing goal state
    pub fn add_goal(&mut self, id: impl Into<String>) -> &mut Self {
        self.push_state(id.into(), true, false)
    }

    /// Add an absorbing dead-end state
    pub fn add_deadend(&mut self, id: impl Into<String>) -> &mut Self {
        self.push_state(id.into(), false, true)
    }

    /// Add an edge `from -> to` with its cost and the probability of each action reaching `to`
    /// The target does not need to exist yet; it is checked when building
    pub fn add_edge<I, A>(
        &mut self,
        from: impl AsRef<str>,
        to: impl Into<String>,
        cost: f64,
        actions: I,
    ) -> Result<&mut Self, GraphError>
    where
        I: IntoIterator<Item = (A, f64)>,
        A: Into<String>,
    {
        let from = from.as_ref();
        let state = self
            .states
            .iter_mut()
            .find(|s| s.id == from)
            .ok_or_else(|| GraphError::BuilderUnknownState {
                state: from.to_string(),
            })?;

        let actions: Vec<(String, f64)> = actions
            .into_iter()
            .map(|(action, prob)| (action.into(), prob))
            .collect();

        state.edges.push(EdgeSpec {
            target: to.into(),
            cost,
            actions,
        });

        Ok(self)
    }

    pub fn build_spec(self) -> Result<GraphSpec, GraphError> {
        let spec = GraphSpec {
            version: Some(1),
            start: self.start,
            states: self.states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledGraph, GraphError> {
        let spec = self.build_spec()?;
        spec.compile()
    }

    fn push_state(&mut self, id: String, goal: bool, deadend: bool) -> &mut Self {
        self.states.push(StateSpec {
            id,
            goal,
            deadend,
            edges: Vec::new(),
        });
        self
    }
}
