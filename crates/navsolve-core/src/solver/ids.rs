use serde::{Deserialize, Serialize};

/// Dense index of a state inside a transition model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(usize);

impl StateKey {
    /// Return the position of this state in value and policy tables.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    /// Allow for explicit conversion from usize to StateKey
    fn from(value: usize) -> Self {
        StateKey(value)
    }
}

/// Dense index of an action label shared by the whole model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(usize);

impl ActionId {
    /// Get the underlying action index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    /// Allow for explicit conversion from usize to ActionId
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}
