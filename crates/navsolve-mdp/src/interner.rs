use std::collections::HashMap;

use navsolve_core::ActionId;

/// Dense ids for action labels, assigned in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct ActionInterner {
    labels: Vec<String>,
    label_to_id: HashMap<String, ActionId>,
}

impl ActionInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the label if needed and return its stable id.
    pub fn intern(&mut self, label: &str) -> ActionId {
        if let Some(id) = self.label_to_id.get(label) {
            return *id;
        }

        let id = ActionId::from(self.labels.len());
        self.labels.push(label.to_string());
        self.label_to_id.insert(label.to_string(), id);
        id
    }

    pub fn label(&self, id: ActionId) -> Option<&str> {
        self.labels.get(id.index()).map(String::as_str)
    }

    pub fn id_of(&self, label: &str) -> Option<ActionId> {
        self.label_to_id.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
