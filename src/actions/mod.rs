use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub action: String, // URL or prefixed command such as `readeck:archive:<id>`
    /// Further actions offered for the same result row, in menu order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Action>,
}

impl Action {
    pub fn new(label: impl Into<String>, desc: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            desc: desc.into(),
            action: action.into(),
            alternatives: Vec::new(),
        }
    }
}

pub mod clipboard;
