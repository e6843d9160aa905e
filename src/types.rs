/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data operations the accessor performs on behalf of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Select,
    Insert,
    Update,
}

impl Operation {
    /// Whether the operation writes to the store
    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Select)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
        };
        f.write_str(s)
    }
}
