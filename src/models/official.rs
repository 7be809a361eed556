use serde::{Deserialize, Serialize};

use super::field::{scalar_text, strict_text};
use super::SessionIdentity;

/// Login-capable portal user, as listed in `officials.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Official {
    #[serde(default, deserialize_with = "strict_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "strict_text")]
    pub pass: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
}

impl Official {
    /// Plaintext comparison, no normalization.
    pub fn matches(&self, id: &str, pass: &str) -> bool {
        self.id.as_deref() == Some(id) && self.pass.as_deref() == Some(pass)
    }

    /// The `{id, name}` projection kept in the session store.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        }
    }
}
