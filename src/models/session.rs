use serde::{Deserialize, Serialize};

/// Storage key holding the serialized identity.
pub const SESSION_KEY: &str = "official";

/// Minimal proof of a successful login, restored verbatim on restart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
