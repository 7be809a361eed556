use serde::{Deserialize, Serialize};

use super::field::{display_text, strict_display_text};

/// Institution record, keyed by name (collection: `institutions.json`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Institution {
    #[serde(rename = "Institution", default, deserialize_with = "strict_display_text")]
    pub name: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "display_text")]
    pub address: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "display_text")]
    pub email: Option<String>,
    #[serde(rename = "Landline", default, deserialize_with = "display_text")]
    pub landline: Option<String>,
    #[serde(rename = "Head cell", default, deserialize_with = "display_text")]
    pub head_cell: Option<String>,
    #[serde(rename = "Bursar Cell", default, deserialize_with = "display_text")]
    pub bursar_cell: Option<String>,
}

impl Institution {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}
