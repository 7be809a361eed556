use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::{display_text, strict_display_text};

/// Union member record (collection: `members.json`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Member {
    #[serde(rename = "Full Name", default, deserialize_with = "display_text")]
    pub full_name: Option<String>,
    #[serde(rename = "National ID", default, deserialize_with = "display_text")]
    pub national_id: Option<String>,
    #[serde(rename = "Job Title", default, deserialize_with = "display_text")]
    pub job_title: Option<String>,
    #[serde(rename = "Grade", default, deserialize_with = "display_text")]
    pub grade: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "display_text")]
    pub status: Option<String>,
    #[serde(rename = "Position in Union", default, deserialize_with = "display_text")]
    pub position_in_union: Option<String>,
    /// Foreign key: the owning institution's name.
    #[serde(rename = "Institution", default, deserialize_with = "strict_display_text")]
    pub institution: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Member {
    pub fn belongs_to(&self, institution: &str) -> bool {
        self.institution.as_deref() == Some(institution)
    }

    pub fn name_or_empty(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }
}
