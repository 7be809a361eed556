use serde_json::{Map, Value};

pub const CAPTURED_MESSAGE: &str = "Member data captured (check the log output).";

/// One input of the add-member form. Inputs without a name are not captured.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: Option<String>,
    pub value: String,
}

impl FormField {
    pub fn named(name: &str, value: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: value.to_string(),
        }
    }

    pub fn unnamed(value: &str) -> Self {
        Self {
            name: None,
            value: value.to_string(),
        }
    }
}

/// Capture-only add-member form: nothing is written to the member data.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    fields: Vec<FormField>,
    message: Option<String>,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the record from named fields (values trimmed), logs it and
    /// shows the success message.
    pub fn submit(&mut self, fields: Vec<FormField>) -> Map<String, Value> {
        let record: Map<String, Value> = fields
            .iter()
            .filter_map(|field| {
                let name = field.name.as_deref().filter(|n| !n.is_empty())?;
                Some((name.to_string(), Value::String(field.value.trim().to_string())))
            })
            .collect();

        log::info!(
            "📝 Add Member Data [{}]: {}",
            chrono::Utc::now().to_rfc3339(),
            Value::Object(record.clone())
        );

        self.fields = fields;
        self.message = Some(CAPTURED_MESSAGE.to_string());
        record
    }

    /// Clears the message and every field value.
    pub fn reset(&mut self) {
        self.message = None;
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
