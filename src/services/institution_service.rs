use crate::{database::DataStore, models::Institution};

pub const PLACEHOLDER_LABEL: &str = "--Select Institution--";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Details of the selected institution plus its members (indices into the
/// members collection, in collection order).
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionSummary {
    pub institution: Institution,
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct InstitutionBrowser {
    options: Vec<SelectOption>,
    selected: String,
    summary: Option<InstitutionSummary>,
}

impl InstitutionBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the selector: placeholder first, then one option per
    /// institution. Clears any previous selection.
    pub fn populate(&mut self, institutions: &[Institution]) {
        self.options = std::iter::once(SelectOption {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        })
        .chain(institutions.iter().map(|inst| {
            let name = inst.name.clone().unwrap_or_default();
            SelectOption {
                value: name.clone(),
                label: name,
            }
        }))
        .collect();
        self.selected.clear();
        self.summary = None;

        log::debug!("🏫 Institution selector populated with {} entries", institutions.len());
    }

    /// Selection change. An empty name, or a name with no institution
    /// record, leaves both panels empty.
    pub fn select(&mut self, data: &DataStore, name: &str) {
        self.selected = name.to_string();
        self.summary = None;

        if name.is_empty() {
            return;
        }

        let Some(institution) = data.find_institution(name) else {
            log::debug!("🏫 No institution record named {:?}", name);
            return;
        };

        self.summary = Some(InstitutionSummary {
            institution: institution.clone(),
            members: data.members_of(name),
        });
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn summary(&self) -> Option<&InstitutionSummary> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::{institution, member, sample_store};

    #[test]
    fn test_populate_adds_placeholder_first() {
        let data = sample_store();
        let mut browser = InstitutionBrowser::new();
        browser.populate(data.institutions());

        let labels: Vec<&str> = browser.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec![PLACEHOLDER_LABEL, "Central", "North", "Central"]);
        assert_eq!(browser.options()[0].value, "");
        assert_eq!(browser.selected(), "");
    }

    #[test]
    fn test_select_joins_members_by_exact_name() {
        let data = DataStore::new(
            vec![],
            vec![member("Bob", "Central"), member("Cara", "North")],
            vec![institution("Central")],
        );
        let mut browser = InstitutionBrowser::new();
        browser.populate(data.institutions());

        browser.select(&data, "Central");

        let summary = browser.summary().unwrap();
        assert_eq!(summary.institution.name.as_deref(), Some("Central"));
        assert_eq!(summary.members, vec![0]);
    }

    #[test]
    fn test_select_empty_clears_panels() {
        let data = sample_store();
        let mut browser = InstitutionBrowser::new();
        browser.select(&data, "Central");
        assert!(browser.summary().is_some());

        browser.select(&data, "");
        assert!(browser.summary().is_none());
    }

    #[test]
    fn test_select_unknown_institution_renders_nothing() {
        // Members point at "Ghost" but no institution record exists.
        let data = DataStore::new(vec![], vec![member("Eve", "Ghost")], vec![]);
        let mut browser = InstitutionBrowser::new();

        browser.select(&data, "Ghost");

        assert!(browser.summary().is_none());
        assert_eq!(browser.selected(), "Ghost");
    }

    #[test]
    fn test_populate_resets_selection() {
        let data = sample_store();
        let mut browser = InstitutionBrowser::new();
        browser.select(&data, "North");

        browser.populate(data.institutions());

        assert!(browser.summary().is_none());
        assert_eq!(browser.selected(), "");
    }
}
