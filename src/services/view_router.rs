use crate::utils::AppError;

pub const TAB_INSTITUTIONS: &str = "institution-summary";
pub const TAB_MEMBER_LOOKUP: &str = "member-lookup";
pub const TAB_ADD_MEMBER: &str = "add-member";

/// Tab selected whenever the dashboard is activated.
pub const DEFAULT_TAB: &str = TAB_INSTITUTIONS;

/// Registered tabs: (panel id, tab control label).
pub const TABS: [(&str, &str); 3] = [
    (TAB_INSTITUTIONS, "Institutions"),
    (TAB_MEMBER_LOOKUP, "Member Lookup"),
    (TAB_ADD_MEMBER, "Add Member"),
];

/// Which dashboard panel is visible. Pure UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRouter {
    active: Option<&'static str>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows exactly the panel named `tab_id`. Unknown ids are rejected and
    /// the current panel stays as it is.
    pub fn show_tab(&mut self, tab_id: &str) -> Result<(), AppError> {
        let id = TABS
            .iter()
            .map(|(id, _)| *id)
            .find(|id| *id == tab_id)
            .ok_or_else(|| AppError::UnknownTab(tab_id.to_string()))?;
        self.active = Some(id);
        Ok(())
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn is_visible(&self, tab_id: &str) -> bool {
        self.active == Some(tab_id)
    }
}
