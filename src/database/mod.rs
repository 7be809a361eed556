pub mod loader;
pub mod session_store;

use crate::models::{Institution, Member, Official};
use crate::utils::text::contains_folded;
use loader::{load_collection, ResourceLoader};

/// Relative paths of the three static resources.
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    pub officials: String,
    pub members: String,
    pub institutions: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            officials: "officials.json".to_string(),
            members: "members.json".to_string(),
            institutions: "institutions.json".to_string(),
        }
    }
}

/// In-memory copy of the three collections, read-only after load.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    officials: Vec<Official>,
    members: Vec<Member>,
    institutions: Vec<Institution>,
}

impl DataStore {
    pub fn new(officials: Vec<Official>, members: Vec<Member>, institutions: Vec<Institution>) -> Self {
        Self {
            officials,
            members,
            institutions,
        }
    }

    /// Loads the three collections concurrently. Never fails: a broken
    /// resource leaves its collection empty.
    pub async fn load(loader: &dyn ResourceLoader, paths: &ResourcePaths) -> Self {
        log::info!("📂 Loading portal data...");

        let (officials, members, institutions) = futures::join!(
            load_collection::<Official>(loader, &paths.officials),
            load_collection::<Member>(loader, &paths.members),
            load_collection::<Institution>(loader, &paths.institutions),
        );

        log::info!(
            "📊 Data ready: {} officials, {} members, {} institutions",
            officials.len(),
            members.len(),
            institutions.len()
        );

        Self::new(officials, members, institutions)
    }

    #[cfg(test)]
    pub fn officials(&self) -> &[Official] {
        &self.officials
    }

    #[cfg(test)]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    /// First official whose id and password both match exactly.
    pub fn find_official(&self, id: &str, pass: &str) -> Option<&Official> {
        self.officials.iter().find(|o| o.matches(id, pass))
    }

    pub fn find_institution(&self, name: &str) -> Option<&Institution> {
        self.institutions.iter().find(|i| i.is_named(name))
    }

    /// Members of `institution`, in collection order.
    pub fn members_of(&self, institution: &str) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.belongs_to(institution))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Case-insensitive substring match on Full Name. `query` must be
    /// lower-cased already.
    pub fn search_members(&self, query: &str) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| contains_folded(m.name_or_empty(), query))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn member(&self, idx: usize) -> Option<&Member> {
        self.members.get(idx)
    }
}
