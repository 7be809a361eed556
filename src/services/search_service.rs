use crate::{database::DataStore, utils::text::normalize_query};

/// Queries shorter than this are not searched.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchInput {
    /// Results cleared, nothing to run.
    Cleared,
    /// A search for this normalized query should run once the input settles.
    Debounce(String),
}

/// Incremental member search. Scheduling lives with the caller; this type
/// only tracks the query and the rendered matches.
#[derive(Debug, Clone, Default)]
pub struct MemberSearch {
    raw: String,
    pending: Option<String>,
    results: Option<Vec<usize>>,
}

impl MemberSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every keystroke clears current results and drops the pending query.
    pub fn input(&mut self, text: &str) -> SearchInput {
        self.raw = text.to_string();
        self.results = None;
        self.pending = None;

        let query = normalize_query(text);
        if query.chars().count() < MIN_QUERY_CHARS {
            return SearchInput::Cleared;
        }

        self.pending = Some(query.clone());
        SearchInput::Debounce(query)
    }

    /// Runs the pending query, if any. Returns true when a search ran.
    pub fn execute(&mut self, data: &DataStore) -> bool {
        let Some(query) = self.pending.take() else {
            return false;
        };

        let matches = data.search_members(&query);
        log::debug!("🔎 Member search {:?}: {} matches", query, matches.len());
        self.results = Some(matches);
        true
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// `None` while cleared; `Some(empty)` means the query found nothing.
    pub fn results(&self) -> Option<&[usize]> {
        self.results.as_deref()
    }
}
