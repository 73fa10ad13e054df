use crate::dates::parse_iso_instant;
use crate::error::{LoadError, StoreError};
use crate::schema::{is_known_state, Dataset, Deputy, Proposal, Vote};
use crate::source::DataSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown wherever a vote points at a deputy id the catalog does not know.
pub const UNKNOWN_DEPUTY_LABEL: &str = "Deputado não encontrado";

/// The loaded dataset plus id indices. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    proposals: Vec<Proposal>,
    deputies: Vec<Deputy>,
    votes: Vec<Vote>,
    proposal_index: HashMap<String, usize>,
    deputy_index: HashMap<String, usize>,
}

impl Catalog {
    /// Indexes a dataset, rejecting duplicate ids.
    ///
    /// Dangling vote references, unknown state codes and unparseable dates
    /// are logged and kept.
    pub fn build(dataset: Dataset) -> Result<Self, LoadError> {
        let Dataset {
            proposals,
            deputies,
            votes,
        } = dataset;

        let proposal_index = index_by_id("proposal", &proposals, |p| &p.id)?;
        let deputy_index = index_by_id("deputy", &deputies, |d| &d.id)?;
        index_by_id("vote", &votes, |v| &v.id)?;

        let catalog = Self {
            proposals,
            deputies,
            votes,
            proposal_index,
            deputy_index,
        };
        catalog.report_integrity();
        Ok(catalog)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn deputies(&self) -> &[Deputy] {
        &self.deputies
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn find_deputy_by_id(&self, id: &str) -> Option<&Deputy> {
        self.deputy_index.get(id).map(|&i| &self.deputies[i])
    }

    pub fn find_proposal_by_id(&self, id: &str) -> Option<&Proposal> {
        self.proposal_index.get(id).map(|&i| &self.proposals[i])
    }

    /// The deputy's name, or [`UNKNOWN_DEPUTY_LABEL`] for a dangling id.
    pub fn deputy_name_or_fallback(&self, id: &str) -> &str {
        self.find_deputy_by_id(id)
            .map(|d| d.name.as_str())
            .unwrap_or(UNKNOWN_DEPUTY_LABEL)
    }

    fn report_integrity(&self) {
        let dangling_deputies = self
            .votes
            .iter()
            .filter(|v| !self.deputy_index.contains_key(&v.deputy_id))
            .count();
        let dangling_proposals = self
            .votes
            .iter()
            .filter(|v| !self.proposal_index.contains_key(&v.proposal_id))
            .count();
        if dangling_deputies > 0 || dangling_proposals > 0 {
            warn!(
                dangling_deputies,
                dangling_proposals, "votes reference entities missing from the catalog"
            );
        }

        for deputy in self.deputies.iter().filter(|d| !is_known_state(&d.state)) {
            warn!(deputy = %deputy.id, state = %deputy.state, "unknown federative unit code");
        }

        let bad_dates = self
            .proposals
            .iter()
            .map(|p| p.date.as_str())
            .chain(self.votes.iter().map(|v| v.date.as_str()))
            .filter(|date| parse_iso_instant(date).is_none())
            .count();
        if bad_dates > 0 {
            warn!(bad_dates, "dates that are not ISO-8601 will sort before valid ones");
        }
    }
}

fn index_by_id<T>(
    entity: &'static str,
    items: &[T],
    id_of: impl Fn(&T) -> &String,
) -> Result<HashMap<String, usize>, LoadError> {
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let id = id_of(item);
        if index.insert(id.clone(), position).is_some() {
            return Err(LoadError::DuplicateId {
                entity,
                id: id.clone(),
            });
        }
    }
    Ok(index)
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

/// Holds the catalog for a session. Starts out `Loading`.
#[derive(Debug, Clone)]
pub struct EntityStore {
    state: LoadState,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    /// Fetches everything from `source` and builds the catalog.
    ///
    /// Once loaded, further calls return the existing catalog without
    /// touching the source. A failed load can be attempted again.
    pub fn load<S: DataSource + ?Sized>(&mut self, source: &S) -> Result<Arc<Catalog>, LoadError> {
        if let LoadState::Ready(catalog) = &self.state {
            debug!("catalog already loaded, skipping fetch");
            return Ok(Arc::clone(catalog));
        }

        self.state = LoadState::Loading;
        let label = source.describe();
        info!(source = %label, "loading catalog");

        match source.fetch_all().and_then(Catalog::build) {
            Ok(catalog) => {
                info!(
                    proposals = catalog.proposals.len(),
                    deputies = catalog.deputies.len(),
                    votes = catalog.votes.len(),
                    "catalog loaded"
                );
                let catalog = Arc::new(catalog);
                self.state = LoadState::Ready(Arc::clone(&catalog));
                Ok(catalog)
            }
            Err(err) => {
                warn!(source = %label, error = %err, "catalog load failed");
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn catalog(&self) -> Result<Arc<Catalog>, StoreError> {
        match &self.state {
            LoadState::Ready(catalog) => Ok(Arc::clone(catalog)),
            LoadState::Loading => Err(StoreError::Loading),
            LoadState::Failed(message) => Err(StoreError::LoadFailed(message.clone())),
        }
    }

    pub fn find_deputy_by_id(&self, id: &str) -> Result<Option<Deputy>, StoreError> {
        Ok(self.catalog()?.find_deputy_by_id(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use crate::source::StaticSource;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
        fail: bool,
    }

    impl DataSource for CountingSource {
        fn fetch_all(&self) -> Result<Dataset, LoadError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(LoadError::Unavailable("connection refused".to_string()))
            } else {
                Ok(fixture::sample_dataset())
            }
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn new_store_reports_loading() {
        let store = EntityStore::new();
        assert!(store.is_loading());
        assert_eq!(store.catalog().unwrap_err(), StoreError::Loading);
    }

    #[test]
    fn second_load_does_not_refetch() {
        let source = CountingSource {
            calls: Cell::new(0),
            fail: false,
        };
        let mut store = EntityStore::new();
        let first = store.load(&source).unwrap();
        let second = store.load(&source).unwrap();
        assert_eq!(source.calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failure_is_distinguishable_from_empty() {
        let source = CountingSource {
            calls: Cell::new(0),
            fail: true,
        };
        let mut store = EntityStore::new();
        assert!(matches!(store.load(&source), Err(LoadError::Unavailable(_))));
        assert!(matches!(store.state(), LoadState::Failed(_)));
        assert!(matches!(store.catalog(), Err(StoreError::LoadFailed(_))));

        let mut empty = EntityStore::new();
        let catalog = empty.load(&StaticSource::default()).unwrap();
        assert!(catalog.proposals().is_empty());
        assert!(matches!(empty.state(), LoadState::Ready(_)));
    }

    #[test]
    fn failed_load_can_be_retried() {
        let mut store = EntityStore::new();
        let broken = CountingSource {
            calls: Cell::new(0),
            fail: true,
        };
        assert!(store.load(&broken).is_err());
        assert!(store.load(&fixture::sample_source()).is_ok());
        assert_eq!(store.catalog().unwrap().deputies().len(), 6);
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let mut dataset = fixture::sample_dataset();
        let copy = dataset.deputies[0].clone();
        dataset.deputies.push(copy);

        let err = Catalog::build(dataset).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { entity: "deputy", .. }));
    }

    #[test]
    fn dangling_deputy_resolves_to_not_found() {
        let mut store = EntityStore::new();
        let catalog = store.load(&fixture::sample_source()).unwrap();

        assert_eq!(catalog.find_deputy_by_id("999"), None);
        assert_eq!(catalog.deputy_name_or_fallback("999"), UNKNOWN_DEPUTY_LABEL);
        assert_eq!(catalog.deputy_name_or_fallback("3"), "Rodrigo Maia");
        assert_eq!(store.find_deputy_by_id("999"), Ok(None));
    }

    #[test]
    fn proposals_are_found_by_id() {
        let catalog = Catalog::build(fixture::sample_dataset()).unwrap();
        let proposal = catalog.find_proposal_by_id("3").unwrap();
        assert_eq!(proposal.number, "PEC 95/2016");
        assert!(catalog.find_proposal_by_id("x").is_none());
    }
}
