use olympics_cms_config::ListingMode;
use olympics_cms_database::models::Record;
use olympics_cms_database::{Collection, DocumentId, ListQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::error::ViewError;

pub const PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ViewError),
}

/// Which part of the collection `records` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    All,
    /// One page, numbered from 1.
    Page(usize),
}

/// The records of one collection as held for a single request.
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    records: Vec<Record<T>>,
    total: usize,
    window: Window,
    state: FetchState,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            window: Window::All,
            state: FetchState::Idle,
        }
    }
}

const fn start_of(page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

impl<T> ResourceList<T> {
    #[must_use]
    pub fn from_records(records: Vec<Record<T>>) -> Self {
        Self {
            total: records.len(),
            records,
            window: Window::All,
            state: FetchState::Loaded,
        }
    }

    #[must_use]
    pub const fn state(&self) -> FetchState {
        self.state
    }

    #[must_use]
    pub const fn error(&self) -> Option<ViewError> {
        match self.state {
            FetchState::Failed(error) => Some(error),
            FetchState::Idle | FetchState::Loading | FetchState::Loaded => None,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record<T>] {
        &mut self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of `page` (numbered from 1, 0 counts as 1). Empty past the last page.
    #[must_use]
    pub fn page(&self, page: usize) -> &[Record<T>] {
        match self.window {
            Window::All => {
                let start = start_of(page).min(self.records.len());
                let end = start.saturating_add(PAGE_SIZE).min(self.records.len());
                &self.records[start..end]
            }
            Window::Page(loaded) if loaded == page.max(1) => &self.records,
            Window::Page(_) => &[],
        }
    }

    /// At least 1, even for an empty list.
    #[must_use]
    pub fn page_count(&self) -> usize {
        let len = match self.window {
            Window::All => self.records.len(),
            Window::Page(_) => self.total,
        };
        len.div_ceil(PAGE_SIZE).max(1)
    }

    #[must_use]
    pub fn find(&self, id: &DocumentId) -> Option<&Record<T>> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// New records land at the end of the collection, so a single loaded page
    /// only shows them when it is the last page and has room left.
    pub fn apply_created(&mut self, record: Record<T>) {
        let shown = match self.window {
            Window::All => true,
            Window::Page(loaded) => {
                loaded >= self.page_count() && self.records.len() < PAGE_SIZE
            }
        };
        if shown {
            self.records.push(record);
        }
        self.total += 1;
    }

    /// Replaces the record with the same id in place. Returns whether it was held.
    pub fn apply_updated(&mut self, record: Record<T>) -> bool {
        match self.records.iter_mut().find(|held| held.id == record.id) {
            Some(held) => {
                *held = record;
                true
            }
            None => false,
        }
    }

    pub fn apply_deleted(&mut self, id: &DocumentId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.total = self.total.saturating_sub(1);
        }
        removed
    }
}

impl<T> ResourceList<T>
where
    T: Serialize + DeserializeOwned,
{
    async fn fetch(
        &mut self,
        collection: &Collection<'_, T>,
        query: ListQuery,
        window: Window,
        failure: ViewError,
    ) {
        self.state = FetchState::Loading;
        match collection.list(query).await {
            Ok(list) => {
                self.records = list.documents;
                self.total = list.total;
                self.window = window;
                self.state = FetchState::Loaded;
            }
            Err(err) => {
                error!("listing {} failed: {err}", collection.id());
                self.records.clear();
                self.total = 0;
                self.window = Window::All;
                self.state = FetchState::Failed(failure);
            }
        }
    }

    /// Fetches up to [`olympics_cms_database::store::FULL_FETCH_LIMIT`] records.
    pub async fn load(&mut self, collection: &Collection<'_, T>, failure: ViewError) {
        self.fetch(collection, ListQuery::full(), Window::All, failure)
            .await;
    }

    /// Fetches only the records of `page`.
    pub async fn load_page(
        &mut self,
        collection: &Collection<'_, T>,
        page: usize,
        failure: ViewError,
    ) {
        let page = page.max(1);
        self.fetch(
            collection,
            ListQuery::page(PAGE_SIZE, start_of(page)),
            Window::Page(page),
            failure,
        )
        .await;
    }

    pub async fn load_for(
        &mut self,
        mode: ListingMode,
        collection: &Collection<'_, T>,
        page: usize,
        failure: ViewError,
    ) {
        match mode {
            ListingMode::FullFetch => self.load(collection, failure).await,
            ListingMode::Paged => self.load_page(collection, page, failure).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use olympics_cms_database::memory::MemoryStore;
    use olympics_cms_database::models::{Sport, TallyRow};

    use super::*;

    const FAILURE: ViewError = ViewError::Fetch("Failed to fetch tally");

    fn record(n: u32) -> Record<u32> {
        Record {
            id: DocumentId::parse(&format!("r{n}")).unwrap(),
            data: n,
        }
    }

    fn list_of(n: u32) -> ResourceList<u32> {
        ResourceList::from_records((0..n).map(record).collect())
    }

    #[test]
    fn pages_are_slices_of_twenty_five() {
        let list = list_of(60);
        assert_eq!(list.page_count(), 3);
        for page in 1..=3 {
            let expected: Vec<_> = (0..60)
                .skip((page - 1) * PAGE_SIZE)
                .take(PAGE_SIZE)
                .map(|n| record(u32::try_from(n).unwrap()))
                .collect();
            assert_eq!(list.page(page), expected.as_slice());
        }
        assert_eq!(list.page(0), list.page(1));
        assert!(list.page(4).is_empty());
        assert!(list.page(usize::MAX / PAGE_SIZE).is_empty());
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let list = list_of(0);
        assert_eq!(list.page_count(), 1);
        assert!(list.page(1).is_empty());
    }

    #[test]
    fn apply_changes_only_the_target() {
        let mut list = list_of(5);
        assert!(list.apply_updated(Record {
            id: record(2).id,
            data: 20,
        }));
        assert_eq!(
            list.records().iter().map(|r| r.data).collect::<Vec<_>>(),
            vec![0, 1, 20, 3, 4]
        );
        assert!(list.apply_deleted(&record(1).id));
        assert!(!list.apply_deleted(&record(1).id));
        assert_eq!(
            list.records().iter().map(|r| r.data).collect::<Vec<_>>(),
            vec![0, 20, 3, 4]
        );
        list.apply_created(record(9));
        assert_eq!(list.len(), 5);
        assert!(list.find(&record(9).id).is_some());
    }

    #[tokio::test]
    async fn failed_fetch_leaves_an_empty_list() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let collection = Collection::<TallyRow>::new(&store, "tally");
        let mut list = ResourceList::default();
        assert_eq!(list.state(), FetchState::Idle);
        list.load(&collection, FAILURE).await;
        assert_eq!(list.state(), FetchState::Failed(FAILURE));
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn paged_mode_asks_the_store_for_one_page() {
        let store = MemoryStore::new();
        let collection = Collection::<TallyRow>::new(&store, "tally");
        for gold in 0..30 {
            collection
                .create(&TallyRow {
                    games: Sport::Archery,
                    gold,
                    silver: 0,
                    bronze: 0,
                })
                .await
                .unwrap();
        }
        let mut list = ResourceList::default();
        list.load_for(ListingMode::Paged, &collection, 2, FAILURE)
            .await;
        assert_eq!(list.state(), FetchState::Loaded);
        assert_eq!(list.page_count(), 2);
        assert_eq!(list.page(2).len(), 5);
        assert_eq!(list.page(2)[0].data.gold, 25);
        assert!(list.page(1).is_empty());
    }

    #[tokio::test]
    async fn created_records_join_only_the_last_page() {
        let store = MemoryStore::new();
        let collection = Collection::<TallyRow>::new(&store, "tally");
        let row = |gold| TallyRow {
            games: Sport::Hockey,
            gold,
            silver: 0,
            bronze: 0,
        };
        for gold in 0..25 {
            collection.create(&row(gold)).await.unwrap();
        }

        let mut full_page = ResourceList::default();
        full_page
            .load_for(ListingMode::Paged, &collection, 1, FAILURE)
            .await;
        let created = collection.create(&row(25)).await.unwrap();
        full_page.apply_created(created.clone());
        assert_eq!(full_page.page(1).len(), PAGE_SIZE);
        assert!(full_page.find(&created.id).is_none());
        assert_eq!(full_page.page_count(), 2);

        let mut last_page = ResourceList::default();
        last_page
            .load_for(ListingMode::Paged, &collection, 2, FAILURE)
            .await;
        let next = collection.create(&row(26)).await.unwrap();
        last_page.apply_created(next.clone());
        assert_eq!(last_page.page(2).len(), 2);
        assert!(last_page.find(&next.id).is_some());
    }
}
