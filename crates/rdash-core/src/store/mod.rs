//! In-memory record repositories.

mod page;
mod query;

pub use page::{Page, PageRequest};
pub use query::{MatchAll, ProjectQuery, Query, TeamSizeBucket, TokenQuery};
use thiserror::Error;

/// A keyed record stored in a [`Repository`].
pub trait Record: Clone {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a record with key {0:?} already exists")]
    DuplicateKey(String),
    #[error("no record with key {0:?}")]
    NotFound(String),
    #[error("the key of record {0:?} cannot be changed")]
    KeyChanged(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed collection with filtered, paginated listing.
pub trait Repository<T: Record> {
    /// Filters with `query`, then cuts out the requested page.
    fn list<Q: Query<T> + ?Sized>(&self, query: &Q, request: PageRequest) -> Page<T>;

    fn get(&self, key: &str) -> Option<&T>;

    /// Inserts a new record.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateKey`] when the key is taken.
    fn insert(&mut self, record: T) -> StoreResult<()>;

    /// Applies `f` to the record stored under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for unknown keys and
    /// [`StoreError::KeyChanged`] if `f` re-keys the record, in which case
    /// the record is left as it was.
    fn modify<F>(&mut self, key: &str, f: F) -> StoreResult<&T>
    where
        F: FnOnce(&mut T);

    /// # Errors
    /// Returns [`StoreError::NotFound`] for unknown keys.
    fn remove(&mut self, key: &str) -> StoreResult<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vector-backed repository preserving insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRepository<T> {
    records: Vec<T>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from seed records.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateKey`] if two records share a key.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> StoreResult<Self> {
        let mut repo = Self::new();
        for record in records {
            repo.insert(record)?;
        }
        Ok(repo)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list<Q: Query<T> + ?Sized>(&self, query: &Q, request: PageRequest) -> Page<T> {
        let matching: Vec<&T> = self.records.iter().filter(|r| query.matches(r)).collect();
        Page::from_matches(&matching, request)
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.position(key).map(|i| &self.records[i])
    }

    fn insert(&mut self, record: T) -> StoreResult<()> {
        if self.position(record.key()).is_some() {
            return Err(StoreError::DuplicateKey(record.key().to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    fn modify<F>(&mut self, key: &str, f: F) -> StoreResult<&T>
    where
        F: FnOnce(&mut T),
    {
        let idx = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let original = self.records[idx].clone();
        f(&mut self.records[idx]);
        if self.records[idx].key() != original.key() {
            self.records[idx] = original;
            return Err(StoreError::KeyChanged(key.to_string()));
        }
        Ok(&self.records[idx])
    }

    fn remove(&mut self, key: &str) -> StoreResult<T> {
        let idx = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(self.records.remove(idx))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Record for Item {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let mut repo = MemoryRepository::new();
        repo.insert(item("a", 1)).unwrap();
        let err = repo.insert(item("a", 2)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey("a".into()));
        assert_eq!(repo.get("a").unwrap().value, 1);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_modify_cannot_rekey() {
        let mut repo = MemoryRepository::from_records([item("a", 1)]).unwrap();
        let err = repo
            .modify("a", |it| {
                it.id = "b".into();
                it.value = 5;
            })
            .unwrap_err();
        assert_eq!(err, StoreError::KeyChanged("a".into()));
        assert!(repo.get("b").is_none());
        assert_eq!(repo.get("a").unwrap().value, 1);
    }

    #[test]
    fn test_modify_updates_in_place() {
        let mut repo = MemoryRepository::from_records([item("a", 1), item("b", 2)]).unwrap();
        let updated = repo.modify("b", |it| it.value = 20).unwrap();
        assert_eq!(updated.value, 20);
        let order: Vec<_> = repo.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn test_remove_and_missing_keys() {
        let mut repo = MemoryRepository::from_records([item("a", 1)]).unwrap();
        assert_eq!(repo.remove("a").unwrap().value, 1);
        assert!(repo.is_empty());
        assert_eq!(repo.remove("a"), Err(StoreError::NotFound("a".into())));
        assert!(repo.modify("a", |_| {}).is_err());
    }

    #[test]
    fn test_list_filters_before_paging() {
        struct Even;
        impl Query<Item> for Even {
            fn matches(&self, item: &Item) -> bool {
                item.value % 2 == 0
            }
        }

        let repo =
            MemoryRepository::from_records((1..=10).map(|i| item(&format!("k{i}"), i))).unwrap();
        let page = repo.list(&Even, PageRequest::new(2, 3));
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 2);
        let values: Vec<_> = page.items.iter().map(|i| i.value).collect();
        assert_eq!(values, [8, 10]);
    }
}
