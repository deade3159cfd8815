//! Store doubles for handler tests.

use std::sync::Arc;

use contacts_core::{Contact, ContactId, ContactSeed};
use contacts_store::{ContactRepo, ContactStore, Database, StoreError};
use parking_lot::Mutex;

/// A real repository over an in-memory database, seeded with `names`.
pub fn memory_store(names: &[(&str, &str)]) -> Arc<ContactRepo> {
    let repo = ContactRepo::new(Database::in_memory().unwrap());
    let seeds = names
        .iter()
        .map(|(first, last)| ContactSeed {
            first: Some((*first).to_string()),
            last: Some((*last).to_string()),
            ..ContactSeed::default()
        })
        .collect();
    repo.seed(seeds).unwrap();
    Arc::new(repo)
}

/// Returns the same contacts for every query and records the queries it saw.
pub struct FixedStore {
    pub contacts: Vec<Contact>,
    pub queries: Mutex<Vec<Option<String>>>,
}

impl FixedStore {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl ContactStore for FixedStore {
    fn list(&self, query: Option<&str>) -> Result<Vec<Contact>, StoreError> {
        self.queries.lock().push(query.map(str::to_string));
        Ok(self.contacts.clone())
    }

    fn create_empty(&self) -> Result<Contact, StoreError> {
        Ok(Contact::empty())
    }

    fn delete(&self, _id: &ContactId) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        Ok(self.contacts.iter().find(|c| &c.id == id).cloned())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.contacts.len())
    }
}

/// Fails every call.
pub struct FailingStore;

impl ContactStore for FailingStore {
    fn list(&self, _query: Option<&str>) -> Result<Vec<Contact>, StoreError> {
        Err(StoreError::Database("disk I/O error".into()))
    }

    fn create_empty(&self) -> Result<Contact, StoreError> {
        Err(StoreError::Database("disk I/O error".into()))
    }

    fn delete(&self, _id: &ContactId) -> Result<bool, StoreError> {
        Err(StoreError::Database("disk I/O error".into()))
    }

    fn get(&self, _id: &ContactId) -> Result<Option<Contact>, StoreError> {
        Err(StoreError::Database("disk I/O error".into()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Database("disk I/O error".into()))
    }
}
