use std::path::Path;

use contacts_core::search::filter_contacts;
use contacts_core::{Contact, ContactId, ContactSeed};
use rusqlite::Connection;
use tracing::{debug, info, instrument};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::{get, get_flag, get_opt};

const TABLE: &str = "contacts";

const SELECT_COLUMNS: &str =
    "SELECT id, first, last, avatar, twitter, notes, favorite, created_at FROM contacts";

/// The data collaborator behind the contact routes.
pub trait ContactStore: Send + Sync {
    /// Contacts matching `query`, in listing order. `None` or `""` lists everything.
    fn list(&self, query: Option<&str>) -> Result<Vec<Contact>, StoreError>;

    /// Create and persist a nameless, non-favorite contact.
    fn create_empty(&self) -> Result<Contact, StoreError>;

    /// Delete a contact. Returns whether a row was removed; unknown ids are not an error.
    fn delete(&self, id: &ContactId) -> Result<bool, StoreError>;

    fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}

pub struct ContactRepo {
    db: Database,
}

impl ContactRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a fully formed contact.
    #[instrument(skip(self, contact), fields(contact_id = %contact.id))]
    pub fn insert(&self, contact: &Contact) -> Result<(), StoreError> {
        self.db.with_conn(|conn| insert_row(conn, contact))
    }

    /// Seed the store from a JSON array of contacts, but only when it is empty.
    ///
    /// Returns the number of contacts inserted.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn seed_from_path(&self, path: &Path) -> Result<usize, StoreError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("read seed file {}: {e}", path.display())))?;
        let seeds: Vec<ContactSeed> = serde_json::from_str(&raw)?;
        self.seed(seeds)
    }

    pub fn seed(&self, seeds: Vec<ContactSeed>) -> Result<usize, StoreError> {
        if self.count()? > 0 {
            debug!("store already populated, skipping seed");
            return Ok(0);
        }
        let inserted = self.db.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let mut inserted = 0;
            for seed in seeds {
                insert_row(&tx, &Contact::from_seed(seed))?;
                inserted += 1;
            }
            tx.commit()?;
            Ok(inserted)
        })?;
        info!(inserted, "seeded contacts");
        Ok(inserted)
    }
}

impl ContactStore for ContactRepo {
    #[instrument(skip(self))]
    fn list(&self, query: Option<&str>) -> Result<Vec<Contact>, StoreError> {
        let all = self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY last, created_at, id"))?;
            let mut rows = stmt.query([])?;
            let mut contacts = Vec::new();
            while let Some(row) = rows.next()? {
                contacts.push(contact_from_row(row)?);
            }
            Ok(contacts)
        })?;
        let total = all.len();
        let contacts = filter_contacts(all, query);
        debug!(total, matched = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    #[instrument(skip(self))]
    fn create_empty(&self) -> Result<Contact, StoreError> {
        let contact = Contact::empty();
        self.insert(&contact)?;
        Ok(contact)
    }

    #[instrument(skip(self), fields(contact_id = %id))]
    fn delete(&self, id: &ContactId) -> Result<bool, StoreError> {
        let removed = self.db.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", [id.as_str()])?)
        })?;
        Ok(removed > 0)
    }

    #[instrument(skip(self), fields(contact_id = %id))]
    fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let mut rows = stmt.query([id.as_str()])?;
            match rows.next()? {
                Some(row) => Ok(Some(contact_from_row(row)?)),
                None => Ok(None),
            }
        })
    }

    fn count(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
            Ok(usize::try_from(n).unwrap_or_default())
        })
    }
}

fn insert_row(conn: &Connection, contact: &Contact) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO contacts (id, first, last, avatar, twitter, notes, favorite, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            contact.id.as_str(),
            contact.first,
            contact.last,
            contact.avatar,
            contact.twitter,
            contact.notes,
            contact.favorite,
            contact.created_at,
        ],
    )?;
    Ok(())
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> Result<Contact, StoreError> {
    Ok(Contact {
        id: ContactId::from_raw(get::<String>(row, 0, TABLE, "id")?),
        first: get_opt(row, 1, TABLE, "first")?,
        last: get_opt(row, 2, TABLE, "last")?,
        avatar: get_opt(row, 3, TABLE, "avatar")?,
        twitter: get_opt(row, 4, TABLE, "twitter")?,
        notes: get_opt(row, 5, TABLE, "notes")?,
        favorite: get_flag(row, 6, TABLE, "favorite")?,
        created_at: get(row, 7, TABLE, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn repo() -> ContactRepo {
        ContactRepo::new(Database::in_memory().unwrap())
    }

    fn seed(first: &str, last: &str) -> ContactSeed {
        ContactSeed {
            first: Some(first.into()),
            last: Some(last.into()),
            ..ContactSeed::default()
        }
    }

    #[test]
    fn create_empty_persists_nameless_contact() {
        let repo = repo();
        let created = repo.create_empty().unwrap();
        let fetched = repo.get(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.first.is_none());
        assert!(fetched.last.is_none());
        assert!(!fetched.favorite);
    }

    #[test]
    fn create_empty_mints_distinct_ids() {
        let repo = repo();
        let a = repo.create_empty().unwrap();
        let b = repo.create_empty().unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn list_orders_by_last_name_then_creation() {
        let repo = repo();
        repo.seed(vec![seed("Zoe", "Young"), seed("Adam", "Baker")]).unwrap();
        let nameless = repo.create_empty().unwrap();
        let lasts: Vec<Option<String>> =
            repo.list(None).unwrap().into_iter().map(|c| c.last).collect();
        assert_eq!(lasts, vec![None, Some("Baker".into()), Some("Young".into())]);
        assert_eq!(repo.list(None).unwrap()[0].id, nameless.id);
    }

    #[test]
    fn list_breaks_last_name_ties_by_creation_then_id() {
        let repo = repo();
        let contact = |id: &str, created_at: &str| Contact {
            id: ContactId::from_raw(id),
            last: Some("Same".into()),
            created_at: created_at.into(),
            ..Contact::empty()
        };
        repo.insert(&contact("ct_b", "2024-01-02T00:00:00.000000Z")).unwrap();
        repo.insert(&contact("ct_c", "2024-01-01T00:00:00.000000Z")).unwrap();
        repo.insert(&contact("ct_a", "2024-01-02T00:00:00.000000Z")).unwrap();

        let ids: Vec<String> = repo
            .list(None)
            .unwrap()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["ct_c", "ct_a", "ct_b"]);
    }

    #[test]
    fn list_filters_by_query() {
        let repo = repo();
        repo.seed(vec![seed("Zoe", "Young"), seed("Adam", "Baker")]).unwrap();
        let found = repo.list(Some("bak")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first.as_deref(), Some("Adam"));
        assert_eq!(repo.list(Some("")).unwrap().len(), 2);
        assert!(repo.list(Some("qqq")).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let repo = repo();
        let keep = repo.create_empty().unwrap();
        let gone = repo.create_empty().unwrap();
        assert!(repo.delete(&gone.id).unwrap());
        assert!(repo.get(&gone.id).unwrap().is_none());
        assert!(repo.get(&keep.id).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn delete_unknown_id_is_not_an_error() {
        let repo = repo();
        assert!(!repo.delete(&ContactId::from_raw("missing")).unwrap());
    }

    #[test]
    fn seed_skips_populated_store() {
        let repo = repo();
        assert_eq!(repo.seed(vec![seed("A", "B")]).unwrap(), 1);
        assert_eq!(repo.seed(vec![seed("C", "D")]).unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn seed_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[{"first": "Ada", "last": "Lovelace", "favorite": true}, {"twitter": "@nobody"}]"#,
        )
        .unwrap();
        let repo = repo();
        assert_eq!(repo.seed_from_path(&path).unwrap(), 2);
        let all = repo.list(None).unwrap();
        assert_eq!(all[0].twitter.as_deref(), Some("@nobody"));
        assert!(all[1].favorite);
    }

    #[test]
    fn seed_from_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, "not json").unwrap();
        assert_matches!(repo().seed_from_path(&path), Err(StoreError::Serialization(_)));
    }

    #[test]
    fn seed_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            repo().seed_from_path(&dir.path().join("absent.json")),
            Err(StoreError::Io(_))
        );
    }

    #[test]
    fn corrupt_favorite_is_reported() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contacts (id, favorite, created_at) VALUES ('x', 5, 'now')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        let repo = ContactRepo::new(db);
        assert_matches!(
            repo.list(None),
            Err(StoreError::CorruptRow { column: "favorite", .. })
        );
    }
}
