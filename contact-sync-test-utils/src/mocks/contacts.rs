//! In-memory contact table

use async_trait::async_trait;
use contact_sync_core::error::InternalError;
use contact_sync_core::traits::ContactRepository;
use contact_sync_core::{Contact, Error, GuestRecord, Result, email_key};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Contact table kept in a vector, in insertion order
///
/// Inserts skip rows whose (email, website) pair already exists, comparing
/// emails without case. Saves can be
/// made to fail after a number of successful calls.
#[derive(Clone, Default)]
pub struct MemoryContactRepository {
    state: Arc<Mutex<ContactState>>,
}

#[derive(Default)]
struct ContactState {
    contacts: Vec<Contact>,
    next_id: i64,
    bulk_insert_calls: usize,
    saves: usize,
    fail_save_after: Option<usize>,
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing contact and return its id
    pub fn add_contact(&self, email: &str, website_id: i64, is_guest: bool) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.contacts.push(Contact {
            id,
            email: email.to_string(),
            website_id,
            store_id: website_id,
            is_guest,
            email_imported: false,
        });
        id
    }

    /// Let `count` saves succeed, then fail every following save
    pub fn fail_saves_after(&self, count: usize) {
        self.state.lock().unwrap().fail_save_after = Some(count);
    }

    /// Snapshot of the table
    pub fn contacts(&self) -> Vec<Contact> {
        self.state.lock().unwrap().contacts.clone()
    }

    pub fn bulk_insert_calls(&self) -> usize {
        self.state.lock().unwrap().bulk_insert_calls
    }

    /// Guests of a website already flagged as exported
    pub fn imported_guests(&self, website_id: i64) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .contacts
            .iter()
            .filter(|c| c.website_id == website_id && c.is_guest && c.email_imported)
            .map(|c| c.email.clone())
            .collect()
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn find_all_emails(&self) -> Result<HashSet<String>> {
        let state = self.state.lock().unwrap();
        Ok(state.contacts.iter().map(|c| email_key(&c.email)).collect())
    }

    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.bulk_insert_calls += 1;

        let mut inserted = 0;
        for record in records {
            let key = email_key(&record.email);
            let exists = state
                .contacts
                .iter()
                .any(|c| email_key(&c.email) == key && c.website_id == record.website_id);
            if exists {
                continue;
            }

            state.next_id += 1;
            let id = state.next_id;
            state.contacts.push(Contact {
                id,
                email: record.email.clone(),
                website_id: record.website_id,
                store_id: record.store_id,
                is_guest: record.is_guest,
                email_imported: false,
            });
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn find_unimported_guests(&self, website_id: i64) -> Result<Vec<Contact>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .contacts
            .iter()
            .filter(|c| c.website_id == website_id && c.is_guest && !c.email_imported)
            .cloned()
            .collect())
    }

    async fn save(&self, contact: &Contact) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_save_after.is_some_and(|limit| state.saves >= limit) {
            return Err(Error::Internal(InternalError::storage(
                "contact table is read-only",
            )));
        }
        state.saves += 1;

        match state.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(())
            }
            None => Err(Error::Internal(InternalError::storage(format!(
                "contact {} does not exist",
                contact.id
            )))),
        }
    }
}
