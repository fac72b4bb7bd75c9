//! Contact business rules.
//!
//! # Responsibilities
//! - CRUD over the stored collection
//! - Id assignment (`max + 1`)
//! - Read-only queries: summary, name search, email providers
//!
//! # Design Decisions
//! - The collection is reloaded on every call; nothing is cached
//! - One async mutex covers each load→mutate→save sequence, so concurrent
//!   writers cannot compute the same id or overwrite each other's changes
//! - Validation runs before the lock is taken and before any storage access

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::types::{Contact, ContactError, ContactResult, ContactSummary};
use super::validation::validate_contact;
use crate::observability::metrics;
use crate::storage::ContactStore;

/// Service layer sitting between the HTTP handlers and the store.
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    lock: Mutex<()>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Every stored contact, in insertion order.
    pub async fn get_all(&self) -> ContactResult<Vec<Contact>> {
        let _guard = self.lock.lock().await;
        self.load()
    }

    /// Validate `candidate`, give it the next id and append it.
    ///
    /// Any id on the candidate is ignored.
    pub async fn add(&self, candidate: Contact) -> ContactResult<Contact> {
        reject_invalid(&candidate)?;

        let _guard = self.lock.lock().await;
        let mut contacts = self.load()?;

        let contact = Contact {
            id: next_id(&contacts)?,
            ..candidate
        };
        contacts.push(contact.clone());
        self.persist(&contacts)?;

        tracing::info!(id = contact.id, name = %contact.name, "Contact created");
        Ok(contact)
    }

    pub async fn get_by_id(&self, id: u64) -> ContactResult<Contact> {
        let _guard = self.lock.lock().await;
        self.load()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound(id))
    }

    /// Replace name, email and phone of contact `id`. The id itself never changes.
    pub async fn update_by_id(&self, id: u64, candidate: Contact) -> ContactResult<Contact> {
        reject_invalid(&candidate)?;

        let _guard = self.lock.lock().await;
        let mut contacts = self.load()?;

        let existing = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound(id))?;
        existing.name = candidate.name;
        existing.email = candidate.email;
        existing.phone = candidate.phone;
        let updated = existing.clone();

        self.persist(&contacts)?;

        tracing::info!(id, "Contact updated");
        Ok(updated)
    }

    pub async fn delete_by_id(&self, id: u64) -> ContactResult<()> {
        let _guard = self.lock.lock().await;
        let mut contacts = self.load()?;

        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(ContactError::NotFound(id))?;
        contacts.remove(index);

        self.persist(&contacts)?;

        tracing::info!(id, "Contact deleted");
        Ok(())
    }

    pub async fn summary(&self) -> ContactResult<ContactSummary> {
        let _guard = self.lock.lock().await;
        Ok(summarize(&self.load()?))
    }

    /// Case-insensitive substring match on the name. An empty query matches everything.
    pub async fn search_by_name(&self, query: &str) -> ContactResult<Vec<Contact>> {
        let _guard = self.lock.lock().await;
        let needle = query.to_lowercase();
        let matches: Vec<Contact> = self
            .load()?
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();

        tracing::debug!(query, matches = matches.len(), "Searched contacts by name");
        Ok(matches)
    }

    /// Number of contacts per lowercased email domain.
    pub async fn email_providers(&self) -> ContactResult<BTreeMap<String, usize>> {
        let _guard = self.lock.lock().await;
        let mut providers = BTreeMap::new();
        for contact in self.load()? {
            if let Some(domain) = email_domain(&contact.email) {
                *providers.entry(domain).or_insert(0) += 1;
            }
        }
        Ok(providers)
    }

    fn load(&self) -> ContactResult<Vec<Contact>> {
        self.store.load().map_err(|e| {
            tracing::error!(error = %e, "Failed to load contacts");
            ContactError::Storage(e)
        })
    }

    fn persist(&self, contacts: &[Contact]) -> ContactResult<()> {
        match self.store.save(contacts) {
            Ok(()) => {
                metrics::record_storage_write(true);
                metrics::set_contacts_total(contacts.len());
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save contacts");
                metrics::record_storage_write(false);
                Err(ContactError::Storage(e))
            }
        }
    }
}

fn reject_invalid(candidate: &Contact) -> ContactResult<()> {
    validate_contact(candidate).map_err(|e| {
        tracing::warn!(error = %e, "Rejected contact");
        ContactError::Validation(e)
    })
}

fn next_id(contacts: &[Contact]) -> ContactResult<u64> {
    match contacts.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            tracing::error!(max_id = max, "Contact ids exhausted");
            ContactError::IdSpaceExhausted(max)
        }),
    }
}

fn summarize(contacts: &[Contact]) -> ContactSummary {
    let mut name_counts: BTreeMap<String, usize> = BTreeMap::new();
    for contact in contacts {
        *name_counts.entry(contact.name.to_lowercase()).or_insert(0) += 1;
    }

    ContactSummary {
        total: contacts.len(),
        with_email: contacts.iter().filter(|c| c.has_email()).count(),
        with_phone: contacts.iter().filter(|c| c.has_phone()).count(),
        last_contact_name: contacts.last().map(|c| c.name.clone()).unwrap_or_default(),
        // BTreeMap iteration keeps these sorted.
        duplicated_names: name_counts
            .into_iter()
            .filter(|(_, count)| *count >= 2)
            .map(|(name, _)| name)
            .collect(),
    }
}

/// Lowercased domain of `local@domain`; `None` unless there is exactly one `@`
/// with something on both sides.
fn email_domain(email: &str) -> Option<String> {
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(domain.to_lowercase())
}
