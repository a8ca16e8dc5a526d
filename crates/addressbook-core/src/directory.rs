//! [`Directory`]: the operations exposed to the transport layer.
//!
//! Each operation takes plain values, delegates the mutation to the
//! [`ContactStore`], and reports an absent id as
//! [`Error::ContactNotFound`]. Backend failures pass through as
//! [`Error::Store`] without retry.

use std::sync::Arc;

use chrono::Utc;

use crate::{
  Error, Result,
  contact::{Contact, ContactId, ContactInput},
  identity,
  search::Query,
  store::{ContactIndex, ContactStore},
};

/// The contact directory, bound to one store.
///
/// Cloning is cheap; clones share the store.
pub struct Directory<S> {
  store: Arc<S>,
}

impl<S> Clone for Directory<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> Directory<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All contacts when `query` is absent or empty; otherwise those whose
  /// full name fuzzy-matches it. Store order is kept either way.
  pub async fn list(&self, query: Option<&str>) -> Result<Vec<Contact>> {
    let contacts = match Query::parse(query) {
      None => self.store.list().await,
      Some(q) => {
        self
          .store
          .filter(ContactIndex::Full, move |full| q.matches(full))
          .await
      }
    };
    contacts.map_err(Error::store)
  }

  /// Create a contact under a fresh random id, stamped with the current time.
  pub async fn create(&self, input: ContactInput) -> Result<Contact> {
    let id = identity::random_token(&mut rand::thread_rng());
    let contact = input.into_contact(id.clone(), Utc::now());

    let created = self
      .store
      .create(contact)
      .await
      .map_err(Error::store)?
      .ok_or(Error::IdCollision(id))?;

    tracing::debug!(id = %created.id, "created contact");
    Ok(created)
  }

  pub async fn read(&self, id: &ContactId) -> Result<Contact> {
    self
      .store
      .read(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::ContactNotFound(id.clone()))
  }

  /// Overwrite every field except `id` and `created_at`.
  pub async fn update(&self, id: &ContactId, input: ContactInput) -> Result<Contact> {
    let updated = self
      .store
      .update(id, move |current| input.apply_to(current))
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::ContactNotFound(id.clone()))?;

    tracing::debug!(%id, "updated contact");
    Ok(updated)
  }

  /// Remove a contact and return what was removed.
  pub async fn delete(&self, id: &ContactId) -> Result<Contact> {
    let deleted = self
      .store
      .delete(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::ContactNotFound(id.clone()))?;

    tracing::debug!(%id, "deleted contact");
    Ok(deleted)
  }

  /// Set only the `favorite` flag.
  pub async fn favorite(&self, id: &ContactId, value: bool) -> Result<Contact> {
    let updated = self
      .store
      .update(id, move |current| current.with_favorite(value))
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::ContactNotFound(id.clone()))?;

    tracing::debug!(%id, favorite = value, "set favorite");
    Ok(updated)
  }
}
