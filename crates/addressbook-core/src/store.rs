//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `addressbook-store-sqlite`). Every mutation is atomic per key; that
//! guarantee belongs to the backend, the [`Directory`](crate::directory)
//! holds no state of its own.

use std::future::Future;

use crate::contact::{Contact, ContactId};

/// Secondary indexes a store can scan with [`ContactStore::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactIndex {
  /// The derived `first last` name.
  Full,
  /// The last name; also the sort order of every scan.
  Last,
}

/// Abstraction over a contact store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new contact.
  ///
  /// Returns `None`, writing nothing, if a contact with the same id already
  /// exists.
  fn create(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn read<'a>(
    &'a self,
    id: &'a ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Replace a contact with `mutator(current)` in a single transaction.
  ///
  /// The id of the value returned by `mutator` is ignored; the record stays
  /// under `id`. Returns the stored value, or `None` if `id` is absent.
  fn update<'a, F>(
    &'a self,
    id: &'a ContactId,
    mutator: F,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a
  where
    F: FnOnce(Contact) -> Contact + Send + 'static;

  /// Remove a contact, returning the removed value. `None` if absent.
  fn delete<'a>(
    &'a self,
    id: &'a ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// All contacts, ordered by last name.
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Contacts whose value in `index` satisfies `predicate`, in the same order
  /// as [`list`](Self::list).
  ///
  /// Contacts with no value in the index are skipped without consulting the
  /// predicate.
  fn filter<P>(
    &self,
    index: ContactIndex,
    predicate: P,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_
  where
    P: Fn(&str) -> bool + Send + 'static;

  /// Whether the store holds no contacts at all.
  fn is_empty(&self) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
