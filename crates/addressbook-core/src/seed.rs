//! First-boot seed data.
//!
//! The dataset ships inside the binary. It is loaded once, right after a new
//! database file has been created, and never touches a store that already
//! holds contacts.

use chrono::Utc;
use serde::Deserialize;

use crate::{
  Error, Result,
  contact::ContactInput,
  identity,
  store::ContactStore,
};

const BUNDLED: &str = include_str!("../seed/contacts.json");

/// The seed contacts, without ids or timestamps.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SeedData {
  pub contacts: Vec<ContactInput>,
}

impl SeedData {
  /// The dataset bundled with the crate.
  pub fn bundled() -> Result<Self> { Self::from_json(BUNDLED) }

  pub fn from_json(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }
}

/// Insert every seed contact under its slug id, stamped with the load time.
///
/// Does nothing if the store is not empty. Seed entries whose slug is
/// already taken are skipped. Returns the number of contacts inserted.
pub async fn load<S: ContactStore>(store: &S, data: SeedData) -> Result<usize> {
  if !store.is_empty().await.map_err(Error::store)? {
    tracing::info!("store already has contacts; skipping seed data");
    return Ok(0);
  }

  let now = Utc::now();
  let mut inserted = 0;
  for input in data.contacts {
    let id = identity::slug(input.first.as_deref(), input.last.as_deref());
    let contact = input.into_contact(id.clone(), now);
    match store.create(contact).await.map_err(Error::store)? {
      Some(_) => inserted += 1,
      None => tracing::warn!(%id, "duplicate seed contact skipped"),
    }
  }

  tracing::info!(count = inserted, "loaded seed contacts");
  Ok(inserted)
}
