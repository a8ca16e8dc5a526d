//! Contact, the single record type held by the directory.
//!
//! A contact is an immutable value. Updates produce a new value that is
//! written back under the same id; `id` and `created_at` never change after
//! creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, KeyKind};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The externally visible key of a contact: an opaque string token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for ContactId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for ContactId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

// ─── Record ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:         ContactId,
  pub created_at: DateTime<Utc>,
  pub avatar:     Option<String>,
  pub first:      Option<String>,
  pub last:       Option<String>,
  pub twitter:    Option<String>,
  pub notes:      Option<String>,
  #[serde(default)]
  pub favorite:   bool,
}

impl Contact {
  /// The search key: `first` and `last` joined by a space.
  ///
  /// Recomputed on every call and never persisted on its own.
  pub fn full(&self) -> Option<String> {
    full_name(self.first.as_deref(), self.last.as_deref())
  }

  pub fn with_favorite(self, favorite: bool) -> Self {
    Self { favorite, ..self }
  }
}

impl Entity for Contact {
  const TYPE_NAME: &'static str = "contact";
  const KEY_KIND: KeyKind = KeyKind::Text;
}

/// Join the present, non-empty name parts with a single space.
///
/// Returns `None` only when both parts are absent; two empty strings give
/// `Some("")`.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
  if first.is_none() && last.is_none() {
    return None;
  }
  let parts: Vec<&str> = [first, last]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();
  Some(parts.join(" "))
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Body accepted by create and update.
///
/// Carries no `id` or `createdAt`; serde drops those keys if a body
/// includes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
  pub avatar:   Option<String>,
  pub first:    Option<String>,
  pub last:     Option<String>,
  pub twitter:  Option<String>,
  pub notes:    Option<String>,
  /// Left out by edit forms; `None` keeps the stored flag.
  pub favorite: Option<bool>,
}

impl ContactInput {
  /// Build a brand-new contact with the given identity. An absent
  /// `favorite` means not a favorite.
  pub fn into_contact(self, id: ContactId, created_at: DateTime<Utc>) -> Contact {
    let favorite = self.favorite.unwrap_or(false);
    self.build(id, created_at, favorite)
  }

  /// Copy every field onto `current`, keeping its `id` and `created_at`.
  /// `favorite` is kept too unless the input sets it.
  pub fn apply_to(self, current: Contact) -> Contact {
    let favorite = self.favorite.unwrap_or(current.favorite);
    self.build(current.id, current.created_at, favorite)
  }

  fn build(self, id: ContactId, created_at: DateTime<Utc>, favorite: bool) -> Contact {
    Contact {
      id,
      created_at,
      avatar: self.avatar,
      first: self.first,
      last: self.last,
      twitter: self.twitter,
      notes: self.notes,
      favorite,
    }
  }
}
