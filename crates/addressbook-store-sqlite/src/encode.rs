//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; the favorite flag as 0/1.

use addressbook_core::contact::{Contact, ContactId};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Column list shared by every `SELECT` so [`decode_contact`] can read by
/// position.
pub const CONTACT_COLUMNS: &str =
  "id, created_at, avatar, first_name, last_name, twitter, notes, favorite";

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Contact fields in `CONTACT_COLUMNS` order, ready to bind.
pub struct EncodedContact {
  pub id:         String,
  pub created_at: String,
  pub avatar:     Option<String>,
  pub first:      Option<String>,
  pub last:       Option<String>,
  pub twitter:    Option<String>,
  pub notes:      Option<String>,
  pub favorite:   bool,
}

impl EncodedContact {
  pub fn new(contact: Contact) -> Self {
    Self {
      id:         contact.id.into_inner(),
      created_at: encode_dt(contact.created_at),
      avatar:     contact.avatar,
      first:      contact.first,
      last:       contact.last,
      twitter:    contact.twitter,
      notes:      contact.notes,
      favorite:   contact.favorite,
    }
  }
}

/// Read a contact from a row selected with [`CONTACT_COLUMNS`].
pub fn decode_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  let created_at: String = row.get(1)?;
  let created_at = decode_dt(&created_at)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

  Ok(Contact {
    id: ContactId::new(row.get::<_, String>(0)?),
    created_at,
    avatar: row.get(2)?,
    first: row.get(3)?,
    last: row.get(4)?,
    twitter: row.get(5)?,
    notes: row.get(6)?,
    favorite: row.get(7)?,
  })
}
