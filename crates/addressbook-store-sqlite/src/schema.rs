//! SQL schema for the address book SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use addressbook_core::{contact::Contact, entity::Entity as _};

use crate::key::table_ddl;

/// Contact columns after the key.
///
/// `full_name` is a virtual generated column: it is computed from
/// `first_name` and `last_name` on read and exists only so it can be
/// indexed. Its expression mirrors `Contact::full`.
const CONTACT_COLUMN_DEFS: &str = "    created_at TEXT    NOT NULL,   -- RFC 3339 UTC; set once at creation
    avatar     TEXT,
    first_name TEXT,
    last_name  TEXT,
    twitter    TEXT,
    notes      TEXT,
    favorite   INTEGER NOT NULL DEFAULT 0,
    full_name  TEXT GENERATED ALWAYS AS (
      CASE
        WHEN first_name IS NULL AND last_name IS NULL THEN NULL
        WHEN first_name IS NULL OR first_name = ''   THEN coalesce(last_name, '')
        WHEN last_name  IS NULL OR last_name  = ''   THEN first_name
        ELSE first_name || ' ' || last_name
      END
    ) VIRTUAL";

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub fn schema() -> String {
  format!(
    "PRAGMA journal_mode = WAL;

{table}

CREATE INDEX IF NOT EXISTS {name}_last_idx ON {name}(last_name, id);
CREATE INDEX IF NOT EXISTS {name}_full_idx ON {name}(full_name);

PRAGMA user_version = 1;
",
    table = table_ddl::<Contact>(CONTACT_COLUMN_DEFS),
    name = Contact::TYPE_NAME,
  )
}
