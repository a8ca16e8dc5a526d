//! Primary-key encoding per entity.
//!
//! The column type of each table's key follows the entity's declared
//! [`KeyKind`]: text keys are supplied by the caller, integer keys are
//! assigned by SQLite.

use addressbook_core::entity::{Entity, KeyKind};

pub fn key_column(kind: KeyKind) -> &'static str {
  match kind {
    KeyKind::Text => "TEXT PRIMARY KEY NOT NULL",
    KeyKind::Integer => "INTEGER PRIMARY KEY AUTOINCREMENT",
  }
}

/// `CREATE TABLE` for entity `E`, keyed according to `E::KEY_KIND`.
///
/// `columns` is the comma-separated list of the remaining column
/// definitions.
pub fn table_ddl<E: Entity>(columns: &str) -> String {
  format!(
    "CREATE TABLE IF NOT EXISTS {table} (\n    id {key},\n{columns}\n);",
    table = E::TYPE_NAME,
    key = key_column(E::KEY_KIND),
  )
}
