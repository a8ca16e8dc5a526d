//! [`SqliteStore`]: the SQLite implementation of [`ContactStore`].

use std::{path::Path, sync::Arc};

use addressbook_core::{
  contact::{Contact, ContactId},
  entity::Entity as _,
  store::{ContactIndex, ContactStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, EncodedContact, decode_contact},
  schema::schema,
};

// ─── Statements ──────────────────────────────────────────────────────────────

/// SQL text for the contact table, built once per store.
struct Statements {
  insert:      String,
  select_one:  String,
  update:      String,
  delete:      String,
  list:        String,
  filter_full: String,
  filter_last: String,
  any:         String,
}

impl Statements {
  fn new(table: &str) -> Self {
    // Every scan follows the last-name index.
    let order = "ORDER BY last_name, id";
    Self {
      insert:      format!(
        "INSERT INTO {table} ({CONTACT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO NOTHING"
      ),
      select_one:  format!("SELECT {CONTACT_COLUMNS} FROM {table} WHERE id = ?1"),
      update:      format!(
        "UPDATE {table}
         SET created_at = ?2, avatar = ?3, first_name = ?4, last_name = ?5,
             twitter = ?6, notes = ?7, favorite = ?8
         WHERE id = ?1"
      ),
      delete:      format!("DELETE FROM {table} WHERE id = ?1"),
      list:        format!("SELECT {CONTACT_COLUMNS} FROM {table} {order}"),
      filter_full: format!(
        "SELECT {CONTACT_COLUMNS}, full_name FROM {table} WHERE full_name IS NOT NULL {order}"
      ),
      filter_last: format!(
        "SELECT {CONTACT_COLUMNS}, last_name FROM {table} WHERE last_name IS NOT NULL {order}"
      ),
      any:         format!("SELECT EXISTS (SELECT 1 FROM {table})"),
    }
  }

  fn filter(&self, index: ContactIndex) -> &str {
    match index {
      ContactIndex::Full => &self.filter_full,
      ContactIndex::Last => &self.filter_last,
    }
  }
}

/// Position of the indexed value appended to `filter_*` selects.
const INDEXED_VALUE: usize = 8;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  sql:  Arc<Statements>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let ddl = schema();
    conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    tracing::debug!("contact schema ready");
    Ok(Self { conn, sql: Arc::new(Statements::new(Contact::TYPE_NAME)) })
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, contact: Contact) -> Result<Option<Contact>> {
    let sql = Arc::clone(&self.sql);
    let row = EncodedContact::new(contact.clone());

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          &sql.insert,
          rusqlite::params![
            row.id,
            row.created_at,
            row.avatar,
            row.first,
            row.last,
            row.twitter,
            row.notes,
            row.favorite,
          ],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(inserted.then_some(contact))
  }

  async fn read(&self, id: &ContactId) -> Result<Option<Contact>> {
    let sql = Arc::clone(&self.sql);
    let id = id.as_str().to_owned();

    let contact = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql.select_one, rusqlite::params![id], decode_contact)
            .optional()?,
        )
      })
      .await?;
    Ok(contact)
  }

  async fn update<F>(&self, id: &ContactId, mutator: F) -> Result<Option<Contact>>
  where
    F: FnOnce(Contact) -> Contact + Send + 'static,
  {
    let sql = Arc::clone(&self.sql);
    let id = id.clone();

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(&sql.select_one, rusqlite::params![id.as_str()], decode_contact)
          .optional()?;
        let Some(current) = current else {
          return Ok(None);
        };

        let next = Contact { id, ..mutator(current) };
        let row = EncodedContact::new(next.clone());
        tx.execute(
          &sql.update,
          rusqlite::params![
            row.id,
            row.created_at,
            row.avatar,
            row.first,
            row.last,
            row.twitter,
            row.notes,
            row.favorite,
          ],
        )?;
        tx.commit()?;
        Ok(Some(next))
      })
      .await?;
    Ok(updated)
  }

  async fn delete(&self, id: &ContactId) -> Result<Option<Contact>> {
    let sql = Arc::clone(&self.sql);
    let id = id.as_str().to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(&sql.select_one, rusqlite::params![id], decode_contact)
          .optional()?;
        if current.is_some() {
          tx.execute(&sql.delete, rusqlite::params![id])?;
          tx.commit()?;
        }
        Ok(current)
      })
      .await?;
    Ok(deleted)
  }

  async fn list(&self) -> Result<Vec<Contact>> {
    let sql = Arc::clone(&self.sql);

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql.list)?;
        let rows = stmt
          .query_map([], decode_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(contacts)
  }

  async fn filter<P>(&self, index: ContactIndex, predicate: P) -> Result<Vec<Contact>>
  where
    P: Fn(&str) -> bool + Send + 'static,
  {
    let sql = Arc::clone(&self.sql);

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql.filter(index))?;
        let mut rows = stmt.query([])?;
        let mut matched = Vec::new();
        while let Some(row) = rows.next()? {
          let value: String = row.get(INDEXED_VALUE)?;
          if predicate(&value) {
            matched.push(decode_contact(row)?);
          }
        }
        Ok(matched)
      })
      .await?;
    Ok(contacts)
  }

  async fn is_empty(&self) -> Result<bool> {
    let sql = Arc::clone(&self.sql);

    let any: bool = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql.any, [], |r| r.get(0))?))
      .await?;
    Ok(!any)
  }
}
