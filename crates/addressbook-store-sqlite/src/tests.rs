//! Integration tests for `SqliteStore` and the directory built on it.

use std::sync::Arc;

use addressbook_core::{
  Error as CoreError,
  contact::{Contact, ContactId, ContactInput},
  directory::Directory,
  seed::{self, SeedData},
  store::{ContactIndex, ContactStore},
};
use chrono::{TimeZone, Utc};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn directory() -> Directory<SqliteStore> {
  Directory::new(Arc::new(store().await))
}

fn input(first: &str, last: &str) -> ContactInput {
  ContactInput {
    first: Some(first.into()),
    last: Some(last.into()),
    ..Default::default()
  }
}

fn contact(id: &str, first: Option<&str>, last: Option<&str>) -> Contact {
  ContactInput {
    first: first.map(str::to_owned),
    last: last.map(str::to_owned),
    ..Default::default()
  }
  .into_contact(ContactId::new(id), Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

fn names(contacts: &[Contact]) -> Vec<String> {
  contacts.iter().filter_map(Contact::full).collect()
}

// ─── Store primitives ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_read_roundtrip() {
  let s = store().await;
  let mut c = contact("ada", Some("Ada"), Some("Lovelace"));
  c.twitter = Some("@ada".into());
  c.notes = Some("first programmer".into());
  c.favorite = true;

  let created = s.create(c.clone()).await.unwrap();
  assert_eq!(created.as_ref(), Some(&c));

  let fetched = s.read(&c.id).await.unwrap();
  assert_eq!(fetched, Some(c));
}

#[tokio::test]
async fn create_rejects_taken_id() {
  let s = store().await;
  s.create(contact("dup", Some("Ada"), Some("Lovelace"))).await.unwrap();

  let second = s.create(contact("dup", Some("Grace"), Some("Hopper"))).await.unwrap();
  assert!(second.is_none());

  let stored = s.read(&ContactId::new("dup")).await.unwrap().unwrap();
  assert_eq!(stored.first.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn read_missing_returns_none() {
  let s = store().await;
  assert!(s.read(&ContactId::new("nope")).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_ordered_by_last_name() {
  let s = store().await;
  s.create(contact("c", Some("Grace"), Some("Hopper"))).await.unwrap();
  s.create(contact("a", Some("Ada"), Some("Lovelace"))).await.unwrap();
  s.create(contact("b", Some("Alan"), Some("Turing"))).await.unwrap();
  s.create(contact("d", Some("Charles"), Some("Babbage"))).await.unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(
    names(&all),
    vec!["Charles Babbage", "Grace Hopper", "Ada Lovelace", "Alan Turing"]
  );
}

#[tokio::test]
async fn filter_skips_contacts_without_index_value() {
  let s = store().await;
  s.create(contact("anon", None, None)).await.unwrap();
  s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();

  // A predicate that accepts everything still never sees the nameless row.
  let hits = s.filter(ContactIndex::Full, |_| true).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, ContactId::new("ada"));
}

#[tokio::test]
async fn filter_offers_the_derived_full_name() {
  let s = store().await;
  s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();
  s.create(contact("hopper", None, Some("Hopper"))).await.unwrap();
  s.create(contact("grace", Some("Grace"), Some(""))).await.unwrap();

  let full = s
    .filter(ContactIndex::Full, |v| matches!(v, "Ada Lovelace" | "Hopper" | "Grace"))
    .await
    .unwrap();
  assert_eq!(full.len(), 3);
}

#[tokio::test]
async fn filter_by_last_name_index() {
  let s = store().await;
  s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();
  s.create(contact("grace", Some("Grace"), Some("Hopper"))).await.unwrap();
  s.create(contact("prince", Some("Prince"), None)).await.unwrap();

  let hits = s
    .filter(ContactIndex::Last, |last| last.to_lowercase().contains("hop"))
    .await
    .unwrap();
  assert_eq!(names(&hits), vec!["Grace Hopper"]);
}

#[tokio::test]
async fn update_keeps_the_key() {
  let s = store().await;
  s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();

  let updated = s
    .update(&ContactId::new("ada"), |c| Contact {
      id: ContactId::new("other"),
      first: Some("Augusta".into()),
      ..c
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.id, ContactId::new("ada"));

  assert!(s.read(&ContactId::new("other")).await.unwrap().is_none());
  let stored = s.read(&ContactId::new("ada")).await.unwrap().unwrap();
  assert_eq!(stored.first.as_deref(), Some("Augusta"));
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let res = s.update(&ContactId::new("nope"), |c| c).await.unwrap();
  assert!(res.is_none());
}

#[tokio::test]
async fn delete_returns_snapshot_once() {
  let s = store().await;
  let c = contact("ada", Some("Ada"), Some("Lovelace"));
  s.create(c.clone()).await.unwrap();

  assert_eq!(s.delete(&c.id).await.unwrap(), Some(c.clone()));
  assert_eq!(s.delete(&c.id).await.unwrap(), None);
  assert!(s.read(&c.id).await.unwrap().is_none());
}

#[tokio::test]
async fn is_empty_tracks_contents() {
  let s = store().await;
  assert!(s.is_empty().await.unwrap());
  s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();
  assert!(!s.is_empty().await.unwrap());
}

#[tokio::test]
async fn data_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("contacts.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(contact("ada", Some("Ada"), Some("Lovelace"))).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list().await.unwrap();
  assert_eq!(names(&all), vec!["Ada Lovelace"]);
}

// ─── Directory ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_token_and_timestamp() {
  let d = directory().await;
  let before = Utc::now();

  let created = d.create(input("Ada", "Lovelace")).await.unwrap();
  assert!((6..=7).contains(&created.id.as_str().len()));
  assert!(created.created_at >= before);

  let fetched = d.read(&created.id).await.unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_without_query_returns_everything() {
  let d = directory().await;
  d.create(input("Ada", "Lovelace")).await.unwrap();
  d.create(input("Grace", "Hopper")).await.unwrap();
  d.create(ContactInput::default()).await.unwrap();

  assert_eq!(d.list(None).await.unwrap().len(), 3);
  assert_eq!(d.list(Some("")).await.unwrap().len(), 3);
}

#[tokio::test]
async fn list_filters_by_fuzzy_name() {
  let d = directory().await;
  d.create(input("Ada", "Lovelace")).await.unwrap();
  d.create(input("Grace", "Hopper")).await.unwrap();
  d.create(input("John", "Smith")).await.unwrap();

  assert_eq!(names(&d.list(Some("lvl")).await.unwrap()), vec!["Ada Lovelace"]);
  assert_eq!(names(&d.list(Some("SMH")).await.unwrap()), vec!["John Smith"]);
  assert!(d.list(Some("hms")).await.unwrap().is_empty());
  assert!(d.list(Some("qqq")).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_keeps_store_order_when_filtering() {
  let d = directory().await;
  d.create(input("Alice", "Zimmer")).await.unwrap();
  d.create(input("Alan", "Adams")).await.unwrap();
  d.create(input("Bob", "Dylan")).await.unwrap();

  assert_eq!(
    names(&d.list(Some("al")).await.unwrap()),
    vec!["Alan Adams", "Alice Zimmer"]
  );
}

#[tokio::test]
async fn nameless_contacts_never_match_a_query() {
  let d = directory().await;
  let anon = d
    .create(ContactInput { twitter: Some("@anon".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(anon.full(), None);

  assert!(d.list(Some("a")).await.unwrap().is_empty());
  assert_eq!(d.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_preserves_id_and_created_at() {
  let d = directory().await;
  let created = d.create(input("Ada", "Lovelace")).await.unwrap();

  // The body carries a different id and createdAt; both must be ignored.
  let patch: ContactInput = serde_json::from_str(
    r#"{"id":"hijack","createdAt":"2000-01-01T00:00:00Z","first":"Augusta","last":"King"}"#,
  )
  .unwrap();
  let updated = d.update(&created.id, patch).await.unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.created_at, created.created_at);
  assert_eq!(updated.full().as_deref(), Some("Augusta King"));

  let stored = d.read(&created.id).await.unwrap();
  assert_eq!(stored, updated);
  assert!(matches!(
    d.read(&ContactId::new("hijack")).await,
    Err(CoreError::ContactNotFound(_))
  ));
}

#[tokio::test]
async fn update_overwrites_every_mutable_field() {
  let d = directory().await;
  let created = d
    .create(ContactInput {
      avatar: Some("a.png".into()),
      twitter: Some("@ada".into()),
      notes: Some("first programmer".into()),
      ..input("Ada", "Lovelace")
    })
    .await
    .unwrap();

  let updated = d
    .update(&created.id, ContactInput { favorite: Some(true), ..input("Augusta", "King") })
    .await
    .unwrap();
  assert_eq!(updated.avatar, None);
  assert_eq!(updated.twitter, None);
  assert_eq!(updated.notes, None);
  assert_eq!(updated.full().as_deref(), Some("Augusta King"));
  assert!(updated.favorite);
  assert_eq!(d.read(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn edit_without_favorite_keeps_the_flag() {
  let d = directory().await;
  let created = d.create(input("Ada", "Lovelace")).await.unwrap();
  d.favorite(&created.id, true).await.unwrap();

  // An edit form sends the display fields only.
  let edit: ContactInput = serde_json::from_str(
    r#"{"first":"Ada","last":"King","avatar":"","twitter":"","notes":""}"#,
  )
  .unwrap();
  let updated = d.update(&created.id, edit).await.unwrap();

  assert!(updated.favorite);
  assert_eq!(updated.last.as_deref(), Some("King"));
  assert!(d.read(&created.id).await.unwrap().favorite);
}

#[tokio::test]
async fn favorite_only_touches_the_flag() {
  let d = directory().await;
  let created = d
    .create(ContactInput { twitter: Some("@ada".into()), ..input("Ada", "Lovelace") })
    .await
    .unwrap();

  let once = d.favorite(&created.id, true).await.unwrap();
  assert!(once.favorite);
  assert_eq!(once, Contact { favorite: true, ..created.clone() });

  let twice = d.favorite(&created.id, true).await.unwrap();
  assert_eq!(twice, once);
  assert_eq!(d.read(&created.id).await.unwrap(), once);

  let cleared = d.favorite(&created.id, false).await.unwrap();
  assert_eq!(cleared, created);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
  let s = Arc::new(store().await);
  let d = Directory::new(Arc::clone(&s));
  let id = ContactId::new("ghost");

  assert!(matches!(d.read(&id).await, Err(CoreError::ContactNotFound(x)) if x == id));
  assert!(matches!(
    d.update(&id, input("A", "B")).await,
    Err(CoreError::ContactNotFound(_))
  ));
  assert!(matches!(d.delete(&id).await, Err(CoreError::ContactNotFound(_))));
  assert!(matches!(d.favorite(&id, true).await, Err(CoreError::ContactNotFound(_))));
  assert!(s.is_empty().await.unwrap());
}

#[tokio::test]
async fn delete_returns_removed_contact() {
  let d = directory().await;
  let created = d.create(input("Ada", "Lovelace")).await.unwrap();

  let deleted = d.delete(&created.id).await.unwrap();
  assert_eq!(deleted, created);
  assert!(matches!(d.read(&created.id).await, Err(CoreError::ContactNotFound(_))));
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_fills_an_empty_store() {
  let s = store().await;
  let data = SeedData::bundled().unwrap();
  let expected = data.contacts.len();

  let inserted = seed::load(&s, data).await.unwrap();
  assert_eq!(inserted, expected);

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), expected);
  assert!(all.iter().all(|c| !c.id.as_str().is_empty()));

  let ryan = s.read(&ContactId::new("ryan-florence")).await.unwrap().unwrap();
  assert_eq!(ryan.full().as_deref(), Some("Ryan Florence"));
}

#[tokio::test]
async fn seed_is_skipped_for_populated_store() {
  let s = store().await;
  seed::load(&s, SeedData::bundled().unwrap()).await.unwrap();
  let count = s.list().await.unwrap().len();

  let again = seed::load(&s, SeedData::bundled().unwrap()).await.unwrap();
  assert_eq!(again, 0);
  assert_eq!(s.list().await.unwrap().len(), count);
}

#[tokio::test]
async fn seed_skips_duplicate_slugs() {
  let s = store().await;
  let data = SeedData::from_json(
    r#"[
      {"first": "Ada", "last": "Lovelace"},
      {"first": "ADA", "last": "lovelace", "twitter": "@dup"},
      {"first": "Grace", "last": "Brewster Hopper"}
    ]"#,
  )
  .unwrap();

  assert_eq!(seed::load(&s, data).await.unwrap(), 2);
  let ada = s.read(&ContactId::new("ada-lovelace")).await.unwrap().unwrap();
  assert_eq!(ada.twitter, None);
  assert!(s.read(&ContactId::new("grace-brewster_hopper")).await.unwrap().is_some());
}
