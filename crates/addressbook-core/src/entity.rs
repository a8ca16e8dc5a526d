//! Entity declarations consumed by storage backends.
//!
//! A backend picks the key encoding for each table from [`Entity::KEY_KIND`]
//! when it builds the schema, so the choice is fixed at compile time rather
//! than looked up by type name.

/// How an entity's primary key is encoded in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
  /// Caller-assigned opaque string.
  Text,
  /// Store-assigned, monotonically increasing integer.
  Integer,
}

pub trait Entity {
  /// Stable name used for the backing table.
  const TYPE_NAME: &'static str;

  /// Entities are numerically keyed unless they say otherwise.
  const KEY_KIND: KeyKind = KeyKind::Integer;
}
