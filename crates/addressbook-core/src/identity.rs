//! Identity assignment for new contacts.
//!
//! Regular creation uses [`random_token`]. [`slug`] gives reproducible ids
//! and is only used by the seed loader.

use rand::Rng;

use crate::contact::ContactId;

/// Lower bound of the token range; skips the signed 32-bit space.
const TOKEN_MIN: u64 = 1 << 31;
/// Exclusive upper bound of the token range.
const TOKEN_MAX: u64 = 1 << 63;
/// Tokens keep at most this many trailing base-36 digits.
const TOKEN_LEN: usize = 7;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draw a short opaque id.
///
/// The number is uniform over `[2^31, 2^63)`, rendered in base 36 and cut
/// down to its last seven characters. Uniqueness is not checked here; the
/// store rejects a create whose id is already taken.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> ContactId {
  let n = rng.gen_range(TOKEN_MIN..TOKEN_MAX);
  ContactId::new(token_from(n))
}

fn token_from(n: u64) -> String {
  let s = to_base36(n);
  match s.len().checked_sub(TOKEN_LEN) {
    Some(start) if start > 0 => s[start..].to_owned(),
    _ => s,
  }
}

fn to_base36(mut n: u64) -> String {
  if n == 0 {
    return "0".to_owned();
  }
  let mut digits = Vec::new();
  while n > 0 {
    digits.push(BASE36_DIGITS[(n % 36) as usize]);
    n /= 36;
  }
  digits.reverse();
  // Only ASCII digits were pushed.
  String::from_utf8(digits).unwrap_or_default()
}

/// Deterministic id from a name: each present part lower-cased with spaces
/// turned into `_`, parts joined with `-`.
///
/// `("Ada", "King Lovelace")` gives `ada-king_lovelace`.
pub fn slug(first: Option<&str>, last: Option<&str>) -> ContactId {
  let parts: Vec<String> = [first, last]
    .into_iter()
    .flatten()
    .map(|p| p.to_lowercase().replace(' ', "_"))
    .collect();
  ContactId::new(parts.join("-"))
}
