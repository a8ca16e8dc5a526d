//! Fuzzy name search.
//!
//! A query matches a name when its characters appear, in order but not
//! necessarily adjacent, inside at least one space-separated word of that
//! name. Matching is case-insensitive. `"smh"` matches `"Smith"`; `"hms"`
//! does not.

/// A lower-cased query, ready to be tested against many names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  chars: Vec<char>,
}

impl Query {
  /// Returns `None` for an absent or empty query, which means "no filter".
  pub fn parse(raw: Option<&str>) -> Option<Self> {
    let raw = raw.filter(|q| !q.is_empty())?;
    Some(Self { chars: raw.to_lowercase().chars().collect() })
  }

  /// Test an indexed `full` name.
  pub fn matches(&self, full: &str) -> bool {
    full
      .to_lowercase()
      .split(' ')
      .any(|word| is_subsequence(&self.chars, word))
  }
}

/// Whether `needle` occurs in `word` as an ordered subsequence.
///
/// Each needle character is searched for strictly after the position of the
/// previous match.
fn is_subsequence(needle: &[char], word: &str) -> bool {
  let mut rest = word.chars();
  needle.iter().all(|c| rest.any(|w| w == *c))
}
