//! # Ammo-Type Matching
//!
//! Two ammo-type identifiers match iff they are equal ignoring case. There
//! are no partial matches and no tier substitution: `ammo.rifle` never
//! feeds a weapon chambered for `ammo.rifle.hv`.

use std::fmt;

/// Returns true if two short names refer to the same ammunition.
///
/// Comparison is full-string and case-insensitive. Each character is
/// compared by its simple uppercase form; characters whose uppercase form
/// expands (`ß`, `ﬁ`) only match themselves.
#[must_use]
pub fn ammo_matches(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// The ammunition a weapon accepts, identified by item short name.
///
/// Equality follows [`ammo_matches`], so `AmmoType::new("Rifle.Ammo")`
/// equals `AmmoType::new("rifle.ammo")`. The spelling as given is kept for
/// display.
#[derive(Clone, Debug)]
pub struct AmmoType(String);

impl AmmoType {
    /// Creates an ammo type from an item short name.
    #[must_use]
    pub fn new(shortname: impl Into<String>) -> Self {
        Self(shortname.into())
    }

    /// Returns the short name as given.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether an item with this short name is the right ammo.
    #[inline]
    #[must_use]
    pub fn matches(&self, shortname: &str) -> bool {
        ammo_matches(&self.0, shortname)
    }
}

impl PartialEq for AmmoType {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for AmmoType {}

impl fmt::Display for AmmoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AmmoType {
    fn from(shortname: &str) -> Self {
        Self::new(shortname)
    }
}

impl From<String> for AmmoType {
    fn from(shortname: String) -> Self {
        Self(shortname)
    }
}
