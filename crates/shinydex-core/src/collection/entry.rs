//! Collection entry and catalog models.
//!
//! Entries are written exclusively by the external persistence collaborator;
//! the engine only reads and merges them. The catalog is the fixed reference
//! list of species being collected.

use serde::{Deserialize, Serialize};

/// One captured specimen as recorded by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    /// Unique row id assigned by the store
    pub id: String,
    /// Species reference, in either identifier scheme (slug or dex number)
    pub pokemon_id: String,
    /// Trainer who owns this specimen
    pub owner_id: String,
    /// Attempts it took to capture
    #[serde(default)]
    pub attempt_count: u32,
    /// Game the specimen was captured in
    pub game_id: String,
    /// Method used for the capture
    pub method_id: String,
}

/// A catalog species. Carries both identifier schemes the collection data
/// uses: the primary text slug and the secondary national dex number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Primary text identifier (slug)
    pub id: String,
    /// Secondary numeric identifier
    pub pokedex_id: u32,
    /// Display name
    pub name: String,
}

impl CatalogItem {
    /// Whether a canonicalized species reference points at this item.
    pub fn matches(&self, key: &SpeciesKey) -> bool {
        match key {
            SpeciesKey::Slug(slug) => *slug == self.id,
            SpeciesKey::DexNumber(number) => *number == self.pokedex_id,
        }
    }
}

/// Canonical form of a species reference.
///
/// Collection rows reference species inconsistently, sometimes by slug and
/// sometimes by dex number. Parsing happens once at ingestion; every
/// comparison afterwards goes through this key instead of re-deriving the
/// scheme ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpeciesKey {
    /// Primary text identifier
    Slug(String),
    /// Secondary numeric identifier
    DexNumber(u32),
}

impl SpeciesKey {
    /// Canonicalizes a raw species reference: purely numeric strings become
    /// dex numbers, everything else stays a slug.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(number) => Self::DexNumber(number),
            Err(_) => Self::Slug(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> CatalogItem {
        CatalogItem {
            id: "pikachu".to_string(),
            pokedex_id: 25,
            name: "Pikachu".to_string(),
        }
    }

    #[test]
    fn key_canonicalizes_both_identifier_schemes() {
        assert_eq!(SpeciesKey::parse("25"), SpeciesKey::DexNumber(25));
        assert_eq!(
            SpeciesKey::parse("pikachu"),
            SpeciesKey::Slug("pikachu".to_string())
        );
    }

    #[test]
    fn catalog_item_matches_either_scheme() {
        let item = pikachu();
        assert!(item.matches(&SpeciesKey::parse("pikachu")));
        assert!(item.matches(&SpeciesKey::parse("25")));
        assert!(!item.matches(&SpeciesKey::parse("26")));
        assert!(!item.matches(&SpeciesKey::parse("raichu")));
    }
}
