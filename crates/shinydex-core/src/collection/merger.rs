//! Personal/team collection reconciliation.
//!
//! Combines the trainer's own entries with the team-wide read into one
//! capture view per catalog item. The two sources replicate independently, so
//! the merge must tolerate lag between them: an entry the trainer just wrote
//! may exist locally before it shows up in the team-wide read.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::team::{TeamMember, UNKNOWN_TRAINER};

use super::entry::{CatalogItem, CollectionEntry, SpeciesKey};

/// Aggregate display fields for a captured catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureDetails {
    /// Sum of attempt counts across all matching entries
    pub encounters: u64,
    /// Game of the first matching entry in insertion order
    pub game_id: String,
    /// Method of the first matching entry in insertion order
    pub method_id: String,
}

/// Reconciled capture status for one catalog item. Derived, never persisted;
/// recomputed whenever either input set changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedView {
    /// Primary catalog identifier
    pub pokemon_id: String,
    /// Whether at least one entry matches this item
    pub captured: bool,
    /// Number of matching entries
    pub total_count: usize,
    /// The matching entries themselves, in merged insertion order
    pub entries: Vec<CollectionEntry>,
    /// Display name of the first matching entry's owner, when captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<String>,
    /// Aggregate display fields, when captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CaptureDetails>,
}

/// Reconciles personal and team-wide entry sets against a catalog.
///
/// The merge is idempotent for a fixed input pair and never produces an entry
/// absent from both inputs.
#[derive(Debug, Clone, Default)]
pub struct CollectionMerger {
    catalog: Vec<CatalogItem>,
    roster: Vec<TeamMember>,
}

impl CollectionMerger {
    /// Creates a merger over a catalog and a team roster.
    pub fn new(catalog: Vec<CatalogItem>, roster: Vec<TeamMember>) -> Self {
        Self { catalog, roster }
    }

    /// Deduplicates the two entry sets by row id.
    ///
    /// The team-wide read seeds the result in full (it already contains the
    /// trainer's synced entries); personal entries overlay only when their id
    /// is not present yet, which covers local writes that have not propagated
    /// into the team read. Insertion order is team first, then the personal
    /// stragglers.
    pub fn merge_entries(
        personal: &[CollectionEntry],
        team: &[CollectionEntry],
    ) -> Vec<CollectionEntry> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut merged = Vec::with_capacity(team.len() + personal.len());

        for entry in team.iter().chain(personal.iter()) {
            if seen.insert(entry.id.as_str()) {
                merged.push(entry.clone());
            }
        }

        merged
    }

    /// Builds the per-catalog-item capture view over a merged entry set.
    pub fn merged_view(
        &self,
        personal: &[CollectionEntry],
        team: &[CollectionEntry],
    ) -> Vec<MergedView> {
        let merged = Self::merge_entries(personal, team);
        self.view_of(&merged)
    }

    /// Capture view over a single entry set (personal-only display mode).
    pub fn personal_view(&self, personal: &[CollectionEntry]) -> Vec<MergedView> {
        self.view_of(personal)
    }

    fn view_of(&self, entries: &[CollectionEntry]) -> Vec<MergedView> {
        // Canonicalize each entry's species reference once, up front.
        let keyed: Vec<(SpeciesKey, &CollectionEntry)> = entries
            .iter()
            .map(|entry| (SpeciesKey::parse(&entry.pokemon_id), entry))
            .collect();

        self.catalog
            .iter()
            .map(|item| {
                let matching: Vec<CollectionEntry> = keyed
                    .iter()
                    .filter(|(key, _)| item.matches(key))
                    .map(|(_, entry)| (*entry).clone())
                    .collect();

                let captured = !matching.is_empty();
                let trainer = matching.first().map(|first| self.owner_label(first));
                let details = matching.first().map(|first| CaptureDetails {
                    encounters: matching.iter().map(|e| e.attempt_count as u64).sum(),
                    game_id: first.game_id.clone(),
                    method_id: first.method_id.clone(),
                });

                MergedView {
                    pokemon_id: item.id.clone(),
                    captured,
                    total_count: matching.len(),
                    entries: matching,
                    trainer,
                    details,
                }
            })
            .collect()
    }

    fn owner_label(&self, entry: &CollectionEntry) -> String {
        self.roster
            .iter()
            .find(|member| member.user_id == entry.owner_id)
            .map(|member| member.username.clone())
            .unwrap_or_else(|| UNKNOWN_TRAINER.to_string())
    }
}
