//! Grouping of cost entries by (episode, location)

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{CostEntry, GroupedResult};

/// Group key used when a row carried no episode
pub const UNKNOWN_EPISODE: &str = "unknown";

/// Partition entries by (episode, location) and compute subtotals
///
/// Groups come back ordered by episode then location. Entries keep their
/// input order inside a group, and every group total equals the sum of its
/// per-category subtotals.
pub fn aggregate(entries: &[CostEntry]) -> Vec<GroupedResult> {
    let mut groups: BTreeMap<(String, String), GroupedResult> = BTreeMap::new();

    for entry in entries {
        let episode = entry
            .episode
            .clone()
            .unwrap_or_else(|| UNKNOWN_EPISODE.to_string());
        let key = (episode.clone(), entry.location.clone());

        let group = groups.entry(key).or_insert_with(|| GroupedResult {
            episode,
            location: entry.location.clone(),
            entries: Vec::new(),
            by_category: BTreeMap::new(),
            total: Decimal::ZERO,
        });

        *group.by_category.entry(entry.category).or_insert(Decimal::ZERO) += entry.amount;
        group.entries.push(entry.clone());
    }

    groups
        .into_values()
        .map(|mut group| {
            group.total = group.by_category.values().copied().sum();
            group
        })
        .collect()
}

/// Sum of all entry amounts
pub fn total_amount(entries: &[CostEntry]) -> Decimal {
    entries.iter().map(|e| e.amount).sum()
}
