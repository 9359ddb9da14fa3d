//! Encounter aggregator: groups raw per-location encounter records by game
//! version, deduplicates areas, and summarizes method/level/chance per area.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::state::{EncounterLocation, EncounterSlot};

/// Render cap per version tab; purely bounds display cost.
pub const MAX_AREAS_PER_VERSION: usize = 120;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area: String,
    /// Method names in order of first appearance, deduplicated.
    pub methods: Vec<String>,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub chance: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionGroup {
    pub version: String,
    pub areas: Vec<AreaSummary>,
}

/// Group raw locations by version name (tabs sorted lexicographically).
/// Within a version, the first record for an area wins; later duplicates of
/// the same area are dropped.
pub fn group_by_version(locations: &[EncounterLocation]) -> Vec<VersionGroup> {
    let mut by_version: BTreeMap<String, Vec<AreaSummary>> = BTreeMap::new();

    for location in locations {
        for version_detail in &location.version_details {
            by_version
                .entry(version_detail.version.clone())
                .or_default()
                .push(summarize(&location.area, &version_detail.encounters));
        }
    }

    by_version
        .into_iter()
        .map(|(version, areas)| {
            let mut seen = HashSet::new();
            let areas = areas
                .into_iter()
                .filter(|summary| seen.insert(summary.area.clone()))
                .collect();
            VersionGroup { version, areas }
        })
        .collect()
}

/// Summarize one raw record: method union in first-appearance order, level
/// range and chance over the slots that carry a value.
fn summarize(area: &str, slots: &[EncounterSlot]) -> AreaSummary {
    let mut methods = Vec::new();
    for slot in slots {
        if !methods.contains(&slot.method) {
            methods.push(slot.method.clone());
        }
    }
    AreaSummary {
        area: area.to_string(),
        methods,
        min_level: slots.iter().filter_map(|slot| slot.min_level).min(),
        max_level: slots.iter().filter_map(|slot| slot.max_level).max(),
        chance: slots.iter().filter_map(|slot| slot.chance).max(),
    }
}

impl AreaSummary {
    /// "Lv: 5-9" or "Lv: —" when no slot carried a usable level.
    pub fn level_label(&self) -> String {
        match (self.min_level, self.max_level) {
            (Some(min), Some(max)) => format!("Lv: {min}-{max}"),
            (Some(level), None) | (None, Some(level)) => format!("Lv: {level}"),
            (None, None) => "Lv: —".to_string(),
        }
    }

    pub fn chance_label(&self) -> String {
        match self.chance {
            Some(chance) => format!("Chance: {chance}%"),
            None => "Chance: —".to_string(),
        }
    }

    pub fn method_label(&self) -> String {
        if self.methods.is_empty() {
            return "Method: —".to_string();
        }
        let names: Vec<String> = self
            .methods
            .iter()
            .map(|method| method.replace('-', " "))
            .collect();
        format!("Method: {}", names.join(", "))
    }
}
