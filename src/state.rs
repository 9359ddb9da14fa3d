use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::carousel::CarouselState;
use crate::encounters::VersionGroup;
use crate::sprite::SpriteData;

/// Fixed catalog size; ids are 1-based contiguous positions in the index.
pub const DEX_TOTAL: u16 = 1025;

/// How long the intro screen lingers once boot reaches Ready.
pub const INTRO_DWELL_MS: u32 = 560;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DexEntry {
    pub id: u16,
    pub name: String,
}

/// Core half of an entry's card, from the detail endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
}

/// Species half of an entry's card: generation tag plus the derived
/// genus/flavor strings (English-priority selection happens at the gateway).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub generation: Option<String>,
    pub genus: Option<String>,
    pub flavor_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterLocation {
    pub area: String,
    pub version_details: Vec<EncounterVersionDetail>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterVersionDetail {
    pub version: String,
    pub encounters: Vec<EncounterSlot>,
}

/// One raw encounter slot. Levels and chance are optional: records without a
/// usable value are excluded from range/chance summaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterSlot {
    pub method: String,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub chance: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BootStage {
    Connecting,
    LoadingIndex,
    BuildingCarousel,
    BuildingList,
    Centering,
    Ready,
    Failed(String),
}

impl BootStage {
    pub fn percent(&self) -> u16 {
        match self {
            BootStage::Connecting => 6,
            BootStage::LoadingIndex => 18,
            BootStage::BuildingCarousel => 34,
            BootStage::BuildingList => 52,
            BootStage::Centering => 66,
            BootStage::Ready => 92,
            BootStage::Failed(_) => 0,
        }
    }

    pub fn hint(&self) -> String {
        match self {
            BootStage::Connecting => "Connecting to the catalog service…".to_string(),
            BootStage::LoadingIndex => format!("Loading dex index ({DEX_TOTAL})…"),
            BootStage::BuildingCarousel => "Building carousel…".to_string(),
            BootStage::BuildingList => "Building list view…".to_string(),
            BootStage::Centering => "Centering #0001…".to_string(),
            BootStage::Ready => "Ready.".to_string(),
            BootStage::Failed(error) => format!("Boot failed: {error}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Carousel,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    All,
    Caught,
    Missing,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "ALL",
            FilterMode::Caught => "CAUGHT",
            FilterMode::Missing => "MISSING",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Caught,
            FilterMode::Caught => FilterMode::Missing,
            FilterMode::Missing => FilterMode::All,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Encounter panel lifecycle for the selected entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EncounterPanel {
    Idle,
    Loading,
    Ready {
        groups: Vec<VersionGroup>,
        selected_version: usize,
    },
    Error(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub boot: BootStage,
    /// Remaining intro linger once boot is Ready.
    pub intro_dwell_ms: u32,
    pub view: ViewMode,

    pub catalog: Vec<DexEntry>,
    pub caught: HashSet<u16>,
    pub carousel: CarouselState,
    /// Last selection a detail render was fired for; dedups notifications
    /// while the same chip stays centered across many offset updates.
    pub last_notified: Option<u16>,

    // Response caches: append-only, keyed by id, session lifetime. A failed
    // fetch inserts nothing so re-selecting the entry retries.
    pub details: HashMap<u16, EntryDetail>,
    pub species: HashMap<u16, SpeciesInfo>,
    pub encounters: HashMap<u16, Vec<EncounterLocation>>,
    pub sprites: HashMap<u16, SpriteData>,

    pub detail_error: Option<String>,
    pub panel: EncounterPanel,

    pub filter: FilterMode,
    pub search: SearchState,
    pub filtered_indices: Vec<usize>,
    pub list_selected: usize,

    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            boot: BootStage::Connecting,
            intro_dwell_ms: INTRO_DWELL_MS,
            view: ViewMode::Carousel,
            catalog: Vec::new(),
            caught: HashSet::new(),
            carousel: CarouselState::new(0, 78.0),
            last_notified: None,
            details: HashMap::new(),
            species: HashMap::new(),
            encounters: HashMap::new(),
            sprites: HashMap::new(),
            detail_error: None,
            panel: EncounterPanel::Idle,
            filter: FilterMode::All,
            search: SearchState::default(),
            filtered_indices: Vec::new(),
            list_selected: 0,
            tick: 0,
        }
    }

    pub fn booted(&self) -> bool {
        matches!(self.boot, BootStage::Ready) && self.intro_dwell_ms == 0
    }

    /// Currently selected entry id (1-based).
    pub fn selected_id(&self) -> u16 {
        self.carousel.selected_id()
    }

    pub fn selected_entry(&self) -> Option<&DexEntry> {
        self.catalog.get(self.carousel.selected)
    }

    pub fn is_caught(&self, id: u16) -> bool {
        self.caught.contains(&id)
    }

    /// `(caught, missing)` against the full catalog size.
    pub fn progress_counts(&self) -> (usize, usize) {
        let caught = self.caught.len();
        (caught, DEX_TOTAL as usize - caught)
    }

    /// Both halves of the selected entry's card, once both are cached.
    pub fn current_card(&self) -> Option<(&EntryDetail, &SpeciesInfo)> {
        let id = self.selected_id();
        Some((self.details.get(&id)?, self.species.get(&id)?))
    }

    /// Full re-derivation of the list view: filter mode, then the trimmed,
    /// case-insensitive query as an exact id or a name substring.
    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.trim().to_lowercase();
        let caught = &self.caught;
        let filter = self.filter;
        self.filtered_indices = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let is_caught = caught.contains(&entry.id);
                let matches_filter = match filter {
                    FilterMode::All => true,
                    FilterMode::Caught => is_caught,
                    FilterMode::Missing => !is_caught,
                };
                let matches_query = query.is_empty()
                    || entry.id.to_string() == query
                    || entry.name.contains(&query);
                matches_filter && matches_query
            })
            .map(|(index, _)| index)
            .collect();

        if self.list_selected >= self.filtered_indices.len() {
            self.list_selected = 0;
        }
    }

    /// Entry under the list cursor.
    pub fn list_entry(&self) -> Option<&DexEntry> {
        self.filtered_indices
            .get(self.list_selected)
            .and_then(|index| self.catalog.get(*index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Vec<DexEntry> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| DexEntry {
                id: index as u16 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    fn state_with(names: &[&str], caught: &[u16]) -> AppState {
        let mut state = AppState::new();
        state.catalog = catalog(names);
        state.caught = caught.iter().copied().collect();
        state.rebuild_filtered();
        state
    }

    fn ids(state: &AppState) -> Vec<u16> {
        state
            .filtered_indices
            .iter()
            .map(|index| state.catalog[*index].id)
            .collect()
    }

    #[test]
    fn filter_modes_partition_the_search_result() {
        let names = ["bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon"];
        let mut state = state_with(&names, &[1, 3, 4]);

        state.search.query = "a".to_string();
        state.filter = FilterMode::All;
        state.rebuild_filtered();
        let all: Vec<u16> = ids(&state);

        state.filter = FilterMode::Caught;
        state.rebuild_filtered();
        let caught: Vec<u16> = ids(&state);

        state.filter = FilterMode::Missing;
        state.rebuild_filtered();
        let missing: Vec<u16> = ids(&state);

        assert!(caught.iter().all(|id| !missing.contains(id)));
        let mut union: Vec<u16> = caught.iter().chain(missing.iter()).copied().collect();
        union.sort_unstable();
        assert_eq!(union, all);
    }

    #[test]
    fn query_matches_exact_id_or_name_substring() {
        let mut state = state_with(&["bulbasaur", "ivysaur", "venusaur"], &[]);

        // "1" is an exact id, not a prefix: id 1 only.
        state.search.query = "1".to_string();
        state.rebuild_filtered();
        assert_eq!(ids(&state), vec![1]);

        state.search.query = "saur".to_string();
        state.rebuild_filtered();
        assert_eq!(ids(&state), vec![1, 2, 3]);

        state.search.query = "  VENU  ".to_string();
        state.rebuild_filtered();
        assert_eq!(ids(&state), vec![3]);

        state.search.query = "zzz".to_string();
        state.rebuild_filtered();
        assert!(ids(&state).is_empty());
    }

    #[test]
    fn rebuild_clamps_list_cursor() {
        let mut state = state_with(&["bulbasaur", "ivysaur", "venusaur"], &[]);
        state.list_selected = 2;
        state.search.query = "ivy".to_string();
        state.rebuild_filtered();
        assert_eq!(state.list_selected, 0);
        assert_eq!(state.list_entry().map(|entry| entry.id), Some(2));
    }

    #[test]
    fn current_card_requires_both_halves() {
        let mut state = state_with(&["bulbasaur"], &[]);
        state.carousel = crate::carousel::CarouselState::new(1, 78.0);
        assert!(state.current_card().is_none());

        state.details.insert(
            1,
            EntryDetail {
                id: 1,
                name: "bulbasaur".to_string(),
                types: vec!["grass".to_string(), "poison".to_string()],
            },
        );
        assert!(state.current_card().is_none());

        state.species.insert(
            1,
            SpeciesInfo {
                generation: Some("generation-i".to_string()),
                genus: Some("Seed Pokémon".to_string()),
                flavor_text: Some("A strange seed.".to_string()),
            },
        );
        assert!(state.current_card().is_some());
    }
}
