use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{DexEntry, EncounterLocation, EntryDetail, FilterMode, SpeciesInfo};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    IndexDidLoad(Vec<DexEntry>),
    IndexDidError(String),
    CaughtDidLoad(Vec<u16>),

    // Pointer x positions are viewport columns of the carousel strip.
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
    Wheel { delta: f32 },

    JumpBy(i32),
    JumpTo(usize),

    DetailDidLoad { id: u16, detail: EntryDetail },
    DetailDidError { id: u16, error: String },
    SpeciesDidLoad { id: u16, species: SpeciesInfo },
    SpeciesDidError { id: u16, error: String },
    EncountersDidLoad { id: u16, locations: Vec<EncounterLocation> },
    EncountersDidError { id: u16, error: String },
    SpriteDidLoad { id: u16, sprite: SpriteData },
    SpriteDidError { id: u16, error: String },

    CatchToggle,
    VersionTabNext,
    VersionTabPrev,
    VersionTabSet(usize),

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchCancel,
    SearchSubmit,
    FilterCycle,
    FilterSet(FilterMode),

    ViewToggle,
    ListMove(i32),
    ListOpen(usize),

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
