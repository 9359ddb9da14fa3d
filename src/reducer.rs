use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::api;
use crate::carousel::{CarouselState, DragOutcome, Motion, TICK_MS};
use crate::effect::Effect;
use crate::encounters::group_by_version;
use crate::state::{AppState, BootStage, EncounterPanel, ViewMode};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.boot = BootStage::LoadingIndex;
            DispatchResult::changed_with_many(vec![Effect::LoadCaught, Effect::LoadIndex])
        }

        Action::IndexDidLoad(entries) => {
            state.catalog = entries;
            state.boot = BootStage::BuildingCarousel;
            DispatchResult::changed()
        }

        Action::IndexDidError(error) => {
            state.boot = BootStage::Failed(error);
            DispatchResult::changed()
        }

        Action::CaughtDidLoad(ids) => {
            state.caught = ids.into_iter().collect();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::PointerDown { x } => {
            if state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            state.carousel.drag_start(x);
            DispatchResult::changed()
        }

        Action::PointerMove { x } => {
            if !matches!(state.carousel.motion, Motion::Dragging { .. }) {
                return DispatchResult::unchanged();
            }
            state.carousel.drag_move(x);
            with_effects(sync_selection(state))
        }

        Action::PointerUp => match state.carousel.drag_end() {
            DragOutcome::Ignored => DispatchResult::unchanged(),
            DragOutcome::Clicked(index) => {
                state.carousel.jump_to(index, true);
                DispatchResult::changed()
            }
            DragOutcome::Snapped => DispatchResult::changed(),
        },

        Action::Wheel { delta } => {
            if state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            state.carousel.wheel(delta);
            with_effects(sync_selection(state))
        }

        Action::JumpBy(delta) => {
            if state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            let last = state.catalog.len() as i32 - 1;
            let target = (state.carousel.selected as i32 + delta).clamp(0, last);
            state.carousel.jump_to(target as usize, true);
            DispatchResult::changed()
        }

        Action::JumpTo(index) => {
            if state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            state.carousel.jump_to(index, true);
            DispatchResult::changed()
        }

        Action::DetailDidLoad { id, detail } => {
            state.details.insert(id, detail);
            let mut effects = Vec::new();
            if id == state.selected_id() {
                state.detail_error = None;
                if state.species.contains_key(&id) {
                    effects.extend(after_base_card(state, id));
                }
            }
            with_effects(effects)
        }

        Action::DetailDidError { id, error } => {
            if id == state.selected_id() {
                state.detail_error = Some(error);
            }
            DispatchResult::changed()
        }

        Action::SpeciesDidLoad { id, species } => {
            state.species.insert(id, species);
            let mut effects = Vec::new();
            if id == state.selected_id() {
                state.detail_error = None;
                if state.details.contains_key(&id) {
                    effects.extend(after_base_card(state, id));
                }
            }
            with_effects(effects)
        }

        Action::SpeciesDidError { id, error } => {
            if id == state.selected_id() {
                state.detail_error = Some(error);
            }
            DispatchResult::changed()
        }

        Action::EncountersDidLoad { id, locations } => {
            state.encounters.insert(id, locations);
            if id == state.selected_id() {
                let raw = &state.encounters[&id];
                state.panel = EncounterPanel::Ready {
                    groups: group_by_version(raw),
                    selected_version: 0,
                };
            }
            DispatchResult::changed()
        }

        Action::EncountersDidError { id, error } => {
            if id == state.selected_id() {
                state.panel = EncounterPanel::Error(error);
            }
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { id, sprite } => {
            state.sprites.insert(id, sprite);
            DispatchResult::changed()
        }

        // Broken-image fallback: the card renders its placeholder art.
        Action::SpriteDidError { .. } => DispatchResult::unchanged(),

        Action::CatchToggle => {
            if state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            let id = state.selected_id();
            if !state.caught.remove(&id) {
                state.caught.insert(id);
            }
            state.rebuild_filtered();
            let mut ids: Vec<u16> = state.caught.iter().copied().collect();
            ids.sort_unstable();
            DispatchResult::changed_with(Effect::SaveCaught { ids })
        }

        Action::VersionTabNext => cycle_version_tab(state, 1),
        Action::VersionTabPrev => cycle_version_tab(state, -1),

        Action::VersionTabSet(index) => {
            let EncounterPanel::Ready {
                groups,
                selected_version,
            } = &mut state.panel
            else {
                return DispatchResult::unchanged();
            };
            if groups.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(groups.len() - 1);
            if bounded == *selected_version {
                return DispatchResult::unchanged();
            }
            *selected_version = bounded;
            DispatchResult::changed()
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            state.rebuild_filtered();
            search_jump(state);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.pop();
            state.rebuild_filtered();
            search_jump(state);
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::FilterCycle => {
            state.filter = state.filter.next();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::FilterSet(mode) => {
            if state.filter == mode {
                return DispatchResult::unchanged();
            }
            state.filter = mode;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::ViewToggle => {
            state.view = match state.view {
                ViewMode::Carousel => ViewMode::List,
                ViewMode::List => ViewMode::Carousel,
            };
            DispatchResult::changed()
        }

        Action::ListMove(delta) => {
            if state.filtered_indices.is_empty() {
                return DispatchResult::unchanged();
            }
            let last = state.filtered_indices.len() as i32 - 1;
            let next = (state.list_selected as i32 + delta).clamp(0, last) as usize;
            if next == state.list_selected {
                return DispatchResult::unchanged();
            }
            state.list_selected = next;
            DispatchResult::changed()
        }

        Action::ListOpen(row) => {
            let Some(entry_index) = state.filtered_indices.get(row).copied() else {
                return DispatchResult::unchanged();
            };
            state.list_selected = row;
            state.view = ViewMode::Carousel;
            state.carousel.jump_to(entry_index, true);
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            state.carousel.set_viewport(carousel_viewport(width));
            DispatchResult::changed()
        }

        Action::Tick => tick(state),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Columns the carousel strip's interior spans (bordered block).
pub fn carousel_viewport(width: u16) -> f32 {
    width.saturating_sub(2) as f32
}

fn tick(state: &mut AppState) -> DispatchResult<Effect> {
    state.tick = state.tick.wrapping_add(1);

    // The staged boot advances one step per tick; the index must be fully
    // loaded before the carousel computes any offset.
    match &state.boot {
        BootStage::BuildingCarousel => {
            let viewport = carousel_viewport(state.terminal_size.0);
            state.carousel = CarouselState::new(state.catalog.len(), viewport);
            state.boot = BootStage::BuildingList;
            return DispatchResult::changed();
        }
        BootStage::BuildingList => {
            state.rebuild_filtered();
            state.boot = BootStage::Centering;
            return DispatchResult::changed();
        }
        BootStage::Centering => {
            state.carousel.jump_to(0, false);
            state.boot = BootStage::Ready;
            return with_effects(sync_selection(state));
        }
        BootStage::Connecting | BootStage::LoadingIndex | BootStage::Failed(_) => {
            return DispatchResult::unchanged();
        }
        BootStage::Ready => {}
    }

    let mut dwell = false;
    if state.intro_dwell_ms > 0 {
        state.intro_dwell_ms = state.intro_dwell_ms.saturating_sub(TICK_MS);
        dwell = true;
    }
    let moved = state.carousel.tick(TICK_MS);
    let effects = sync_selection(state);
    if !dwell && !moved && effects.is_empty() {
        return DispatchResult::unchanged();
    }
    with_effects(effects)
}

/// Fire the detail presenter when the centered chip differs from the last
/// notified one — exactly one notification per distinct settled chip.
fn sync_selection(state: &mut AppState) -> Vec<Effect> {
    if state.catalog.is_empty() {
        return Vec::new();
    }
    let id = state.selected_id();
    if state.last_notified == Some(id) {
        return Vec::new();
    }
    state.last_notified = Some(id);
    present_entry(state, id)
}

/// Placeholder card for `id` plus whatever loads its caches still need.
fn present_entry(state: &mut AppState, id: u16) -> Vec<Effect> {
    state.detail_error = None;
    state.panel = EncounterPanel::Idle;

    let mut effects = Vec::new();
    if !state.details.contains_key(&id) {
        effects.push(Effect::LoadDetail { id });
    }
    if !state.species.contains_key(&id) {
        effects.push(Effect::LoadSpecies { id });
    }
    if !state.sprites.contains_key(&id) {
        effects.push(Effect::LoadSprite {
            id,
            url: api::sprite_url(id),
        });
    }
    if state.details.contains_key(&id) && state.species.contains_key(&id) {
        effects.extend(after_base_card(state, id));
    }
    effects
}

/// The base card is complete: hand off to the encounter panel. The fetch is
/// decoupled from the card and may fail without invalidating it.
fn after_base_card(state: &mut AppState, id: u16) -> Vec<Effect> {
    if let Some(raw) = state.encounters.get(&id) {
        state.panel = EncounterPanel::Ready {
            groups: group_by_version(raw),
            selected_version: 0,
        };
        Vec::new()
    } else {
        state.panel = EncounterPanel::Loading;
        vec![Effect::LoadEncounters { id }]
    }
}

/// While typing, an exact id or exact name match recenters the carousel.
fn search_jump(state: &mut AppState) {
    let query = state.search.query.trim().to_lowercase();
    if query.is_empty() {
        return;
    }
    if let Ok(id) = query.parse::<u16>() {
        if id >= 1 && (id as usize) <= state.catalog.len() {
            state.carousel.jump_to(id as usize - 1, true);
        }
        return;
    }
    if let Some(entry_index) = state.catalog.iter().position(|entry| entry.name == query) {
        state.carousel.jump_to(entry_index, true);
    }
}

fn cycle_version_tab(state: &mut AppState, step: i32) -> DispatchResult<Effect> {
    let EncounterPanel::Ready {
        groups,
        selected_version,
    } = &mut state.panel
    else {
        return DispatchResult::unchanged();
    };
    if groups.is_empty() {
        return DispatchResult::unchanged();
    }
    let len = groups.len() as i32;
    let next = (*selected_version as i32 + step).rem_euclid(len) as usize;
    if next == *selected_version {
        return DispatchResult::unchanged();
    }
    *selected_version = next;
    DispatchResult::changed()
}

fn with_effects(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}
