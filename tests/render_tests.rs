//! Render snapshot checks against a test buffer.

use tui_dispatch::testing::*;

use livingdex::{
    action::Action,
    reducer::reducer,
    state::{
        AppState, BootStage, DexEntry, EncounterLocation, EncounterSlot, EncounterVersionDetail,
        EntryDetail, SpeciesInfo, ViewMode,
    },
    ui,
};

fn catalog(count: u16) -> Vec<DexEntry> {
    (1..=count)
        .map(|id| DexEntry {
            id,
            name: format!("entry-{id}"),
        })
        .collect()
}

/// A state past boot and past the intro dwell.
fn ready_state(count: u16) -> AppState {
    let mut state = AppState::new();
    reducer(&mut state, Action::UiTerminalResize(100, 30));
    reducer(&mut state, Action::Init);
    reducer(&mut state, Action::IndexDidLoad(catalog(count)));
    for _ in 0..64 {
        reducer(&mut state, Action::Tick);
        if state.booted() {
            break;
        }
    }
    assert!(state.booted());
    state
}

fn draw(state: &AppState) -> String {
    let mut render = RenderHarness::new(100, 30);
    render.render_to_string_plain(|frame| {
        ui::render(frame, frame.area(), state);
    })
}

#[test]
fn intro_screen_names_the_boot_stage() {
    let mut state = AppState::new();
    reducer(&mut state, Action::Init);
    assert_eq!(state.boot, BootStage::LoadingIndex);

    let output = draw(&state);
    assert!(output.contains("LIVING DEX"));
    assert!(output.contains("Loading dex index"));
}

#[test]
fn boot_failure_renders_the_fatal_message() {
    let mut state = AppState::new();
    reducer(&mut state, Action::Init);
    reducer(&mut state, Action::IndexDidError("503".to_string()));

    let output = draw(&state);
    assert!(output.contains("Boot failed: 503"));
    assert!(output.contains("press q to quit"));
}

#[test]
fn ready_screen_shows_chips_and_the_loading_card() {
    let state = ready_state(40);
    let output = draw(&state);

    assert!(output.contains("LIVING DEX"));
    assert!(output.contains("0/1025 caught"));
    assert!(output.contains("#0001"));
    assert!(output.contains("Loading…"));
    assert!(output.contains("Loading encounter data…"));
}

#[test]
fn loaded_card_shows_name_genus_flavor_and_encounters() {
    let mut state = ready_state(40);
    reducer(
        &mut state,
        Action::DetailDidLoad {
            id: 1,
            detail: EntryDetail {
                id: 1,
                name: "bulbasaur".to_string(),
                types: vec!["grass".to_string(), "poison".to_string()],
            },
        },
    );
    reducer(
        &mut state,
        Action::SpeciesDidLoad {
            id: 1,
            species: SpeciesInfo {
                generation: Some("generation-i".to_string()),
                genus: Some("Seed Pokémon".to_string()),
                flavor_text: Some("A strange seed was planted on its back.".to_string()),
            },
        },
    );
    reducer(
        &mut state,
        Action::EncountersDidLoad {
            id: 1,
            locations: vec![EncounterLocation {
                area: "viridian-forest".to_string(),
                version_details: vec![EncounterVersionDetail {
                    version: "yellow".to_string(),
                    encounters: vec![EncounterSlot {
                        method: "walk".to_string(),
                        min_level: Some(3),
                        max_level: Some(5),
                        chance: Some(15),
                    }],
                }],
            }],
        },
    );

    let output = draw(&state);
    assert!(output.contains("bulbasaur"));
    assert!(output.contains("generation i"));
    assert!(output.contains("Seed Pokémon"));
    assert!(output.contains("A strange seed"));
    assert!(output.contains("1 location area(s)"));
    assert!(output.contains("viridian forest"));
    assert!(output.contains("Lv: 3-5"));
}

#[test]
fn detail_failure_is_inline_while_the_shell_stays_up() {
    let mut state = ready_state(40);
    reducer(
        &mut state,
        Action::DetailDidError {
            id: 1,
            error: "timeout".to_string(),
        },
    );

    let output = draw(&state);
    assert!(output.contains("Error loading data. (timeout)"));
    assert!(output.contains("Could not load encounter data."));
    // Carousel and header still render.
    assert!(output.contains("#0001"));
    assert!(output.contains("LIVING DEX"));
}

#[test]
fn list_view_renders_rows_with_caught_marks() {
    let mut state = ready_state(40);
    reducer(&mut state, Action::CatchToggle);
    reducer(&mut state, Action::ViewToggle);
    assert_eq!(state.view, ViewMode::List);

    let output = draw(&state);
    assert!(output.contains("DEX LIST"));
    assert!(output.contains("entry-1"));
    assert!(output.contains("• caught"));
    assert!(output.contains("• missing"));
}
