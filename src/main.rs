use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tui_dispatch::EffectStore;

use livingdex::action::Action;
use livingdex::api;
use livingdex::carousel::TICK_MS;
use livingdex::effect::Effect;
use livingdex::reducer::reducer;
use livingdex::sprite;
use livingdex::state::{AppState, DEX_TOTAL};
use livingdex::store;
use livingdex::ui;

#[derive(Parser, Debug)]
#[command(name = "livingdex")]
#[command(about = "Living-dex catalog tracker TUI")]
struct Args {
    /// Directory for the caught-set file (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &args).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let caught_path = store::caught_file_path(args.data_dir.as_deref());

    let mut store = EffectStore::new(AppState::new(), reducer);
    let (width, height) = crossterm::terminal::size()?;
    dispatch(&mut store, Action::UiTerminalResize(width, height), &tx, &caught_path);
    dispatch(&mut store, Action::Init, &tx, &caught_path);

    let tick_rate = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, frame.area(), store.state()))?;

        // Drain completions from spawned effect tasks.
        while let Ok(action) = rx.try_recv() {
            dispatch(&mut store, action, &tx, &caught_path);
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(action) = ui::key_action(key, store.state()) {
                        if matches!(action, Action::Quit) {
                            break;
                        }
                        dispatch(&mut store, action, &tx, &caught_path);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = ui::mouse_action(mouse, store.state()) {
                        dispatch(&mut store, action, &tx, &caught_path);
                    }
                }
                Event::Resize(w, h) => {
                    dispatch(&mut store, Action::UiTerminalResize(w, h), &tx, &caught_path);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            dispatch(&mut store, Action::Tick, &tx, &caught_path);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn dispatch(
    store: &mut EffectStore<AppState, Action, Effect>,
    action: Action,
    tx: &mpsc::UnboundedSender<Action>,
    caught_path: &Path,
) {
    let result = store.dispatch(action);
    for effect in result.effects {
        handle_effect(effect, tx, caught_path);
    }
}

/// Run one declared effect on the runtime; completions come back as actions.
fn handle_effect(effect: Effect, tx: &mpsc::UnboundedSender<Action>, caught_path: &Path) {
    match effect {
        Effect::LoadCaught => {
            let tx = tx.clone();
            let path = caught_path.to_path_buf();
            tokio::spawn(async move {
                let mut ids: Vec<u16> = store::load(&path).await.into_iter().collect();
                ids.sort_unstable();
                let _ = tx.send(Action::CaughtDidLoad(ids));
            });
        }
        Effect::SaveCaught { ids } => {
            let path = caught_path.to_path_buf();
            tokio::spawn(async move {
                // Fire and forget: a failed write only costs this session's marks.
                let _ = store::save(&path, ids).await;
            });
        }
        Effect::LoadIndex => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_index(DEX_TOTAL).await {
                    Ok(entries) => Action::IndexDidLoad(entries),
                    Err(error) => Action::IndexDidError(error.to_string()),
                };
                let _ = tx.send(action);
            });
        }
        Effect::LoadDetail { id } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_detail(id).await {
                    Ok(detail) => Action::DetailDidLoad { id, detail },
                    Err(error) => Action::DetailDidError {
                        id,
                        error: error.to_string(),
                    },
                };
                let _ = tx.send(action);
            });
        }
        Effect::LoadSpecies { id } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_species(id).await {
                    Ok(species) => Action::SpeciesDidLoad { id, species },
                    Err(error) => Action::SpeciesDidError {
                        id,
                        error: error.to_string(),
                    },
                };
                let _ = tx.send(action);
            });
        }
        Effect::LoadEncounters { id } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_encounters(id).await {
                    Ok(locations) => Action::EncountersDidLoad { id, locations },
                    Err(error) => Action::EncountersDidError {
                        id,
                        error: error.to_string(),
                    },
                };
                let _ = tx.send(action);
            });
        }
        Effect::LoadSprite { id, url } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_bytes(&url).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes) {
                        Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                        Err(error) => Action::SpriteDidError { id, error },
                    },
                    Err(error) => Action::SpriteDidError {
                        id,
                        error: error.to_string(),
                    },
                };
                let _ = tx.send(action);
            });
        }
    }
}
