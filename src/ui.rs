use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::action::Action;
use crate::carousel::{CarouselState, CHIP_WIDTH, WHEEL_NOTCH};
use crate::encounters::MAX_AREAS_PER_VERSION;
use crate::sprite;
use crate::state::{AppState, BootStage, EncounterPanel, FilterMode, ViewMode, DEX_TOTAL};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_CHIP: Color = Color::Rgb(26, 40, 58);
const BG_CENTER: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(146, 165, 177);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(224, 102, 102);

const STRIP_HEIGHT: u16 = 7;
const SPRITE_ROWS: u16 = 12;

pub struct ScreenLayout {
    pub header: Rect,
    pub strip: Rect,
    pub card: Rect,
    pub panel: Rect,
    pub list: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect, view: ViewMode) -> ScreenLayout {
    match view {
        ViewMode::Carousel => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(STRIP_HEIGHT),
                    Constraint::Min(8),
                    Constraint::Length(3),
                ])
                .split(area);
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(44), Constraint::Percentage(56)])
                .split(rows[2]);
            ScreenLayout {
                header: rows[0],
                strip: rows[1],
                card: body[0],
                panel: body[1],
                list: Rect::default(),
                footer: rows[3],
            }
        }
        ViewMode::List => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(3),
                ])
                .split(area);
            ScreenLayout {
                header: rows[0],
                strip: Rect::default(),
                card: Rect::default(),
                panel: Rect::default(),
                list: rows[1],
                footer: rows[2],
            }
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

    if !state.booted() {
        render_intro(frame, area, state);
        return;
    }

    let layout = screen_layout(area, state.view);
    render_header(frame, layout.header, state);
    match state.view {
        ViewMode::Carousel => {
            render_strip(frame, layout.strip, state);
            render_card(frame, layout.card, state);
            render_panel(frame, layout.panel, state);
        }
        ViewMode::List => render_list(frame, layout.list, state),
    }
    render_footer(frame, layout.footer, state);
}

fn render_intro(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.width < 24 || area.height < 9 {
        frame.render_widget(Paragraph::new(state.boot.hint()), area);
        return;
    }
    let box_width = area.width.min(62);
    let box_area = Rect {
        x: area.x + (area.width.saturating_sub(box_width)) / 2,
        y: area.y + area.height.saturating_sub(9) / 2,
        width: box_width,
        height: 9,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_TEAL))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let failed = matches!(state.boot, BootStage::Failed(_));
    let bar_width = inner.width.saturating_sub(4) as usize;
    let filled = bar_width * state.boot.percent() as usize / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(bar_width.saturating_sub(filled))
    );

    let mut lines = vec![
        Line::from(Span::styled(
            "LIVING DEX",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(bar, Style::default().fg(ACCENT_TEAL))),
        Line::default(),
        Line::from(Span::styled(
            state.boot.hint(),
            if failed {
                Style::default().fg(ACCENT_RED)
            } else {
                Style::default().fg(TEXT_DIM)
            },
        )),
    ];
    if failed {
        lines.push(Line::from(Span::styled(
            "press q to quit",
            Style::default().fg(TEXT_DIM),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_BASE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (caught, missing) = state.progress_counts();
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };

    let line = Line::from(vec![
        Span::styled(
            "LIVING DEX",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {caught}/{DEX_TOTAL} caught • {missing} missing"),
            Style::default().fg(TEXT_DIM),
        ),
        Span::raw("  "),
        Span::styled(search, Style::default().fg(TEXT_MAIN)),
        Span::raw("  "),
        filter_span(state.filter, FilterMode::All),
        Span::raw(" "),
        filter_span(state.filter, FilterMode::Caught),
        Span::raw(" "),
        filter_span(state.filter, FilterMode::Missing),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn filter_span(current: FilterMode, mode: FilterMode) -> Span<'static> {
    let style = if current == mode {
        Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Span::styled(mode.label(), style)
}

fn render_strip(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_BASE));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 5 || state.catalog.is_empty() {
        return;
    }

    let carousel = &state.carousel;
    // Center marker above the chips.
    let marker_x = inner.x + (carousel.viewport / 2.0) as u16;
    if marker_x < inner.right() {
        frame.render_widget(
            Paragraph::new(Span::styled("▼", Style::default().fg(ACCENT_GOLD))),
            Rect {
                x: marker_x,
                y: inner.y,
                width: 1,
                height: 1,
            },
        );
    }

    let stride = CarouselState::stride();
    let first = (((-carousel.offset - carousel.edge_padding()) / stride).floor() as i64 - 1)
        .max(0) as usize;
    let visible = (carousel.viewport / stride) as usize + 3;

    for index in first..(first + visible).min(carousel.count) {
        let left = carousel.edge_padding() + index as f32 * stride + carousel.offset;
        let x = left.round() as i64;
        if x < 0 || x + CHIP_WIDTH as i64 > inner.width as i64 {
            continue;
        }
        let chip_area = Rect {
            x: inner.x + x as u16,
            y: inner.y + 1,
            width: CHIP_WIDTH as u16,
            height: (inner.height - 1).min(4),
        };
        render_chip(frame, chip_area, state, index);
    }
}

fn render_chip(frame: &mut Frame, area: Rect, state: &AppState, index: usize) {
    let entry = &state.catalog[index];
    let centered = state.carousel.is_centered(index);
    let base = if centered {
        Style::default().bg(BG_CENTER).fg(TEXT_MAIN)
    } else {
        Style::default().bg(BG_CHIP).fg(TEXT_DIM)
    };

    let mark = if state.is_caught(entry.id) {
        Span::styled("●", Style::default().fg(ACCENT_RED))
    } else {
        Span::styled("·", Style::default().fg(TEXT_DIM))
    };
    let name: String = entry.name.chars().take(CHIP_WIDTH as usize - 2).collect();

    let id_style = if centered {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };
    let lines = vec![
        Line::from(Span::styled(format!("#{:04}", entry.id), id_style)),
        Line::from(Span::styled(name, base)),
        Line::from(mark),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(base).alignment(Alignment::Center),
        area,
    );
}

fn render_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" DEX ENTRY ")
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SPRITE_ROWS), Constraint::Min(4)])
        .split(inner);

    let id = state.selected_id();
    match state.sprites.get(&id) {
        Some(sprite_data) => {
            let lines = sprite::render_lines(sprite_data, inner.width.min(28), SPRITE_ROWS);
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                rows[0],
            );
        }
        None => {
            frame.render_widget(
                Paragraph::new(Span::styled("( no sprite )", Style::default().fg(TEXT_DIM)))
                    .alignment(Alignment::Center),
                rows[0],
            );
        }
    }

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &state.detail_error {
        lines.push(Line::from(Span::styled(
            state
                .selected_entry()
                .map(|entry| entry.name.clone())
                .unwrap_or_default(),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("#{id:04}"),
            Style::default().fg(TEXT_DIM),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Error loading data. ({error})"),
            Style::default().fg(ACCENT_RED),
        )));
    } else if let Some((detail, species_info)) = state.current_card() {
        lines.push(Line::from(Span::styled(
            detail.name.clone(),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )));
        let generation = species_info
            .generation
            .as_deref()
            .map(|name| name.replace('-', " "))
            .unwrap_or_else(|| "unknown gen".to_string());
        lines.push(Line::from(Span::styled(
            format!("#{id:04} • {generation}"),
            Style::default().fg(TEXT_DIM),
        )));
        let mut type_spans = Vec::new();
        for type_name in &detail.types {
            type_spans.push(Span::styled(
                format!(" {type_name} "),
                Style::default().bg(BG_CENTER).fg(TEXT_MAIN),
            ));
            type_spans.push(Span::raw(" "));
        }
        lines.push(Line::from(type_spans));
        lines.push(Line::from(Span::styled(
            species_info.genus.clone().unwrap_or_else(|| "—".to_string()),
            Style::default().fg(ACCENT_TEAL),
        )));
        lines.push(Line::from(Span::styled(
            species_info
                .flavor_text
                .clone()
                .unwrap_or_else(|| "No flavor text found.".to_string()),
            Style::default().fg(TEXT_MAIN),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Loading…",
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("#{id:04}"),
            Style::default().fg(TEXT_DIM),
        )));
        lines.push(Line::from(Span::styled("—", Style::default().fg(TEXT_DIM))));
    }

    lines.push(Line::default());
    if state.is_caught(id) {
        lines.push(Line::from(vec![
            Span::styled(
                " CAUGHT ● ",
                Style::default().bg(ACCENT_RED).fg(TEXT_MAIN),
            ),
            Span::styled("  [c] release", Style::default().fg(TEXT_DIM)),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled(" MISSING ", Style::default().bg(BG_CHIP).fg(TEXT_DIM)),
            Span::styled("  [c] catch", Style::default().fg(TEXT_DIM)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[1]);
}

fn render_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ENCOUNTERS ")
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let dim = Style::default().fg(TEXT_DIM);
    match &state.panel {
        EncounterPanel::Idle | EncounterPanel::Loading => {
            let text = if state.detail_error.is_some() {
                "Could not load encounter data."
            } else {
                "Loading encounter data…"
            };
            frame.render_widget(Paragraph::new(Span::styled(text, dim)), inner);
        }
        EncounterPanel::Error(error) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Could not load encounter data. ({error})"),
                    Style::default().fg(ACCENT_RED),
                )),
                inner,
            );
        }
        EncounterPanel::Ready {
            groups,
            selected_version,
        } => {
            if groups.is_empty() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "No encounter location data found for this entry.",
                        dim,
                    )),
                    inner,
                );
                return;
            }
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(1),
                ])
                .split(inner);

            let titles: Vec<Line> = groups
                .iter()
                .map(|group| Line::from(normalize_game_name(&group.version)))
                .collect();
            frame.render_widget(
                Tabs::new(titles)
                    .select(*selected_version)
                    .style(dim)
                    .highlight_style(
                        Style::default()
                            .fg(ACCENT_TEAL)
                            .add_modifier(Modifier::BOLD),
                    ),
                rows[0],
            );

            let group = &groups[*selected_version];
            let shown = group.areas.len().min(MAX_AREAS_PER_VERSION);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(
                        "{} • {} location area(s)",
                        normalize_game_name(&group.version),
                        group.areas.len()
                    ),
                    Style::default().fg(ACCENT_GOLD),
                )),
                rows[1],
            );

            let mut lines = Vec::new();
            for summary in group.areas.iter().take(shown) {
                lines.push(Line::from(Span::styled(
                    summary.area.replace('-', " "),
                    Style::default().fg(TEXT_MAIN),
                )));
                lines.push(Line::from(Span::styled(
                    format!(
                        "  {} • {} • {}",
                        summary.method_label(),
                        summary.level_label(),
                        summary.chance_label()
                    ),
                    dim,
                )));
            }
            if group.areas.len() > MAX_AREAS_PER_VERSION {
                lines.push(Line::from(Span::styled(
                    format!(
                        "Showing {MAX_AREAS_PER_VERSION} of {} areas (to keep it fast).",
                        group.areas.len()
                    ),
                    dim,
                )));
            }
            frame.render_widget(Paragraph::new(lines), rows[2]);
        }
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" DEX LIST ")
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    if state.filtered_indices.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No entries match.",
                Style::default().fg(TEXT_DIM),
            )),
            inner,
        );
        return;
    }

    let visible = inner.height as usize;
    let offset = list_window_offset(state.list_selected, state.filtered_indices.len(), visible);
    let mut lines = Vec::new();
    for (row, entry_index) in state
        .filtered_indices
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
    {
        let entry = &state.catalog[*entry_index];
        let caught = state.is_caught(entry.id);
        let cursor = row == state.list_selected;
        let style = match (cursor, caught) {
            (true, _) => Style::default().bg(BG_CENTER).fg(TEXT_MAIN),
            (false, true) => Style::default().fg(ACCENT_TEAL),
            (false, false) => Style::default().fg(TEXT_DIM),
        };
        let mark = if caught { "• caught " } else { "• missing" };
        lines.push(Line::from(Span::styled(
            format!(" #{:04}  {:<24} {mark}", entry.id, entry.name),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BG_CHIP))
        .style(Style::default().bg(BG_BASE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = |key: &str, label: &str| {
        vec![
            Span::styled(format!(" {key} "), Style::default().fg(ACCENT_TEAL)),
            Span::styled(format!("{label}  "), Style::default().fg(TEXT_DIM)),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(hint("q", "quit"));
    spans.extend(hint("/", "search"));
    spans.extend(hint("f", "filter"));
    spans.extend(hint("v", "view"));
    match state.view {
        ViewMode::Carousel => {
            spans.extend(hint("c", "catch"));
            spans.extend(hint("←→", "navigate"));
            spans.extend(hint("[]", "game"));
            spans.extend(hint("drag/wheel", "scroll"));
        }
        ViewMode::List => {
            spans.extend(hint("↑↓", "move"));
            spans.extend(hint("enter", "open"));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Window start for the list view, keeping the cursor near the middle.
pub fn list_window_offset(selected: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    selected.saturating_sub(visible / 2).min(len - visible)
}

fn normalize_game_name(version: &str) -> String {
    version
        .replace('-', " ")
        .split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("version"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn key_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    if state.search.active {
        return match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::SearchStart),
        KeyCode::Char('v') | KeyCode::Tab => Some(Action::ViewToggle),
        KeyCode::Char('f') => Some(Action::FilterCycle),
        _ => match state.view {
            ViewMode::Carousel => match key.code {
                KeyCode::Char('c') | KeyCode::Char(' ') => Some(Action::CatchToggle),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::JumpBy(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::JumpBy(1)),
                KeyCode::PageUp => Some(Action::JumpBy(-10)),
                KeyCode::PageDown => Some(Action::JumpBy(10)),
                KeyCode::Home => Some(Action::JumpTo(0)),
                KeyCode::End => Some(Action::JumpTo(state.catalog.len().saturating_sub(1))),
                KeyCode::Char('[') => Some(Action::VersionTabPrev),
                KeyCode::Char(']') => Some(Action::VersionTabNext),
                _ => None,
            },
            ViewMode::List => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Action::ListMove(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::ListMove(1)),
                KeyCode::PageUp => Some(Action::ListMove(-10)),
                KeyCode::PageDown => Some(Action::ListMove(10)),
                KeyCode::Enter => Some(Action::ListOpen(state.list_selected)),
                _ => None,
            },
        },
    }
}

pub fn mouse_action(mouse: MouseEvent, state: &AppState) -> Option<Action> {
    let area = Rect::new(0, 0, state.terminal_size.0, state.terminal_size.1);
    let layout = screen_layout(area, state.view);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match state.view {
            ViewMode::Carousel if hit(layout.strip, mouse.column, mouse.row) => {
                Some(Action::PointerDown {
                    x: strip_x(layout.strip, mouse.column),
                })
            }
            ViewMode::List if hit(layout.list, mouse.column, mouse.row) => {
                let inner_top = layout.list.y + 1;
                if mouse.row < inner_top {
                    return None;
                }
                let visible = layout.list.height.saturating_sub(2) as usize;
                let offset = list_window_offset(
                    state.list_selected,
                    state.filtered_indices.len(),
                    visible,
                );
                let row = offset + (mouse.row - inner_top) as usize;
                (row < state.filtered_indices.len()).then_some(Action::ListOpen(row))
            }
            _ => None,
        },
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::PointerMove {
            x: strip_x(layout.strip, mouse.column),
        }),
        MouseEventKind::Up(_) => Some(Action::PointerUp),
        MouseEventKind::ScrollUp => match state.view {
            ViewMode::Carousel => Some(Action::Wheel {
                delta: -WHEEL_NOTCH,
            }),
            ViewMode::List => Some(Action::ListMove(-3)),
        },
        MouseEventKind::ScrollDown => match state.view {
            ViewMode::Carousel => Some(Action::Wheel { delta: WHEEL_NOTCH }),
            ViewMode::List => Some(Action::ListMove(3)),
        },
        MouseEventKind::ScrollLeft => match state.view {
            ViewMode::Carousel => Some(Action::Wheel {
                delta: -WHEEL_NOTCH,
            }),
            ViewMode::List => None,
        },
        MouseEventKind::ScrollRight => match state.view {
            ViewMode::Carousel => Some(Action::Wheel { delta: WHEEL_NOTCH }),
            ViewMode::List => None,
        },
        _ => None,
    }
}

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Strip-interior x for a terminal column; drags may leave the strip, so the
/// result can be negative or past the right edge.
fn strip_x(strip: Rect, column: u16) -> f32 {
    column as f32 - (strip.x + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn list_window_keeps_cursor_visible() {
        assert_eq!(list_window_offset(0, 100, 10), 0);
        assert_eq!(list_window_offset(50, 100, 10), 45);
        assert_eq!(list_window_offset(99, 100, 10), 90);
        assert_eq!(list_window_offset(3, 5, 10), 0);
        assert_eq!(list_window_offset(3, 5, 0), 0);
    }

    #[test]
    fn game_names_drop_the_version_suffix() {
        assert_eq!(normalize_game_name("red"), "red");
        assert_eq!(normalize_game_name("black-2"), "black 2");
        assert_eq!(normalize_game_name("omega-ruby-version"), "omega ruby");
    }

    #[test]
    fn search_mode_captures_text_keys() {
        let mut state = AppState::new();
        state.search.active = true;
        assert_eq!(
            key_action(key(KeyCode::Char('q')), &state),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(key_action(key(KeyCode::Esc), &state), Some(Action::SearchCancel));

        state.search.active = false;
        assert_eq!(key_action(key(KeyCode::Char('q')), &state), Some(Action::Quit));
    }

    #[test]
    fn view_modes_route_navigation_keys_differently() {
        let mut state = AppState::new();
        assert_eq!(
            key_action(key(KeyCode::Left), &state),
            Some(Action::JumpBy(-1))
        );
        state.view = ViewMode::List;
        assert_eq!(
            key_action(key(KeyCode::Down), &state),
            Some(Action::ListMove(1))
        );
        assert_eq!(
            key_action(key(KeyCode::Enter), &state),
            Some(Action::ListOpen(0))
        );
    }

    #[test]
    fn strip_clicks_become_pointer_events() {
        let state = AppState::new();
        let layout = screen_layout(Rect::new(0, 0, 80, 24), ViewMode::Carousel);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: layout.strip.y + 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_action(event, &state),
            Some(Action::PointerDown { x: 39.0 })
        );

        // Outside the strip, a press is not a drag start.
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: 22,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_action(event, &state), None);
    }

    #[test]
    fn wheel_direction_maps_to_signed_notches() {
        let state = AppState::new();
        let scroll = |kind| MouseEvent {
            kind,
            column: 40,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_action(scroll(MouseEventKind::ScrollDown), &state),
            Some(Action::Wheel { delta: WHEEL_NOTCH })
        );
        assert_eq!(
            mouse_action(scroll(MouseEventKind::ScrollUp), &state),
            Some(Action::Wheel {
                delta: -WHEEL_NOTCH
            })
        );
    }
}
