//! Fieldnote TUI entry point.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fieldnote_tui::api_client::RestClient;
use fieldnote_tui::config::TuiConfig;
use fieldnote_tui::error::TuiError;
use fieldnote_tui::events::TuiEvent;
use fieldnote_tui::keys::{map_key, Action};
use fieldnote_tui::nav::{InputMode, Section};
use fieldnote_tui::persistence::{self, PersistedState};
use fieldnote_tui::state::{select_next_id, select_prev_id, App, MenuEntry, MenuState};
use fieldnote_tui::views::{render_view, sidebar};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = TuiConfig::load()?;
    let _log_guard = fieldnote_tui::telemetry::init_file_logger(&config.log_dir)?;
    tracing::info!(api = %config.api_base_url, "Starting fieldnote");

    let api = RestClient::new(&config)?;
    let mut app = App::new(config, api);

    let mut restored_selection = None;
    if let Ok(Some(state)) = persistence::load(&app.config.state_path) {
        for section in state.collapsed_sections {
            app.sidebar.collapsed.insert(section);
        }
        restored_selection = state.selected_note_id;
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};
    app.frame_area = terminal.size()?;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    app.load_notes().await;
    if let Some(id) = restored_selection {
        app.select_note(&id);
    }

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event).await? {
                    break;
                }
            }
        }
    }

    let persisted = PersistedState {
        collapsed_sections: Section::all()
            .iter()
            .copied()
            .filter(|s| app.sidebar.is_collapsed(*s))
            .collect(),
        selected_note_id: app.notes.selected.clone(),
    };
    let _ = persistence::save(&app.config.state_path, &persisted);
    tracing::info!("Fieldnote exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Mouse(mouse) => {
                        if let MouseEventKind::Down(_) = mouse.kind {
                            let _ = sender.blocking_send(TuiEvent::MouseDown {
                                column: mouse.column,
                                row: mouse.row,
                            });
                        }
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, event: TuiEvent) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(app.mode, key) {
                return handle_action(app, action).await;
            }
        }
        TuiEvent::MouseDown { column, row } => app.handle_mouse_down(column, row),
        TuiEvent::Resize { width, height } => app.frame_area = Rect::new(0, 0, width, height),
        TuiEvent::Tick => app.prune_notifications(),
    }
    Ok(false)
}

async fn handle_action(app: &mut App, action: Action) -> Result<bool, TuiError> {
    match action {
        Action::Quit => return Ok(true),
        Action::MoveDown => move_selection(app, true),
        Action::MoveUp => move_selection(app, false),
        Action::MoveRight => move_tag_cursor(app, true),
        Action::MoveLeft => move_tag_cursor(app, false),
        Action::FocusEditor => {
            let editable = app
                .notes
                .selected_note()
                .map(|n| !n.is_deleted)
                .unwrap_or(false);
            if editable {
                app.mode = InputMode::Edit;
            }
        }
        Action::NewNote => app.create_note().await,
        Action::DeleteNote => {
            if let Some(id) = app.notes.selected.clone() {
                app.delete_note(&id);
            }
        }
        Action::RestoreNote => {
            if let Some(id) = app.notes.selected.clone() {
                app.restore_note(&id);
            }
        }
        Action::TogglePin => {
            if let Some(id) = app.notes.selected.clone() {
                app.toggle_pin(&id);
            }
        }
        Action::ToggleSection(section) => app.sidebar.toggle_section(section),
        Action::OpenSearch => app.mode = InputMode::Search,
        Action::OpenMenu => {
            let menu = app.notes.selected_note().map(MenuState::for_note);
            if let Some(menu) = menu {
                app.editor.menu = Some(menu);
                app.mode = InputMode::Menu;
            }
        }
        Action::OpenTagInput => {
            let editable = app
                .notes
                .selected_note()
                .map(|n| !n.is_deleted)
                .unwrap_or(false);
            if editable {
                app.editor.tag_input.clear();
                app.mode = InputMode::TagInput;
            }
        }
        Action::OpenTagSelect => {
            let has_tags = app
                .notes
                .selected_note()
                .map(|n| !n.is_deleted && !n.tags.is_empty())
                .unwrap_or(false);
            if has_tags {
                app.editor.tag_cursor = 0;
                app.mode = InputMode::TagSelect;
            }
        }
        Action::RemoveTag => remove_tag_under_cursor(app),
        Action::Refresh => app.load_notes().await,
        Action::Confirm => confirm(app),
        Action::Cancel => cancel(app),
        Action::Char(c) => match app.mode {
            InputMode::Search => app.sidebar.search_query.push(c),
            InputMode::TagInput => app.editor.tag_input.push(c),
            _ => {}
        },
        Action::Backspace => match app.mode {
            InputMode::Search => {
                app.sidebar.search_query.pop();
            }
            InputMode::TagInput => {
                app.editor.tag_input.pop();
            }
            _ => {}
        },
        Action::ClearLine => match app.mode {
            InputMode::Search => app.sidebar.search_query.clear(),
            InputMode::TagInput => app.editor.tag_input.clear(),
            _ => {}
        },
        Action::EditorKey(key) => {
            if app.mode == InputMode::Edit {
                let modified = app.editor.textarea.input(key);
                if modified {
                    if let Some(id) = app.notes.selected.clone() {
                        let content = app.editor.content();
                        app.update_note(&id, content);
                    }
                }
            }
        }
    }
    Ok(false)
}

fn move_selection(app: &mut App, forward: bool) {
    match app.mode {
        InputMode::Menu => {
            if let Some(menu) = &mut app.editor.menu {
                if forward {
                    menu.move_down();
                } else {
                    menu.move_up();
                }
            }
        }
        InputMode::Browse => {
            let ids = sidebar::visible_note_ids(
                &app.notes.notes,
                &app.sidebar.search_query,
                &app.sidebar.collapsed,
            );
            let next = if forward {
                select_next_id(&ids, app.notes.selected.as_ref())
            } else {
                select_prev_id(&ids, app.notes.selected.as_ref())
            };
            if let Some(id) = next {
                app.select_note(&id);
            }
        }
        _ => {}
    }
}

fn move_tag_cursor(app: &mut App, forward: bool) {
    if app.mode != InputMode::TagSelect {
        return;
    }
    let len = app
        .notes
        .selected_note()
        .map(|n| n.tags.len())
        .unwrap_or(0);
    if len == 0 {
        return;
    }
    if forward {
        app.editor.tag_cursor = (app.editor.tag_cursor + 1).min(len - 1);
    } else {
        app.editor.tag_cursor = app.editor.tag_cursor.saturating_sub(1);
    }
}

fn remove_tag_under_cursor(app: &mut App) {
    let Some(id) = app.notes.selected.clone() else {
        return;
    };
    let tag = app.notes.get(&id).and_then(|n| {
        let cursor = app.editor.tag_cursor.min(n.tags.len().saturating_sub(1));
        n.tags.get(cursor).cloned()
    });
    if let Some(tag) = tag {
        app.remove_tag(&id, &tag);
    }
    let remaining = app.notes.get(&id).map(|n| n.tags.len()).unwrap_or(0);
    if remaining == 0 {
        app.mode = InputMode::Browse;
    } else {
        app.editor.tag_cursor = app.editor.tag_cursor.min(remaining - 1);
    }
}

fn confirm(app: &mut App) {
    match app.mode {
        // Enter keeps the filter active and hands focus back to the list.
        InputMode::Search => app.mode = InputMode::Browse,
        InputMode::TagInput => {
            if let Some(id) = app.notes.selected.clone() {
                let tag = app.editor.tag_input.trim().to_string();
                if !tag.is_empty() {
                    app.add_tag(&id, &tag);
                }
            }
            app.editor.tag_input.clear();
            app.mode = InputMode::Browse;
        }
        InputMode::Menu => run_menu_entry(app),
        _ => {}
    }
}

fn cancel(app: &mut App) {
    match app.mode {
        // Esc in browse clears an active filter.
        InputMode::Browse => app.sidebar.search_query.clear(),
        // The filter survives leaving search mode.
        InputMode::Search => app.mode = InputMode::Browse,
        InputMode::Edit => app.mode = InputMode::Browse,
        InputMode::TagInput => {
            app.editor.tag_input.clear();
            app.mode = InputMode::Browse;
        }
        InputMode::TagSelect => app.mode = InputMode::Browse,
        InputMode::Menu => {
            app.editor.menu = None;
            app.mode = InputMode::Browse;
        }
    }
}

fn run_menu_entry(app: &mut App) {
    let entry = app.editor.menu.as_ref().and_then(|m| m.current());
    app.editor.menu = None;
    app.mode = InputMode::Browse;
    let Some(id) = app.notes.selected.clone() else {
        return;
    };
    match entry {
        Some(MenuEntry::TogglePin) => app.toggle_pin(&id),
        Some(MenuEntry::Delete) => app.delete_note(&id),
        Some(MenuEntry::Restore) => app.restore_note(&id),
        Some(MenuEntry::Close) | None => {}
    }
}
