use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::ledger::Filter;
use crate::store::Store;
use crate::ui::app::{Action, App, InputMode};
use crate::ui::commands;
use crate::ui::render::CHROME_ROWS;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_up};

/// How often the loop wakes without input, so alerts can expire on time.
const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(store: &mut Store, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    app.dispatch(Action::Load, store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "TUI exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        app.tick(Instant::now());
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(CHROME_ROWS) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            handle_key(key, app, store)?;
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Entry => handle_entry_input(key, app, store),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('a') => app.input_mode = InputMode::Entry,
        KeyCode::Char('j') | KeyCode::Down => {
            let page = app.visible_rows;
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') => {
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        KeyCode::Char('G') => {
            let page = app.visible_rows;
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        KeyCode::Char('f') => {
            let next = app.filter.next();
            app.dispatch(Action::SetFilter(next), store)?;
        }
        KeyCode::Char('1') => app.dispatch(Action::SetFilter(Filter::All), store)?,
        KeyCode::Char('2') => app.dispatch(Action::SetFilter(Filter::Income), store)?,
        KeyCode::Char('3') => app.dispatch(Action::SetFilter(Filter::Expense), store)?,
        KeyCode::Char('D') => commands::handle_command("delete", app, store)?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            if let Some(id) = app.notifications.active().last().map(|a| a.id) {
                app.notifications.dismiss(id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_entry_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.clear_form();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.dispatch(Action::Submit, store)?,
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left => app.form.cycle(-1, app.categories.len()),
        KeyCode::Right => app.form.cycle(1, app.categories.len()),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char(c) => app.form.input_char(c),
        _ => {}
    }
    Ok(())
}
