use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use parlons_core::ChatMode;
use ratatui::layout::Rect;

use crate::app::{App, Screen};
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => {
            if app.screen() == Screen::Chat && !app.is_sending() {
                app.composer.insert_str(&text);
            }
        }
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick(),
    }
    app.poll_pending().await;
    app.sync_scroll();
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work on any screen
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::F(2) {
        app.cycle_language();
        return;
    }

    match app.screen() {
        Screen::Chooser => handle_chooser(app, key),
        Screen::Chat => handle_chat(app, key),
    }
}

fn handle_chooser(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.chooser_down(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.chooser_up(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('1') => app.open(ChatMode::Check),
        KeyCode::Char('2') => app.open(ChatMode::Suggest),
        _ => {}
    }
}

fn handle_chat(app: &mut App, key: KeyEvent) {
    let page = app.chat_height.max(2) / 2;

    match key.code {
        KeyCode::Esc => app.back_to_chooser(),

        // Shift+Enter keeps typing on a new line; plain Enter sends
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
            if !app.is_sending() {
                app.composer.newline();
            }
        }
        KeyCode::Enter => app.submit(),

        // Transcript scrolling
        KeyCode::PageUp => app.scroll.scroll_up(page),
        KeyCode::PageDown => app.scroll.scroll_down(page),
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll.scroll_up(1),
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll.scroll_down(1),
        KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll.follow_bottom(),

        // The composer is disabled while a request is outstanding
        _ if app.is_sending() => {}

        KeyCode::Backspace => app.composer.backspace(),
        KeyCode::Delete => app.composer.delete(),
        KeyCode::Left => app.composer.move_left(),
        KeyCode::Right => app.composer.move_right(),
        KeyCode::Home => app.composer.move_home(),
        KeyCode::End => app.composer.move_end(),
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.composer.insert_char(c)
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen() != Screen::Chat {
        return;
    }
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll.scroll_down(3),
        MouseEventKind::ScrollUp => app.scroll.scroll_up(3),
        _ => {}
    }
}
