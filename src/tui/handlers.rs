// File: src/tui/handlers.rs
// Handles keyboard input and dispatches actions to the screen controllers.
use crate::error::{AppError, Notice, NoticeAction};
use crate::model::{Field, ScanEvent, ScannerState, next_country_code};
use crate::tui::action::{Action, Tab};
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // --- NOTICE INTERCEPTION ---
    if let Some(notice) = state.notice.take() {
        let share_offered = notice.actions.contains(&NoticeAction::ShareInstead);
        if share_offered && matches!(key.code, KeyCode::Char('s') | KeyCode::Char('y')) {
            return Some(Action::Share);
        }
        return None;
    }

    match state.mode {
        InputMode::Editing => handle_editing(key, state),
        InputMode::Normal => handle_normal(key, state),
    }
}

fn handle_editing(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Esc => state.mode = InputMode::Normal,
        KeyCode::Enter => {
            state.mode = InputMode::Normal;
            return submit_action(state);
        }
        KeyCode::Tab => state.next_field(),
        KeyCode::BackTab => state.previous_field(),
        KeyCode::Backspace => {
            let mut text = state.focused_text().to_string();
            text.pop();
            state.set_focused_text(text);
        }
        KeyCode::Char(c) => {
            let mut text = state.focused_text().to_string();
            text.push(c);
            state.set_focused_text(text);
        }
        _ => {}
    }
    None
}

/// Enter while editing submits the current form, or feeds the scanner.
fn submit_action(state: &AppState) -> Option<Action> {
    match state.tab {
        Tab::Social | Tab::Generator => Some(Action::Generate),
        Tab::Scanner if state.scanner.state().is_scanning() => {
            Some(Action::SubmitFrame(state.scan_input.clone()))
        }
        Tab::Scanner => None,
    }
}

fn handle_normal(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        KeyCode::Char('1') => state.tab = Tab::Social,
        KeyCode::Char('2') => state.tab = Tab::Generator,
        KeyCode::Char('3') => state.tab = Tab::Scanner,
        KeyCode::Char('t') => state.tab = state.tab.next(),
        _ => {
            return match state.tab {
                Tab::Social => handle_social(key, state),
                Tab::Generator => handle_generator(key, state),
                Tab::Scanner => handle_scanner(key, state),
            };
        }
    }
    None
}

fn handle_social(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => state.next_field(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => state.previous_field(),
        KeyCode::Left | KeyCode::Char('h') => switch_mode(state, false),
        KeyCode::Right | KeyCode::Char('l') => switch_mode(state, true),
        KeyCode::Char('i') | KeyCode::Char('e') => state.mode = InputMode::Editing,
        KeyCode::Char('c') if state.focused_field() == Field::CountryCode => {
            let next = next_country_code(state.social.field(Field::CountryCode));
            state.social.update_field(Field::CountryCode, next);
        }
        KeyCode::Char('x') => {
            let field = state.focused_field();
            state.social.clear_field(field);
        }
        KeyCode::Enter => return Some(Action::Generate),
        KeyCode::Char('s') => return Some(Action::Share),
        KeyCode::Char('g') => return Some(Action::SaveToGallery),
        _ => {}
    }
    None
}

fn switch_mode(state: &mut AppState, forward: bool) {
    let current = state.social.mode();
    let mode = if forward {
        current.next()
    } else {
        current.previous()
    };
    state.social.switch_mode(mode);
    state.social_focus = 0;
    state.result_highlighted = false;
    state.message = mode.info().subtitle.to_string();
}

fn handle_generator(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => state.next_field(),
        KeyCode::Char('i') | KeyCode::Char('e') => state.mode = InputMode::Editing,
        KeyCode::Char('x') => state.set_focused_text(String::new()),
        KeyCode::Enter => return Some(Action::Generate),
        KeyCode::Char('s') => return Some(Action::Share),
        KeyCode::Char('p') => return Some(Action::Paste),
        _ => {}
    }
    None
}

fn handle_scanner(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match state.scanner.state() {
        ScannerState::Idle => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::StartScan),
            _ => None,
        },
        ScannerState::Scanning => match key.code {
            KeyCode::Esc => Some(Action::CancelScan),
            KeyCode::Char('i') | KeyCode::Char('e') => {
                state.mode = InputMode::Editing;
                None
            }
            KeyCode::Enter => Some(Action::SubmitFrame(state.scan_input.clone())),
            KeyCode::Char('g') => Some(Action::PickImage(state.scan_input.clone())),
            _ => None,
        },
        ScannerState::Result(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('a') => Some(Action::ScanAnother),
            KeyCode::Char('c') => Some(Action::CopyResult),
            KeyCode::Char('o') => Some(Action::OpenLink),
            _ => None,
        },
    }
}

fn report(state: &mut AppState, err: AppError) {
    log::warn!("{}", err);
    state.show_notice(err.to_notice());
}

/// Runs an action against the controller of the active tab.
pub async fn dispatch(state: &mut AppState, action: Action) {
    match action {
        Action::Quit => {}
        Action::Generate => generate(state),
        Action::Share => share(state).await,
        Action::SaveToGallery => match state.social.save_to_gallery().await {
            Ok(notice) => state.show_notice(notice),
            Err(e) => report(state, e),
        },
        Action::Paste => match state.generator.paste().await {
            Ok(true) => state.message = "Pasted from clipboard.".to_string(),
            Ok(false) => state.message = "Clipboard is empty.".to_string(),
            Err(e) => report(state, e),
        },
        Action::StartScan => match state.scanner.start().await {
            Ok(crate::controller::StartOutcome::Scanning) => {
                state.scan_input.clear();
                state.message = "Scanning. Type a payload and press Enter, or a path and press g.".to_string();
            }
            Ok(crate::controller::StartOutcome::PermissionRequested { granted }) => {
                state.message = if granted {
                    "Camera permission granted. Press Enter to scan.".to_string()
                } else {
                    "Camera permission denied.".to_string()
                };
            }
            Err(e) => report(state, e),
        },
        Action::CancelScan => match state.scanner.cancel().await {
            Ok(()) => state.message = "Scan cancelled.".to_string(),
            Err(e) => report(state, e),
        },
        Action::SubmitFrame(payload) => {
            if state.scanner.handle_scan_event(ScanEvent::qr(payload)).await {
                state.scan_input.clear();
                state.message = "QR code detected.".to_string();
            }
        }
        Action::PickImage(path) => {
            let trimmed = path.trim();
            let next = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            state.desktop.picker.set_next(next);
            match state.scanner.pick_from_gallery().await {
                Ok(outcome) => {
                    if let Some(notice) = outcome.notice() {
                        state.show_notice(notice);
                    }
                    if state.scanner.result().is_some() {
                        state.scan_input.clear();
                    }
                }
                Err(e) => report(state, e),
            }
        }
        Action::ScanAnother => match state.scanner.scan_another().await {
            Ok(()) => state.message = "Scanning.".to_string(),
            Err(e) => report(state, e),
        },
        Action::CopyResult => match state.scanner.copy_to_clipboard().await {
            Ok(notice) => state.show_notice(notice),
            Err(e) => report(state, e),
        },
        Action::OpenLink => match state.scanner.open_link().await {
            Ok(()) => state.message = "Link opened.".to_string(),
            Err(e) => report(state, e),
        },
    }
}

fn generate(state: &mut AppState) {
    let result = match state.tab {
        Tab::Social => state.social.generate().map(|_| state.social.take_ui_hints()),
        Tab::Generator => state
            .generator
            .generate()
            .map(|_| state.generator.take_ui_hints()),
        Tab::Scanner => return,
    };
    match result {
        Ok(hints) => {
            state.apply_hints(hints);
            state.message = "QR code generated.".to_string();
        }
        Err(e) => report(state, e),
    }
}

async fn share(state: &mut AppState) {
    let result = match state.tab {
        Tab::Generator => state.generator.share_image().await,
        _ => state.social.share_image().await,
    };
    match result {
        Ok(path) => state.show_notice(Notice::success(format!("Saved to {}", path.display()))),
        Err(e) => report(state, e),
    }
}
