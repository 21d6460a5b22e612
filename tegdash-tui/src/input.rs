//! Keyboard input dispatch: overlays → global keys → panel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tegdash_core::ViewState;

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::DeviceForm => {
            handle_device_form(app, key);
            return;
        }
        Overlay::Help | Overlay::Interpretation => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Char('i')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.activate(ViewState::Theoretical);
            return;
        }
        KeyCode::Char('2') => {
            app.activate(ViewState::Real);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.view() {
                ViewState::Theoretical => ViewState::Real,
                ViewState::Real => ViewState::Theoretical,
            };
            app.activate(next);
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('r') => {
            app.refresh();
            return;
        }
        _ => {}
    }

    // 3. Panel keys.
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('l') | KeyCode::Right => app.nudge_focused(1),
        KeyCode::Char('h') | KeyCode::Left => app.nudge_focused(-1),
        KeyCode::Char('L') => app.nudge_focused(10),
        KeyCode::Char('H') => app.nudge_focused(-10),
        KeyCode::Char('s') => app.cycle_select(),
        _ => match app.view() {
            ViewState::Theoretical => handle_theoretical_key(app, key),
            ViewState::Real => handle_real_key(app, key),
        },
    }
}

fn handle_theoretical_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('m') => app.cycle_module(),
        KeyCode::Char('i') => app.overlay = Overlay::Interpretation,
        _ => {}
    }
}

fn handle_real_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('d') {
        app.overlay = Overlay::DeviceForm;
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_device_form(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Tab | KeyCode::BackTab => app.device_form.next_field(),
        KeyCode::Enter => app.submit_device(),
        KeyCode::Backspace => {
            app.device_form.input_mut().pop();
        }
        KeyCode::Char(c) => {
            app.device_form.input_mut().push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use tegdash_core::page::ids;
    use tegdash_core::RefreshRequest;

    use crate::test_helpers::test_app;
    use crate::worker::WorkerCommand;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _cmds, _resps) = test_app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn tab_keys_switch_views_and_refresh_real() {
        let (mut app, cmds, _resps) = test_app();
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.view(), ViewState::Real);
        assert!(matches!(
            cmds.try_recv(),
            Ok(WorkerCommand::Execute(RefreshRequest::Real(_)))
        ));
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.view(), ViewState::Theoretical);
        assert!(cmds.try_recv().is_err());
    }

    #[test]
    fn module_key_cycles_preset() {
        let (mut app, cmds, _resps) = test_app();
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(
            app.dashboard.panel(ViewState::Theoretical).choice(ids::IN_MODULE).unwrap(),
            "generico"
        );
        assert!(cmds.try_recv().is_ok());
    }

    #[test]
    fn device_form_captures_text() {
        let (mut app, cmds, _resps) = test_app();
        handle_key(&mut app, press(KeyCode::Char('2')));
        let _ = cmds.try_recv();
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.overlay, Overlay::DeviceForm);

        // 'q' is text while the form is open.
        for c in "Lamp q".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert!(app.running);
        assert_eq!(app.device_form.name, "Lamp");
        assert_eq!(app.device_form.energy, "3");

        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.overlay, Overlay::None);
        assert!(matches!(
            cmds.try_recv(),
            Ok(WorkerCommand::Execute(RefreshRequest::Device(_)))
        ));
    }

    #[test]
    fn device_form_only_opens_on_real_tab() {
        let (mut app, _cmds, _resps) = test_app();
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn error_overlay_scrolls_within_history() {
        let (mut app, _cmds, _resps) = test_app();
        for i in 0..3 {
            app.push_error(crate::app::ErrorCategory::Other, format!("e{i}"), String::new());
        }
        handle_key(&mut app, press(KeyCode::Char('e')));
        for _ in 0..5 {
            handle_key(&mut app, press(KeyCode::Char('j')));
        }
        assert_eq!(app.error_scroll, 2);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }
}
