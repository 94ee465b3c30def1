//! Application module
//!
//! Contains the event loop and the mapping from keys and mouse input onto
//! tasting session operations.
//!
//! # Module Structure
//! - `state` - View state (cursors, search box, drag feedback, status line)
//! - Main module - App struct and event loop

mod state;

pub use state::{StatusLevel, StatusMessage, ViewState};

use crate::components::keybindings::{KeyAction, KeyContext, KeybindingContext};
use crate::error::{CupNoteError, Result};
use crate::session::TastingSession;
use crate::theme::Theme;
use crate::types::{TasteAxis, WizardStep};
use crate::ui;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Coarse slider moves jump this many steps
const COARSE_STEPS: i32 = 10;

/// Main application struct
pub struct App {
    session: TastingSession,
    view: ViewState,
    theme: Theme,
    keybindings: KeybindingContext,
    /// Where draft saves are written; saving is unavailable without one
    draft_path: Option<PathBuf>,
}

impl App {
    pub fn new(session: TastingSession, theme: Theme, draft_path: Option<PathBuf>) -> Self {
        Self {
            session,
            view: ViewState::default(),
            theme,
            keybindings: KeybindingContext::new(),
            draft_path,
        }
    }

    pub fn session(&self) -> &TastingSession {
        &self.session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Run the main application loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_draft_events();

            terminal
                .draw(|f| {
                    ui::render(f, &self.session, &mut self.view, &self.theme, &self.keybindings)
                })
                .map_err(|e| CupNoteError::terminal(format!("Failed to draw frame: {}", e)))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                    _ => {}
                }
            }
        }

        info!(step = self.session.progress().current_step(), "Leaving application loop");
        Ok(())
    }

    /// Turn finished draft saves into status messages
    pub fn poll_draft_events(&mut self) {
        if let Some(event) = self.session.progress().poll_events().last() {
            self.view.status = Some(StatusMessage::from(event));
        }
    }

    /// Handle keyboard input. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        // Help overlay swallows everything except its own dismiss keys
        if self.view.help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1)) {
                self.view.help_visible = false;
            }
            return false;
        }

        let step = self.session.current_step();
        let context = self.view.key_context(step);
        match self.keybindings.resolve(context, &key_event) {
            Some(action) => self.apply(action, step),
            None => {
                if context.is_text_input() {
                    self.handle_text_input(context, key_event);
                }
                false
            }
        }
    }

    fn apply(&mut self, action: KeyAction, step: WizardStep) -> bool {
        debug!(?action, %step, "Key action");
        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.view.help_visible = true,
            KeyAction::NextStep => self.next_step(step),
            KeyAction::PreviousStep => {
                self.view.searching = false;
                self.session.progress_mut().retreat();
            }
            KeyAction::NavigateUp => self.move_cursor(step, -1),
            KeyAction::NavigateDown => self.move_cursor(step, 1),
            KeyAction::Top => self.view.flavor_cursor = 0,
            KeyAction::Bottom => {
                let len = self.visible_flavor_count();
                self.view.flavor_cursor = len.saturating_sub(1);
            }
            KeyAction::Toggle => self.toggle_highlighted(),
            KeyAction::StartSearch => self.view.searching = true,
            KeyAction::EndSearch => self.view.searching = false,
            KeyAction::CycleCategory => self.view.cycle_category(),
            KeyAction::Increase => self.nudge_focused(1),
            KeyAction::Decrease => self.nudge_focused(-1),
            KeyAction::IncreaseCoarse => self.nudge_focused(COARSE_STEPS),
            KeyAction::DecreaseCoarse => self.nudge_focused(-COARSE_STEPS),
            KeyAction::SaveDraft => self.save_draft(),
            KeyAction::Restart => {
                if step == WizardStep::Result {
                    info!("Restarting tasting flow");
                    self.session.reset();
                    self.view.reset();
                    self.view.status = Some(StatusMessage::info("새 기록을 시작합니다"));
                }
            }
        }
        false
    }

    fn next_step(&mut self, step: WizardStep) {
        if !ui::can_advance(&self.session, step) {
            let min = self.session.flavors().bounds().min;
            self.view.status = Some(StatusMessage::warning(format!(
                "향미를 최소 {}개 골라 주세요",
                min
            )));
            return;
        }
        self.view.searching = false;
        self.session.progress_mut().advance();
    }

    fn visible_flavor_count(&self) -> usize {
        self.session
            .flavors()
            .filter_view(&self.view.search_query, self.view.category)
            .len()
    }

    fn move_cursor(&mut self, step: WizardStep, delta: isize) {
        match step {
            WizardStep::Flavors => {
                let len = self.visible_flavor_count();
                self.view.flavor_cursor = self.view.flavor_cursor.saturating_add_signed(delta);
                self.view.clamp_flavor_cursor(len);
            }
            WizardStep::Taste => {
                let last = self.session.ratings().axes().count().saturating_sub(1);
                self.view.axis_cursor = self.view.axis_cursor.saturating_add_signed(delta).min(last);
            }
            _ => {}
        }
    }

    fn toggle_highlighted(&mut self) {
        let flavors = self.session.flavors();
        let Some(label) = flavors
            .filter_view(&self.view.search_query, self.view.category)
            .get(self.view.flavor_cursor)
            .map(|item| item.label.clone())
        else {
            return;
        };

        let selected = flavors.contains(&label);
        let bounds = flavors.bounds();
        let before = flavors.len();
        self.session.flavors_mut().toggle(&label);

        if self.session.flavors().len() == before {
            self.view.status = Some(if selected {
                StatusMessage::warning(format!("최소 {}개는 남겨 두어야 해요", bounds.min))
            } else {
                StatusMessage::warning(format!("최대 {}개까지 고를 수 있어요", bounds.max))
            });
        } else {
            self.view.status = None;
        }

        // Selected rows sort first, so follow the flavor to its new row
        let visible = self
            .session
            .flavors()
            .filter_view(&self.view.search_query, self.view.category);
        if let Some(row) = visible.iter().position(|item| item.label == label) {
            self.view.flavor_cursor = row;
        }
    }

    fn focused_axis(&self) -> Option<TasteAxis> {
        self.session.ratings().axes().nth(self.view.axis_cursor)
    }

    fn nudge_focused(&mut self, steps: i32) {
        if let Some(axis) = self.focused_axis() {
            self.session.ratings_mut().nudge(axis, steps);
        }
    }

    fn handle_text_input(&mut self, context: KeyContext, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        match context {
            KeyContext::FlavorSearch => {
                match key_event.code {
                    KeyCode::Char(c) => self.view.search_query.push(c),
                    KeyCode::Backspace => {
                        self.view.search_query.pop();
                    }
                    _ => return,
                }
                self.view.flavor_cursor = 0;
            }
            KeyContext::Notes => {
                let mut note = self.session.note().to_string();
                match key_event.code {
                    KeyCode::Char(c) => note.push(c),
                    KeyCode::Enter => note.push('\n'),
                    KeyCode::Backspace => {
                        note.pop();
                    }
                    _ => return,
                }
                self.session.set_note(note);
            }
            _ => {}
        }
    }

    /// Handle mouse input on the taste sliders
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if self.session.current_step() != WizardStep::Taste {
            return;
        }
        let MouseEvent { kind, column, row, .. } = mouse_event;
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((axis, track)) = self.view.track_at(column, row) else {
                    return;
                };
                self.view.drag.begin();
                self.view.drag_axis = Some(axis);
                if let Some(index) = self.session.ratings().axes().position(|a| a == axis) {
                    self.view.axis_cursor = index;
                }
                let value = ui::taste::value_at(self.session.ratings(), track, column);
                self.session.ratings_mut().set_value(axis, value);
            }
            MouseEventKind::Drag(MouseButton::Left) if self.view.drag.is_active() => {
                let Some(axis) = self.view.drag_axis else {
                    return;
                };
                let track = self
                    .view
                    .slider_tracks
                    .iter()
                    .find(|(a, _)| *a == axis)
                    .map(|(_, rect)| *rect);
                if let Some(track) = track {
                    let value = ui::taste::value_at(self.session.ratings(), track, column);
                    self.session.ratings_mut().set_value(axis, value);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.view.drag.end();
                self.view.drag_axis = None;
            }
            _ => {}
        }
    }

    fn save_draft(&mut self) {
        let Some(path) = self.draft_path.clone() else {
            self.view.status = Some(StatusMessage::warning(
                "임시 저장 경로가 없어요 (--draft 로 지정)",
            ));
            return;
        };
        let started = self
            .session
            .save_draft(move |draft| draft.save_to_file(&path));
        self.view.status = Some(match started {
            Some(_) => StatusMessage::info("임시 저장 중…"),
            None => StatusMessage::info("이미 저장하고 있어요"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::AppConfig;
    use crate::draft::TastingDraft;
    use ratatui::layout::Rect;
    use std::sync::Arc;
    use std::thread;

    fn app(draft_path: Option<PathBuf>) -> App {
        let session = TastingSession::new(&AppConfig::default(), Arc::new(Catalog::builtin())).unwrap();
        App::new(session, Theme::roast(), draft_path)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn go_to(app: &mut App, step: WizardStep) {
        app.session.progress_mut().set_step(step.index()).unwrap();
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(None);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_flavor_step_blocks_until_minimum() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Flavors);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().current_step(), WizardStep::Flavors);
        assert_eq!(app.view().status.as_ref().map(|s| s.level), Some(StatusLevel::Warning));

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session().flavors().len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().current_step(), WizardStep::Taste);
    }

    #[test]
    fn test_search_typing_filters_and_q_is_text() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Flavors);
        press(&mut app, KeyCode::Char('/'));
        for c in "레몬".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.view().search_query, "레몬");
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert!(!app.view().searching);
        assert_eq!(app.view().search_query, "레몬");
    }

    #[test]
    fn test_toggle_follows_flavor_to_top() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Flavors);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.view().flavor_cursor, 0);
    }

    #[test]
    fn test_taste_keys_nudge_focused_axis() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Taste);
        press(&mut app, KeyCode::Right);
        let first = app.session().ratings().axes().next().unwrap();
        assert_eq!(app.session().ratings().value(first), Some(5.1));

        press(&mut app, KeyCode::Down);
        app.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        let second = app.session().ratings().axes().nth(1).unwrap();
        assert_eq!(app.session().ratings().value(second), Some(4.0));
    }

    #[test]
    fn test_notes_typing() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::PersonalNotes);
        for c in "good".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        press(&mut app, KeyCode::Char('!'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().note(), "good\n");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().current_step(), WizardStep::Result);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app(None);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.view().help_visible);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert!(!app.view().help_visible);
    }

    #[test]
    fn test_restart_only_on_result() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Sensory);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().current_step(), WizardStep::Sensory);
        go_to(&mut app, WizardStep::Result);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().current_step(), WizardStep::Mode);
    }

    #[test]
    fn test_mouse_drag_sets_value() {
        let mut app = app(None);
        go_to(&mut app, WizardStep::Taste);
        app.view.slider_tracks = vec![(TasteAxis::Body, Rect::new(10, 5, 37, 1))];
        let mouse = |kind, column| MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10));
        assert!(app.view().drag.is_active());
        assert_eq!(app.session().ratings().value(TasteAxis::Body), Some(1.0));

        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 46));
        assert_eq!(app.session().ratings().value(TasteAxis::Body), Some(10.0));

        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 46));
        assert!(!app.view().drag.is_active());
        assert_eq!(app.view().drag_axis, None);
    }

    #[test]
    fn test_save_without_path_warns() {
        let mut app = app(None);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.view().status.as_ref().map(|s| s.level), Some(StatusLevel::Warning));
    }

    #[test]
    fn test_save_draft_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let mut app = app(Some(path.clone()));
        go_to(&mut app, WizardStep::Flavors);
        press(&mut app, KeyCode::Char(' '));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        while app.session().progress().is_saving() {
            thread::sleep(Duration::from_millis(10));
        }
        // The event is sent right after the flag drops
        let mut waited = 0;
        while app.view().status.as_ref().map(|s| s.level) != Some(StatusLevel::Success) && waited < 100 {
            thread::sleep(Duration::from_millis(10));
            app.poll_draft_events();
            waited += 1;
        }

        assert_eq!(app.view().status.as_ref().map(|s| s.level), Some(StatusLevel::Success));
        let draft = TastingDraft::load_from_file(&path).unwrap();
        assert_eq!(draft.step, WizardStep::Flavors.index());
        assert_eq!(draft.flavors.len(), 1);
    }
}
