//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Progress header, status line, nav bar and step buttons
//! - `flavors` - Flavor selector
//! - `taste` - Taste sliders
//! - `screens` - Guidance, sensory, notes and result screens

mod flavors;
mod header;
mod screens;
pub mod taste;

use crate::app::ViewState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::session::TastingSession;
use crate::theme::{Theme, UiConstants};
use crate::types::WizardStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Whether the wizard may leave `step` going forward
pub fn can_advance(session: &TastingSession, step: WizardStep) -> bool {
    match step {
        WizardStep::Flavors => session.flavors().len() >= session.flavors().bounds().min,
        _ => true,
    }
}

/// Render one frame of the wizard
pub fn render(
    f: &mut Frame,
    session: &TastingSession,
    view: &mut ViewState,
    theme: &Theme,
    keybindings: &KeybindingContext,
) {
    let step = session.current_step();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(UiConstants::HEADER_HEIGHT - 1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(UiConstants::STATUS_HEIGHT),
            Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
        ])
        .split(f.area());

    header::render_progress_header(f, chunks[0], session.progress(), step, theme);
    render_step(f, chunks[1], session, view, theme, step);
    header::render_step_buttons(f, chunks[2], session.progress(), can_advance(session, step), theme);
    header::render_status(f, chunks[3], view.status.as_ref(), theme);

    let context = view.key_context(step);
    header::render_nav_bar(f, chunks[4], &keybindings.get_nav_items(context), theme);

    if view.help_visible {
        HelpOverlay::new(context, keybindings).render(f, f.area(), theme);
    }
}

fn render_step(
    f: &mut Frame,
    area: Rect,
    session: &TastingSession,
    view: &mut ViewState,
    theme: &Theme,
    step: WizardStep,
) {
    if step != WizardStep::Taste {
        view.slider_tracks.clear();
    }
    match step {
        WizardStep::Mode | WizardStep::CoffeeInfo | WizardStep::RoasterNotes => {
            screens::render_guidance(f, area, step, theme)
        }
        WizardStep::Flavors => flavors::render_flavors(f, area, session.flavors(), view, theme),
        WizardStep::Taste => taste::render_taste(f, area, session.ratings(), view, theme),
        WizardStep::Sensory => screens::render_sensory(f, area, session.ratings(), theme),
        WizardStep::PersonalNotes => screens::render_notes(f, area, session.note(), theme),
        WizardStep::Result => screens::render_result(f, area, session, theme),
    }
}
