//! Header, status line and nav bar rendering
//!
//! The widgets every wizard screen shares.

use crate::app::{StatusLevel, StatusMessage};
use crate::components::keybindings::NavBarItem;
use crate::progress::ProgressTracker;
use crate::theme::Theme;
use crate::types::{ButtonVariant, WizardStep};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the progress header: step title and a gauge of the tracker ratio
pub fn render_progress_header(
    f: &mut Frame,
    area: Rect,
    progress: &ProgressTracker,
    step: WizardStep,
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let title = Line::from(vec![
        Span::styled(" CupNote ", theme.title()),
        Span::styled(format!("· {} ", step.title()), theme.text()),
    ]);
    let mut label = format!("{} 단계", progress.step_label());
    if progress.is_saving() {
        label.push_str(" · 저장 중…");
    }

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(theme.border(true)),
        )
        .gauge_style(theme.gauge())
        .percent(progress.percent().min(100))
        .label(Span::styled(label, theme.text()));
    f.render_widget(gauge, area);
}

/// Render the status line, or a muted hint when there is nothing to report
pub fn render_status(f: &mut Frame, area: Rect, status: Option<&StatusMessage>, theme: &Theme) {
    let line = match status {
        Some(message) => {
            let style = match message.level {
                StatusLevel::Info => theme.text(),
                StatusLevel::Success => theme.success(),
                StatusLevel::Warning => theme.warning(),
            };
            Line::from(Span::styled(message.text.clone(), style))
        }
        None => Line::from(Span::styled("F1 또는 ? 로 도움말", theme.text_muted())),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Render the key hint bar at the bottom of the screen
pub fn render_nav_bar(f: &mut Frame, area: Rect, items: &[NavBarItem], theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.text_muted()));
        }
        spans.push(Span::styled(
            theme.button_label(ButtonVariant::Ghost, &item.key_display),
            theme.title(),
        ));
        spans.push(Span::styled(format!(" {}", item.action_label), theme.text_muted()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Render the back/next buttons of a wizard screen
pub fn render_step_buttons(
    f: &mut Frame,
    area: Rect,
    progress: &ProgressTracker,
    can_advance: bool,
    theme: &Theme,
) {
    let back_enabled = !progress.is_first();
    let next_enabled = can_advance && !progress.is_complete();
    let line = Line::from(vec![
        Span::styled(
            theme.button_label(ButtonVariant::Outline, "이전"),
            theme.button(ButtonVariant::Outline, back_enabled),
        ),
        Span::raw("   "),
        Span::styled(
            theme.button_label(ButtonVariant::Secondary, "임시 저장"),
            theme.button(ButtonVariant::Secondary, !progress.is_saving()),
        ),
        Span::raw("   "),
        Span::styled(
            theme.button_label(ButtonVariant::Primary, "다음"),
            theme.button(ButtonVariant::Primary, next_enabled),
        ),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
