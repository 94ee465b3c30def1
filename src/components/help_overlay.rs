//! Help overlay component
//!
//! Displays context-sensitive help in a centered window over the wizard.

use super::keybindings::{HelpSection, KeyContext, KeybindingContext};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Window size as a percentage of the parent area
const WIDTH_PERCENT: u16 = 60;
const HEIGHT_PERCENT: u16 = 70;
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

/// Help overlay component
pub struct HelpOverlay {
    sections: Vec<HelpSection>,
    context: KeyContext,
}

impl HelpOverlay {
    /// Create a new help overlay for the given context
    pub fn new(context: KeyContext, keybinding_ctx: &KeybindingContext) -> Self {
        Self {
            sections: keybinding_ctx.get_help_content(context),
            context,
        }
    }

    pub fn context(&self) -> KeyContext {
        self.context
    }

    /// Build the help content from sections
    fn build_content(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled("  CupNote 도움말  ", theme.title())),
            Line::from(""),
        ];

        for section in &self.sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                theme.success(),
            )));
            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<12}", key), theme.title()),
                    Span::styled(description.clone(), theme.text()),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect, theme: &Theme) {
        let area = centered(parent);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .title(" 도움말 ")
            .title_bottom(Line::from(Span::styled(" ? / Esc 로 닫기 ", theme.text_muted())))
            .borders(Borders::ALL)
            .border_style(theme.border(true));
        let paragraph = Paragraph::new(self.build_content(theme))
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

fn centered(parent: Rect) -> Rect {
    let percent = |length: u16, pct: u16| (u32::from(length) * u32::from(pct) / 100) as u16;
    let width = percent(parent.width, WIDTH_PERCENT)
        .max(MIN_WIDTH)
        .min(parent.width);
    let height = percent(parent.height, HEIGHT_PERCENT)
        .max(MIN_HEIGHT)
        .min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_parent() {
        let parent = Rect::new(0, 0, 30, 10);
        let area = centered(parent);
        assert_eq!(area, Rect::new(0, 0, 30, 10));

        let parent = Rect::new(0, 0, 100, 40);
        let area = centered(parent);
        assert_eq!(area, Rect::new(20, 6, 60, 28));
    }

    #[test]
    fn test_content_lists_sections() {
        let overlay = HelpOverlay::new(KeyContext::Flavors, &KeybindingContext::new());
        let lines = overlay.build_content(&Theme::roast());
        assert!(lines.len() > overlay.sections.len() * 2);
        assert_eq!(overlay.context(), KeyContext::Flavors);
    }
}
