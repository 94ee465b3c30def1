//! Taste slider screen

use crate::app::ViewState;
use crate::rating::RatingVector;
use crate::theme::{Theme, UiConstants};
use crate::types::TasteAxis;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows used by one slider: caption, track, spacer
const ROWS_PER_AXIS: u16 = 3;

/// Render one slider per active axis and record each track's cells in
/// `view.slider_tracks` for mouse dragging.
pub fn render_taste(f: &mut Frame, area: Rect, ratings: &RatingVector, view: &mut ViewState, theme: &Theme) {
    let block = Block::default()
        .title(" 맛 평가 ")
        .borders(Borders::ALL)
        .border_style(theme.border(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    view.slider_tracks.clear();
    let track_width = UiConstants::SLIDER_TRACK.min(inner.width.saturating_sub(4));
    if track_width < 2 {
        return;
    }

    for (i, axis) in ratings.axes().enumerate() {
        let top = inner.y + i as u16 * ROWS_PER_AXIS;
        if top + 1 >= inner.y + inner.height {
            break;
        }
        let focused = i == view.axis_cursor;
        let Some(value) = ratings.value(axis) else {
            continue;
        };

        let caption = Rect::new(inner.x + 2, top, inner.width.saturating_sub(2), 1);
        f.render_widget(Paragraph::new(caption_line(ratings, axis, value, focused, theme)), caption);

        let track = Rect::new(inner.x + 2, top + 1, track_width, 1);
        // Only the grabbed thumb is drawn enlarged
        let dragging = view.drag.thumb_scale() > 1.0 && view.drag_axis == Some(axis);
        f.render_widget(Paragraph::new(track_line(ratings, value, track_width, dragging, theme)), track);
        view.slider_tracks.push((axis, track));
    }
}

fn caption_line(ratings: &RatingVector, axis: TasteAxis, value: f64, focused: bool, theme: &Theme) -> Line<'static> {
    let meta = axis.meta();
    let marker = if focused { "▶ " } else { "  " };
    let label_style = if focused { theme.title() } else { theme.text() };
    Line::from(vec![
        Span::styled(marker, theme.title()),
        Span::styled(format!("{} {}", meta.icon, meta.label), label_style),
        Span::styled(format!("  {}", ratings.format(axis, value)), theme.text()),
        Span::styled(format!("  {}", meta.description), theme.text_muted()),
    ])
}

fn track_line(ratings: &RatingVector, value: f64, width: u16, dragging: bool, theme: &Theme) -> Line<'static> {
    let last_cell = f64::from(width - 1);
    let thumb = (ratings.value_to_position(value, last_cell).round() as u16).min(width - 1);
    let filled = "━".repeat(thumb as usize);
    let rest = "─".repeat((width - 1 - thumb) as usize);
    let thumb_glyph = if dragging { "◉" } else { "●" };
    Line::from(vec![
        Span::styled(filled, theme.gauge()),
        Span::styled(thumb_glyph, theme.thumb(dragging)),
        Span::styled(rest, theme.text_muted()),
    ])
}

/// Value for a click or drag at `column` on a recorded track
pub fn value_at(ratings: &RatingVector, track: Rect, column: u16) -> f64 {
    let last_cell = f64::from(track.width.saturating_sub(1));
    let offset = f64::from(column.saturating_sub(track.x));
    ratings.position_to_value(offset, last_cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_at_track_ends() {
        let ratings = RatingVector::with_defaults();
        let track = Rect::new(10, 3, 37, 1);
        assert_eq!(value_at(&ratings, track, 10), 1.0);
        assert_eq!(value_at(&ratings, track, 46), 10.0);
        assert_eq!(value_at(&ratings, track, 80), 10.0);
        assert_eq!(value_at(&ratings, track, 28), 5.5);
    }

    #[test]
    fn test_thumb_sits_at_value() {
        let ratings = RatingVector::with_defaults();
        let line = track_line(&ratings, 10.0, 10, false, &Theme::roast());
        assert_eq!(line.spans[0].content.chars().count(), 9);
        assert_eq!(line.spans[2].content.chars().count(), 0);
    }
}
