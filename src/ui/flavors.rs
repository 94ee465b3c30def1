//! Flavor selector screen
//!
//! Category tabs and a search box over the filtered catalog, with selected
//! flavors listed first and a chip panel of the current selection.

use crate::app::ViewState;
use crate::selection::SelectionSet;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

use crate::types::FlavorCategory;

pub fn render_flavors(f: &mut Frame, area: Rect, flavors: &SelectionSet, view: &ViewState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    render_category_tabs(f, left[0], view.category, theme);
    render_search_box(f, left[1], view, theme);
    render_flavor_list(f, left[2], flavors, view, theme);
    render_selection_panel(f, columns[1], flavors, theme);
}

fn render_category_tabs(f: &mut Frame, area: Rect, active: Option<FlavorCategory>, theme: &Theme) {
    let all_style = if active.is_none() { theme.selected() } else { theme.text_muted() };
    let mut spans = vec![Span::styled(" 전체 ", all_style), Span::raw(" ")];
    for category in FlavorCategory::iter() {
        spans.push(Span::styled(
            format!(" {} ", category.label()),
            theme.chip(category, active == Some(category)),
        ));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_box(f: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
    let content = if view.search_query.is_empty() && !view.searching {
        Span::styled("/ 를 눌러 향미 검색", theme.text_muted())
    } else if view.searching {
        Span::styled(format!("{}▏", view.search_query), theme.text())
    } else {
        Span::styled(view.search_query.clone(), theme.text())
    };
    let search = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(" 검색 ")
            .borders(Borders::ALL)
            .border_style(theme.border(view.searching)),
    );
    f.render_widget(search, area);
}

fn render_flavor_list(f: &mut Frame, area: Rect, flavors: &SelectionSet, view: &ViewState, theme: &Theme) {
    let visible = flavors.filter_view(&view.search_query, view.category);
    let at_max = flavors.is_at_max();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let selected = flavors.contains(&item.label);
            let marker = if selected { "[x]" } else { "[ ]" };
            // Unselected rows cannot be picked once the set is full
            let label_style = if selected {
                theme.chip(item.category, true)
            } else if at_max {
                theme.text_muted()
            } else {
                theme.text()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), theme.text_muted()),
                Span::styled(item.label.clone(), label_style),
                Span::styled(format!("  {}", item.category.label()), theme.chip(item.category, false)),
            ]))
        })
        .collect();

    let title = format!(" 향미 {}개 ", visible.len());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(theme.border(!view.searching)),
        )
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(view.flavor_cursor.min(visible.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_selection_panel(f: &mut Frame, area: Rect, flavors: &SelectionSet, theme: &Theme) {
    let bounds = flavors.bounds();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("선택 ", theme.text_muted()),
            Span::styled(format!("{} / {}", flavors.len(), bounds.max), theme.title()),
        ]),
        Line::from(""),
    ];

    let mut chips: Vec<Span> = Vec::new();
    for label in flavors.selected() {
        let style = match flavors.catalog().get(label) {
            Some(item) => theme.chip(item.category, true),
            None => theme.selected(),
        };
        chips.push(Span::styled(format!(" {} ", label), style));
        chips.push(Span::raw(" "));
    }
    lines.push(Line::from(chips));
    lines.push(Line::from(""));

    if flavors.is_at_max() {
        lines.push(Line::from(Span::styled(
            format!("최대 {}개까지 고를 수 있어요", bounds.max),
            theme.warning(),
        )));
    } else if flavors.len() < bounds.min {
        lines.push(Line::from(Span::styled(
            format!("최소 {}개를 골라 주세요", bounds.min),
            theme.text_muted(),
        )));
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" 선택한 향미 ")
                .borders(Borders::ALL)
                .border_style(theme.border(false)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}
