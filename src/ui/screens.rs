//! Wizard screens without their own widgets
//!
//! Guidance panels for the opening steps, the sensory suggestions, the note
//! editor and the result summary.

use crate::rating::RatingVector;
use crate::sensory::{self, Intensity};
use crate::session::TastingSession;
use crate::theme::Theme;
use crate::types::WizardStep;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn panel<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(theme.border(true))
}

/// Guidance text for the opening steps
fn guidance(step: WizardStep) -> &'static [&'static str] {
    match step {
        WizardStep::Mode => &[
            "오늘의 커피를 기록해 볼까요?",
            "",
            "향미를 고르고, 여섯 가지 맛을 평가하고,",
            "감각 표현과 메모로 한 잔의 기록을 완성합니다.",
            "",
            "Enter 로 시작하세요.",
        ],
        WizardStep::CoffeeInfo => &[
            "마신 커피를 떠올려 보세요.",
            "",
            "원산지, 가공 방식, 로스팅 정도를 알고 있다면",
            "개인 메모 단계에서 함께 적어 두면 좋아요.",
        ],
        WizardStep::RoasterNotes => &[
            "패키지에 적힌 로스터 노트가 있나요?",
            "",
            "로스터의 표현은 참고만 하고,",
            "다음 단계에서는 내가 느낀 향미를 골라 주세요.",
        ],
        _ => &[],
    }
}

pub fn render_guidance(f: &mut Frame, area: Rect, step: WizardStep, theme: &Theme) {
    let lines: Vec<Line> = guidance(step)
        .iter()
        .map(|text| Line::from(Span::styled(*text, theme.text())))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(panel(step.title(), theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Suggested expressions per axis at its current intensity
pub fn render_sensory(f: &mut Frame, area: Rect, ratings: &RatingVector, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled("평가한 맛에 어울리는 표현이에요.", theme.text_muted())),
        Line::from(""),
    ];
    for axis in ratings.axes() {
        let Some(value) = ratings.value(axis) else {
            continue;
        };
        let intensity = Intensity::of(ratings.scale(), value);
        let words = sensory::expressions(axis, intensity).join(", ");
        lines.push(Line::from(vec![
            Span::styled(format!("{} {:<4}", axis.meta().icon, axis.label()), theme.title()),
            Span::styled(format!(" [{}] ", intensity), theme.text_muted()),
            Span::styled(words, theme.text()),
        ]));
    }
    let paragraph = Paragraph::new(lines)
        .block(panel(WizardStep::Sensory.title(), theme))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_notes(f: &mut Frame, area: Rect, note: &str, theme: &Theme) {
    let mut lines: Vec<Line> = note
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), theme.text())))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled("▏", theme.title()));
    }
    if note.is_empty() {
        lines.push(Line::from(Span::styled(
            "이 커피에 대한 생각을 자유롭게 적어 주세요. (Alt+Enter 줄바꿈)",
            theme.text_muted(),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .block(panel(WizardStep::PersonalNotes.title(), theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

pub fn render_result(f: &mut Frame, area: Rect, session: &TastingSession, theme: &Theme) {
    let ratings = session.ratings();
    let mut lines = vec![Line::from(Span::styled("대표 향미", theme.title()))];

    let mut chips: Vec<Span> = Vec::new();
    for label in session.primary_flavors() {
        let style = match session.flavors().catalog().get(label) {
            Some(item) => theme.chip(item.category, true),
            None => theme.selected(),
        };
        chips.push(Span::styled(format!(" {} ", label), style));
        chips.push(Span::raw(" "));
    }
    if chips.is_empty() {
        chips.push(Span::styled("선택한 향미가 없어요", theme.text_muted()));
    }
    lines.push(Line::from(chips));

    let others = session.flavors().len().saturating_sub(session.primary_flavors().len());
    if others > 0 {
        lines.push(Line::from(Span::styled(format!("외 {}개", others), theme.text_muted())));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("맛 평가", theme.title())));
    for axis in ratings.axes() {
        if let Some(value) = ratings.value(axis) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} {:<4}", axis.meta().icon, axis.label()), theme.text()),
                Span::styled(format!(" {}", ratings.format(axis, value)), theme.text()),
            ]));
        }
    }
    lines.push(Line::from(""));

    let description: Vec<&str> = sensory::describe(ratings).into_iter().map(|(_, word)| word).collect();
    lines.push(Line::from(Span::styled("감각 표현", theme.title())));
    lines.push(Line::from(Span::styled(format!("  {}", description.join(" · ")), theme.text())));
    lines.push(Line::from(""));

    if !session.note().is_empty() {
        lines.push(Line::from(Span::styled("메모", theme.title())));
        for line in session.note().split('\n') {
            lines.push(Line::from(Span::styled(format!("  {}", line), theme.text())));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "R 로 새 기록 시작 · Ctrl+S 로 저장",
        theme.text_muted(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(panel(WizardStep::Result.title(), theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
