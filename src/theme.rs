//! Theme and styling for the terminal front-end
//!
//! A [`Theme`] is a plain value built once in `main` and passed to every
//! render function. Nothing in the tasting core reads it.
//!
//! Per-variant and per-category styling come from lookup tables rather than
//! `match` arms, so a custom theme only has to swap table entries.
//!
//! # Usage
//! ```rust
//! use cupnote::theme::Theme;
//! use cupnote::types::{ButtonVariant, FlavorCategory};
//!
//! let theme = Theme::roast();
//! let primary = theme.button(ButtonVariant::Primary, true);
//! let fruity = theme.category_color(FlavorCategory::Fruity);
//! ```

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use strum::IntoEnumIterator;

use crate::types::{ButtonVariant, FlavorCategory};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Base colors of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub bg_alt: Color,
    pub fg: Color,
    pub fg_muted: Color,
    /// Borders, titles, highlights
    pub primary: Color,
    /// Selected items, emphasis
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub selected_fg: Color,
}

impl Palette {
    /// Warm coffee-toned palette
    pub const ROAST: Self = Self {
        bg: Color::Rgb(28, 22, 18),
        bg_alt: Color::Rgb(40, 32, 26),
        fg: Color::Rgb(240, 230, 220),
        fg_muted: Color::Rgb(140, 125, 110),
        primary: Color::Rgb(196, 140, 90),
        accent: Color::Rgb(245, 190, 80),
        success: Color::Rgb(120, 190, 110),
        warning: Color::Rgb(240, 180, 60),
        error: Color::Rgb(225, 85, 75),
        selected_fg: Color::Black,
    };
}

// =============================================================================
// VARIANT TABLE
// =============================================================================

/// Style record for one button variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStyle {
    pub fg: Color,
    pub bg: Option<Color>,
    pub bold: bool,
    /// Render `[ label ]` brackets around the text
    pub bracketed: bool,
}

impl VariantStyle {
    fn style(&self) -> Style {
        let mut style = Style::default().fg(self.fg);
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

fn variant_table(palette: &Palette) -> HashMap<ButtonVariant, VariantStyle> {
    HashMap::from([
        (
            ButtonVariant::Primary,
            VariantStyle { fg: palette.selected_fg, bg: Some(palette.primary), bold: true, bracketed: true },
        ),
        (
            ButtonVariant::Secondary,
            VariantStyle { fg: palette.fg, bg: Some(palette.bg_alt), bold: false, bracketed: true },
        ),
        (
            ButtonVariant::Outline,
            VariantStyle { fg: palette.primary, bg: None, bold: false, bracketed: true },
        ),
        (
            ButtonVariant::Ghost,
            VariantStyle { fg: palette.fg_muted, bg: None, bold: false, bracketed: false },
        ),
        (
            ButtonVariant::Danger,
            VariantStyle { fg: palette.fg, bg: Some(palette.error), bold: true, bracketed: true },
        ),
    ])
}

fn category_table(fallback: Color) -> HashMap<FlavorCategory, Color> {
    FlavorCategory::iter()
        .map(|category| (category, category.color_hex().parse().unwrap_or(fallback)))
        .collect()
}

// =============================================================================
// THEME
// =============================================================================

/// Injected presentation configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    variants: HashMap<ButtonVariant, VariantStyle>,
    categories: HashMap<FlavorCategory, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::roast()
    }
}

impl Theme {
    pub fn roast() -> Self {
        Self::from_palette(Palette::ROAST)
    }

    pub fn from_palette(palette: Palette) -> Self {
        Self {
            variants: variant_table(&palette),
            categories: category_table(palette.primary),
            palette,
        }
    }

    /// Override one variant's record
    pub fn with_variant(mut self, variant: ButtonVariant, record: VariantStyle) -> Self {
        self.variants.insert(variant, record);
        self
    }

    pub fn variant(&self, variant: ButtonVariant) -> VariantStyle {
        self.variants
            .get(&variant)
            .copied()
            .unwrap_or(VariantStyle { fg: self.palette.fg, bg: None, bold: false, bracketed: false })
    }

    /// Button style; disabled buttons are muted whatever their variant
    pub fn button(&self, variant: ButtonVariant, enabled: bool) -> Style {
        if enabled {
            self.variant(variant).style()
        } else {
            Style::default().fg(self.palette.fg_muted)
        }
    }

    /// Button text with the variant's decoration
    pub fn button_label(&self, variant: ButtonVariant, label: &str) -> String {
        if self.variant(variant).bracketed {
            format!("[ {} ]", label)
        } else {
            label.to_string()
        }
    }

    pub fn category_color(&self, category: FlavorCategory) -> Color {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or(self.palette.primary)
    }

    // -------------------------------------------------------------------------
    // Text Styles
    // -------------------------------------------------------------------------

    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.fg)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.fg_muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.palette.primary)
        } else {
            Style::default().fg(self.palette.fg_muted)
        }
    }

    // -------------------------------------------------------------------------
    // Selection and status
    // -------------------------------------------------------------------------

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette.selected_fg)
            .bg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chip(&self, category: FlavorCategory, selected: bool) -> Style {
        let color = self.category_color(category);
        if selected {
            Style::default()
                .fg(self.palette.selected_fg)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }

    pub fn gauge(&self) -> Style {
        Style::default().fg(self.palette.primary).bg(self.palette.bg_alt)
    }

    /// Slider thumb; enlarged (bold) while dragging
    pub fn thumb(&self, dragging: bool) -> Style {
        let style = Style::default().fg(self.palette.accent);
        if dragging {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.palette.warning)
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension and layout constants
pub struct UiConstants;

impl UiConstants {
    /// Progress header height (title + gauge)
    pub const HEADER_HEIGHT: u16 = 4;

    /// Nav bar height
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Status line height
    pub const STATUS_HEIGHT: u16 = 1;

    /// Slider track width in cells
    pub const SLIDER_TRACK: u16 = 40;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_record() {
        let theme = Theme::roast();
        for variant in ButtonVariant::iter() {
            assert!(theme.variants.contains_key(&variant), "{variant}");
        }
    }

    #[test]
    fn test_every_category_has_a_color() {
        let theme = Theme::roast();
        for category in FlavorCategory::iter() {
            assert!(theme.categories.contains_key(&category), "{category}");
        }
        assert_ne!(
            theme.category_color(FlavorCategory::Fruity),
            theme.category_color(FlavorCategory::Floral)
        );
    }

    #[test]
    fn test_category_colors_come_from_the_wheel_table() {
        let theme = Theme::roast();
        assert_eq!(theme.category_color(FlavorCategory::Fruity), Color::Rgb(229, 72, 77));
        assert_eq!(theme.category_color(FlavorCategory::Roasted), Color::Rgb(168, 162, 158));
        for category in FlavorCategory::iter() {
            assert_ne!(theme.category_color(category), theme.palette.primary, "{category}");
        }
    }

    #[test]
    fn test_button_labels() {
        let theme = Theme::roast();
        assert_eq!(theme.button_label(ButtonVariant::Primary, "다음"), "[ 다음 ]");
        assert_eq!(theme.button_label(ButtonVariant::Ghost, "건너뛰기"), "건너뛰기");
    }

    #[test]
    fn test_disabled_button_is_muted() {
        let theme = Theme::roast();
        assert_eq!(
            theme.button(ButtonVariant::Danger, false),
            Style::default().fg(Palette::ROAST.fg_muted)
        );
    }

    #[test]
    fn test_variant_override() {
        let record = VariantStyle { fg: Color::Red, bg: None, bold: false, bracketed: false };
        let theme = Theme::roast().with_variant(ButtonVariant::Ghost, record);
        assert_eq!(theme.variant(ButtonVariant::Ghost), record);
    }
}
