//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the screen the
//! tasting wizard is showing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Input context of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Steps without their own controls
    Wizard,
    /// Flavor list
    Flavors,
    /// Typing a flavor search query
    FlavorSearch,
    /// Taste sliders
    Taste,
    /// Typing the personal note
    Notes,
}

impl KeyContext {
    /// Contexts where printable keys are text, not shortcuts
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::FlavorSearch | Self::Notes)
    }
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NextStep,
    PreviousStep,
    NavigateUp,
    NavigateDown,
    Top,
    Bottom,
    Toggle,
    StartSearch,
    EndSearch,
    CycleCategory,
    Increase,
    Decrease,
    IncreaseCoarse,
    DecreaseCoarse,
    SaveDraft,
    Restart,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // Shift is folded into the character for printable keys
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Context-specific keybindings
    context_bindings: HashMap<KeyContext, Vec<Keybinding>>,
    /// Global keybindings (available in all contexts)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            context_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        // Modifier-only globals so they also work while typing
        self.global_bindings = vec![
            Keybinding::with_modifiers(KeyCode::Char('s'), KeyModifiers::CONTROL, KeyAction::SaveDraft, "Ctrl+S", "임시 저장"),
            Keybinding::with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit, "Ctrl+C", "종료"),
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "도움말"),
            Keybinding::new(KeyCode::PageDown, KeyAction::NextStep, "PgDn", "다음 단계"),
            Keybinding::new(KeyCode::PageUp, KeyAction::PreviousStep, "PgUp", "이전 단계"),
        ];

        let step_keys = || {
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::NextStep, "Enter", "다음 단계"),
                Keybinding::new(KeyCode::Backspace, KeyAction::PreviousStep, "Bksp", "이전 단계"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "도움말"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "종료"),
            ]
        };

        let mut wizard = step_keys();
        wizard.push(Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "처음부터"));
        self.context_bindings.insert(KeyContext::Wizard, wizard);

        let mut flavors = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "위로"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "아래로"),
            Keybinding::new(KeyCode::Home, KeyAction::Top, "Home", "맨 위로"),
            Keybinding::new(KeyCode::End, KeyAction::Bottom, "End", "맨 아래로"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "선택/해제"),
            Keybinding::new(KeyCode::Char('/'), KeyAction::StartSearch, "/", "검색"),
            Keybinding::new(KeyCode::Tab, KeyAction::CycleCategory, "Tab", "카테고리"),
        ];
        flavors.extend(step_keys());
        self.context_bindings.insert(KeyContext::Flavors, flavors);

        self.context_bindings.insert(
            KeyContext::FlavorSearch,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::EndSearch, "Enter", "검색 완료"),
                Keybinding::new(KeyCode::Esc, KeyAction::EndSearch, "Esc", "검색 완료"),
            ],
        );

        let mut taste = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "이전 항목"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "다음 항목"),
            Keybinding::new(KeyCode::Right, KeyAction::Increase, "Right", "올리기"),
            Keybinding::new(KeyCode::Left, KeyAction::Decrease, "Left", "내리기"),
            Keybinding::with_modifiers(KeyCode::Right, KeyModifiers::SHIFT, KeyAction::IncreaseCoarse, "Shift+Right", "크게 올리기"),
            Keybinding::with_modifiers(KeyCode::Left, KeyModifiers::SHIFT, KeyAction::DecreaseCoarse, "Shift+Left", "크게 내리기"),
        ];
        taste.extend(step_keys());
        self.context_bindings.insert(KeyContext::Taste, taste);

        self.context_bindings.insert(
            KeyContext::Notes,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::NextStep, "Enter", "다음 단계"),
                Keybinding::new(KeyCode::Esc, KeyAction::PreviousStep, "Esc", "이전 단계"),
            ],
        );
    }

    /// Keybindings for a context, context-specific first
    pub fn get_bindings(&self, context: KeyContext) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(context_bindings) = self.context_bindings.get(&context) {
            bindings.extend(context_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Action bound to `event` in `context`, if any
    pub fn resolve(&self, context: KeyContext, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(context)
            .into_iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, context: KeyContext) -> Vec<NavBarItem> {
        let priority_actions: &[KeyAction] = match context {
            KeyContext::Wizard => &[KeyAction::NextStep, KeyAction::PreviousStep, KeyAction::SaveDraft, KeyAction::Help, KeyAction::Quit],
            KeyContext::Flavors => &[
                KeyAction::Toggle,
                KeyAction::StartSearch,
                KeyAction::CycleCategory,
                KeyAction::NextStep,
                KeyAction::SaveDraft,
                KeyAction::Help,
            ],
            KeyContext::FlavorSearch => &[KeyAction::EndSearch],
            KeyContext::Taste => &[
                KeyAction::Increase,
                KeyAction::Decrease,
                KeyAction::NextStep,
                KeyAction::SaveDraft,
                KeyAction::Help,
            ],
            KeyContext::Notes => &[KeyAction::NextStep, KeyAction::PreviousStep, KeyAction::SaveDraft],
        };

        let bindings = self.get_bindings(context);
        priority_actions
            .iter()
            .filter_map(|action| bindings.iter().find(|binding| binding.action == *action))
            .map(|binding| NavBarItem {
                key_display: binding.display.clone(),
                action_label: binding.description.clone(),
            })
            .collect()
    }

    /// Get full help content for a context (for help overlay)
    pub fn get_help_content(&self, context: KeyContext) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("이동", |action| {
                matches!(
                    action,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::Top
                        | KeyAction::Bottom
                        | KeyAction::NextStep
                        | KeyAction::PreviousStep
                )
            }),
            ("동작", |action| {
                matches!(
                    action,
                    KeyAction::Toggle
                        | KeyAction::StartSearch
                        | KeyAction::EndSearch
                        | KeyAction::CycleCategory
                        | KeyAction::Increase
                        | KeyAction::Decrease
                        | KeyAction::IncreaseCoarse
                        | KeyAction::DecreaseCoarse
                        | KeyAction::SaveDraft
                        | KeyAction::Restart
                )
            }),
            ("일반", |action| matches!(action, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(context);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let mut items: Vec<(String, String)> = Vec::new();
                for binding in bindings.iter().filter(|binding| belongs(binding.action)) {
                    let item = (binding.display.clone(), binding.description.clone());
                    if !items.contains(&item) {
                        items.push(item);
                    }
                }
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_flavor_bindings() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.resolve(KeyContext::Flavors, &key(KeyCode::Char(' '))),
            Some(KeyAction::Toggle)
        );
        assert_eq!(
            ctx.resolve(KeyContext::Flavors, &key(KeyCode::Tab)),
            Some(KeyAction::CycleCategory)
        );
    }

    #[test]
    fn test_global_save_works_while_typing() {
        let ctx = KeybindingContext::new();
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(ctx.resolve(KeyContext::Notes, &save), Some(KeyAction::SaveDraft));
        assert_eq!(ctx.resolve(KeyContext::Notes, &key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_shifted_arrows_are_coarse() {
        let ctx = KeybindingContext::new();
        let coarse = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(ctx.resolve(KeyContext::Taste, &coarse), Some(KeyAction::IncreaseCoarse));
        assert_eq!(ctx.resolve(KeyContext::Taste, &key(KeyCode::Right)), Some(KeyAction::Increase));
    }

    #[test]
    fn test_shifted_question_mark_is_help() {
        let ctx = KeybindingContext::new();
        let help = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(ctx.resolve(KeyContext::Wizard, &help), Some(KeyAction::Help));
    }

    #[test]
    fn test_nav_items_follow_priority() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(KeyContext::FlavorSearch);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key_display, "Enter");
    }

    #[test]
    fn test_help_content_has_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(KeyContext::Taste);
        assert_eq!(sections.len(), 3);
        assert!(sections[1].items.iter().any(|(key, _)| key == "Right"));
    }
}
