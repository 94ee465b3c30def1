//! Type-safe domain enums for the tasting flow
//!
//! Categories, taste axes and wizard steps are closed sets. Per-variant
//! presentation data lives in lookup tables next to each enum rather than in
//! scattered `match` arms, so the tables can be tested on their own.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Flavor wheel category a catalog item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FlavorCategory {
    Fruity,
    Floral,
    Sweet,
    NuttyCocoa,
    Spice,
    Roasted,
    Vegetal,
}

const CATEGORY_LABELS: [&str; 7] = [
    "과일",
    "꽃",
    "단맛",
    "견과·초콜릿",
    "향신료",
    "로스팅",
    "허브·채소",
];

const CATEGORY_COLORS: [&str; 7] = [
    "#E5484D", "#D6409F", "#F5A524", "#8D5B3E", "#C2410C", "#A8A29E", "#16A34A",
];

impl FlavorCategory {
    /// Korean display name
    pub fn label(self) -> &'static str {
        CATEGORY_LABELS[self as usize]
    }

    /// Wheel color as `#RRGGBB`
    pub fn color_hex(self) -> &'static str {
        CATEGORY_COLORS[self as usize]
    }

    /// Case-insensitive match against the display name or the key
    pub fn matches_query(self, needle_lower: &str) -> bool {
        self.label().to_lowercase().contains(needle_lower)
            || self.to_string().contains(needle_lower)
    }

    /// All categories in wheel order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// A named rating dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TasteAxis {
    Acidity,
    Sweetness,
    Bitterness,
    Body,
    Aftertaste,
    Balance,
}

/// Static metadata attached to a taste axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

const AXIS_TABLE: [AxisMeta; 6] = [
    AxisMeta {
        label: "산미",
        icon: "🍋",
        description: "밝고 상큼한 신맛의 세기",
    },
    AxisMeta {
        label: "단맛",
        icon: "🍯",
        description: "입안에 남는 자연스러운 단맛",
    },
    AxisMeta {
        label: "쓴맛",
        icon: "☕",
        description: "로스팅에서 오는 쌉쌀함",
    },
    AxisMeta {
        label: "바디",
        icon: "🥛",
        description: "입안에서 느껴지는 무게감과 질감",
    },
    AxisMeta {
        label: "여운",
        icon: "✨",
        description: "삼킨 뒤 남는 향미의 길이",
    },
    AxisMeta {
        label: "균형",
        icon: "⚖️",
        description: "맛 요소들의 조화",
    },
];

impl TasteAxis {
    /// Label, icon and description for this axis
    pub fn meta(self) -> &'static AxisMeta {
        &AXIS_TABLE[self as usize]
    }

    /// Korean display label
    pub fn label(self) -> &'static str {
        self.meta().label
    }

    /// Every axis, in display order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Steps of the tasting wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Mode,
    CoffeeInfo,
    RoasterNotes,
    Flavors,
    Taste,
    Sensory,
    PersonalNotes,
    Result,
}

const STEP_TITLES: [&str; 8] = [
    "기록 모드 선택",
    "커피 정보",
    "로스터 노트",
    "향미 선택",
    "맛 평가",
    "감각 표현",
    "개인 메모",
    "결과",
];

impl WizardStep {
    /// Number of steps in the wizard
    pub const TOTAL_STEPS: usize = 8;

    /// Step for a tracker position. Positions past the end map to `Result`.
    pub fn from_index(index: usize) -> Self {
        Self::iter()
            .nth(index.min(Self::TOTAL_STEPS - 1))
            .unwrap_or(Self::Result)
    }

    /// Zero-based position of this step
    pub fn index(self) -> usize {
        self as usize
    }

    /// Korean screen title
    pub fn title(self) -> &'static str {
        STEP_TITLES[self as usize]
    }
}

/// Interaction phase of a slider thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    Active,
    #[default]
    Settled,
}

/// Visual variant tag for buttons and chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Danger,
}
