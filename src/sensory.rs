//! Korean sensory expressions
//!
//! Word lists a taster can borrow when writing up a cup, keyed by taste axis
//! and by how strongly the axis was rated.

use strum::{Display, EnumIter};

use crate::rating::{RatingScale, RatingVector};
use crate::types::TasteAxis;

/// Coarse intensity of a rating: the scale split into thirds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Intensity {
    #[strum(to_string = "약함")]
    Low,
    #[strum(to_string = "중간")]
    Medium,
    #[strum(to_string = "강함")]
    High,
}

impl Intensity {
    pub fn of(scale: &RatingScale, value: f64) -> Self {
        let ratio = (value - scale.minimum) / scale.span();
        if ratio < 1.0 / 3.0 {
            Self::Low
        } else if ratio < 2.0 / 3.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

type Row = [&'static [&'static str]; 3];

// Indexed by TasteAxis, then Intensity
const EXPRESSIONS: [Row; 6] = [
    // Acidity
    [
        &["부드러운 산미", "차분한", "낮은 산도"],
        &["산뜻한", "밝은", "과즙 같은"],
        &["상큼한", "톡 쏘는", "와인 같은", "시트러스한"],
    ],
    // Sweetness
    [
        &["담백한", "드라이한", "은은한"],
        &["달콤한", "꿀 같은", "과일 같은 단맛"],
        &["캐러멜 같은", "시럽 같은", "진한 단맛"],
    ],
    // Bitterness
    [
        &["쓴맛이 적은", "깔끔한", "가벼운 쌉쌀함"],
        &["쌉쌀한", "다크한", "카카오 같은"],
        &["스모키한", "탄 맛", "거친 쓴맛"],
    ],
    // Body
    [
        &["가벼운", "물 같은", "티 같은"],
        &["매끄러운", "실키한", "적당한 무게감"],
        &["묵직한", "크리미한", "오일리한", "시럽 같은 질감"],
    ],
    // Aftertaste
    [
        &["짧은 여운", "빠르게 사라지는", "깔끔하게 끝나는"],
        &["기분 좋은 여운", "달콤하게 남는", "부드럽게 이어지는"],
        &["긴 여운", "오래 지속되는", "입안 가득 남는"],
    ],
    // Balance
    [
        &["한쪽으로 치우친", "단조로운", "거친"],
        &["무난한", "정돈된", "편안한"],
        &["조화로운", "균형 잡힌", "복합적인", "둥근"],
    ],
];

/// Expressions for `axis` at `intensity`
pub fn expressions(axis: TasteAxis, intensity: Intensity) -> &'static [&'static str] {
    EXPRESSIONS[axis as usize][intensity as usize]
}

/// Leading expression for every axis of `ratings`, in axis order
pub fn describe(ratings: &RatingVector) -> Vec<(TasteAxis, &'static str)> {
    ratings
        .values()
        .iter()
        .filter_map(|(&axis, &value)| {
            let intensity = Intensity::of(ratings.scale(), value);
            expressions(axis, intensity)
                .first()
                .map(|expression| (axis, *expression))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_cell_has_expressions() {
        for axis in TasteAxis::all() {
            for intensity in Intensity::iter() {
                assert!(!expressions(axis, intensity).is_empty(), "{axis} {intensity}");
            }
        }
    }

    #[test]
    fn test_intensity_thirds() {
        let scale = RatingScale::default();
        assert_eq!(Intensity::of(&scale, 1.0), Intensity::Low);
        assert_eq!(Intensity::of(&scale, 3.9), Intensity::Low);
        assert_eq!(Intensity::of(&scale, 5.5), Intensity::Medium);
        assert_eq!(Intensity::of(&scale, 7.0), Intensity::High);
        assert_eq!(Intensity::of(&scale, 10.0), Intensity::High);
    }

    #[test]
    fn test_describe_follows_ratings() {
        let mut ratings = RatingVector::with_defaults();
        ratings.set_value(TasteAxis::Acidity, 9.0);
        ratings.set_value(TasteAxis::Body, 1.5);
        let described = describe(&ratings);
        assert_eq!(described.len(), 6);
        assert!(described.contains(&(TasteAxis::Acidity, "상큼한")));
        assert!(described.contains(&(TasteAxis::Body, "가벼운")));
        assert!(described.contains(&(TasteAxis::Balance, "무난한")));
    }
}
