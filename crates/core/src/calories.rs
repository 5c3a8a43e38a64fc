//! Daily calorie estimation from free-text menus.
//!
//! Three strategies are tried in order and the first one that yields a plausible figure wins:
//!
//! 1. **Grand total** - an explicit "Tổng calo" / "Total calories" phrase followed by a range or
//!    a single number. Four pattern shapes are tried in a fixed order, and only the *first*
//!    occurrence of each shape is examined.
//! 2. **Meal sum** - every "Bữa sáng/trưa/tối" followed by a range;
//!    the midpoints of the plausible ones are summed.
//! 3. **Fallback range** - the first range anywhere in the text whose magnitude looks like a
//!    whole day.
//!
//! Bounds come from [`CalorieConfig`]; they only exist to reject gram weights, prices and other
//! numbers that are not calorie totals.

use crate::config::{CalorieConfig, ParserConfig};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// Vietnamese or English grand-total phrase.
const TOTAL_PHRASE: &str = r"(?:tổng\s*calo|total\s*cal(?:ories?)?)";

/// Bold-marked phrase, tolerating a colon inside or right after the markers.
const BOLD_TOTAL_PHRASE: &str = r"\*\*(?:tổng\s*calo|total\s*cal(?:ories?)?)\s*[:：]?\*\*\s*[:：]?";

#[derive(Clone, Copy, Debug)]
enum Shape {
    Range,
    Single,
}

static GRAND_TOTAL_PATTERNS: LazyLock<Vec<(Regex, Shape)>> = LazyLock::new(|| {
    [
        (
            format!(r"(?i){BOLD_TOTAL_PHRASE}\s*([0-9]+)[-–]([0-9]+)"),
            Shape::Range,
        ),
        (
            format!(r"(?i){TOTAL_PHRASE}\s*[:：]?\s*([0-9]+)[-–]([0-9]+)"),
            Shape::Range,
        ),
        (format!(r"(?i){BOLD_TOTAL_PHRASE}\s*([0-9]+)"), Shape::Single),
        (
            format!(r"(?i){TOTAL_PHRASE}\s*[:：]?\s*([0-9]+)\s*kcal"),
            Shape::Single,
        ),
    ]
    .into_iter()
    .map(|(pattern, shape)| {
        let re = Regex::new(&pattern).expect("grand total pattern should be valid");
        (re, shape)
    })
    .collect()
});

static MEAL_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)bữa\s*(?:sáng|trưa|tối).*?([0-9]+)[-–]([0-9]+)")
        .expect("meal range pattern should be valid")
});

static ANY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*[-–]\s*([0-9]+)").expect("range pattern should be valid")
});

/// Which strategy produced an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    GrandTotal,
    MealSum,
    FallbackRange,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::GrandTotal => "grand_total",
            Tier::MealSum => "meal_sum",
            Tier::FallbackRange => "fallback_range",
        }
    }
}

/// An accepted figure and the tier it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TierMatch {
    pub kcal: u32,
    pub tier: Tier,
}

/// A derived daily calorie figure, or the sentinel for "nothing plausible found".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CalorieEstimate {
    Known(u32),
    #[default]
    Unknown,
}

impl CalorieEstimate {
    pub fn kcal(&self) -> Option<u32> {
        match self {
            CalorieEstimate::Known(kcal) => Some(*kcal),
            CalorieEstimate::Unknown => None,
        }
    }

    /// Renders the figure, or `unknown` for the sentinel.
    pub fn display_with(&self, unknown: &str) -> String {
        match self {
            CalorieEstimate::Known(kcal) => kcal.to_string(),
            CalorieEstimate::Unknown => unknown.to_owned(),
        }
    }
}

impl std::fmt::Display for CalorieEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_with(crate::constants::UNKNOWN_CALORIES_GLYPH))
    }
}

impl From<Option<TierMatch>> for CalorieEstimate {
    fn from(value: Option<TierMatch>) -> Self {
        value.map_or(CalorieEstimate::Unknown, |m| CalorieEstimate::Known(m.kcal))
    }
}

/// Estimates the day's calories from raw menu text.
pub fn extract_calories(raw: &str, cfg: &ParserConfig) -> CalorieEstimate {
    extract_calories_with_tier(raw, cfg).into()
}

/// Like [`extract_calories`] but also reports which tier matched.
pub fn extract_calories_with_tier(raw: &str, cfg: &ParserConfig) -> Option<TierMatch> {
    let bounds = cfg.calories();

    let found = grand_total(raw, bounds)
        .map(|kcal| (kcal, Tier::GrandTotal))
        .or_else(|| meal_sum(raw, bounds).map(|kcal| (kcal, Tier::MealSum)))
        .or_else(|| fallback_range(raw, bounds).map(|kcal| (kcal, Tier::FallbackRange)));

    match found {
        Some((kcal, tier)) => {
            tracing::debug!("calorie estimate {kcal} from {tier:?}");
            Some(TierMatch { kcal, tier })
        }
        None => {
            tracing::debug!("no plausible calorie figure in menu text");
            None
        }
    }
}

fn grand_total(raw: &str, cfg: &CalorieConfig) -> Option<u32> {
    GRAND_TOTAL_PATTERNS.iter().find_map(|(pattern, shape)| {
        let caps = pattern.captures(raw)?;
        match shape {
            Shape::Range => {
                let (min, max) = range(&caps)?;
                cfg.day_total
                    .accepts_range(min, max)
                    .then(|| midpoint(min, max))
            }
            Shape::Single => {
                let value = number(&caps, 1)?;
                cfg.day_total.accepts_value(value).then_some(value)
            }
        }
    })
}

fn meal_sum(raw: &str, cfg: &CalorieConfig) -> Option<u32> {
    let mut total: u32 = 0;
    let mut meals = 0usize;

    for caps in MEAL_RANGE.captures_iter(raw) {
        let Some((min, max)) = range(&caps) else {
            continue;
        };
        if cfg.meal_range.accepts_range(min, max) {
            total = total.saturating_add(midpoint(min, max));
            meals += 1;
        }
    }

    (meals >= cfg.min_meal_matches && total > cfg.min_meal_sum).then_some(total)
}

fn fallback_range(raw: &str, cfg: &CalorieConfig) -> Option<u32> {
    ANY_RANGE.captures_iter(raw).find_map(|caps| {
        let (min, max) = range(&caps)?;
        cfg.fallback_range
            .accepts_range(min, max)
            .then(|| midpoint(min, max))
    })
}

/// Numbers too large for `u32` are treated as no match.
fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn range(caps: &Captures<'_>) -> Option<(u32, u32)> {
    Some((number(caps, 1)?, number(caps, 2)?))
}

/// Midpoint rounded half up.
fn midpoint(min: u32, max: u32) -> u32 {
    ((u64::from(min) + u64::from(max) + 1) / 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> CalorieEstimate {
        extract_calories(raw, &ParserConfig::default())
    }

    fn tier(raw: &str) -> Option<Tier> {
        extract_calories_with_tier(raw, &ParserConfig::default()).map(|m| m.tier)
    }

    #[test]
    fn test_bold_grand_total_range_is_averaged() {
        let raw = "Bữa sáng\n- Phở (1 tô) - 450 kcal\n**Tổng calo** 2550-3000";
        assert_eq!(extract(raw), CalorieEstimate::Known(2775));
        assert_eq!(tier(raw), Some(Tier::GrandTotal));
    }

    #[test]
    fn test_plain_grand_total_forms() {
        assert_eq!(extract("Tổng calo: 1800-2000"), CalorieEstimate::Known(1900));
        assert_eq!(extract("Tổng calo 2000–2400"), CalorieEstimate::Known(2200));
        assert_eq!(extract("Tổng calo: 2550 kcal"), CalorieEstimate::Known(2550));
        assert_eq!(extract("TỔNG CALO：2100 KCAL"), CalorieEstimate::Known(2100));
    }

    #[test]
    fn test_english_grand_total() {
        assert_eq!(extract("Total calories: 2100 kcal"), CalorieEstimate::Known(2100));
        assert_eq!(extract("**Total calories** 1900-2100"), CalorieEstimate::Known(2000));
    }

    #[test]
    fn test_colon_around_bold_marker() {
        assert_eq!(extract("**Tổng calo:** 2400 kcal"), CalorieEstimate::Known(2400));
        assert_eq!(extract("**Tổng calo**: 2200-2600"), CalorieEstimate::Known(2400));
    }

    #[test]
    fn test_midpoint_rounds_half_up() {
        assert_eq!(extract("Tổng calo: 2001-2002"), CalorieEstimate::Known(2002));
    }

    #[test]
    fn test_grand_total_out_of_bounds_falls_through() {
        assert_eq!(extract("**Tổng calo** 900-1200"), CalorieEstimate::Unknown);
        assert_eq!(extract("Tổng calo: 12000 kcal"), CalorieEstimate::Unknown);
        assert_eq!(extract("Tổng calo: 1000 kcal"), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_rejected_grand_total_lets_later_pattern_win() {
        let raw = "**Tổng calo** 900-1200\nTổng calo: 2000 kcal";
        assert_eq!(extract(raw), CalorieEstimate::Known(2000));
        assert_eq!(tier(raw), Some(Tier::GrandTotal));
    }

    #[test]
    fn test_only_first_occurrence_of_each_pattern_is_checked() {
        let raw = "Tổng calo: 500 kcal (bữa phụ)\nTổng calo: 2000 kcal";
        assert_eq!(extract(raw), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_meal_ranges_are_summed() {
        let raw = "Bữa sáng: phở bò, khoảng 600-700 kcal\nBữa tối: cơm cá, khoảng 700-800 kcal";
        assert_eq!(extract(raw), CalorieEstimate::Known(1400));
        assert_eq!(tier(raw), Some(Tier::MealSum));
    }

    #[test]
    fn test_bare_english_meal_names_are_not_meal_headings() {
        let raw = "Breakfast: eggs and toast, 600-700 kcal\nDinner: salmon, 700-800 kcal";
        assert_eq!(extract(raw), CalorieEstimate::Unknown);
        assert_eq!(tier(raw), None);
    }

    #[test]
    fn test_meal_range_may_span_lines() {
        let raw = "Bữa sáng\n- Phở (1 tô) 450-500 kcal\nBữa trưa\n- Cơm gà 600-700 kcal";
        assert_eq!(extract(raw), CalorieEstimate::Known(1125));
    }

    #[test]
    fn test_single_meal_range_is_not_enough() {
        assert_eq!(extract("Bữa trưa: 800-900 kcal"), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_meal_sum_must_exceed_minimum() {
        let raw = "Bữa sáng 300-400\nBữa trưa 400-500";
        // 350 + 450 = 800, not above 1000
        assert_eq!(extract(raw), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_fallback_range_anywhere() {
        let raw = "Nhu cầu năng lượng khoảng 2200 – 2400 kcal mỗi ngày";
        assert_eq!(extract(raw), CalorieEstimate::Known(2300));
        assert_eq!(tier(raw), Some(Tier::FallbackRange));
    }

    #[test]
    fn test_fallback_takes_first_plausible_range() {
        let raw = "Ức gà 100-150g, nhu cầu 2500-2700, tối đa 3000-3500";
        assert_eq!(extract(raw), CalorieEstimate::Known(2600));
    }

    #[test]
    fn test_unrelated_range_is_unknown() {
        assert_eq!(extract("Thịt gà 50-80g luộc"), CalorieEstimate::Unknown);
        assert_eq!(extract(""), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_huge_numbers_do_not_match() {
        assert_eq!(extract("Tổng calo: 99999999999 kcal"), CalorieEstimate::Unknown);
    }

    #[test]
    fn test_bounds_follow_config() {
        let cfg = ParserConfig::from_yaml(
            "calories:\n  fallback_range:\n    lower: 40\n    upper: 100\n",
        )
        .unwrap();
        assert_eq!(
            extract_calories("Thịt gà 50-80g", &cfg),
            CalorieEstimate::Known(65)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CalorieEstimate::Known(2775).to_string(), "2775");
        assert_eq!(CalorieEstimate::Unknown.to_string(), "--");
        assert_eq!(CalorieEstimate::Unknown.display_with("n/a"), "n/a");
    }
}
