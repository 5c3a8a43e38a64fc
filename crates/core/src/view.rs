//! Display projection of a stored menu.
//!
//! Applies the display policy around the parsers: placeholders for empty meals, and a stored
//! calorie total preferred over anything extracted from the text.

use crate::calories::{extract_calories_with_tier, CalorieEstimate, Tier};
use crate::config::ParserConfig;
use crate::sections::{parse_sections, MealSections};
use serde::Serialize;

/// Where the displayed calorie figure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieSource {
    Stored,
    Extracted(Tier),
    Unknown,
}

impl CalorieSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieSource::Stored => "stored",
            CalorieSource::Extracted(tier) => tier.as_str(),
            CalorieSource::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuView {
    /// Fragments with the placeholder substituted for empty meals.
    pub sections: MealSections,
    pub calories: Option<u32>,
    pub calories_display: String,
    pub calorie_source: CalorieSource,
}

impl MenuView {
    /// Builds the view for one day's menu.
    ///
    /// A `stored_calories` of zero counts as missing, in which case the estimate is extracted
    /// from `raw`.
    pub fn build(raw: &str, stored_calories: Option<u32>, cfg: &ParserConfig) -> Self {
        let display = cfg.display();

        let mut sections = parse_sections(raw, cfg);
        for fragment in [
            &mut sections.breakfast,
            &mut sections.lunch,
            &mut sections.dinner,
        ] {
            if fragment.is_empty() {
                fragment.push_str(&display.empty_section);
            }
        }

        let (estimate, calorie_source) = match stored_calories.filter(|kcal| *kcal > 0) {
            Some(kcal) => (CalorieEstimate::Known(kcal), CalorieSource::Stored),
            None => match extract_calories_with_tier(raw, cfg) {
                Some(found) => (
                    CalorieEstimate::Known(found.kcal),
                    CalorieSource::Extracted(found.tier),
                ),
                None => (CalorieEstimate::Unknown, CalorieSource::Unknown),
            },
        };

        Self {
            sections,
            calories: estimate.kcal(),
            calories_display: estimate.display_with(&display.unknown_calories),
            calorie_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EMPTY_SECTION_PLACEHOLDER;

    const MENU: &str = "Bữa sáng\n- Phở bò (1 tô) - 450 kcal\nBữa tối\n- Cá kho (1 khúc) - 300 kcal\n**Tổng calo** 2550-3000";

    #[test]
    fn test_empty_meal_gets_placeholder() {
        let view = MenuView::build(MENU, None, &ParserConfig::default());
        assert_eq!(view.sections.breakfast, "- Phở bò (1 tô) - 450 kcal<br>");
        assert_eq!(view.sections.lunch, EMPTY_SECTION_PLACEHOLDER);
        assert_eq!(view.sections.dinner, "- Cá kho (1 khúc) - 300 kcal<br>");
    }

    #[test]
    fn test_stored_calories_win() {
        let view = MenuView::build(MENU, Some(2100), &ParserConfig::default());
        assert_eq!(view.calories, Some(2100));
        assert_eq!(view.calorie_source, CalorieSource::Stored);
    }

    #[test]
    fn test_zero_stored_calories_means_extract() {
        let view = MenuView::build(MENU, Some(0), &ParserConfig::default());
        assert_eq!(view.calories, Some(2775));
        assert_eq!(view.calories_display, "2775");
        assert_eq!(view.calorie_source, CalorieSource::Extracted(Tier::GrandTotal));
    }

    #[test]
    fn test_unknown_calories_use_glyph() {
        let view = MenuView::build("Ghi chú: ăn đủ bữa", None, &ParserConfig::default());
        assert_eq!(view.calories, None);
        assert_eq!(view.calories_display, "--");
        assert_eq!(view.calorie_source, CalorieSource::Unknown);
        assert!(view
            .sections
            .iter()
            .all(|(_, fragment)| fragment == EMPTY_SECTION_PLACEHOLDER));
    }
}
