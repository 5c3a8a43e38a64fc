//! Splitting raw menu text into breakfast, lunch and dinner fragments.
//!
//! The generator is asked for a fixed layout but rarely follows it exactly, so sections are found
//! by keyword rather than by structure. A line whose lowercased text *contains* a meal keyword
//! anywhere opens that meal's section, and the line itself is consumed. This also fires on a
//! keyword mid-sentence ("ăn nhẹ trước bữa tối"); that imprecision is accepted in exchange for
//! tolerating whatever heading style comes back.
//!
//! A grand-total line closes the current section so the day's total is not appended to dinner.
//! Lines before the first heading and after the grand total are dropped.

use crate::config::{KeywordConfig, ParserConfig};
use crate::markup::push_line;
use serde::{Deserialize, Serialize};

/// One of the three fixed meals of a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Meal {
    type Err = crate::DietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Meal::Breakfast),
            "lunch" => Ok(Meal::Lunch),
            "dinner" => Ok(Meal::Dinner),
            other => Err(crate::DietError::InvalidInput(format!(
                "unknown meal '{other}' (expected breakfast, lunch or dinner)"
            ))),
        }
    }
}

/// Formatted fragments for the three meals of one day.
///
/// Always carries all three meals; a meal with no lines is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSections {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl MealSections {
    pub fn get(&self, meal: Meal) -> &str {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
        }
    }

    fn get_mut(&mut self, meal: Meal) -> &mut String {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        }
    }

    /// Meals in day order, paired with their fragments.
    pub fn iter(&self) -> impl Iterator<Item = (Meal, &str)> + '_ {
        Meal::ALL.into_iter().map(move |meal| (meal, self.get(meal)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, fragment)| fragment.is_empty())
    }
}

/// What a line does to the section cursor.
#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    Heading(Meal),
    GrandTotal,
    Content,
}

fn classify(lowered: &str, keywords: &KeywordConfig) -> LineKind {
    let hit = |words: &[String]| words.iter().any(|w| lowered.contains(w.as_str()));

    if hit(&keywords.breakfast) {
        LineKind::Heading(Meal::Breakfast)
    } else if hit(&keywords.lunch) {
        LineKind::Heading(Meal::Lunch)
    } else if hit(&keywords.dinner) {
        LineKind::Heading(Meal::Dinner)
    } else if hit(&keywords.grand_total) {
        LineKind::GrandTotal
    } else {
        LineKind::Content
    }
}

fn is_separator(trimmed: &str) -> bool {
    trimmed == "---" || trimmed == "***" || trimmed.starts_with("###")
}

/// Splits raw menu text into per-meal fragments.
///
/// Each kept line has its emphasis converted and is followed by a `<br>` marker; original casing
/// is preserved. Pure: the same input always yields the same sections.
pub fn parse_sections(raw: &str, cfg: &ParserConfig) -> MealSections {
    let mut sections = MealSections::default();
    let mut current: Option<Meal> = None;

    for line in raw.lines() {
        let trimmed = line.trim();

        match classify(&trimmed.to_lowercase(), cfg.keywords()) {
            LineKind::Heading(meal) => {
                tracing::trace!("section switch to {meal}: {trimmed:?}");
                current = Some(meal);
            }
            LineKind::GrandTotal => {
                current = None;
            }
            LineKind::Content => {
                let Some(meal) = current else { continue };
                if trimmed.is_empty() || is_separator(trimmed) {
                    continue;
                }
                push_line(sections.get_mut(meal), line);
            }
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> MealSections {
        parse_sections(raw, &ParserConfig::default())
    }

    #[test]
    fn test_breakfast_and_lunch_with_grand_total() {
        let raw = "Buổi sáng\n- Phở bò (1 tô) - 450 kcal\n- Cà phê sữa (1 ly) - 120 kcal\nBuổi trưa\n- Cơm gà (1 đĩa) - 650 kcal\nTổng calo: 1220 kcal";
        let sections = parse(raw);

        assert_eq!(
            sections.breakfast,
            "- Phở bò (1 tô) - 450 kcal<br>- Cà phê sữa (1 ly) - 120 kcal<br>"
        );
        assert_eq!(sections.lunch, "- Cơm gà (1 đĩa) - 650 kcal<br>");
        assert_eq!(sections.dinner, "");
        assert!(!sections.iter().any(|(_, f)| f.contains("1220")));
    }

    #[test]
    fn test_lines_before_first_heading_are_dropped() {
        let raw = "Đây là thực đơn của bạn!\nBữa sáng 🌅\n- Bánh mì (1 ổ) - 300 kcal";
        let sections = parse(raw);
        assert_eq!(sections.breakfast, "- Bánh mì (1 ổ) - 300 kcal<br>");
        assert!(!sections.breakfast.contains("thực đơn"));
    }

    #[test]
    fn test_lines_after_grand_total_are_dropped() {
        let raw = "Dinner\n- Salmon (150g) - 400 kcal\n**Total calories**: 2100\nEnjoy your meals";
        let sections = parse(raw);
        assert_eq!(sections.dinner, "- Salmon (150g) - 400 kcal<br>");
    }

    #[test]
    fn test_heading_keyword_mid_sentence_switches_section() {
        let raw = "Bữa trưa\n- Bún chả (1 phần) - 550 kcal\nNên ăn nhẹ trước bữa tối\n- Canh chua (1 bát) - 150 kcal";
        let sections = parse(raw);
        assert_eq!(sections.lunch, "- Bún chả (1 phần) - 550 kcal<br>");
        assert_eq!(sections.dinner, "- Canh chua (1 bát) - 150 kcal<br>");
    }

    #[test]
    fn test_breakfast_keyword_takes_priority() {
        // "sáng" wins over "tối" when both appear on one line.
        let raw = "Sáng hay tối đều được\nline";
        assert_eq!(parse(raw).breakfast, "line<br>");
    }

    #[test]
    fn test_separators_and_blank_lines_are_skipped() {
        let raw = "LUNCH\n\n---\n***\n### Món chính\n   \n- Rice (1 bowl) - 200 kcal";
        let sections = parse(raw);
        assert_eq!(sections.lunch, "- Rice (1 bowl) - 200 kcal<br>");
    }

    #[test]
    fn test_emphasis_is_converted_and_casing_kept() {
        let raw = "Breakfast\n**Trứng ốp la** (2 quả) - *giàu đạm*";
        assert_eq!(
            parse(raw).breakfast,
            "<strong>Trứng ốp la</strong> (2 quả) - <em>giàu đạm</em><br>"
        );
    }

    #[test]
    fn test_empty_input_has_all_three_keys() {
        let sections = parse("");
        assert!(sections.is_empty());
        assert_eq!(sections.iter().count(), 3);

        let json = serde_json::to_value(&sections).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        for meal in Meal::ALL {
            assert_eq!(object[meal.as_str()], "");
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "Bữa sáng\n- Xôi (1 gói) - 350 kcal\nBữa tối\n- Cá kho (1 khúc) - 300 kcal";
        assert_eq!(parse(raw), parse(raw));
    }

    #[test]
    fn test_reopened_section_appends() {
        let raw = "Breakfast\na\nLunch\nb\nBreakfast snack\nc";
        let sections = parse(raw);
        assert_eq!(sections.breakfast, "a<br>c<br>");
        assert_eq!(sections.lunch, "b<br>");
    }

    #[test]
    fn test_custom_keywords() {
        let cfg = ParserConfig::from_yaml("keywords:\n  breakfast: [\"morning\"]\n").unwrap();
        let sections = parse_sections("Morning\ntoast", &cfg);
        assert_eq!(sections.breakfast, "toast<br>");
    }

    #[test]
    fn test_meal_from_str() {
        assert_eq!(" Lunch ".parse::<Meal>().unwrap(), Meal::Lunch);
        assert!("brunch".parse::<Meal>().is_err());
    }
}
