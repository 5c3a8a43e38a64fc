//! Request text for the menu generator.
//!
//! The answer format spelled out here is the one the section, calorie and dish parsers are tuned
//! for, so changes to it should be mirrored in their keyword lists and patterns.

use crate::constants::{RECENT_MENU_DAYS, UNKNOWN_PROFILE_VALUE};
use crate::nutrition::{target_calories, UserProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const DEFAULT_GOAL: &str = "Duy trì sức khỏe";
const DEFAULT_ACTIVITY: &str = "Vận động vừa";
const DEFAULT_ALLERGIES: &str = "Không có";

const DISH_LINE_TEMPLATE: &str = "- [Tên món] ([gram/ml]) - [calo] kcal";

/// Dishes served on an earlier day, used to keep new menus varied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentMenu {
    pub date: NaiveDate,
    pub dishes: Vec<String>,
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN_PROFILE_VALUE.to_owned(), |v| v.to_string())
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Builds the generation request for one day.
///
/// `day_number` is set when several days are generated in one go. Only the first
/// [`RECENT_MENU_DAYS`] entries of `recent` are used, and entries without dishes are skipped.
pub fn build_menu_prompt(
    profile: &UserProfile,
    date: NaiveDate,
    day_number: Option<usize>,
    recent: &[RecentMenu],
) -> String {
    let goal = text_or(profile.dietary_goal.as_deref(), DEFAULT_GOAL);
    let activity = text_or(profile.activity_level.as_deref(), DEFAULT_ACTIVITY);
    let allergies = text_or(profile.allergies.as_deref(), DEFAULT_ALLERGIES);

    let mut out = String::new();

    let _ = write!(
        out,
        "NHIỆM VỤ: Lập thực đơn dinh dưỡng cho ngày {}",
        date.format("%d/%m/%Y")
    );
    if let Some(n) = day_number {
        let _ = write!(out, " (ngày thứ {n})");
    }
    out.push_str("\n\n");

    out.push_str("THÔNG TIN NGƯỜI DÙNG:\n");
    let _ = writeln!(out, "- Giới tính: {}", text_or(profile.gender.as_deref(), UNKNOWN_PROFILE_VALUE));
    let _ = writeln!(out, "- Tuổi: {}", or_unknown(profile.age));
    let _ = writeln!(out, "- Chiều cao (cm): {}", or_unknown(profile.height_cm));
    let _ = writeln!(out, "- Cân nặng (kg): {}", or_unknown(profile.weight_kg));
    let _ = writeln!(out, "- Mục tiêu: {goal}");
    let _ = writeln!(out, "- Mức độ vận động: {activity}");
    let _ = writeln!(out, "- Dị ứng/Hạn chế: {allergies}");
    if let Some(target) = target_calories(profile) {
        let _ = writeln!(
            out,
            "- Calo khuyến nghị: {} kcal/ngày ({})",
            target.kcal,
            target.goal.description()
        );
    }

    let recent: Vec<&RecentMenu> = recent
        .iter()
        .take(RECENT_MENU_DAYS)
        .filter(|menu| !menu.dishes.is_empty())
        .collect();
    if !recent.is_empty() {
        out.push_str("\nKHÔNG lặp lại các món đã dùng gần đây:\n");
        for menu in recent {
            let _ = writeln!(
                out,
                "  Ngày {}: {}",
                menu.date.format("%d/%m"),
                menu.dishes.join(", ")
            );
        }
        out.push_str("Thực đơn hôm nay phải dùng món khác hoàn toàn.\n");
    }

    out.push_str("\nYÊU CẦU:\n");
    out.push_str("1. Ba bữa chính: Bữa sáng, Bữa trưa, Bữa tối\n");
    out.push_str("2. Mỗi món ghi tên, khẩu phần (gram/ml) và calo ước tính\n");
    out.push_str("3. Cuối cùng ghi tổng calo cả ngày\n");
    out.push_str("4. Cân đối đạm, tinh bột, chất béo và rau củ; ưu tiên món Việt\n");
    let _ = writeln!(out, "5. Tuyệt đối tránh: {allergies}");

    out.push_str("\nĐỊNH DẠNG TRẢ LỜI (BẮT BUỘC):\n");
    for heading in ["Bữa sáng", "Bữa trưa", "Bữa tối"] {
        let _ = writeln!(out, "{heading}\n{DISH_LINE_TEMPLATE}\n{DISH_LINE_TEMPLATE}\n");
    }
    out.push_str("Tổng calo: [số] kcal\n\n");
    out.push_str("Chỉ trả về thực đơn theo đúng định dạng trên, không hỏi lại, không giải thích thêm.\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prompt_with_full_profile() {
        let profile = UserProfile {
            gender: Some("Nam".into()),
            age: Some(25),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            ..UserProfile::default()
        };
        let prompt = build_menu_prompt(&profile, date(2026, 3, 5), None, &[]);

        assert!(prompt.contains("ngày 05/03/2026"));
        assert!(prompt.contains("- Calo khuyến nghị: 2594 kcal/ngày (duy trì cân nặng)"));
        assert!(prompt.contains("- Mục tiêu: Duy trì sức khỏe"));
        assert!(prompt.contains("- Dị ứng/Hạn chế: Không có"));
        assert!(prompt.contains("Tổng calo: [số] kcal"));
        assert!(prompt.contains("Bữa tối\n- [Tên món] ([gram/ml]) - [calo] kcal"));
        assert!(!prompt.contains("KHÔNG lặp lại"));
    }

    #[test]
    fn test_prompt_with_unknown_profile() {
        let prompt = build_menu_prompt(&UserProfile::default(), date(2026, 1, 1), Some(2), &[]);
        assert!(prompt.contains("(ngày thứ 2)"));
        assert!(prompt.contains("- Tuổi: không rõ"));
        assert!(prompt.contains("- Giới tính: không rõ"));
        assert!(!prompt.contains("Calo khuyến nghị"));
    }

    #[test]
    fn test_prompt_lists_recent_dishes() {
        let recent = vec![
            RecentMenu {
                date: date(2026, 3, 4),
                dishes: vec!["Phở bò".into(), "Bún chả".into()],
            },
            RecentMenu {
                date: date(2026, 3, 3),
                dishes: vec![],
            },
            RecentMenu {
                date: date(2026, 3, 2),
                dishes: vec!["Cá kho".into()],
            },
            RecentMenu {
                date: date(2026, 3, 1),
                dishes: vec!["Gà luộc".into()],
            },
        ];
        let prompt = build_menu_prompt(&UserProfile::default(), date(2026, 3, 5), None, &recent);

        assert!(prompt.contains("  Ngày 04/03: Phở bò, Bún chả\n"));
        assert!(prompt.contains("  Ngày 02/03: Cá kho\n"));
        assert!(!prompt.contains("Ngày 03/03"));
        assert!(!prompt.contains("Gà luộc"));
    }

    #[test]
    fn test_prompt_format_feeds_the_parsers() {
        use crate::config::ParserConfig;
        use crate::sections::parse_sections;

        // The format section of the prompt itself parses into three meals.
        let prompt = build_menu_prompt(&UserProfile::default(), date(2026, 3, 5), None, &[]);
        let format = prompt.split("(BẮT BUỘC):\n").nth(1).unwrap();
        let sections = parse_sections(format, &ParserConfig::default());
        assert!(sections.iter().all(|(_, fragment)| fragment.contains("[Tên món]")));
    }
}
