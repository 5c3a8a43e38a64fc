//! Constants used throughout the diet core crate.
//!
//! Keyword lists are matched against lowercased lines, so they are stored lowercase.

/// Words that open the breakfast section.
pub const BREAKFAST_KEYWORDS: &[&str] = &["sáng", "breakfast"];

/// Words that open the lunch section.
pub const LUNCH_KEYWORDS: &[&str] = &["trưa", "lunch"];

/// Words that open the dinner section.
pub const DINNER_KEYWORDS: &[&str] = &["tối", "chiều", "dinner"];

/// Phrases that mark the day's grand total and close the current section.
pub const GRAND_TOTAL_KEYWORDS: &[&str] = &["tổng calo", "total cal"];

/// Explicit line-break marker appended after every section line.
pub const BREAK_MARKER: &str = "<br>";

/// Markup shown in place of a meal section that has no lines.
pub const EMPTY_SECTION_PLACEHOLDER: &str = r#"<p class="meal-placeholder">Chưa có dữ liệu</p>"#;

/// Glyph shown when no calorie figure can be derived.
pub const UNKNOWN_CALORIES_GLYPH: &str = "--";

/// Exclusive bounds for a whole-day grand total.
pub const DAY_TOTAL_LOWER: u32 = 1_000;
pub const DAY_TOTAL_UPPER: u32 = 10_000;

/// Exclusive bounds for a single meal's range.
pub const MEAL_RANGE_LOWER: u32 = 200;
pub const MEAL_RANGE_UPPER: u32 = 2_000;

/// Minimum number of plausible meal ranges before their sum is used.
pub const MIN_MEAL_MATCHES: usize = 2;
/// A per-meal sum is used only when it is strictly above this total.
pub const MIN_MEAL_SUM: u32 = 1_000;

/// Exclusive bounds for the last-resort "any range" scan.
pub const FALLBACK_RANGE_LOWER: u32 = 2_000;
pub const FALLBACK_RANGE_UPPER: u32 = 5_000;

/// Dish names shorter than this are not worth listing as "recently eaten".
pub const MIN_RECENT_DISH_NAME_CHARS: usize = 4;

/// Number of previous days whose dishes feed the avoid-list of a new menu.
pub const RECENT_MENU_DAYS: usize = 3;

/// Weight change is reported against the latest entry at least this many days older.
pub const WEIGHT_CHANGE_WINDOW_DAYS: i64 = 30;

/// Rendered for profile fields the user never filled in.
pub const UNKNOWN_PROFILE_VALUE: &str = "không rõ";
