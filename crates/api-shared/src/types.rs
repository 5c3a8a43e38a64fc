//! Request and response bodies for the JSON API.
//!
//! Timestamps travel as strings (`YYYY-MM-DD` or RFC 3339) and are parsed by the handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Raw menu text as stored for a day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuTextReq {
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuViewReq {
    pub content: String,
    /// Authoritative total saved with the menu. Zero or absent means unknown.
    #[serde(default)]
    pub stored_calories: Option<u32>,
}

/// Markup fragments, one per meal. Empty when the meal was not found.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectionsRes {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuViewRes {
    /// Fragments with the placeholder substituted for empty meals.
    pub sections: SectionsRes,
    pub calories: Option<u32>,
    pub calories_display: String,
    /// `stored`, `grand_total`, `meal_sum`, `fallback_range` or `unknown`.
    pub calorie_source: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CaloriesRes {
    pub calories: Option<u32>,
    pub display: String,
    /// Extraction tier that produced the figure, if any.
    pub tier: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DishDto {
    pub name: String,
    pub portion: String,
    pub calories: u32,
}

/// One meal fragment to open for editing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealDishesReq {
    /// `breakfast`, `lunch` or `dinner`.
    pub meal: String,
    pub fragment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealDishesRes {
    pub meal: String,
    pub dishes: Vec<DishDto>,
    pub total_calories: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealRenderReq {
    pub meal: String,
    pub dishes: Vec<DishDto>,
}

/// Edited meal ready to be saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealRenderRes {
    pub meal: String,
    pub content: String,
    pub total_calories: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileDto {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub dietary_goal: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TargetCaloriesRes {
    pub kcal: u32,
    /// `lose_weight`, `gain_weight` or `maintain`.
    pub goal: String,
    pub goal_description: String,
    pub bmr: f64,
    pub tdee: f64,
}

/// A previously generated menu, used to avoid repeating dishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentMenuDto {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuPromptReq {
    #[serde(default)]
    pub profile: ProfileDto,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub day_number: Option<usize>,
    /// Most recent first.
    #[serde(default)]
    pub recent_menus: Vec<RecentMenuDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuPromptRes {
    pub prompt: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightEntryDto {
    pub recorded_at: String,
    pub weight_kg: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightSummaryReq {
    #[serde(default)]
    pub entries: Vec<WeightEntryDto>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub profile_weight_kg: Option<f64>,
    /// Reference time for the change window. Defaults to the current time.
    #[serde(default)]
    pub now: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightStatsDto {
    pub min_kg: f64,
    pub avg_kg: f64,
    pub max_kg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeightSummaryRes {
    pub current_weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub change_kg: f64,
    pub recorded_at: Option<String>,
    pub stats: Option<WeightStatsDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let req: MenuPromptReq = serde_json::from_str(r#"{"date":"2026-03-05"}"#).unwrap();
        assert_eq!(req.profile, ProfileDto::default());
        assert!(req.recent_menus.is_empty());
        assert_eq!(req.day_number, None);

        let req: MenuViewReq = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(req.stored_calories, None);
    }
}
