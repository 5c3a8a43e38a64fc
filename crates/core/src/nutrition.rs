//! Recommended daily calories for a user profile.
//!
//! BMR uses the Mifflin-St Jeor equation, scaled by an activity multiplier to get TDEE and then
//! by the dietary goal. The figure is sent to the menu generator as the day's target.

use serde::{Deserialize, Serialize};

/// Health profile as entered by the user. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub dietary_goal: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// "nam" (or "male") is male; anything else uses the female equation.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "nam" | "male" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Label shown in the profile form.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Ít vận động",
            ActivityLevel::Light => "Vận động nhẹ",
            ActivityLevel::Moderate => "Vận động vừa",
            ActivityLevel::Active => "Vận động nhiều",
            ActivityLevel::VeryActive => "Vận động rất nhiều",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Exact label match; unrecognised labels are `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|level| level.label() == label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainWeight,
    Maintain,
}

impl Goal {
    /// Reads the goal out of the free-text dietary preference.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("giảm cân") || text.contains("giảm béo") {
            Goal::LoseWeight
        } else if text.contains("tăng cân") || text.contains("tăng cơ") {
            Goal::GainWeight
        } else {
            Goal::Maintain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::GainWeight => "gain_weight",
            Goal::Maintain => "maintain",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Goal::LoseWeight => 0.85,
            Goal::GainWeight => 1.15,
            Goal::Maintain => 1.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "giảm cân an toàn",
            Goal::GainWeight => "tăng cân lành mạnh",
            Goal::Maintain => "duy trì cân nặng",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetCalories {
    pub kcal: u32,
    pub goal: Goal,
    pub bmr: f64,
    pub tdee: f64,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Mifflin-St Jeor BMR, or `None` unless weight, height, age and gender are all present.
pub fn bmr(profile: &UserProfile) -> Option<f64> {
    let weight = positive(profile.weight_kg)?;
    let height = positive(profile.height_cm)?;
    let age = profile.age.filter(|a| *a > 0)?;
    let gender = profile
        .gender
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .map(Gender::from_label)?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    Some(match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// Recommended daily intake, truncated to whole kcal.
///
/// An unrecognised activity label counts as moderate activity.
pub fn target_calories(profile: &UserProfile) -> Option<TargetCalories> {
    let bmr = bmr(profile)?;
    let activity = profile
        .activity_level
        .as_deref()
        .and_then(ActivityLevel::from_label)
        .unwrap_or_default();
    let goal = Goal::from_text(profile.dietary_goal.as_deref().unwrap_or_default());

    let tdee = bmr * activity.multiplier();
    let kcal = (tdee * goal.factor()) as u32;

    Some(TargetCalories {
        kcal,
        goal,
        bmr,
        tdee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: &str, age: u32, height: f64, weight: f64) -> UserProfile {
        UserProfile {
            gender: Some(gender.into()),
            age: Some(age),
            height_cm: Some(height),
            weight_kg: Some(weight),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_bmr_male_and_female() {
        assert_eq!(bmr(&profile("Nam", 25, 175.0, 70.0)), Some(1673.75));
        assert_eq!(bmr(&profile("Nữ", 30, 160.0, 55.0)), Some(1239.0));
    }

    #[test]
    fn test_bmr_requires_complete_profile() {
        let mut p = profile("Nam", 25, 175.0, 70.0);
        p.height_cm = None;
        assert_eq!(bmr(&p), None);

        let mut p = profile("Nam", 25, 175.0, 70.0);
        p.weight_kg = Some(0.0);
        assert_eq!(bmr(&p), None);

        let mut p = profile("", 25, 175.0, 70.0);
        p.gender = Some("  ".into());
        assert_eq!(bmr(&p), None);
    }

    #[test]
    fn test_target_defaults_to_moderate_maintain() {
        let target = target_calories(&profile("Nam", 25, 175.0, 70.0)).unwrap();
        assert_eq!(target.kcal, 2594);
        assert_eq!(target.goal, Goal::Maintain);
    }

    #[test]
    fn test_target_applies_goal_and_activity() {
        let mut p = profile("Nam", 25, 175.0, 70.0);
        p.dietary_goal = Some("Muốn GIẢM CÂN trước Tết".into());
        assert_eq!(target_calories(&p).unwrap().kcal, 2205);

        let mut p = profile("Nữ", 30, 160.0, 55.0);
        p.activity_level = Some("Ít vận động".into());
        p.dietary_goal = Some("tăng cơ".into());
        let target = target_calories(&p).unwrap();
        assert_eq!(target.goal, Goal::GainWeight);
        assert_eq!(target.kcal, 1709);
    }

    #[test]
    fn test_unknown_activity_label_is_moderate() {
        assert_eq!(ActivityLevel::from_label("chạy bộ"), None);
        assert_eq!(
            ActivityLevel::from_label(" Vận động rất nhiều "),
            Some(ActivityLevel::VeryActive)
        );

        let mut p = profile("Nam", 25, 175.0, 70.0);
        p.activity_level = Some("chạy bộ".into());
        assert_eq!(target_calories(&p).unwrap().kcal, 2594);
    }
}
