//! Parser runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the parsing services.
//! Request handling never reads the environment or the filesystem.
//!
//! Every tunable of the menu interpretation heuristics lives here: the keywords that switch meal
//! sections, the magnitude bounds that decide whether a number looks like a calorie figure, and
//! the placeholder text used when nothing could be derived.

use crate::constants::{
    BREAKFAST_KEYWORDS, DAY_TOTAL_LOWER, DAY_TOTAL_UPPER, DINNER_KEYWORDS,
    EMPTY_SECTION_PLACEHOLDER, FALLBACK_RANGE_LOWER, FALLBACK_RANGE_UPPER, GRAND_TOTAL_KEYWORDS,
    LUNCH_KEYWORDS, MEAL_RANGE_LOWER, MEAL_RANGE_UPPER, MIN_MEAL_MATCHES, MIN_MEAL_SUM,
    UNKNOWN_CALORIES_GLYPH,
};
use crate::{DietError, DietResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exclusive numeric bounds for a calorie figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalorieBounds {
    pub lower: u32,
    pub upper: u32,
}

impl CalorieBounds {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// `lower < value < upper`.
    pub fn accepts_value(&self, value: u32) -> bool {
        value > self.lower && value < self.upper
    }

    /// `lower < min`, `min < max` and `max < upper`.
    pub fn accepts_range(&self, min: u32, max: u32) -> bool {
        min > self.lower && max > min && max < self.upper
    }
}

/// Keywords that drive meal section switching. Matched as lowercase substrings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordConfig {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub grand_total: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| (*w).to_owned()).collect()
        }

        Self {
            breakfast: owned(BREAKFAST_KEYWORDS),
            lunch: owned(LUNCH_KEYWORDS),
            dinner: owned(DINNER_KEYWORDS),
            grand_total: owned(GRAND_TOTAL_KEYWORDS),
        }
    }
}

/// Bounds for the three calorie extraction tiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalorieConfig {
    /// Grand-total phrase values (tier 1).
    pub day_total: CalorieBounds,
    /// Per-meal ranges (tier 2).
    pub meal_range: CalorieBounds,
    pub min_meal_matches: usize,
    /// The per-meal sum must be strictly greater than this.
    pub min_meal_sum: u32,
    /// Any range in the text (tier 3).
    pub fallback_range: CalorieBounds,
}

impl Default for CalorieConfig {
    fn default() -> Self {
        Self {
            day_total: CalorieBounds::new(DAY_TOTAL_LOWER, DAY_TOTAL_UPPER),
            meal_range: CalorieBounds::new(MEAL_RANGE_LOWER, MEAL_RANGE_UPPER),
            min_meal_matches: MIN_MEAL_MATCHES,
            min_meal_sum: MIN_MEAL_SUM,
            fallback_range: CalorieBounds::new(FALLBACK_RANGE_LOWER, FALLBACK_RANGE_UPPER),
        }
    }
}

/// Text substituted by the view layer when a value is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub empty_section: String,
    pub unknown_calories: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            empty_section: EMPTY_SECTION_PLACEHOLDER.to_owned(),
            unknown_calories: UNKNOWN_CALORIES_GLYPH.to_owned(),
        }
    }
}

/// On-disk shape of a parser config file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParserConfigFile {
    keywords: KeywordConfig,
    calories: CalorieConfig,
    display: DisplayConfig,
}

/// Parser configuration resolved at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserConfig {
    keywords: KeywordConfig,
    calories: CalorieConfig,
    display: DisplayConfig,
}

impl ParserConfig {
    /// Create a new `ParserConfig`, normalising keywords to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `DietError::InvalidInput` if a keyword list is empty or holds a blank entry, if
    /// any bounds are inverted, or if `min_meal_matches` is zero.
    pub fn new(
        keywords: KeywordConfig,
        calories: CalorieConfig,
        display: DisplayConfig,
    ) -> DietResult<Self> {
        let keywords = KeywordConfig {
            breakfast: normalise_keywords("breakfast", keywords.breakfast)?,
            lunch: normalise_keywords("lunch", keywords.lunch)?,
            dinner: normalise_keywords("dinner", keywords.dinner)?,
            grand_total: normalise_keywords("grand_total", keywords.grand_total)?,
        };

        for (name, bounds) in [
            ("day_total", calories.day_total),
            ("meal_range", calories.meal_range),
            ("fallback_range", calories.fallback_range),
        ] {
            if bounds.lower >= bounds.upper {
                return Err(DietError::InvalidInput(format!(
                    "calories.{name}: lower bound {} must be below upper bound {}",
                    bounds.lower, bounds.upper
                )));
            }
        }

        if calories.min_meal_matches == 0 {
            return Err(DietError::InvalidInput(
                "calories.min_meal_matches must be at least 1".into(),
            ));
        }

        Ok(Self {
            keywords,
            calories,
            display,
        })
    }

    /// Parse a parser config from YAML text.
    ///
    /// Missing sections and fields fall back to the defaults. Unknown keys are rejected, and
    /// schema errors name the failing field path (e.g. `calories.day_total.lower`).
    ///
    /// # Errors
    ///
    /// Returns `DietError::ConfigParse` on malformed YAML or a schema mismatch, and
    /// `DietError::InvalidInput` if the values fail validation.
    pub fn from_yaml(yaml_text: &str) -> DietResult<Self> {
        if yaml_text.trim().is_empty() {
            return Ok(Self::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let file = match serde_path_to_error::deserialize::<_, ParserConfigFile>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(DietError::ConfigParse(format!(
                    "schema mismatch at {path}: {source}"
                )));
            }
        };

        Self::new(file.keywords, file.calories, file.display)
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    pub fn calories(&self) -> &CalorieConfig {
        &self.calories
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }
}

fn normalise_keywords(name: &str, words: Vec<String>) -> DietResult<Vec<String>> {
    if words.is_empty() {
        return Err(DietError::InvalidInput(format!(
            "keywords.{name} must list at least one keyword"
        )));
    }

    words
        .into_iter()
        .map(|word| {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                Err(DietError::InvalidInput(format!(
                    "keywords.{name} contains a blank keyword"
                )))
            } else {
                Ok(word)
            }
        })
        .collect()
}

/// Resolve the parser configuration.
///
/// With `path` set the file must exist and parse; otherwise the built-in defaults are used.
/// Binaries pass the value of `DIET_PARSER_CONFIG` here so that the environment is read once.
pub fn resolve_parser_config(path: Option<&Path>) -> DietResult<ParserConfig> {
    let Some(path) = path else {
        tracing::debug!("no parser config file given, using defaults");
        return Ok(ParserConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(DietError::ConfigRead)?;
    let cfg = ParserConfig::from_yaml(&text).inspect_err(|e| {
        tracing::warn!("rejected parser config {}: {}", path.display(), e);
    })?;

    tracing::info!("loaded parser config from {}", path.display());
    Ok(cfg)
}
