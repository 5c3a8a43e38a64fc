//! Structured dish lines: `- Name (portion) - 123 kcal`.
//!
//! This is the one line shape the generator is asked to produce for each dish. Lines that do not
//! match it exactly are commentary and are skipped, not reported.

use crate::constants::MIN_RECENT_DISH_NAME_CHARS;
use crate::{DietError, DietResult};
use diet_types::NonEmptyText;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DISH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?\s*(.+?)\s*\(([^()]+)\)\s*-\s*([0-9]+)\s*(?i:kcal)\s*$")
        .expect("dish line pattern should be valid")
});

/// One food item of a meal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DishEntryWire")]
pub struct DishEntry {
    name: NonEmptyText,
    portion: NonEmptyText,
    calories: u32,
}

#[derive(Deserialize)]
struct DishEntryWire {
    name: String,
    portion: String,
    calories: u32,
}

impl TryFrom<DishEntryWire> for DishEntry {
    type Error = DietError;

    fn try_from(wire: DishEntryWire) -> Result<Self, Self::Error> {
        DishEntry::new(wire.name, wire.portion, wire.calories)
    }
}

impl DishEntry {
    /// Creates a dish entry that renders to a line which parses back to itself.
    ///
    /// # Errors
    ///
    /// Returns `DietError::Text` if name or portion is blank, spans lines, or the portion holds
    /// a parenthesis; `DietError::InvalidInput` if the name leaves a parenthesis open.
    pub fn new(
        name: impl AsRef<str>,
        portion: impl AsRef<str>,
        calories: u32,
    ) -> DietResult<Self> {
        let name = NonEmptyText::single_line(name, &[])?;
        let portion = NonEmptyText::single_line(portion, &['(', ')'])?;

        if has_unclosed_paren(name.as_str()) {
            return Err(DietError::InvalidInput(format!(
                "dish name '{name}' has an unclosed parenthesis"
            )));
        }

        Ok(Self {
            name,
            portion,
            calories,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn portion(&self) -> &str {
        self.portion.as_str()
    }

    pub fn calories(&self) -> u32 {
        self.calories
    }
}

impl std::fmt::Display for DishEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "- {} ({}) - {} kcal", self.name, self.portion, self.calories)
    }
}

fn has_unclosed_paren(text: &str) -> bool {
    match text.rfind('(') {
        Some(open) => !text[open..].contains(')'),
        None => false,
    }
}

/// Parses one line, or `None` if it is not a dish line.
pub fn parse_dish_line(line: &str) -> Option<DishEntry> {
    let caps = DISH_LINE.captures(line)?;
    let calories = caps[3].parse().ok()?;
    DishEntry::new(&caps[1], &caps[2], calories).ok()
}

/// Extracts dish entries from a meal's plain text, in line order.
pub fn parse_dishes(text: &str) -> Vec<DishEntry> {
    text.lines().filter_map(parse_dish_line).collect()
}

/// Renders entries back to dish lines joined by newlines.
pub fn render_dishes(entries: &[DishEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn total_calories(entries: &[DishEntry]) -> u32 {
    entries
        .iter()
        .fold(0u32, |sum, dish| sum.saturating_add(dish.calories))
}

/// Names of the dishes listed in a past menu.
///
/// Looser than [`parse_dishes`]: any bullet line mentioning `kcal` counts, and the name is
/// whatever precedes the first parenthesis with dashes removed. Very short names are dropped.
pub fn recent_dish_names(menu_text: &str) -> Vec<String> {
    menu_text
        .lines()
        .filter(|line| line.trim().starts_with('-') && line.to_lowercase().contains("kcal"))
        .filter_map(|line| {
            let head = line.split('(').next().unwrap_or_default();
            let name = head.replace('-', "");
            let name = name.trim();
            (name.chars().count() >= MIN_RECENT_DISH_NAME_CHARS).then(|| name.to_owned())
        })
        .collect()
}
