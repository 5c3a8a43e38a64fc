//! Editing state for one meal.
//!
//! Opening a meal turns its rendered fragment into dish rows. The rows are plain client-side
//! state until [`MealEditor::submit`] serialises them back into dish lines and a total; dropping
//! the editor discards the changes.

use crate::dishes::{parse_dishes, render_dishes, total_calories, DishEntry};
use crate::markup::fragment_to_plain_text;
use crate::sections::Meal;
use crate::{DietError, DietResult};
use serde::Serialize;

/// The text and total handed to the menu store when an edited meal is saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MealSubmission {
    pub meal: Meal,
    pub content: String,
    pub total_calories: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealEditor {
    meal: Meal,
    dishes: Vec<DishEntry>,
}

impl MealEditor {
    /// Opens a meal from its rendered fragment. Commentary lines are not editable and are
    /// dropped.
    pub fn open(meal: Meal, fragment: &str) -> Self {
        let dishes = parse_dishes(&fragment_to_plain_text(fragment));
        tracing::debug!("opened {meal} with {} dish rows", dishes.len());
        Self { meal, dishes }
    }

    pub fn with_dishes(meal: Meal, dishes: Vec<DishEntry>) -> Self {
        Self { meal, dishes }
    }

    pub fn meal(&self) -> Meal {
        self.meal
    }

    pub fn dishes(&self) -> &[DishEntry] {
        &self.dishes
    }

    pub fn add(&mut self, dish: DishEntry) {
        self.dishes.push(dish);
    }

    /// # Errors
    ///
    /// Returns `DietError::InvalidInput` if `index` is past the last row.
    pub fn update(&mut self, index: usize, dish: DishEntry) -> DietResult<()> {
        let len = self.dishes.len();
        let slot = self
            .dishes
            .get_mut(index)
            .ok_or_else(|| row_out_of_range(index, len))?;
        *slot = dish;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DietError::InvalidInput` if `index` is past the last row.
    pub fn remove(&mut self, index: usize) -> DietResult<DishEntry> {
        if index >= self.dishes.len() {
            return Err(row_out_of_range(index, self.dishes.len()));
        }
        Ok(self.dishes.remove(index))
    }

    pub fn total_calories(&self) -> u32 {
        total_calories(&self.dishes)
    }

    /// Serialises the rows for saving.
    ///
    /// # Errors
    ///
    /// Returns `DietError::InvalidInput` if every row was removed.
    pub fn submit(self) -> DietResult<MealSubmission> {
        if self.dishes.is_empty() {
            return Err(DietError::InvalidInput(format!(
                "{} needs at least one dish",
                self.meal
            )));
        }

        Ok(MealSubmission {
            meal: self.meal,
            content: render_dishes(&self.dishes),
            total_calories: self.total_calories(),
        })
    }
}

fn row_out_of_range(index: usize, len: usize) -> DietError {
    DietError::InvalidInput(format!("dish row {index} out of range (meal has {len} rows)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::sections::parse_sections;

    fn dish(name: &str, portion: &str, calories: u32) -> DishEntry {
        DishEntry::new(name, portion, calories).unwrap()
    }

    #[test]
    fn test_open_from_parsed_section() {
        let raw = "Bữa trưa\n- **Cơm gà** (1 đĩa) - 650 kcal\nNhiều rau xanh\n- Canh bí (1 bát) - 40 kcal";
        let sections = parse_sections(raw, &ParserConfig::default());

        let editor = MealEditor::open(Meal::Lunch, &sections.lunch);
        assert_eq!(
            editor.dishes(),
            &[dish("Cơm gà", "1 đĩa", 650), dish("Canh bí", "1 bát", 40)]
        );
        assert_eq!(editor.total_calories(), 690);
    }

    #[test]
    fn test_edit_and_submit() {
        let mut editor = MealEditor::with_dishes(
            Meal::Dinner,
            vec![dish("Cá kho", "1 khúc", 300), dish("Cơm", "1 bát", 200)],
        );
        editor.update(1, dish("Cơm gạo lứt", "1 bát", 180)).unwrap();
        editor.add(dish("Rau luộc", "200 g", 50));
        let removed = editor.remove(0).unwrap();
        assert_eq!(removed.name(), "Cá kho");

        let submission = editor.submit().unwrap();
        assert_eq!(submission.meal, Meal::Dinner);
        assert_eq!(
            submission.content,
            "- Cơm gạo lứt (1 bát) - 180 kcal\n- Rau luộc (200 g) - 50 kcal"
        );
        assert_eq!(submission.total_calories, 230);
    }

    #[test]
    fn test_out_of_range_rows() {
        let mut editor = MealEditor::with_dishes(Meal::Breakfast, vec![dish("a", "b", 1)]);
        assert!(editor.update(1, dish("c", "d", 2)).is_err());
        assert!(editor.remove(5).is_err());
        assert_eq!(editor.dishes().len(), 1);
    }

    #[test]
    fn test_submit_rejects_empty_meal() {
        let editor = MealEditor::open(Meal::Breakfast, "");
        let err = editor.submit().unwrap_err();
        assert!(matches!(err, DietError::InvalidInput(msg) if msg.contains("breakfast")));
    }
}
