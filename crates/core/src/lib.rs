//! # Diet Core
//!
//! Interpretation of generated menu text plus the small domain calculations around it:
//! - Splitting raw menu text into breakfast, lunch and dinner fragments
//! - Estimating the day's calories from whatever figures the text contains
//! - Parsing and rendering editable dish lines
//! - Target calories, generation prompts and weight summaries
//!
//! Everything here is synchronous and free of I/O apart from loading the parser configuration
//! file at startup.
//!
//! **No API concerns**: HTTP servers and request/response types belong in `api-rest` and
//! `api-shared`.

pub mod calories;
pub mod config;
pub mod constants;
pub mod dishes;
pub mod editor;
pub mod error;
pub mod markup;
pub mod nutrition;
pub mod prompt;
pub mod sections;
pub mod view;
pub mod weight;

pub use calories::{CalorieEstimate, Tier, TierMatch};
pub use config::{resolve_parser_config, ParserConfig};
pub use dishes::DishEntry;
pub use editor::{MealEditor, MealSubmission};
pub use error::{DietError, DietResult};
pub use sections::{Meal, MealSections};
pub use view::MenuView;

use std::sync::Arc;

/// Menu parsing bound to one resolved configuration.
#[derive(Clone, Debug, Default)]
pub struct MenuService {
    cfg: Arc<ParserConfig>,
}

impl MenuService {
    /// Creates a new `MenuService`.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Parser configuration resolved at startup.
    pub fn new(cfg: Arc<ParserConfig>) -> Self {
        Self { cfg }
    }

    /// Configuration this service was built with.
    pub fn config(&self) -> &ParserConfig {
        &self.cfg
    }

    /// Splits raw menu text into breakfast, lunch and dinner fragments.
    pub fn sections(&self, raw: &str) -> MealSections {
        sections::parse_sections(raw, &self.cfg)
    }

    /// Daily calorie estimate, or `Unknown` when nothing plausible is found.
    pub fn calories(&self, raw: &str) -> CalorieEstimate {
        calories::extract_calories(raw, &self.cfg)
    }

    /// Like [`MenuService::calories`], also naming the tier that produced the figure.
    pub fn calories_with_tier(&self, raw: &str) -> Option<TierMatch> {
        calories::extract_calories_with_tier(raw, &self.cfg)
    }

    /// Display-ready view of a menu. A positive `stored_calories` wins over extraction.
    pub fn view(&self, raw: &str, stored_calories: Option<u32>) -> MenuView {
        MenuView::build(raw, stored_calories, &self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = "**Bữa sáng**\n- Phở bò (1 tô) - 450 kcal\n\n**Bữa trưa**\n- Cơm gà (1 đĩa) - 650 kcal\n\n**Bữa tối**\n- Cá kho (150g) - 400 kcal\n\n**Tổng calo: 1500 kcal**";

    #[test]
    fn test_menu_service_uses_shared_config() {
        let service = MenuService::new(Arc::new(ParserConfig::default()));

        let sections = service.sections(MENU);
        assert!(sections.get(Meal::Lunch).contains("Cơm gà"));
        assert_eq!(service.calories(MENU), CalorieEstimate::Known(1500));
        assert_eq!(
            service.calories_with_tier(MENU).map(|m| m.tier),
            Some(Tier::GrandTotal)
        );
        assert_eq!(service.view(MENU, Some(1800)).calories, Some(1800));
    }
}
