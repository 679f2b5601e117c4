// File: src/recipe.rs
use crate::catalog::{Ingredient, Recipe};

/// Serving count used when a recipe records none.
pub const DEFAULT_SERVINGS: u32 = 4;

fn base_servings(recipe: &Recipe) -> u32 {
    if recipe.servings == 0 {
        DEFAULT_SERVINGS
    } else {
        recipe.servings
    }
}

/// Amount for `servings` people of an ingredient written for `base` people.
pub fn scaled_amount(amount: f64, base: u32, servings: u32) -> f64 {
    let base = if base == 0 { DEFAULT_SERVINGS } else { base };
    amount * f64::from(servings) / f64::from(base)
}

/// One decimal place, with a trailing `.0` dropped: `2.5`, `3`, `0.3`.
pub fn format_amount(amount: f64) -> String {
    let text = format!("{amount:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Serving adjuster of the recipe page. Never goes below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings {
    base: u32,
    current: u32,
}

impl Servings {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        let base = base_servings(recipe);
        Self { base, current: base }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Applies `delta` unless the result would drop below one.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.current) + i64::from(delta);
        if next >= 1 {
            self.current = u32::try_from(next).unwrap_or(u32::MAX);
        }
        self.current
    }

    pub fn set(&mut self, servings: u32) {
        self.current = servings.max(1);
    }

    pub fn amount_for(&self, ingredient: &Ingredient) -> String {
        format_amount(scaled_amount(ingredient.amount, self.base, self.current))
    }

    /// `"<amount> <unit> <name>"` lines for the current serving count.
    pub fn ingredient_lines(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients
            .iter()
            .map(|i| {
                let amount = self.amount_for(i);
                if i.unit.is_empty() {
                    format!("{amount} {}", i.name)
                } else {
                    format!("{amount} {} {}", i.unit, i.name)
                }
            })
            .collect()
    }
}

/// Step-by-step view over a recipe's instructions.
#[derive(Debug, Clone)]
pub struct CookingMode<'a> {
    steps: &'a [String],
    current: usize,
}

impl<'a> CookingMode<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self {
            steps: &recipe.instructions,
            current: 0,
        }
    }

    /// True when the recipe has no instructions to walk through.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&'a str> {
        self.steps.get(self.current).map(String::as_str)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Moves forward; returns false on the last step.
    pub fn next_step(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn previous_step(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Leaves cooking mode; the next session starts from the first step.
    pub fn finish(&mut self) {
        self.current = 0;
    }

    pub fn progress(&self) -> String {
        if self.is_empty() {
            return "No steps".to_string();
        }
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            id: 9,
            name: "Talbina".to_string(),
            description: String::new(),
            image: "barley.png".to_string(),
            prep_time: 20,
            servings: 2,
            categories: vec!["Sunnah".to_string()],
            ingredients: vec![
                Ingredient { amount: 2.0, unit: "tbsp".to_string(), name: "barley flour".to_string() },
                Ingredient { amount: 1.0, unit: String::new(), name: "egg".to_string() },
            ],
            instructions: vec!["Whisk".to_string(), "Simmer".to_string(), "Serve".to_string()],
        }
    }

    #[test]
    fn amounts_format_like_the_recipe_page() {
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(1.0 / 3.0), "0.3");
        assert_eq!(format_amount(scaled_amount(1.5, 6, 4)), "1");
    }

    #[test]
    fn servings_never_drop_below_one() {
        let mut servings = Servings::for_recipe(&sample());
        assert_eq!(servings.current(), 2);
        assert_eq!(servings.adjust(-1), 1);
        assert_eq!(servings.adjust(-1), 1);
        assert_eq!(servings.adjust(3), 4);
        assert_eq!(servings.ingredient_lines(&sample()), vec!["4 tbsp barley flour", "2 egg"]);
    }

    #[test]
    fn zero_servings_defaults_to_four() {
        let mut recipe = sample();
        recipe.servings = 0;
        assert_eq!(Servings::for_recipe(&recipe).current(), DEFAULT_SERVINGS);
    }

    #[test]
    fn cooking_mode_walks_steps() {
        let recipe = sample();
        let mut mode = CookingMode::new(&recipe);
        assert!(!mode.previous_step());
        assert_eq!(mode.progress(), "Step 1 of 3");
        assert!(mode.next_step());
        assert!(mode.next_step());
        assert!(mode.is_last());
        assert!(!mode.next_step());
        assert_eq!(mode.current_step(), Some("Serve"));
        mode.finish();
        assert_eq!(mode.step_index(), 0);
    }

    #[test]
    fn cooking_mode_without_instructions() {
        let recipe = Recipe {
            instructions: Vec::new(),
            ..sample()
        };
        let mut mode = CookingMode::new(&recipe);
        assert!(mode.is_empty());
        assert_eq!(mode.progress(), "No steps");
        assert_eq!(mode.current_step(), None);
        assert!(!mode.next_step());
        assert!(!mode.previous_step());
        assert_eq!(mode.step_index(), 0);
    }
}
