// File: src/app.rs
use crate::catalog::{Catalog, Recipe};
use crate::core::prefs::{PreferenceStore, ResetScope};
use crate::core::types::{Day, MealSlot};
use crate::persistence::KeyValueStore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Sayings on eating shown on the home screen, one per day.
pub const QUOTES: [&str; 4] = [
    "\"Eat of what is lawful and good on earth.\" - Quran 2:168",
    "\"The believer eats in one intestine, whereas the disbeliever eats in seven intestines.\" - Sahih Bukhari",
    "\"Eat together and not separately, for the blessing is associated with the company.\" - Ibn Majah",
    "\"He is not a believer who eats his fill while his neighbor beside him goes hungry.\" - Al-Adab Al-Mufrad",
];

/// The quote for a day counted from the Unix epoch.
pub fn quote_for_day(day: u64) -> &'static str {
    QUOTES[(day % QUOTES.len() as u64) as usize]
}

/// Today's quote (UTC). A clock before 1970 falls back to the first one.
pub fn quote_of_the_day() -> &'static str {
    let day = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() / 86_400)
        .unwrap_or(0);
    quote_for_day(day)
}

/// Where the app lands after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Onboarding,
    Home,
}

/// One cell of the meal planner with its recipe resolved to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMeal<'a> {
    pub day: Day,
    pub slot: MealSlot,
    pub recipe_id: Option<String>,
    pub recipe_name: Option<&'a str>,
}

/// Catalog plus preference store, handed explicitly to every consumer.
pub struct App<S: KeyValueStore> {
    pub catalog: Catalog,
    pub prefs: PreferenceStore<S>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(catalog: Catalog, prefs: PreferenceStore<S>) -> Self {
        Self { catalog, prefs }
    }

    pub fn start_route(&self) -> Route {
        if self.prefs.is_onboarding_complete() {
            Route::Home
        } else {
            Route::Onboarding
        }
    }

    pub fn complete_onboarding(&mut self) -> bool {
        self.prefs.set_onboarding_complete(true)
    }

    pub fn favorite_recipes(&self) -> Vec<&Recipe> {
        self.catalog.favorite_recipes(&self.prefs.favorites())
    }

    /// The full 21-cell grid in calendar order.
    pub fn meal_plan_view(&mut self) -> Vec<PlannedMeal<'_>> {
        let plan = self.prefs.load_meal_plan();
        let catalog = &self.catalog;
        plan.cells()
            .map(|(day, slot, id)| PlannedMeal {
                day,
                slot,
                recipe_id: id.cloned(),
                recipe_name: id.map(|id| catalog.recipe_name(id)),
            })
            .collect()
    }

    /// Performs the reset and returns the screen to show next, if it changes.
    pub fn reset(&mut self, scope: ResetScope) -> (bool, Option<Route>) {
        let ok = self.prefs.reset(scope);
        let route = match scope {
            ResetScope::Onboarding | ResetScope::All => Some(Route::Onboarding),
            ResetScope::Favorites | ResetScope::MealPlan => None,
        };
        (ok, route)
    }
}
