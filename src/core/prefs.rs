// File: src/core/prefs.rs
use crate::core::types::{Day, MealPlan, MealSlot, RecipeId};
use crate::error::StorageError;
use crate::persistence::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub const ONBOARDING_KEY: &str = "onboardingComplete";
pub const FAVORITES_KEY: &str = "favorites";
pub const MEAL_PLAN_KEY: &str = "mealPlan";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Which storage call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Decode,
    Encode,
    Write,
    Remove,
    Clear,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::Read => "read",
            StoreOp::Decode => "decode",
            StoreOp::Encode => "encode",
            StoreOp::Write => "write",
            StoreOp::Remove => "remove",
            StoreOp::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// A failure the store masked. Handed to the error hook, if one is installed.
#[derive(Debug)]
pub struct StoreFailure<'a> {
    pub op: StoreOp,
    /// `None` for [`StoreOp::Clear`].
    pub key: Option<&'a str>,
    pub error: &'a StorageError,
}

pub type ErrorHook = Box<dyn Fn(&StoreFailure<'_>) + Send + Sync>;

/// What a settings reset wipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    Onboarding,
    Favorites,
    MealPlan,
    /// Clears the whole backing store, not only the four known records.
    All,
}

/// Typed, fail-soft access to the user-state records.
///
/// Reads never fail: absent keys, I/O errors and unreadable JSON all yield the
/// caller's default. Writes report success as a `bool` and leave the previously
/// persisted value untouched on failure.
pub struct PreferenceStore<S: KeyValueStore> {
    backend: S,
    error_hook: Option<ErrorHook>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            error_hook: None,
        }
    }

    /// Installs a callback that sees every masked failure. Return values are
    /// unaffected.
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StoreFailure<'_>) + Send + Sync + 'static,
    {
        self.error_hook = Some(Box::new(hook));
        self
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn report(&self, op: StoreOp, key: Option<&str>, error: &StorageError) {
        let shown_key = key.unwrap_or("*");
        match op {
            StoreOp::Read | StoreOp::Decode => {
                log::warn!("Error getting item {shown_key} from storage ({op}): {error}")
            }
            _ => log::error!("Error updating item {shown_key} in storage ({op}): {error}"),
        }
        if let Some(hook) = &self.error_hook {
            hook(&StoreFailure { op, key, error });
        }
    }

    // --- Generic record access ---

    /// Stored value for `key`, or `default` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.try_get(key).unwrap_or(default)
    }

    /// `None` both when the key is absent and when it could not be read.
    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                self.report(StoreOp::Read, Some(key), &e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(StoreOp::Decode, Some(key), &StorageError::from(e));
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.report(StoreOp::Encode, Some(key), &StorageError::from(e));
                return false;
            }
        };
        match self.backend.set_item(key, &raw) {
            Ok(()) => {
                log::debug!("stored {key} ({} bytes)", raw.len());
                true
            }
            Err(e) => {
                self.report(StoreOp::Write, Some(key), &e);
                false
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                self.report(StoreOp::Remove, Some(key), &e);
                false
            }
        }
    }

    pub fn clear_all(&mut self) -> bool {
        match self.backend.clear() {
            Ok(()) => {
                log::debug!("cleared storage");
                true
            }
            Err(e) => {
                self.report(StoreOp::Clear, None, &e);
                false
            }
        }
    }

    // --- Onboarding ---

    pub fn is_onboarding_complete(&self) -> bool {
        self.get(ONBOARDING_KEY, false)
    }

    pub fn set_onboarding_complete(&mut self, complete: bool) -> bool {
        self.set(ONBOARDING_KEY, &complete)
    }

    // --- Favorites ---

    pub fn favorites(&self) -> Vec<RecipeId> {
        self.get(FAVORITES_KEY, Vec::new())
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites().iter().any(|id| id == recipe_id)
    }

    /// Appends `recipe_id` unless it is already present. Already present
    /// counts as success and writes nothing.
    pub fn add_favorite(&mut self, recipe_id: &str) -> bool {
        let mut favorites = self.favorites();
        if favorites.iter().any(|id| id == recipe_id) {
            return true;
        }
        favorites.push(recipe_id.to_string());
        self.set(FAVORITES_KEY, &favorites)
    }

    pub fn remove_favorite(&mut self, recipe_id: &str) -> bool {
        let mut favorites = self.favorites();
        favorites.retain(|id| id != recipe_id);
        self.set(FAVORITES_KEY, &favorites)
    }

    /// Flips membership of `recipe_id`. Returns the new membership, or `None`
    /// when the change could not be persisted.
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> Option<bool> {
        let mut favorites = self.favorites();
        let was_favorite = favorites.iter().any(|id| id == recipe_id);
        if was_favorite {
            favorites.retain(|id| id != recipe_id);
        } else {
            favorites.push(recipe_id.to_string());
        }
        self.set(FAVORITES_KEY, &favorites).then_some(!was_favorite)
    }

    // --- Theme ---

    pub fn is_dark_mode(&self) -> bool {
        self.get(DARK_MODE_KEY, false)
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> bool {
        self.set(DARK_MODE_KEY, &dark)
    }

    /// Returns the new mode, or `None` when it could not be persisted.
    pub fn toggle_dark_mode(&mut self) -> Option<bool> {
        let dark = !self.is_dark_mode();
        self.set_dark_mode(dark).then_some(dark)
    }

    // --- Meal plan ---

    pub fn meal_plan(&self) -> MealPlan {
        self.get(MEAL_PLAN_KEY, MealPlan::empty())
    }

    /// Like [`meal_plan`](Self::meal_plan), but on first run also persists the
    /// empty grid so the record exists from then on.
    pub fn load_meal_plan(&mut self) -> MealPlan {
        let absent = matches!(self.backend.get_item(MEAL_PLAN_KEY), Ok(None));
        if absent {
            let plan = MealPlan::empty();
            self.set(MEAL_PLAN_KEY, &plan);
            return plan;
        }
        self.meal_plan()
    }

    pub fn set_meal_plan(&mut self, plan: &MealPlan) -> bool {
        self.set(MEAL_PLAN_KEY, plan)
    }

    /// Rewrites the whole grid with one cell changed.
    pub fn set_meal(&mut self, day: Day, slot: MealSlot, recipe_id: &str) -> bool {
        let mut plan = self.meal_plan();
        plan.set(day, slot, Some(recipe_id.to_string()));
        self.set_meal_plan(&plan)
    }

    pub fn clear_meal(&mut self, day: Day, slot: MealSlot) -> bool {
        let mut plan = self.meal_plan();
        plan.set(day, slot, None);
        self.set_meal_plan(&plan)
    }

    pub fn reset_meal_plan(&mut self) -> bool {
        self.set_meal_plan(&MealPlan::empty())
    }

    // --- Resets ---

    pub fn reset(&mut self, scope: ResetScope) -> bool {
        log::info!("resetting {scope:?}");
        match scope {
            ResetScope::Onboarding => self.set_onboarding_complete(false),
            ResetScope::Favorites => self.set(FAVORITES_KEY, &Vec::<RecipeId>::new()),
            ResetScope::MealPlan => self.reset_meal_plan(),
            ResetScope::All => self.clear_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::sync::{Arc, Mutex};

    /// Backend whose reads and writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                return Err(StorageError::Unavailable("reads disabled".into()));
            }
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.remove_item(key)
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.clear()
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            self.inner.keys()
        }
    }

    fn store() -> PreferenceStore<MemoryStore> {
        PreferenceStore::new(MemoryStore::new())
    }

    #[test]
    fn defaults_on_first_run() {
        let prefs = store();
        assert!(!prefs.is_onboarding_complete());
        assert!(!prefs.is_dark_mode());
        assert!(prefs.favorites().is_empty());
        assert!(prefs.meal_plan().is_empty());
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let mut prefs = PreferenceStore::new(FlakyStore::default());
        assert!(prefs.set_dark_mode(true));

        prefs.backend.fail_writes = true;
        assert!(!prefs.set_dark_mode(false));
        assert!(prefs.is_dark_mode());
        assert_eq!(prefs.toggle_favorite("1"), None);
        assert!(!prefs.is_favorite("1"));
    }

    #[test]
    fn failed_set_leaves_default() {
        let mut prefs = PreferenceStore::new(FlakyStore {
            fail_writes: true,
            ..Default::default()
        });
        assert!(!prefs.set(FAVORITES_KEY, &vec!["9".to_string()]));
        assert_eq!(prefs.get(FAVORITES_KEY, vec!["default".to_string()]), vec!["default"]);
    }

    #[test]
    fn read_failure_falls_back_and_reaches_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut prefs = PreferenceStore::new(FlakyStore::default()).with_error_hook(move |f| {
            sink.lock()
                .unwrap()
                .push((f.op, f.key.map(str::to_string)));
        });
        prefs.set_onboarding_complete(true);
        prefs.backend.fail_reads = true;

        assert!(!prefs.is_onboarding_complete());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(StoreOp::Read, Some(ONBOARDING_KEY.to_string()))]
        );
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let mut prefs = store();
        prefs.backend.set_item(MEAL_PLAN_KEY, "[1, 2, 3]").unwrap();
        prefs.backend.set_item(DARK_MODE_KEY, "yes please").unwrap();

        assert_eq!(prefs.meal_plan(), MealPlan::empty());
        assert!(!prefs.is_dark_mode());
    }

    #[test]
    fn legacy_string_flags_read_as_booleans() {
        // Older builds wrote the flags with toString(), which is still valid JSON.
        let mut prefs = store();
        prefs.backend.set_item(ONBOARDING_KEY, "true").unwrap();
        prefs.backend.set_item(DARK_MODE_KEY, "false").unwrap();
        assert!(prefs.is_onboarding_complete());
        assert!(!prefs.is_dark_mode());
    }

    #[test]
    fn favorites_scenario() {
        let mut prefs = store();
        assert!(prefs.add_favorite("3"));
        assert_eq!(prefs.favorites(), vec!["3"]);
        assert_eq!(prefs.backend.get_item(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["3"]"#));

        assert!(prefs.add_favorite("3"));
        assert_eq!(prefs.favorites(), vec!["3"]);

        assert!(prefs.remove_favorite("3"));
        assert!(prefs.favorites().is_empty());
    }

    #[test]
    fn add_then_remove_restores_prior_set() {
        let mut prefs = store();
        prefs.add_favorite("1");
        prefs.add_favorite("5");
        let before = prefs.favorites();

        prefs.add_favorite("7");
        prefs.add_favorite("7");
        prefs.remove_favorite("7");

        let mut after = prefs.favorites();
        after.sort();
        let mut expected = before;
        expected.sort();
        assert_eq!(after, expected);
    }

    #[test]
    fn toggle_reports_new_membership() {
        let mut prefs = store();
        assert_eq!(prefs.toggle_favorite("2"), Some(true));
        assert!(prefs.is_favorite("2"));
        assert_eq!(prefs.toggle_favorite("2"), Some(false));
        assert!(!prefs.is_favorite("2"));
    }

    #[test]
    fn meal_cell_scenario() {
        let mut prefs = store();
        assert_eq!(prefs.meal_plan().get(Day::Monday, MealSlot::Lunch), None);

        assert!(prefs.set_meal(Day::Monday, MealSlot::Lunch, "12"));
        let plan = prefs.meal_plan();
        for (day, slot, cell) in plan.cells() {
            if (day, slot) == (Day::Monday, MealSlot::Lunch) {
                assert_eq!(cell.map(String::as_str), Some("12"));
            } else {
                assert_eq!(cell, None, "{day} {slot} changed");
            }
        }

        assert!(prefs.reset(ResetScope::All));
        assert!(prefs.meal_plan().is_empty());
    }

    #[test]
    fn load_meal_plan_persists_on_first_run() {
        let mut prefs = store();
        assert_eq!(prefs.backend.get_item(MEAL_PLAN_KEY).unwrap(), None);
        assert!(prefs.load_meal_plan().is_empty());
        assert!(prefs.backend.get_item(MEAL_PLAN_KEY).unwrap().is_some());

        prefs.set_meal(Day::Sunday, MealSlot::Dinner, "4");
        assert_eq!(
            prefs.load_meal_plan().get(Day::Sunday, MealSlot::Dinner).map(String::as_str),
            Some("4")
        );
    }

    #[test]
    fn scoped_resets_touch_one_record() {
        let mut prefs = store();
        prefs.set_onboarding_complete(true);
        prefs.set_dark_mode(true);
        prefs.add_favorite("1");
        prefs.set_meal(Day::Friday, MealSlot::Breakfast, "1");

        assert!(prefs.reset(ResetScope::Favorites));
        assert!(prefs.favorites().is_empty());
        assert!(prefs.is_onboarding_complete());

        assert!(prefs.reset(ResetScope::MealPlan));
        assert!(prefs.meal_plan().is_empty());
        assert!(prefs.is_dark_mode());

        assert!(prefs.reset(ResetScope::Onboarding));
        assert!(!prefs.is_onboarding_complete());
        assert!(prefs.is_dark_mode());
    }

    #[test]
    fn remove_drops_one_record() {
        let mut prefs = store();
        prefs.set_dark_mode(true);
        prefs.add_favorite("6");

        assert!(prefs.remove(DARK_MODE_KEY));
        assert!(!prefs.is_dark_mode());
        assert_eq!(prefs.favorites(), vec!["6"]);

        let backend = prefs.into_backend();
        assert_eq!(backend.keys().unwrap(), vec![FAVORITES_KEY.to_string()]);
    }

    #[test]
    fn reset_all_clears_foreign_keys() {
        let mut prefs = store();
        prefs.set("lastVisited", &"glossary");
        prefs.set_dark_mode(true);

        assert!(prefs.reset(ResetScope::All));
        assert!(prefs.backend.keys().unwrap().is_empty());
        assert!(!prefs.is_dark_mode());
    }
}
