// src/core/types.rs
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a recipe as persisted by the preference records.
/// The datasets use numbers; the stored records always use their decimal text.
pub type RecipeId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for Day {
    type Err = UnknownName;

    /// Case-insensitive; accepts the full English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl FromStr for MealSlot {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// The three meal cells of one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(rename = "Breakfast", default)]
    pub breakfast: Option<RecipeId>,
    #[serde(rename = "Lunch", default)]
    pub lunch: Option<RecipeId>,
    #[serde(rename = "Dinner", default)]
    pub dinner: Option<RecipeId>,
}

impl DayMeals {
    pub fn get(&self, slot: MealSlot) -> Option<&RecipeId> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set(&mut self, slot: MealSlot, recipe: Option<RecipeId>) {
        let cell = match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        };
        *cell = recipe;
    }
}

/// Weekly plan: every day and every slot is always present.
///
/// Persisted as `{"Monday": {"Breakfast": null, "Lunch": "12", ...}, ...}`.
/// Days missing from stored JSON come back empty; an unknown day name makes
/// the whole value unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<Day, DayMeals>")]
pub struct MealPlan {
    days: BTreeMap<Day, DayMeals>,
}

impl MealPlan {
    /// All 21 cells empty.
    pub fn empty() -> Self {
        Self {
            days: Day::ALL.into_iter().map(|d| (d, DayMeals::default())).collect(),
        }
    }

    pub fn day(&self, day: Day) -> &DayMeals {
        // Every day is inserted at construction and never removed.
        &self.days[&day]
    }

    pub fn get(&self, day: Day, slot: MealSlot) -> Option<&RecipeId> {
        self.day(day).get(slot)
    }

    pub fn set(&mut self, day: Day, slot: MealSlot, recipe: Option<RecipeId>) {
        self.days.entry(day).or_default().set(slot, recipe);
    }

    /// Iterates the grid in calendar order, breakfast to dinner.
    pub fn cells(&self) -> impl Iterator<Item = (Day, MealSlot, Option<&RecipeId>)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            MealSlot::ALL
                .into_iter()
                .map(move |slot| (day, slot, self.get(day, slot)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells().all(|(_, _, cell)| cell.is_none())
    }
}

impl Default for MealPlan {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<Day, DayMeals>> for MealPlan {
    fn from(mut days: BTreeMap<Day, DayMeals>) -> Self {
        for day in Day::ALL {
            days.entry(day).or_default();
        }
        Self { days }
    }
}

impl Serialize for MealPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_serializes_as_full_null_grid() {
        let json = serde_json::to_value(MealPlan::empty()).unwrap();
        let days = json.as_object().unwrap();
        assert_eq!(days.len(), 7);
        for day in Day::ALL {
            let meals = days[day.as_str()].as_object().unwrap();
            assert_eq!(meals.len(), 3);
            assert!(meals.values().all(|v| v.is_null()));
        }
    }

    #[test]
    fn partial_plan_is_filled_in() {
        let plan: MealPlan =
            serde_json::from_str(r#"{"Friday": {"Dinner": "4"}}"#).unwrap();
        assert_eq!(plan.get(Day::Friday, MealSlot::Dinner).map(String::as_str), Some("4"));
        assert_eq!(plan.get(Day::Friday, MealSlot::Lunch), None);
        assert_eq!(plan.cells().count(), 21);
    }

    #[test]
    fn unknown_day_is_rejected() {
        assert!(serde_json::from_str::<MealPlan>(r#"{"Funday": {}}"#).is_err());
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("monday".parse::<Day>(), Ok(Day::Monday));
        assert_eq!("DINNER".parse::<MealSlot>(), Ok(MealSlot::Dinner));
        assert!("brunch".parse::<MealSlot>().is_err());
    }
}
