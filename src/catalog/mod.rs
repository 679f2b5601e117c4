// File: src/catalog/mod.rs
//! Read-only reference content: recipes, glossary terms, sunnah foods and
//! halal tips. Loaded once, never mutated.

pub mod search;

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use search::RecipeFilter;

pub const RECIPES_FILE: &str = "recipes.json";
pub const GLOSSARY_FILE: &str = "glossary.json";
pub const SUNNAH_FOODS_FILE: &str = "sunnah_foods.json";
pub const HALAL_TIPS_FILE: &str = "halal_tips.json";

/// Category that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered by the recipe browser, sentinel first.
pub const RECIPE_CATEGORIES: [&str; 6] = [ALL_CATEGORIES, "Main Dish", "Appetizer", "Dessert", "Sunnah", "Eid"];

/// Shown for meal-plan cells whose id no longer resolves.
pub const UNKNOWN_RECIPE: &str = "Unknown Recipe";

const FALLBACK_IMAGE: &str = "dates.png";
const BUNDLED_IMAGES: [&str; 8] = [
    "dates.png",
    "honey.png",
    "olive.png",
    "figs.png",
    "pomegranate.png",
    "barley.png",
    "blackseed.png",
    "placeholder.png",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub amount: f64,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Minutes.
    pub prep_time: u32,
    pub servings: u32,
    pub categories: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// The id as the preference records store it.
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub term: String,
    pub arabic_term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedRecipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunnahFood {
    pub id: u32,
    pub name: String,
    pub arabic_name: String,
    pub image: String,
    pub reference: String,
    pub benefits: String,
    #[serde(default)]
    pub related_recipes: Vec<RelatedRecipe>,
}

impl SunnahFood {
    pub fn related_recipe_names(&self) -> Vec<&str> {
        self.related_recipes.iter().map(|r| r.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalalTip {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub hadith: Option<String>,
}

/// Raw JSON text of each dataset.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    pub recipes: &'a str,
    pub glossary: &'a str,
    pub sunnah_foods: &'a str,
    pub halal_tips: &'a str,
}

/// The datasets compiled into the crate.
pub const BUNDLED: Sources<'static> = Sources {
    recipes: include_str!("../../data/recipes.json"),
    glossary: include_str!("../../data/glossary.json"),
    sunnah_foods: include_str!("../../data/sunnah_foods.json"),
    halal_tips: include_str!("../../data/halal_tips.json"),
};

/// Immutable snapshot of all reference content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    glossary: Vec<GlossaryTerm>,
    sunnah_foods: Vec<SunnahFood>,
    halal_tips: Vec<HalalTip>,
}

fn parse<T: for<'de> Deserialize<'de>>(name: &str, json: &str) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        name: name.to_string(),
        source,
    })
}

impl Catalog {
    pub fn new(
        recipes: Vec<Recipe>,
        glossary: Vec<GlossaryTerm>,
        sunnah_foods: Vec<SunnahFood>,
        halal_tips: Vec<HalalTip>,
    ) -> Self {
        Self {
            recipes,
            glossary,
            sunnah_foods,
            halal_tips,
        }
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_json(sources: Sources<'_>) -> Result<Self, CatalogError> {
        let catalog = Self {
            recipes: parse(RECIPES_FILE, sources.recipes)?,
            glossary: parse(GLOSSARY_FILE, sources.glossary)?,
            sunnah_foods: parse(SUNNAH_FOODS_FILE, sources.sunnah_foods)?,
            halal_tips: parse(HALAL_TIPS_FILE, sources.halal_tips)?,
        };
        log::debug!(
            "catalog loaded: {} recipes, {} glossary terms, {} sunnah foods, {} tips",
            catalog.recipes.len(),
            catalog.glossary.len(),
            catalog.sunnah_foods.len(),
            catalog.halal_tips.len()
        );
        Ok(catalog)
    }

    /// Loads the four dataset files from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Read { path, source })
        };
        let recipes = read(RECIPES_FILE)?;
        let glossary = read(GLOSSARY_FILE)?;
        let sunnah_foods = read(SUNNAH_FOODS_FILE)?;
        let halal_tips = read(HALAL_TIPS_FILE)?;
        Self::from_json(Sources {
            recipes: &recipes,
            glossary: &glossary,
            sunnah_foods: &sunnah_foods,
            halal_tips: &halal_tips,
        })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn glossary(&self) -> &[GlossaryTerm] {
        &self.glossary
    }

    pub fn sunnah_foods(&self) -> &[SunnahFood] {
        &self.sunnah_foods
    }

    pub fn halal_tips(&self) -> &[HalalTip] {
        &self.halal_tips
    }

    /// Looks a recipe up by its stored (string) id.
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.key() == id)
    }

    /// Display name for a meal-plan cell.
    pub fn recipe_name(&self, id: &str) -> &str {
        self.recipe(id).map_or(UNKNOWN_RECIPE, |r| r.name.as_str())
    }

    /// Recipes whose id appears in `favorites`, in catalog order. Ids that
    /// resolve to nothing are skipped.
    pub fn favorite_recipes<'a>(&'a self, favorites: &[String]) -> Vec<&'a Recipe> {
        self.recipes
            .iter()
            .filter(|r| favorites.iter().any(|id| *id == r.key()))
            .collect()
    }
}

/// Bundled asset for an image file name, falling back to the dates picture.
pub fn image_asset(file_name: &str) -> &'static str {
    BUNDLED_IMAGES
        .into_iter()
        .find(|name| *name == file_name)
        .unwrap_or(FALLBACK_IMAGE)
}
