// File: src/catalog/search.rs
use super::{Catalog, GlossaryTerm, Recipe, ALL_CATEGORIES};

/// Case-insensitive containment. An empty needle matches everything.
fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Text query and category selection of the recipe browser, applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFilter {
    pub query: String,
    pub category: String,
}

impl Default for RecipeFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl RecipeFilter {
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let query = self.query.to_lowercase();
        contains_folded(&recipe.name, &query)
            && (self.category == ALL_CATEGORIES || recipe.has_category(&self.category))
    }
}

impl Catalog {
    /// Recipes whose name contains `query`, ignoring case.
    pub fn search_recipes(&self, query: &str) -> Vec<&Recipe> {
        self.filter_recipes(&RecipeFilter::new(query, ALL_CATEGORIES))
    }

    /// Recipes tagged with exactly `category`; [`ALL_CATEGORIES`] returns all.
    pub fn recipes_in_category(&self, category: &str) -> Vec<&Recipe> {
        self.filter_recipes(&RecipeFilter::new("", category))
    }

    /// Recomputed from scratch on every call; the datasets are small.
    pub fn filter_recipes(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        self.recipes().iter().filter(|r| filter.matches(r)).collect()
    }

    /// Terms whose English term, Arabic term or definition contains `query`.
    pub fn search_glossary(&self, query: &str) -> Vec<&GlossaryTerm> {
        let query = query.to_lowercase();
        self.glossary()
            .iter()
            .filter(|t| {
                contains_folded(&t.term, &query)
                    || contains_folded(&t.arabic_term, &query)
                    || contains_folded(&t.definition, &query)
            })
            .collect()
    }
}
