//! Fixed meal-to-ingredient lookup table.
//!
//! This is a small, hard-coded table, not recipe inference. A meal matches
//! when its name contains every keyword of a recipe, ignoring case.

use serde::Serialize;

use super::Cart;
use crate::domain::catalog::CatalogIndex;

/// One known meal and the catalog queries for its ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealRecipe {
    pub name: &'static str,
    keywords: &'static [&'static str],
    pub ingredients: &'static [&'static str],
}

const MEALS: &[MealRecipe] = &[
    MealRecipe {
        name: "peanut butter sandwich",
        keywords: &["peanut butter", "sandwich"],
        ingredients: &["Peanut Butter", "Bread"],
    },
    MealRecipe {
        name: "pasta",
        keywords: &["pasta"],
        ingredients: &["Pasta", "Sauce"],
    },
];

/// Finds the first recipe whose keywords all appear in `meal_name`.
pub fn recipe_for(meal_name: &str) -> Option<&'static MealRecipe> {
    let meal_name = meal_name.to_lowercase();
    MEALS
        .iter()
        .find(|recipe| recipe.keywords.iter().all(|k| meal_name.contains(k)))
}

/// Known meal names, for prompts and help text.
pub fn known_meals() -> impl Iterator<Item = &'static str> {
    MEALS.iter().map(|recipe| recipe.name)
}

/// What happened when a recipe was added to a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealOutcome {
    /// Catalog names of the ingredients added, one unit each.
    pub added: Vec<String>,
    /// Ingredient queries with no catalog match.
    pub missing: Vec<String>,
}

/// Adds one unit of every ingredient of `recipe` that the catalog carries.
pub fn add_meal_ingredients(
    cart: &mut Cart,
    catalog: &CatalogIndex,
    recipe: &MealRecipe,
) -> MealOutcome {
    let mut outcome = MealOutcome::default();
    for query in recipe.ingredients {
        match catalog.find_by_name(query) {
            Some(entry) => match cart.add_entry(entry, 1, "") {
                Ok(_) => outcome.added.push(entry.name.clone()),
                Err(_) => outcome.missing.push((*query).to_string()),
            },
            None => outcome.missing.push((*query).to_string()),
        }
    }
    outcome
}
