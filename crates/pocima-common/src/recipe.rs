//! Recipes: a display name plus an ordered, unique list of ingredient names.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Recipe construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// Recipe name is empty
    #[error("Recipe name cannot be empty")]
    EmptyName,
    /// Ingredient name is empty
    #[error("Recipe {recipe}: ingredient name cannot be empty")]
    EmptyIngredient {
        /// Recipe being built
        recipe: String,
    },
    /// Ingredient listed twice
    #[error("Recipe {recipe}: duplicate ingredient {ingredient}")]
    DuplicateIngredient {
        /// Recipe being built
        recipe: String,
        /// Repeated ingredient name
        ingredient: String,
    },
}

/// Result type for recipe construction.
pub type RecipeResult<T> = Result<T, RecipeError>;

/// An immutable recipe.
///
/// Ingredient order is the order they were declared in, and every name
/// appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    name: String,
    ingredients: Vec<String>,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RecipeBuilder {
        RecipeBuilder::new(name)
    }

    /// Builds a recipe directly from a list of ingredient names.
    pub fn from_ingredients<I, S>(name: impl Into<String>, ingredients: I) -> RecipeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ingredients
            .into_iter()
            .fold(Self::builder(name), RecipeBuilder::ingredient)
            .build()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the required ingredient names in declaration order.
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Returns how many ingredients the recipe requires.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ingredients.len()
    }

    /// Checks whether `ingredient` is one of the required names.
    #[must_use]
    pub fn requires(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|name| name == ingredient)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.name, self.ingredients.join(", "))
    }
}

/// Builder for creating recipes.
///
/// Ingredients are collected in order and checked once, in [`build`](Self::build).
#[derive(Debug)]
pub struct RecipeBuilder {
    name: String,
    ingredients: Vec<String>,
}

impl RecipeBuilder {
    /// Creates a new recipe builder.
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Adds a required ingredient.
    #[must_use]
    pub fn ingredient(mut self, name: impl Into<String>) -> Self {
        self.ingredients.push(name.into());
        self
    }

    /// Closes the recipe.
    ///
    /// Fails if the recipe name or any ingredient name is empty, or if an
    /// ingredient is listed more than once.
    pub fn build(self) -> RecipeResult<Recipe> {
        if self.name.is_empty() {
            return Err(RecipeError::EmptyName);
        }

        for (index, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.is_empty() {
                return Err(RecipeError::EmptyIngredient { recipe: self.name });
            }
            if self.ingredients[..index].contains(ingredient) {
                return Err(RecipeError::DuplicateIngredient {
                    ingredient: ingredient.clone(),
                    recipe: self.name,
                });
            }
        }

        Ok(Recipe {
            name: self.name,
            ingredients: self.ingredients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voladora() -> Recipe {
        Recipe::builder("voladora")
            .ingredient("Pluma")
            .ingredient("Sangre")
            .ingredient("Hueso")
            .build()
            .expect("valid recipe")
    }

    #[test]
    fn test_recipe_builder() {
        let recipe = voladora();
        assert_eq!(recipe.name(), "voladora");
        assert_eq!(recipe.count(), 3);
        assert_eq!(recipe.ingredients(), ["Pluma", "Sangre", "Hueso"]);
    }

    #[test]
    fn test_recipe_keeps_declaration_order() {
        let recipe = Recipe::from_ingredients("orden", ["Zarza", "Ajo", "Miel"])
            .expect("valid recipe");
        assert_eq!(recipe.ingredients(), ["Zarza", "Ajo", "Miel"]);
    }

    #[test]
    fn test_recipe_requires() {
        let recipe = voladora();
        assert!(recipe.requires("Sangre"));
        assert!(!recipe.requires("sangre"));
        assert!(!recipe.requires("Escama"));
    }

    #[test]
    fn test_recipe_duplicate_ingredient() {
        let err = Recipe::from_ingredients("doble", ["Pluma", "Hueso", "Pluma"])
            .expect_err("duplicate must fail");
        assert_eq!(
            err,
            RecipeError::DuplicateIngredient {
                recipe: "doble".to_string(),
                ingredient: "Pluma".to_string(),
            }
        );
    }

    #[test]
    fn test_recipe_empty_names() {
        assert_eq!(
            Recipe::builder("").build().expect_err("empty name"),
            RecipeError::EmptyName
        );
        assert!(matches!(
            Recipe::from_ingredients("x", [""]),
            Err(RecipeError::EmptyIngredient { .. })
        ));
    }

    #[test]
    fn test_recipe_without_ingredients() {
        let recipe = Recipe::builder("agua").build().expect("valid recipe");
        assert_eq!(recipe.count(), 0);
    }

    #[test]
    fn test_recipe_display() {
        assert_eq!(voladora().to_string(), "voladora: [Pluma, Sangre, Hueso]");
    }
}
