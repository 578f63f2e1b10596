//! Recipe book loading.
//!
//! Recipe files list recipes as `[[recipes]]` tables (TOML) or a
//! `(recipes: [...])` struct (RON). Every entry goes through the recipe
//! builder, so duplicate or empty ingredient names are refused on load.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pocima_common::{Recipe, RecipeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during recipe loading.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// File not found.
    #[error("Recipe file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read recipe file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse recipe TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Failed to parse RON.
    #[error("Failed to parse recipe RON: {0}")]
    RonError(#[from] ron::error::SpannedError),

    /// File extension is neither `toml` nor `ron`.
    #[error("Unsupported recipe file: {0}")]
    UnsupportedFormat(PathBuf),

    /// Invalid recipe definition.
    #[error("Recipe validation error: {0}")]
    Invalid(#[from] RecipeError),

    /// Duplicate recipe name.
    #[error("Duplicate recipe name: {0}")]
    DuplicateName(String),
}

/// Result type for recipe loading operations.
pub type RecipeLoadResult<T> = Result<T, RecipeLoadError>;

/// A recipe definition as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Display name.
    pub name: String,
    /// Required ingredient names, in order.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl RecipeDefinition {
    /// Builds the gameplay recipe, validating names.
    pub fn to_recipe(&self) -> RecipeLoadResult<Recipe> {
        Ok(Recipe::from_ingredients(
            self.name.clone(),
            self.ingredients.iter().cloned(),
        )?)
    }
}

/// Contents of a recipe file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeFile {
    /// Recipes in the file.
    #[serde(default)]
    pub recipes: Vec<RecipeDefinition>,
}

/// Recipes keyed by exact name.
#[derive(Debug, Default)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
    rejected: u32,
}

impl RecipeBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Returns how many definitions were skipped while loading.
    #[must_use]
    pub const fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Registers a recipe.
    pub fn register(&mut self, recipe: Recipe) -> RecipeLoadResult<()> {
        if self.recipes.contains_key(recipe.name()) {
            return Err(RecipeLoadError::DuplicateName(recipe.name().to_string()));
        }
        self.recipes.insert(recipe.name().to_string(), recipe);
        Ok(())
    }

    /// Gets a recipe by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    /// Returns all recipes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Loads recipes from a single `.toml` or `.ron` file.
    ///
    /// Invalid or duplicate entries are skipped with a warning; the number
    /// of recipes added is returned.
    pub fn load_file(&mut self, path: &Path) -> RecipeLoadResult<usize> {
        if !path.exists() {
            return Err(RecipeLoadError::NotFound(path.to_path_buf()));
        }
        debug!("Loading recipe file: {:?}", path);

        let content = fs::read_to_string(path)?;
        let file: RecipeFile = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("ron") => ron::from_str(&content)?,
            _ => return Err(RecipeLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        let mut loaded = 0;
        for definition in file.recipes {
            match definition.to_recipe().and_then(|recipe| self.register(recipe)) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    warn!("Skipping recipe {:?} in {:?}: {}", definition.name, path, e);
                    self.rejected += 1;
                },
            }
        }

        info!("Loaded {} recipes from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Loads every `.toml` and `.ron` file in a directory, in file name order.
    pub fn load_dir(&mut self, dir: &Path) -> RecipeLoadResult<usize> {
        if !dir.is_dir() {
            return Err(RecipeLoadError::NotFound(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == "toml" || ext == "ron")
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(count) => loaded += count,
                Err(e) => warn!("Failed to load recipe file {:?}: {}", path, e),
            }
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VOLADORA_TOML: &str = r#"
[[recipes]]
name = "voladora"
ingredients = ["Pluma", "Sangre", "Hueso"]

[[recipes]]
name = "rota"
ingredients = ["Ajo", "Ajo"]
"#;

    const FUEGO_RON: &str = r#"(
    recipes: [
        (name: "fuego", ingredients: ["Azufre", "Carbon"]),
        (name: "voladora", ingredients: ["Pluma"]),
    ],
)"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write recipe file");
        path
    }

    #[test]
    fn test_load_toml_skips_invalid() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "pocimas.toml", VOLADORA_TOML);

        let mut book = RecipeBook::new();
        assert_eq!(book.load_file(&path).expect("loads"), 1);
        assert_eq!(book.rejected(), 1);

        let recipe = book.get("voladora").expect("registered");
        assert_eq!(recipe.ingredients(), ["Pluma", "Sangre", "Hueso"]);
        assert!(book.get("rota").is_none());
    }

    #[test]
    fn test_load_dir_rejects_duplicate_names() {
        let dir = TempDir::new().expect("temp dir");
        write(&dir, "a.toml", VOLADORA_TOML);
        write(&dir, "b.ron", FUEGO_RON);
        write(&dir, "notas.txt", "ignored");

        let mut book = RecipeBook::new();
        assert_eq!(book.load_dir(dir.path()).expect("loads"), 2);
        assert_eq!(book.len(), 2);
        assert_eq!(book.rejected(), 2);
        assert_eq!(book.get("voladora").map(Recipe::count), Some(3));
        let names: Vec<&str> = book.iter().map(Recipe::name).collect();
        assert_eq!(names, ["fuego", "voladora"]);
    }

    #[test]
    fn test_missing_file() {
        let mut book = RecipeBook::new();
        assert!(matches!(
            book.load_file(Path::new("/nonexistent/recetas.toml")),
            Err(RecipeLoadError::NotFound(_))
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "recetas.json", "{}");
        assert!(matches!(
            RecipeBook::new().load_file(&path),
            Err(RecipeLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_register_duplicate() {
        let mut book = RecipeBook::new();
        let recipe = Recipe::from_ingredients("sal", ["Sal"]).expect("valid");
        book.register(recipe.clone()).expect("first");
        assert!(matches!(
            book.register(recipe),
            Err(RecipeLoadError::DuplicateName(name)) if name == "sal"
        ));
    }
}
