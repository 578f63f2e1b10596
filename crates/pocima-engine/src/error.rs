//! Error types for the engine.

use pocima_common::RecipeError;
use pocima_gameplay::{BagError, VesselError};
use thiserror::Error;

use crate::recipe_loader::RecipeLoadError;

/// Top-level error type for engine operations.
#[derive(Debug, Error)]
pub enum PocimaError {
    /// Recipe construction errors
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// Bag errors
    #[error("Bag error: {0}")]
    Bag(#[from] BagError),

    /// Vessel errors
    #[error("Vessel error: {0}")]
    Vessel(#[from] VesselError),

    /// Recipe book errors
    #[error("Recipe book error: {0}")]
    RecipeLoad(#[from] RecipeLoadError),
}

/// Result type alias for engine operations.
pub type PocimaResult<T> = Result<T, PocimaError>;
