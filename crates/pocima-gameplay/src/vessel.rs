//! Recipe-driven crafting vessel.
//!
//! A vessel cycles through three states:
//!
//! ```text
//! Empty --bind_recipe--> Loading --complete--> OutputReady --take_output--> Empty
//!                         ^    |
//!                         +----+ add_ingredient / incomplete complete
//! ```
//!
//! A recipe and a pending output are never held at the same time, and a new
//! recipe can only be bound from `Empty`.

use pocima_common::{Item, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::events::{ContainerEvent, EventSender};

/// Prefix of every brewed output's name.
pub const POTION_PREFIX: &str = "Pocima de ";

/// Token shown by [`CraftingVessel::describe`] when the vessel holds nothing.
pub const EMPTY_LABEL: &str = "vacio";

/// How the vessel treats ingredients the bound recipe does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientPolicy {
    /// Store them under their own name. They are never reported missing, but
    /// their weight is included in the brewed output.
    #[default]
    Permissive,
    /// Refuse them with [`VesselError::NotInRecipe`].
    Strict,
}

/// Lifecycle state of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VesselState {
    /// No recipe, no output
    Empty,
    /// Recipe bound, any number of slots filled
    Loading,
    /// Output brewed and waiting to be taken
    OutputReady,
}

/// Why a recipe could not be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindRejectReason {
    /// Recipe needs more slots than the vessel has
    TooManyIngredients {
        /// Ingredients the recipe requires
        required: usize,
        /// Vessel slot limit
        limit: i64,
    },
    /// Another recipe is already bound
    RecipeBound,
    /// A brewed output has not been taken yet
    OutputPending,
}

/// Vessel error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VesselError {
    /// Recipe refused; the recipe is handed back
    #[error("{vessel}: No se puede agregar la receta")]
    RecipeRejected {
        /// Vessel name
        vessel: String,
        /// Refused recipe
        recipe: Recipe,
        /// Reason for refusal
        reason: BindRejectReason,
    },
    /// Completion attempted without a full set of ingredients
    #[error("{vessel}: No se puede preparar la pocima")]
    CannotBrew {
        /// Vessel name
        vessel: String,
        /// Ingredients still missing (empty when no recipe is bound)
        missing: Vec<String>,
    },
    /// Operation needs a bound recipe
    #[error("{vessel}: no recipe bound")]
    NoActiveRecipe {
        /// Vessel name
        vessel: String,
    },
    /// Strict policy refused an ingredient outside the recipe
    #[error("{vessel}: {} is not part of recipe {recipe}", .item.name())]
    NotInRecipe {
        /// Vessel name
        vessel: String,
        /// Bound recipe name
        recipe: String,
        /// Refused ingredient
        item: Item,
    },
}

/// Result type for vessel operations.
pub type VesselResult<T> = Result<T, VesselError>;

/// A slot-limited container that turns a recipe's ingredients into a potion.
#[derive(Debug, Clone, Serialize)]
pub struct CraftingVessel {
    name: String,
    slot_limit: i64,
    recipe: Option<Recipe>,
    slots: BTreeMap<String, Option<Item>>,
    output: Option<Item>,
    policy: IngredientPolicy,
    #[serde(skip)]
    events: Option<EventSender>,
}

impl CraftingVessel {
    /// Creates an empty vessel with the permissive ingredient policy.
    ///
    /// A negative slot limit is accepted and yields a vessel that binds no
    /// recipe.
    #[must_use]
    pub fn new(name: impl Into<String>, slot_limit: i64) -> Self {
        Self {
            name: name.into(),
            slot_limit,
            recipe: None,
            slots: BTreeMap::new(),
            output: None,
            policy: IngredientPolicy::default(),
            events: None,
        }
    }

    /// Sets the ingredient policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: IngredientPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches an event publisher.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns the vessel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maximum number of ingredients a recipe may require.
    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.slot_limit
    }

    /// Returns the bound recipe.
    #[must_use]
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// Returns the slot map, keyed by ingredient name.
    #[must_use]
    pub fn ingredients(&self) -> &BTreeMap<String, Option<Item>> {
        &self.slots
    }

    /// Returns the brewed output without taking it.
    #[must_use]
    pub fn output(&self) -> Option<&Item> {
        self.output.as_ref()
    }

    /// Returns the ingredient policy.
    #[must_use]
    pub const fn policy(&self) -> IngredientPolicy {
        self.policy
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> VesselState {
        match (&self.recipe, &self.output) {
            (Some(_), _) => VesselState::Loading,
            (None, Some(_)) => VesselState::OutputReady,
            (None, None) => VesselState::Empty,
        }
    }

    /// Binds a recipe and opens one empty slot per ingredient.
    ///
    /// Refused when the recipe needs more slots than the vessel has, or when
    /// a recipe or an output is already present.
    pub fn bind_recipe(&mut self, recipe: Recipe) -> VesselResult<()> {
        let fits = i64::try_from(recipe.count()).is_ok_and(|count| count <= self.slot_limit);
        let reason = if !fits {
            Some(BindRejectReason::TooManyIngredients {
                required: recipe.count(),
                limit: self.slot_limit,
            })
        } else if self.recipe.is_some() {
            Some(BindRejectReason::RecipeBound)
        } else if self.output.is_some() {
            Some(BindRejectReason::OutputPending)
        } else {
            None
        };

        if let Some(reason) = reason {
            let err = VesselError::RecipeRejected {
                vessel: self.name.clone(),
                recipe,
                reason,
            };
            self.report(&err);
            return Err(err);
        }

        self.slots = recipe
            .ingredients()
            .iter()
            .map(|name| (name.clone(), None))
            .collect();
        debug!(vessel = %self.name, recipe = recipe.name(), slots = recipe.count(), "recipe bound");
        self.publish(ContainerEvent::RecipeBound {
            container: self.name.clone(),
            recipe: recipe.name().to_string(),
        });
        self.recipe = Some(recipe);
        Ok(())
    }

    /// Places an ingredient in the slot named after it.
    ///
    /// An item with the same name as a filled slot replaces it. Ingredients
    /// the recipe does not list are handled per [`IngredientPolicy`].
    pub fn add_ingredient(&mut self, item: Item) -> VesselResult<()> {
        let Some(recipe) = &self.recipe else {
            let err = VesselError::NoActiveRecipe {
                vessel: self.name.clone(),
            };
            self.report(&err);
            return Err(err);
        };

        if self.policy == IngredientPolicy::Strict && !recipe.requires(item.name()) {
            let err = VesselError::NotInRecipe {
                vessel: self.name.clone(),
                recipe: recipe.name().to_string(),
                item,
            };
            self.report(&err);
            return Err(err);
        }

        debug!(vessel = %self.name, item = item.name(), "ingredient added");
        self.publish(ContainerEvent::IngredientAdded {
            container: self.name.clone(),
            item: item.name().to_string(),
        });
        self.slots.insert(item.name().to_string(), Some(item));
        Ok(())
    }

    /// Returns the required ingredients whose slot is empty, in recipe order.
    pub fn missing_ingredients(&self) -> VesselResult<Vec<String>> {
        let recipe = self.recipe.as_ref().ok_or_else(|| VesselError::NoActiveRecipe {
            vessel: self.name.clone(),
        })?;

        Ok(recipe
            .ingredients()
            .iter()
            .filter(|name| !matches!(self.slots.get(*name), Some(Some(_))))
            .cloned()
            .collect())
    }

    /// Checks that a recipe is bound and every required slot is filled.
    #[must_use]
    pub fn has_all_ingredients(&self) -> bool {
        self.missing_ingredients()
            .is_ok_and(|missing| missing.is_empty())
    }

    /// Brews the bound recipe.
    ///
    /// The output is named [`POTION_PREFIX`] followed by the recipe name and
    /// weighs the sum of every stored slot. The recipe and slots are cleared.
    pub fn complete(&mut self) -> VesselResult<&Item> {
        let missing = self.missing_ingredients().unwrap_or_default();
        let recipe = match self.recipe.take() {
            Some(recipe) if missing.is_empty() => recipe,
            unbrewable => {
                self.recipe = unbrewable;
                let err = VesselError::CannotBrew {
                    vessel: self.name.clone(),
                    missing,
                };
                self.report(&err);
                return Err(err);
            },
        };

        let weight = std::mem::take(&mut self.slots)
            .into_values()
            .flatten()
            .fold(0u32, |total, item| total.saturating_add(item.weight()));
        let output = Item::new(format!("{POTION_PREFIX}{}", recipe.name()), weight);

        debug!(vessel = %self.name, output = output.name(), weight, "potion brewed");
        self.publish(ContainerEvent::PotionBrewed {
            container: self.name.clone(),
            output: output.name().to_string(),
            weight,
        });
        let output: &Item = self.output.insert(output);
        Ok(output)
    }

    /// Takes the pending output, leaving the vessel empty.
    pub fn take_output(&mut self) -> Option<Item> {
        let output = self.output.take()?;
        debug!(vessel = %self.name, output = output.name(), "output taken");
        self.publish(ContainerEvent::OutputTaken {
            container: self.name.clone(),
            output: output.name().to_string(),
        });
        Some(output)
    }

    /// Returns `"<vessel>: <recipe | output | vacio>"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn report(&self, err: &VesselError) {
        let message = err.to_string();
        warn!("{message}");
        self.publish(ContainerEvent::Rejected {
            container: self.name.clone(),
            message,
        });
    }

    fn publish(&self, event: ContainerEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

impl fmt::Display for CraftingVessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.recipe, &self.output) {
            (Some(recipe), _) => write!(f, "{}: {}", self.name, recipe.name()),
            (None, Some(output)) => write!(f, "{}: {}", self.name, output.name()),
            (None, None) => write!(f, "{}: {EMPTY_LABEL}", self.name),
        }
    }
}
