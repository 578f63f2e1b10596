//! Lock-guarded container handles.
//!
//! Every mutating operation touches several fields at once (a map plus a
//! running weight, or recipe, slots and output), so each container sits
//! behind a single mutex and every call is one critical section.

use parking_lot::{Mutex, MutexGuard};
use pocima_common::{Item, Recipe};
use std::sync::Arc;

use crate::bag::{BagResult, WeightBag};
use crate::vessel::{CraftingVessel, VesselResult, VesselState};

/// Cloneable, thread-safe handle to a [`WeightBag`].
#[derive(Debug, Clone)]
pub struct SharedBag(Arc<Mutex<WeightBag>>);

impl SharedBag {
    /// Wraps a bag.
    #[must_use]
    pub fn new(bag: WeightBag) -> Self {
        Self(Arc::new(Mutex::new(bag)))
    }

    /// Locks the bag for a compound operation.
    pub fn lock(&self) -> MutexGuard<'_, WeightBag> {
        self.0.lock()
    }

    /// See [`WeightBag::add`].
    pub fn add(&self, item: Item) -> BagResult<()> {
        self.0.lock().add(item)
    }

    /// See [`WeightBag::remove`].
    pub fn remove(&self, name: &str) -> BagResult<Item> {
        self.0.lock().remove(name)
    }

    /// See [`WeightBag::list_all`].
    #[must_use]
    pub fn list_all(&self) -> Vec<Item> {
        self.0.lock().list_all()
    }

    /// See [`WeightBag::list_by_prefix`].
    #[must_use]
    pub fn list_by_prefix(&self, prefix: &str) -> Vec<Item> {
        self.0.lock().list_by_prefix(prefix)
    }

    /// See [`WeightBag::free_capacity`].
    #[must_use]
    pub fn free_capacity(&self) -> i64 {
        self.0.lock().free_capacity()
    }
}

/// Cloneable, thread-safe handle to a [`CraftingVessel`].
#[derive(Debug, Clone)]
pub struct SharedVessel(Arc<Mutex<CraftingVessel>>);

impl SharedVessel {
    /// Wraps a vessel.
    #[must_use]
    pub fn new(vessel: CraftingVessel) -> Self {
        Self(Arc::new(Mutex::new(vessel)))
    }

    /// Locks the vessel for a compound operation.
    pub fn lock(&self) -> MutexGuard<'_, CraftingVessel> {
        self.0.lock()
    }

    /// See [`CraftingVessel::bind_recipe`].
    pub fn bind_recipe(&self, recipe: Recipe) -> VesselResult<()> {
        self.0.lock().bind_recipe(recipe)
    }

    /// See [`CraftingVessel::add_ingredient`].
    pub fn add_ingredient(&self, item: Item) -> VesselResult<()> {
        self.0.lock().add_ingredient(item)
    }

    /// See [`CraftingVessel::missing_ingredients`].
    pub fn missing_ingredients(&self) -> VesselResult<Vec<String>> {
        self.0.lock().missing_ingredients()
    }

    /// Brews the bound recipe and returns a copy of the output.
    pub fn complete(&self) -> VesselResult<Item> {
        self.0.lock().complete().cloned()
    }

    /// See [`CraftingVessel::take_output`].
    pub fn take_output(&self) -> Option<Item> {
        self.0.lock().take_output()
    }

    /// See [`CraftingVessel::state`].
    #[must_use]
    pub fn state(&self) -> VesselState {
        self.0.lock().state()
    }

    /// See [`CraftingVessel::describe`].
    #[must_use]
    pub fn describe(&self) -> String {
        self.0.lock().describe()
    }
}
