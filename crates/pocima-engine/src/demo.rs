//! Scripted walkthroughs of the bag and the vessel.
//!
//! Each scenario returns the lines it would print so the binary can write
//! them to stdout and tests can compare them.

use pocima_common::{Item, Recipe};
use pocima_gameplay::{CraftingVessel, EventBus, WeightBag};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::PocimaResult;
use crate::recipe_loader::RecipeBook;

/// Recipe used when the book has no `voladora` entry.
pub fn builtin_recipe() -> PocimaResult<Recipe> {
    Ok(Recipe::from_ingredients(
        "voladora",
        ["Pluma", "Sangre", "Hueso"],
    )?)
}

fn listing(items: &[Item]) -> String {
    let names: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}

/// Stores two items, lists them, removes one and lists again.
pub fn bag_scenario(config: &EngineConfig, bus: &EventBus) -> Vec<String> {
    let mut bag = WeightBag::new(config.bag_name.clone(), config.bag_capacity)
        .with_events(bus.sender());
    let mut lines = vec![format!("Peso libre: {}", bag.free_capacity())];

    for item in [Item::new("Hueso", 1), Item::new("Espada", 10)] {
        if let Err(e) = bag.add(item) {
            lines.push(e.to_string());
        }
    }
    lines.push(format!("Peso libre: {}", bag.free_capacity()));
    lines.push(listing(&bag.list_all()));

    match bag.remove("Hueso") {
        Ok(item) => info!("Removed {item}"),
        Err(e) => lines.push(e.to_string()),
    }
    lines.push(format!("Peso libre: {}", bag.free_capacity()));
    lines.push(listing(&bag.list_all()));
    lines
}

/// Binds `voladora`, fills it, brews and drains the output.
pub fn vessel_scenario(
    config: &EngineConfig,
    book: &RecipeBook,
    bus: &EventBus,
) -> PocimaResult<Vec<String>> {
    let recipe = match book.get("voladora") {
        Some(recipe) => recipe.clone(),
        None => builtin_recipe()?,
    };
    let mut vessel = CraftingVessel::new(config.vessel_name.clone(), config.vessel_slot_limit)
        .with_policy(config.ingredient_policy)
        .with_events(bus.sender());
    let mut lines = vec![vessel.describe()];

    if let Err(e) = vessel.bind_recipe(recipe) {
        lines.push(e.to_string());
        return Ok(lines);
    }
    lines.push(vessel.describe());

    let mut weight = 0;
    let ingredients: Vec<String> = vessel.missing_ingredients()?;
    for name in ingredients {
        weight += 1;
        if let Err(e) = vessel.add_ingredient(Item::new(name, weight)) {
            lines.push(e.to_string());
        }
        lines.push(format!("Faltan: {:?}", vessel.missing_ingredients()?));
    }

    if let Err(e) = vessel.complete() {
        lines.push(e.to_string());
    }
    lines.push(vessel.describe());

    if let Some(potion) = vessel.take_output() {
        lines.push(potion.to_string());
    }
    lines.push(vessel.describe());
    Ok(lines)
}
