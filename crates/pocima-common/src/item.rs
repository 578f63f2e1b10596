//! Named, weighted items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight unit shared by items and the bag's capacity.
pub type Weight = u32;

/// A named unit of value with an integer weight.
///
/// Containers key items by [`Item::name`]; weight plays no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    name: String,
    weight: Weight,
}

impl Item {
    /// Creates a new item.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item weight.
    #[must_use]
    pub const fn weight(&self) -> Weight {
        self.weight
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = Item::new("Hueso", 1);
        assert_eq!(item.name(), "Hueso");
        assert_eq!(item.weight(), 1);
    }

    #[test]
    fn test_item_display() {
        assert_eq!(Item::new("Espada", 10).to_string(), "Espada (10)");
    }

    #[test]
    fn test_item_clone_is_independent() {
        let original = Item::new("Pluma", 2);
        let copy = original.clone();
        drop(original);
        assert_eq!(copy, Item::new("Pluma", 2));
    }
}
