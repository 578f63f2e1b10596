//! Weight-limited bag.
//!
//! Items are keyed by name and admitted only while their total weight stays
//! within the bag's capacity. Listings iterate in ascending name order.

use pocima_common::Item;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Bound;
use thiserror::Error;
use tracing::{debug, warn};

use crate::events::{ContainerEvent, EventSender};

/// Why an item was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// An item with the same name is already stored
    Duplicate,
    /// The item weighs more than the remaining capacity
    TooHeavy {
        /// Weight of the refused item
        weight: u32,
        /// Free capacity at the time of the attempt
        free: i64,
    },
}

/// Bag error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    /// Admission refused; the refused item is handed back
    #[error("{bag}: No se puede agregar {}", .item.name())]
    Rejected {
        /// Bag name
        bag: String,
        /// Refused item
        item: Item,
        /// Reason for refusal
        reason: RejectReason,
    },
    /// No item stored under that name
    #[error("{bag}: {name} not found")]
    NotFound {
        /// Bag name
        bag: String,
        /// Requested name
        name: String,
    },
}

/// Result type for bag operations.
pub type BagResult<T> = Result<T, BagError>;

/// A capacity-bounded, name-keyed item store.
///
/// `current_weight` always equals the sum of the stored weights and never
/// exceeds `capacity`.
#[derive(Debug, Clone, Serialize)]
pub struct WeightBag {
    name: String,
    capacity: i64,
    current_weight: i64,
    items: BTreeMap<String, Item>,
    #[serde(skip)]
    events: Option<EventSender>,
}

impl WeightBag {
    /// Creates an empty bag.
    ///
    /// A negative capacity is accepted and yields a bag that admits nothing.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: i64) -> Self {
        Self {
            name: name.into(),
            capacity,
            current_weight: 0,
            items: BTreeMap::new(),
            events: None,
        }
    }

    /// Attaches an event publisher.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns the bag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maximum total weight.
    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Returns the weight currently stored.
    #[must_use]
    pub const fn current_weight(&self) -> i64 {
        self.current_weight
    }

    /// Returns how much more weight fits.
    #[must_use]
    pub const fn free_capacity(&self) -> i64 {
        self.capacity - self.current_weight
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks whether an item with this name is stored.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Adds an item.
    ///
    /// Refused when the name is already present or the item is heavier than
    /// [`free_capacity`](Self::free_capacity). A refusal leaves the bag
    /// untouched, logs the diagnostic and returns the item inside the error.
    pub fn add(&mut self, item: Item) -> BagResult<()> {
        let free = self.free_capacity();
        let reason = if self.items.contains_key(item.name()) {
            Some(RejectReason::Duplicate)
        } else if i64::from(item.weight()) > free {
            Some(RejectReason::TooHeavy {
                weight: item.weight(),
                free,
            })
        } else {
            None
        };

        if let Some(reason) = reason {
            let err = BagError::Rejected {
                bag: self.name.clone(),
                item,
                reason,
            };
            self.report(&err);
            return Err(err);
        }

        self.current_weight += i64::from(item.weight());
        debug!(bag = %self.name, item = item.name(), free = self.free_capacity(), "item stored");
        self.publish(ContainerEvent::ItemStored {
            container: self.name.clone(),
            item: item.name().to_string(),
            free_capacity: self.free_capacity(),
        });
        self.items.insert(item.name().to_string(), item);
        Ok(())
    }

    /// Removes and returns the item stored under `name`.
    pub fn remove(&mut self, name: &str) -> BagResult<Item> {
        let Some(item) = self.items.remove(name) else {
            return Err(BagError::NotFound {
                bag: self.name.clone(),
                name: name.to_string(),
            });
        };

        self.current_weight -= i64::from(item.weight());
        debug!(bag = %self.name, item = name, free = self.free_capacity(), "item removed");
        self.publish(ContainerEvent::ItemRemoved {
            container: self.name.clone(),
            item: name.to_string(),
            free_capacity: self.free_capacity(),
        });
        Ok(item)
    }

    /// Returns a stored item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Returns an iterator over stored items in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Returns all stored items in name order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    /// Returns the items whose name starts with `prefix`, in name order.
    ///
    /// Matching is case-sensitive; an empty prefix matches everything.
    #[must_use]
    pub fn list_by_prefix(&self, prefix: &str) -> Vec<Item> {
        // Keys sharing a prefix are contiguous in a BTreeMap.
        self.items
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// Returns the stored names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    fn report(&self, err: &BagError) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use proptest::prelude::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::name).collect()
    }

    #[test]
    fn test_bag_scenario() {
        let mut bag = WeightBag::new("Mochila", 50);
        assert_eq!(bag.free_capacity(), 50);

        bag.add(Item::new("Hueso", 1)).expect("fits");
        assert_eq!(bag.free_capacity(), 49);
        bag.add(Item::new("Espada", 10)).expect("fits");
        assert_eq!(bag.free_capacity(), 39);
        assert_eq!(names(&bag.list_all()), ["Espada", "Hueso"]);

        let removed = bag.remove("Hueso").expect("present");
        assert_eq!(removed, Item::new("Hueso", 1));
        assert_eq!(bag.free_capacity(), 40);
        assert_eq!(bag.list_all(), vec![Item::new("Espada", 10)]);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut bag = WeightBag::new("Mochila", 50);
        bag.add(Item::new("Hueso", 1)).expect("fits");

        let err = bag.add(Item::new("Hueso", 2)).expect_err("duplicate");
        assert_eq!(err.to_string(), "Mochila: No se puede agregar Hueso");
        assert!(matches!(
            err,
            BagError::Rejected {
                reason: RejectReason::Duplicate,
                ..
            }
        ));
        assert_eq!(bag.current_weight(), 1);
        assert_eq!(bag.get("Hueso").map(Item::weight), Some(1));
    }

    #[test]
    fn test_add_too_heavy_rejected() {
        let mut bag = WeightBag::new("Bolsillo", 5);
        bag.add(Item::new("Llave", 3)).expect("fits");

        let err = bag.add(Item::new("Piedra", 3)).expect_err("too heavy");
        assert_eq!(err.to_string(), "Bolsillo: No se puede agregar Piedra");
        assert!(matches!(
            err,
            BagError::Rejected {
                reason: RejectReason::TooHeavy { weight: 3, free: 2 },
                ..
            }
        ));

        // Exactly filling the bag is allowed.
        bag.add(Item::new("Moneda", 2)).expect("fits exactly");
        assert_eq!(bag.free_capacity(), 0);
    }

    #[test]
    fn test_rejected_item_is_returned() {
        let mut bag = WeightBag::new("Mochila", 0);
        let Err(BagError::Rejected { item, .. }) = bag.add(Item::new("Yunque", 80)) else {
            panic!("expected rejection");
        };
        assert_eq!(item, Item::new("Yunque", 80));
    }

    #[test]
    fn test_zero_weight_item_in_full_bag() {
        let mut bag = WeightBag::new("Mochila", 0);
        bag.add(Item::new("Pluma", 0)).expect("weightless");
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_negative_capacity_admits_nothing() {
        let mut bag = WeightBag::new("Rota", -1);
        assert_eq!(bag.free_capacity(), -1);
        assert!(bag.add(Item::new("Pluma", 0)).is_err());
        assert!(bag.is_empty());
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut bag = WeightBag::new("Mochila", 50);
        bag.add(Item::new("Espada", 10)).expect("fits");

        let err = bag.remove("Hueso").expect_err("missing");
        assert_eq!(
            err,
            BagError::NotFound {
                bag: "Mochila".to_string(),
                name: "Hueso".to_string(),
            }
        );
        assert_eq!(bag.current_weight(), 10);
    }

    #[test]
    fn test_list_by_prefix() {
        let mut bag = WeightBag::new("Mochila", 100);
        for name in ["Espada", "Escudo", "espina", "Hueso", "Es"] {
            bag.add(Item::new(name, 1)).expect("fits");
        }

        assert_eq!(names(&bag.list_by_prefix("Es")), ["Es", "Escudo", "Espada"]);
        assert_eq!(names(&bag.list_by_prefix("es")), ["espina"]);
        assert_eq!(bag.list_by_prefix("").len(), 5);
        assert!(bag.list_by_prefix("Z").is_empty());
    }

    #[test]
    fn test_events_published() {
        let bus = EventBus::new(16);
        let mut bag = WeightBag::new("Mochila", 5).with_events(bus.sender());

        bag.add(Item::new("Hueso", 1)).expect("fits");
        let _ = bag.add(Item::new("Yunque", 9));
        bag.remove("Hueso").expect("present");

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            ContainerEvent::ItemStored { free_capacity: 4, .. }
        ));
        assert_eq!(
            events[1].rejection(),
            Some("Mochila: No se puede agregar Yunque")
        );
        assert!(matches!(
            &events[2],
            ContainerEvent::ItemRemoved { free_capacity: 5, .. }
        ));
    }

    #[test]
    fn test_bag_snapshot_json() {
        let mut bag = WeightBag::new("Mochila", 50);
        bag.add(Item::new("Hueso", 1)).expect("fits");
        let json = serde_json::to_value(&bag).expect("serializable");
        assert_eq!(json["current_weight"], 1);
        assert_eq!(json["items"]["Hueso"]["weight"], 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, u32),
        Remove(String),
    }

    fn op() -> impl Strategy<Value = Op> {
        let name = prop::sample::select(vec!["Ajo", "Hueso", "Pluma", "Sal", "Sangre"])
            .prop_map(str::to_string);
        prop_oneof![
            (name.clone(), 0u32..30).prop_map(|(n, w)| Op::Add(n, w)),
            name.prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn weight_invariant_holds(capacity in 0i64..60, ops in prop::collection::vec(op(), 0..40)) {
            let mut bag = WeightBag::new("Mochila", capacity);
            for op in ops {
                match op {
                    Op::Add(name, weight) => {
                        let before = bag.list_all();
                        let duplicate = bag.contains(&name);
                        let result = bag.add(Item::new(name, weight));
                        if duplicate {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(bag.list_all(), before);
                        }
                    }
                    Op::Remove(name) => {
                        let present = bag.contains(&name);
                        prop_assert_eq!(bag.remove(&name).is_ok(), present);
                    }
                }
                let total: i64 = bag.iter().map(|item| i64::from(item.weight())).sum();
                prop_assert_eq!(bag.current_weight(), total);
                prop_assert!(bag.current_weight() <= bag.capacity());
                prop_assert!(bag.free_capacity() >= 0);
            }
        }
    }
}
