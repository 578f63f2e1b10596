//! Event bus for container activity.
//!
//! Containers publish every accepted transition and every rejection here so a
//! driver (or a test) can observe the diagnostics without scraping logs.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Events published by the bag and the vessel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerEvent {
    /// Item admitted into a bag
    ItemStored {
        /// Bag name
        container: String,
        /// Item name
        item: String,
        /// Free capacity after admission
        free_capacity: i64,
    },
    /// Item taken out of a bag
    ItemRemoved {
        /// Bag name
        container: String,
        /// Item name
        item: String,
        /// Free capacity after removal
        free_capacity: i64,
    },
    /// Operation refused; `message` is the exact diagnostic text
    Rejected {
        /// Container name
        container: String,
        /// Diagnostic text
        message: String,
    },
    /// Recipe bound to a vessel
    RecipeBound {
        /// Vessel name
        container: String,
        /// Recipe name
        recipe: String,
    },
    /// Ingredient placed into a vessel slot
    IngredientAdded {
        /// Vessel name
        container: String,
        /// Ingredient name
        item: String,
    },
    /// Vessel finished a recipe
    PotionBrewed {
        /// Vessel name
        container: String,
        /// Output item name
        output: String,
        /// Output weight
        weight: u32,
    },
    /// Pending output drained from a vessel
    OutputTaken {
        /// Vessel name
        container: String,
        /// Output item name
        output: String,
    },
}

impl ContainerEvent {
    /// Returns the name of the container that published the event.
    #[must_use]
    pub fn container(&self) -> &str {
        match self {
            Self::ItemStored { container, .. }
            | Self::ItemRemoved { container, .. }
            | Self::Rejected { container, .. }
            | Self::RecipeBound { container, .. }
            | Self::IngredientAdded { container, .. }
            | Self::PotionBrewed { container, .. }
            | Self::OutputTaken { container, .. } => container,
        }
    }

    /// Returns the diagnostic text if this is a rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Publishing handle held by a container.
#[derive(Debug, Clone)]
pub struct EventSender(Sender<ContainerEvent>);

impl EventSender {
    /// Publishes an event without blocking; dropped if the bus is full.
    pub fn publish(&self, event: ContainerEvent) {
        let _ = self.0.try_send(event);
    }
}

/// Event bus for broadcasting container events.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<ContainerEvent>,
    /// Receiver for collecting events
    receiver: Receiver<ContainerEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: ContainerEvent) {
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<ContainerEvent> {
        self.receiver.try_iter().collect()
    }

    /// Drains pending events, keeping only the rejection messages.
    pub fn drain_rejections(&self) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                ContainerEvent::Rejected { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new publishing handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender(self.sender.clone())
    }
}
