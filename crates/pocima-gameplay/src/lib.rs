//! # Pocima Gameplay
//!
//! Capacity-bounded item containers.
//!
//! This crate provides:
//! - A weight-limited bag with unique item names
//! - A crafting vessel that binds a recipe, collects ingredients and brews
//!   a derived item
//! - An event bus carrying container activity and rejection diagnostics
//! - Mutex-guarded handles for sharing containers across threads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bag;
pub mod events;
pub mod shared;
pub mod vessel;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bag::*;
    pub use crate::events::*;
    pub use crate::shared::*;
    pub use crate::vessel::*;
    pub use pocima_common::{Item, Recipe};
}

pub use prelude::*;
