//! # Pocima Common
//!
//! Shared value types for the Pocima containers.
//!
//! This crate provides the types both containers read and produce:
//! - Items (a name and an integer weight)
//! - Recipes (a display name and an ordered, unique ingredient list)
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod item;
pub mod recipe;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::item::*;
    pub use crate::recipe::*;
}

pub use prelude::*;
