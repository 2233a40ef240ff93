//! Place a cat, its food and a toy on detected planes; the cat wanders,
//! follows food over toys, eats, fetches, and the toy can be dragged and thrown.

pub mod actions;
pub mod cat;
pub mod config;
pub mod input;
pub mod planes;
pub mod setup;
pub mod spawn;
pub mod stack;
pub mod toy;

pub use stack::{CatPlaceCorePlugin, CatPlaceSet, CatPlaceStackPlugin, CatPlaceStartupSet};
