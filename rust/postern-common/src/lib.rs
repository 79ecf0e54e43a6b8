#![warn(missing_docs)]

//! Lightweight helpers shared across the postern crates: cross-target
//! `Send`/`Sync` bounds, resource identifiers and the maps keyed by them,
//! and the pure identifier strategies used throughout the authorization
//! pipeline.

// Allow the crate to refer to itself as `postern_common`
extern crate self as postern_common;

mod bounds;
pub use bounds::*;

mod identifier;
pub use identifier::*;

mod map;
pub use map::*;

mod strategy;
pub use strategy::*;
