//! Client side of the factory catalog backend.
//!
//! The backend is a plain CRUD facade over `/machines`, `/items` and
//! `/recipes`. This crate provides the wire types, an async client, the
//! sidebar palette fetch (with a static fallback), and the draft model
//! behind the "create recipe" flow.

pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod palette;
pub mod wire;

pub use client::{CatalogClient, Resource};
pub use config::CatalogConfig;
pub use draft::{IoSide, RecipeDraft, SEARCH_LIMIT, search_items};
pub use error::CatalogError;
pub use palette::{MachineSource, fetch_palette};
pub use wire::{ErrorBody, Item, Machine, Recipe, RecipeIo};
