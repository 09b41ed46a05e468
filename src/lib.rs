//! Pokedex - An interactive PokeAPI explorer
//!
//! Pages through location areas, explores them, catches and inspects Pokemon.
//! API responses are kept in an expiring in-memory cache keyed by URL.

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
mod tasks;

pub use api::PokeApiClient;
pub use cache::ResponseCache;
pub use commands::Session;
pub use config::Config;
