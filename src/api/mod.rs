//! PokeAPI Module
//!
//! HTTP client for PokeAPI that serves repeated requests from the response
//! cache.

mod client;

pub use client::PokeApiClient;
