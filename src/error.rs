//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror. The response cache itself
//! never fails; everything here comes from talking to PokeAPI or from user
//! input.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for commands and the PokeAPI client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// PokeAPI answered with a non-success status
    #[error("Response failed with status code: {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// First word of the input is not a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Writing command output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command needs an argument that was not given
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
