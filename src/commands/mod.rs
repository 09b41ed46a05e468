//! Commands Module
//!
//! Turns REPL input into commands and runs them against PokeAPI.

mod catch;
mod parser;
mod session;

pub use catch::{attempt_catch, catch_probability, CATCH_DIFFICULTY};
pub use parser::{clean_input, Command, COMMANDS};
pub use session::{CaughtPokemon, Flow, Session};
