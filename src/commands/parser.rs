//! Input cleaning and command parsing

use crate::error::{PokedexError, Result};

/// Lowercases `text` and splits it into whitespace-separated words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Name and one-line description of every command, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the next 20 location areas"),
    ("mapb", "Displays the previous 20 location areas"),
    ("explore", "Displays a list of all the Pokemon located in an area"),
    ("catch", "Catch a pokemon"),
    ("inspect", "Inspect one of your pokemons details"),
    ("pokedex", "Lists every pokemon you have caught"),
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Next page of location areas
    Map,
    /// Previous page of location areas
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses cleaned input words.
    ///
    /// Returns `Ok(None)` for empty input. Words after the first argument
    /// are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = |command: &'static str, argument: &'static str| {
            args.first()
                .cloned()
                .ok_or(PokedexError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg("explore", "area")?),
            "catch" => Self::Catch(arg("catch", "pokemon")?),
            "inspect" => Self::Inspect(arg("inspect", "pokemon")?),
            "pokedex" => Self::Pokedex,
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}
