//! Session state and command handlers
//!
//! A [`Session`] owns everything that lives across commands: the PokeAPI
//! client, the location-area page cursor, the caught Pokemon and the RNG
//! used for catch rolls.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::api::PokeApiClient;
use crate::commands::{attempt_catch, Command, COMMANDS};
use crate::error::Result;
use crate::models::{LocationAreaPage, Pokemon};

/// What the REPL should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A Pokemon in the user's Pokedex.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Cursor over the paged location-area listing.
#[derive(Debug, Default)]
struct Pagination {
    next: Option<String>,
    previous: Option<String>,
    /// Whether any page has been shown yet
    started: bool,
}

// == Session ==
/// Interactive session state.
pub struct Session<R = StdRng> {
    client: PokeApiClient,
    pages: Pagination,
    pokedex: BTreeMap<String, CaughtPokemon>,
    rng: R,
}

impl Session<StdRng> {
    /// Creates a session with an OS-seeded RNG.
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_os_rng())
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: R) -> Self {
        Self {
            client,
            pages: Pagination::default(),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    /// Pokemon caught so far, keyed by the name they were caught with.
    pub fn pokedex(&self) -> &BTreeMap<String, CaughtPokemon> {
        &self.pokedex
    }

    // == Execute ==
    /// Runs one command, writing user-facing output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing command");
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out)?;
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "{name}: {description}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    // == Map ==
    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.pages.started && self.pages.next.is_none() {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        }
        let url = self.pages.next.clone();
        let page = self.client.location_areas(url.as_deref()).await?;
        self.show_page(page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.pages.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        let page = self.client.location_areas(Some(url.as_str())).await?;
        self.show_page(page, out)
    }

    fn show_page<W: Write>(&mut self, page: LocationAreaPage, out: &mut W) -> Result<()> {
        writeln!(out)?;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        writeln!(out)?;

        self.pages = Pagination {
            next: page.next,
            previous: page.previous,
            started: true,
        };
        Ok(())
    }

    // == Explore ==
    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {area}...")?;
        let area = self.client.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &area.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    // == Catch ==
    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "Throwing a Pokeball at {name}...")?;
        let pokemon = self.client.pokemon(name).await?;

        if attempt_catch(&mut self.rng, pokemon.base_experience) {
            writeln!(out, "{name} was caught!")?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            info!(pokemon = %pokemon.name, caught_as = name, "Pokemon caught");
            // Keyed by the typed name so `inspect` accepts the same argument
            self.pokedex.insert(
                name.to_string(),
                CaughtPokemon {
                    pokemon,
                    caught_at: Utc::now(),
                },
            );
        } else {
            writeln!(out, "{name} escaped!")?;
        }
        Ok(())
    }

    // == Inspect ==
    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out)?;
            writeln!(out, "you have not caught that pokemon")?;
            writeln!(out)?;
            return Ok(());
        };
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    // == Pokedex ==
    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Go catch some pokemon!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for (name, caught) in &self.pokedex {
            writeln!(
                out,
                " - {name} (caught {})",
                caught.caught_at.format("%Y-%m-%d %H:%M UTC")
            )?;
        }
        Ok(())
    }
}
