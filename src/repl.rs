//! Read-eval-print loop
//!
//! Prompts, reads one line at a time, and dispatches to a [`Session`] until
//! `exit`, end of input, or a shutdown signal.

use std::future::Future;
use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::commands::{clean_input, Command, Flow, Session};
use crate::error::{PokedexError, Result};

pub const PROMPT: &str = "Pokedex > ";

/// How a REPL run came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ended {
    /// `exit` or end of input
    Finished,
    /// The shutdown future completed first
    Interrupted,
}

/// Runs the REPL over `input`, writing prompts and output to `out`.
///
/// Command failures are reported to the user and the loop carries on, as do
/// lines that are not valid UTF-8 (they are decoded lossily and usually come
/// out as an unknown command). Only failing to read input or write output
/// ends the loop with an error.
pub async fn run<G, I, W>(session: &mut Session<G>, mut input: I, out: &mut W) -> Result<()>
where
    G: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            writeln!(out)?;
            debug!("End of input");
            break;
        }
        let line = String::from_utf8_lossy(&buf);

        let command = match Command::parse(&clean_input(&line)) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(PokedexError::UnknownCommand(name)) => {
                debug!(command = %name, "Unknown command");
                writeln!(out, "Unknown command")?;
                continue;
            }
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(PokedexError::Io(err)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "Command failed");
                writeln!(out, "Error: {err}")?;
            }
        }
    }

    Ok(())
}

/// Runs the REPL until it finishes on its own or `shutdown` completes.
///
/// On interruption the prompt line is terminated so later output starts on
/// a fresh line.
pub async fn run_until<G, I, W, S>(
    session: &mut Session<G>,
    input: I,
    out: &mut W,
    shutdown: S,
) -> Result<Ended>
where
    G: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let ended = tokio::select! {
        result = run(session, input, &mut *out) => {
            result?;
            Ended::Finished
        }
        () = shutdown => Ended::Interrupted,
    };

    if ended == Ended::Interrupted {
        debug!("REPL interrupted");
        writeln!(out)?;
    }
    Ok(ended)
}
