//! The interactive loop: pick a world, pick a player, show their ender chest,
//! and go again until the user quits.

use std::io::Write;

use log::{error, info};

use crate::config::Config;
use crate::db::SaveDb;
use crate::error::{Error, Result};
use crate::inventory::{player_ender_chest, render};
use crate::players::player_choices;
use crate::prompt::{Gate, Prompt, Selection};
use crate::worlds::{db_path, world_choices};

pub const SELECT_WORLD: &str = "Select a world with the arrow keys.";
pub const SELECT_PLAYER: &str = "Select a player with the arrow keys.";
pub const NO_WORLDS: &str = "No worlds found.";
pub const CONTINUE: &str = "Press ENTER to start over or ESC to quit...";
pub const GOODBYE: &str = "Exiting.";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// There were no worlds to choose from.
    NoWorlds,
    /// The user chose to quit.
    Quit,
}

pub struct Session<P, W> {
    config: Config,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> Session<P, W> {
    pub fn new(config: Config, prompt: P, out: W) -> Self {
        Self {
            config,
            prompt,
            out,
        }
    }

    /// Run rounds until the user quits or there are no worlds.
    ///
    /// A player record that cannot be decoded is reported and ends only the
    /// current round. Failing to list the worlds or to open a world's database
    /// ends the session with an error.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            let worlds = world_choices(&self.config.worlds_dir)?;
            if worlds.is_empty() {
                writeln!(self.out, "{}", NO_WORLDS)?;
                return Ok(Outcome::NoWorlds);
            }

            match self.prompt.select(SELECT_WORLD, &worlds)? {
                Selection::Chosen(world) => self.show_world(&world)?,
                Selection::Cancelled => return self.quit(),
            }

            match self.prompt.wait_for_continue(CONTINUE)? {
                Gate::Continue => self.prompt.clear()?,
                Gate::Quit => return self.quit(),
            }
        }
    }

    fn quit(&mut self) -> Result<Outcome> {
        writeln!(self.out, "\n{}", GOODBYE)?;
        Ok(Outcome::Quit)
    }

    /// One round on the world in `folder`. The database is closed before this
    /// returns, whatever happens in between.
    fn show_world(&mut self, folder: &str) -> Result<()> {
        let path = db_path(&self.config.worlds_dir, folder);
        info!("opening world {}", folder);
        let mut db = SaveDb::open(path)?;

        let shown = self.show_player(&mut db);
        let closed = db.close();

        match shown {
            Err(Error::Nbt(e)) => {
                error!("could not decode player record in world {}: {}", folder, e);
                writeln!(self.out, "\nCould not read the player record: {}", e)?;
            }
            shown => shown?,
        }
        closed
    }

    fn show_player(&mut self, db: &mut SaveDb) -> Result<()> {
        let players = player_choices(db)?;
        let player = match self.prompt.select(SELECT_PLAYER, &players)? {
            Selection::Chosen(player) => player,
            Selection::Cancelled => return Ok(()),
        };

        info!("reading ender chest of {}", player);
        let items = player_ender_chest(db, &player)?;

        writeln!(self.out)?;
        for line in render(&items) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}
