//! Lists what players of a *Minecraft: Bedrock Edition* world keep in their
//! ender chests, reading the world's save database directly.
//!
//! A round of the [`session`] goes:
//!
//! 1. [`worlds`] lists the worlds in the saves directory,
//! 2. [`db`] opens the chosen world's LevelDB database,
//! 3. [`players`] lists the players with records in it,
//! 4. [`inventory`] decodes the chosen player's record and prints the ender
//!    chest.

pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod players;
pub mod prompt;
pub mod session;
pub mod worlds;

pub use error::{Error, Result};
