use std::{io, path::PathBuf};

/// Errors from reading worlds and talking to the terminal.
///
/// Expected absences (a world without a label, a player without a record, an
/// inventory without items) are never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory holding every world could not be listed.
    #[error("could not read worlds directory {}: {source}", path.display())]
    SaveRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The world's LevelDB database could not be opened or read.
    #[error("world database: {0}")]
    Db(String),

    /// A player record was not valid NBT.
    #[error("invalid player record: {0}")]
    Nbt(#[from] bedrocknbt::Error),

    #[error("terminal: {0}")]
    Terminal(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn db(status: rusty_leveldb::Status) -> Self {
        Error::Db(format!("{:?}: {}", status.code, status.err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
