//! Access to a world's LevelDB save database.
//!
//! Bedrock uses Mojang's fork of LevelDB, which compresses table blocks with
//! zlib rather than snappy. Both of its compressor ids are registered here so
//! that plain `rusty-leveldb` can read the tables.

use std::io::{self, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;
use log::{debug, warn};
use rusty_leveldb::compressor::Compressor;
use rusty_leveldb::{
    CompressorList, DBIterator, LdbIterator, Options, Status, StatusCode, DB,
};

use crate::error::{Error, Result};

/// Compressor id of zlib streams (with header), used by older worlds.
pub const ZLIB_COMPRESSOR_ID: u8 = 2;

/// Compressor id of raw deflate streams, used by current versions of the game.
pub const RAW_ZLIB_COMPRESSOR_ID: u8 = 4;

struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn encode(&self, block: Vec<u8>) -> rusty_leveldb::Result<Vec<u8>> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&block).map_err(compression_error)?;
        enc.finish().map_err(compression_error)
    }

    fn decode(&self, block: Vec<u8>) -> rusty_leveldb::Result<Vec<u8>> {
        read_all(ZlibDecoder::new(block.as_slice())).map_err(compression_error)
    }
}

struct RawZlibCompressor;

impl Compressor for RawZlibCompressor {
    fn encode(&self, block: Vec<u8>) -> rusty_leveldb::Result<Vec<u8>> {
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&block).map_err(compression_error)?;
        enc.finish().map_err(compression_error)
    }

    fn decode(&self, block: Vec<u8>) -> rusty_leveldb::Result<Vec<u8>> {
        read_all(DeflateDecoder::new(block.as_slice())).map_err(compression_error)
    }
}

fn read_all(mut r: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = vec![];
    r.read_to_end(&mut buf)?;
    Ok(buf)
}

fn compression_error(e: io::Error) -> Status {
    Status::new(StatusCode::Corruption, &format!("zlib: {}", e))
}

/// LevelDB options able to read and write Mojang's tables.
pub fn bedrock_options() -> Options {
    let mut compressors = CompressorList::default();
    compressors.set_with_id(ZLIB_COMPRESSOR_ID, ZlibCompressor);
    compressors.set_with_id(RAW_ZLIB_COMPRESSOR_ID, RawZlibCompressor);

    Options {
        create_if_missing: true,
        compressor: RAW_ZLIB_COMPRESSOR_ID,
        compressor_list: Rc::new(compressors),
        ..Options::default()
    }
}

/// An open world database.
///
/// The database lock is held until [`SaveDb::close`] is called or the handle
/// is dropped, whichever comes first.
pub struct SaveDb {
    path: PathBuf,
    db: Option<DB>,
}

impl SaveDb {
    /// Open the database in the given directory, normally `<world>/db`. The
    /// database is created if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = DB::open(&path, bedrock_options()).map_err(Error::db)?;
        debug!("opened world database {}", path.display());

        Ok(Self { path, db: Some(db) })
    }

    /// Fetch the raw value stored under `key`, if any.
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db_mut()?.get(key).map(|value| value.to_vec()))
    }

    /// Iterate over every key in the database, in the database's own order.
    /// Each call starts a new iteration from the first key.
    pub fn keys(&mut self) -> Result<Keys<'_>> {
        let iter = self.db_mut()?.new_iter().map_err(Error::db)?;
        Ok(Keys {
            iter,
            _db: PhantomData,
        })
    }

    /// Flush and release the database.
    pub fn close(mut self) -> Result<()> {
        match self.db.take() {
            Some(mut db) => {
                debug!("closing world database {}", self.path.display());
                db.close().map_err(Error::db)
            }
            None => Ok(()),
        }
    }

    fn db_mut(&mut self) -> Result<&mut DB> {
        self.db
            .as_mut()
            .ok_or_else(|| Error::Db("database already closed".to_owned()))
    }
}

impl Drop for SaveDb {
    fn drop(&mut self) {
        if let Some(mut db) = self.db.take() {
            if let Err(e) = db.close() {
                warn!(
                    "failed to close world database {}: {:?}",
                    self.path.display(),
                    e.code
                );
            }
        }
    }
}

/// Lazy iterator over the raw keys of a [`SaveDb`].
pub struct Keys<'db> {
    iter: DBIterator,
    _db: PhantomData<&'db mut SaveDb>,
}

impl Iterator for Keys<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        LdbIterator::next(&mut self.iter).map(|(key, _)| key.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(path: &Path, entries: &[(&[u8], &[u8])]) {
        let mut db = DB::open(path, bedrock_options()).unwrap();
        for (k, v) in entries {
            db.put(k, v).unwrap();
        }
        db.flush().unwrap();
        db.close().unwrap();
    }

    #[test]
    fn creates_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");

        let mut db = SaveDb::open(&path).unwrap();
        assert!(path.is_dir());
        assert_eq!(db.keys().unwrap().count(), 0);
        db.close().unwrap();
    }

    #[test]
    fn get_present_and_absent() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path(), &[(b"~local_player", b"record")]);

        let mut db = SaveDb::open(dir.path()).unwrap();
        assert_eq!(db.get(b"~local_player").unwrap(), Some(b"record".to_vec()));
        assert_eq!(db.get(b"player_server_nobody").unwrap(), None);
    }

    #[test]
    fn keys_are_restartable() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path(), &[(b"a", b"1"), (b"b", b"2"), (b"c", b"3")]);

        let mut db = SaveDb::open(dir.path()).unwrap();
        let first: Vec<_> = db.keys().unwrap().collect();
        let second: Vec<_> = db.keys().unwrap().collect();

        assert_eq!(first, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(first, second);
    }

    #[test]
    fn reopen_after_close() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path(), &[(b"k", b"v")]);

        let db = SaveDb::open(dir.path()).unwrap();
        db.close().unwrap();

        // The lock must have been released for this to succeed.
        let mut db = SaveDb::open(dir.path()).unwrap();
        assert_eq!(db.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn reopen_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path(), &[(b"k", b"v")]);

        {
            let _db = SaveDb::open(dir.path()).unwrap();
        }

        assert!(SaveDb::open(dir.path()).is_ok());
    }

    #[test]
    fn zlib_compressors_round_trip_blocks() {
        let block = b"ender chest ender chest ender chest".to_vec();

        for compressor in [
            &ZlibCompressor as &dyn Compressor,
            &RawZlibCompressor as &dyn Compressor,
        ] {
            let encoded = compressor.encode(block.clone()).unwrap();
            assert_eq!(compressor.decode(encoded).unwrap(), block);
        }
    }

    #[test]
    fn corrupt_block_is_an_error() {
        assert!(RawZlibCompressor.decode(vec![0xff; 8]).is_err());
    }
}
