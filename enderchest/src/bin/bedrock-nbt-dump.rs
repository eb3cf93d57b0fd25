//! Dump one record of a Bedrock world's database as a stream of NBT values.
//!
//! Usage: `bedrock-nbt-dump <world-dir> <key>`, eg.
//! `bedrock-nbt-dump minecraftWorlds/abc123 ~local_player`.

use std::path::PathBuf;

use anyhow::{bail, Context};
use bedrocknbt::stream::{Parser, Value};
use clap::Parser as _;
use enderchest::db::SaveDb;
use enderchest::worlds::DB_DIR;
use env_logger::Env;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Dump one NBT record of a Bedrock world's database")]
struct Args {
    /// World folder, the one holding `levelname.txt` and `db`.
    world: PathBuf,

    /// Database key of the record, eg. `~local_player`.
    key: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let db_dir = args.world.join(DB_DIR);
    if !db_dir.is_dir() {
        bail!("{} is not a world folder", args.world.display());
    }

    let mut db = SaveDb::open(&db_dir)
        .with_context(|| format!("opening world {}", args.world.display()))?;
    let record = db.get(args.key.as_bytes())?;
    db.close()?;

    let record = match record {
        Some(record) => record,
        None => bail!("no record with key {}", args.key),
    };

    let mut parser = Parser::new(record.as_slice());
    let mut indent = 0;

    loop {
        match parser.next() {
            Err(e) if e.is_eof() => break,
            Err(e) => bail!("malformed record: {}", e),
            Ok(value) => {
                match value {
                    Value::CompoundEnd => indent -= 4,
                    Value::ListEnd => indent -= 4,
                    _ => {}
                }

                println!("{:indent$}{:?}", "", value, indent = indent);

                match value {
                    Value::Compound(_) => indent += 4,
                    Value::List(_, _, _) => indent += 4,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
