//! bedrocknbt reads the NBT flavour used by *Minecraft: Bedrock Edition*.
//!
//! Bedrock stores player records, level data and most other world state as NBT
//! inside its LevelDB database. The structure is the same as Java Edition's
//! NBT, but every number (including string and list lengths) is stored
//! little-endian and strings are plain UTF-8.
//!
//! * For a pull parser over any `Read`, see [`stream`].
//! * For an owned tree that can be walked by name, see [`Value`].
//!
//! # Quick example
//!
//! Print the ender chest of a player record that has already been fetched from
//! the world database:
//!
//! ```no_run
//! # fn main() -> bedrocknbt::Result<()> {
//! # let record: Vec<u8> = vec![];
//! let root = bedrocknbt::from_bytes(&record)?;
//!
//! let items = root
//!     .as_ref()
//!     .and_then(|root| root.pointer(&["EnderChestInventory"]))
//!     .and_then(bedrocknbt::Value::as_list)
//!     .unwrap_or_default();
//!
//! for item in items {
//!     let name = item.get("Name").and_then(bedrocknbt::Value::as_str);
//!     let count = item.get("Count").and_then(bedrocknbt::Value::as_i64);
//!     println!("{:?} x{:?}", name, count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod stream;

#[cfg(any(test, feature = "builder"))]
pub mod builder;

mod value;

pub use stream::{Error, ErrorKind, Result};
pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a UTF-8 string.
    String = 8,
    /// Represents a list of values that all share one tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

// Written out by hand rather than derived with a crate. The tags very rarely
// change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
