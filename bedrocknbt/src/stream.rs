//! Allows streaming of little-endian NBT data without prior knowledge of the
//! structure.

use super::Tag;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// An optional `String`.
pub type Name = Option<String>;

/// A shallow NBT value.
///
/// For every value except compounds and lists, this contains the value of the tag. For example, a `Value::Byte` will
/// contain the name and the byte of that NBT tag.
///
/// The name part of each variant is optional, since elements in an NBT list do not have names. The end of lists do not
/// have a name in the binary format, so it isn't included here either.
///
/// See `Parser` for more information.
#[derive(Debug, PartialEq)]
pub enum Value {
    CompoundEnd,
    Byte(Name, i8),
    Short(Name, i16),
    Int(Name, i32),
    Long(Name, i64),
    Float(Name, f32),
    Double(Name, f64),
    ByteArray(Name, Vec<i8>),
    String(Name, String),
    List(Name, Tag, i32),
    ListEnd,
    Compound(Name),
    IntArray(Name, Vec<i32>),
    LongArray(Name, Vec<i64>),
}

#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new variants.
    Other,

    /// End of input at the start of a tag. This may not be an error, it could
    /// be the natural end of the NBT. The parser does not track the overall
    /// structure, so it cannot tell the difference.
    Eof,

    /// EOF that occurred part way through some NBT value.
    UnexpectedEof,
    InvalidTag,

    /// A list or array declared a negative length.
    InvalidLength,

    /// Compounds and lists nested deeper than a tree is allowed to go.
    TooDeep,

    /// Expected unicode data but was not valid. Parser remains valid if just
    /// this value was not unicode. Contained bytes are the invalid unicode data.
    Nonunicode(Vec<u8>),
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::Eof)
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    fn invalid_tag(t: u8) -> Self {
        Self {
            msg: format!("invalid tag: {}", t),
            kind: ErrorKind::InvalidTag,
        }
    }

    fn invalid_length(len: i32) -> Self {
        Self {
            msg: format!("invalid length: {}", len),
            kind: ErrorKind::InvalidLength,
        }
    }

    fn nonunicode(d: Vec<u8>) -> Self {
        Self {
            msg: format!(
                "invalid string, non-unicode: {}",
                String::from_utf8_lossy(&d),
            ),
            kind: ErrorKind::Nonunicode(d),
        }
    }

    pub(crate) fn too_deep(depth: usize) -> Self {
        Self {
            msg: format!("nbt nested too deeply: {} levels", depth),
            kind: ErrorKind::TooDeep,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    fn eof() -> Self {
        Self {
            msg: "EOF".into(),
            kind: ErrorKind::Eof,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: e.to_string(),
                kind: ErrorKind::Other,
            },
        }
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Parser can take any reader and parse it as little-endian NBT data.
///
/// # Examples
///
/// ## Dump NBT
/// Dump a record in Rust's `Debug` format, indented by nesting depth.
///
/// ```
/// use bedrocknbt::stream::{Parser, Value};
///
/// // An unnamed root compound holding one byte called "Count".
/// let record = [10u8, 0, 0, 1, 5, 0, b'C', b'o', b'u', b'n', b't', 3, 0];
///
/// let mut parser = Parser::new(&record[..]);
/// let mut indent = 0;
///
/// loop {
///     match parser.next() {
///         Err(e) => {
///             assert!(e.is_eof());
///             break;
///         }
///         Ok(value) => {
///             match value {
///                 Value::CompoundEnd => indent -= 4,
///                 Value::ListEnd => indent -= 4,
///                 _ => {}
///             }
///
///             println!("{:indent$}{:?}", "", value, indent = indent);
///
///             match value {
///                 Value::Compound(_) => indent += 4,
///                 Value::List(_, _, _) => indent += 4,
///                 _ => {}
///             }
///         }
///     }
/// }
/// ```
pub struct Parser<R: Read> {
    reader: R,
    layers: Vec<Layer>,
}

impl<R: Read> Parser<R> {
    /// Create new parser for the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            layers: Vec::new(),
        }
    }

    /// Parse the next value from the input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Value> {
        self.next_inner()
    }

    /// How many compounds and lists the parser is currently inside.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    fn next_inner(&mut self) -> Result<Value> {
        if let Some(Layer::List(_, 0)) = self.layers.last() {
            self.layers.pop();
            return Ok(Value::ListEnd);
        }

        if let Some(Layer::List(tag, remainder)) = self.layers.last_mut() {
            *remainder -= 1;
            let tag = *tag;
            return self.read_payload(tag, None);
        }

        // If we get EOF reading a tag, it means we completed a tag to get here, so this is a
        // natural end of stream.
        let tag = match self.reader.read_u8() {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Err(Error::eof()),
            Err(e) => return Err(e.into()),
        };

        let tag = u8_to_tag(tag)?;

        if tag == Tag::End {
            // End tags have no name or value.
            return match self.layers.last() {
                Some(Layer::Compound) => {
                    self.layers.pop();
                    Ok(Value::CompoundEnd)
                }
                _ => Err(Error::bespoke("end tag outside of a compound")),
            };
        }

        let name = Some(self.read_size_prefixed_string()?);

        self.read_payload(tag, name)
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<LittleEndian>()? as usize;

        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf[..])?;

        String::from_utf8(buf).map_err(|e| Error::nonunicode(e.into_bytes()))
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.reader.read_i32::<LittleEndian>()?;
        usize::try_from(len).map_err(|_| Error::invalid_length(len))
    }

    fn read_payload(&mut self, tag: Tag, name: Name) -> Result<Value> {
        match tag {
            Tag::Byte => Ok(Value::Byte(name, self.reader.read_i8()?)),
            Tag::Short => Ok(Value::Short(name, self.reader.read_i16::<LittleEndian>()?)),
            Tag::Int => Ok(Value::Int(name, self.reader.read_i32::<LittleEndian>()?)),
            Tag::Long => Ok(Value::Long(name, self.reader.read_i64::<LittleEndian>()?)),
            Tag::Float => Ok(Value::Float(name, self.reader.read_f32::<LittleEndian>()?)),
            Tag::Double => Ok(Value::Double(name, self.reader.read_f64::<LittleEndian>()?)),
            Tag::Compound => {
                self.layers.push(Layer::Compound);
                Ok(Value::Compound(name))
            }
            // Elements of a list of End never get this far, since such lists
            // must be empty to be valid.
            Tag::End => Err(Error::bespoke("list element tagged as end")),
            Tag::List => {
                let element_tag = u8_to_tag(self.reader.read_u8()?)?;
                let size = self.reader.read_i32::<LittleEndian>()?;
                if size < 0 {
                    return Err(Error::invalid_length(size));
                }
                if element_tag == Tag::End && size != 0 {
                    return Err(Error::bespoke("non-empty list of end tags"));
                }
                self.layers.push(Layer::List(element_tag, size));
                Ok(Value::List(name, element_tag, size))
            }
            Tag::String => Ok(Value::String(name, self.read_size_prefixed_string()?)),
            Tag::ByteArray => {
                let size = self.read_len()?;
                let mut buf = vec![0u8; size];
                self.reader.read_exact(&mut buf[..])?;
                Ok(Value::ByteArray(name, buf.into_iter().map(|b| b as i8).collect()))
            }
            Tag::IntArray => {
                let size = self.read_len()?;
                let buf = (0..size)
                    .map(|_| self.reader.read_i32::<LittleEndian>())
                    .collect::<std::io::Result<Vec<_>>>()?;

                Ok(Value::IntArray(name, buf))
            }
            Tag::LongArray => {
                let size = self.read_len()?;
                let buf = (0..size)
                    .map(|_| self.reader.read_i64::<LittleEndian>())
                    .collect::<std::io::Result<Vec<_>>>()?;

                Ok(Value::LongArray(name, buf))
            }
        }
    }
}

/// Parse the input until the compound we are currently inside is complete.
/// Handles inner compounds by skipping those as well.
pub fn skip_compound<R: Read>(parser: &mut Parser<R>) -> Result<()> {
    let mut depth = 1;

    while depth != 0 {
        let value = parser.next()?;
        match value {
            Value::CompoundEnd => depth -= 1,
            Value::Compound(_) => depth += 1,
            _ => {}
        }
    }
    Ok(())
}

/// Parse until the list with the given name is found. This will enter other
/// compounds and lists, rather than find a list at the current level.
pub fn find_list<R: Read>(parser: &mut Parser<R>, name: Option<&str>) -> Result<usize> {
    loop {
        match parser.next()? {
            Value::List(n, _, size) if n.as_deref() == name => return Ok(size as usize),
            _ => {}
        }
    }
}

fn u8_to_tag(tag: u8) -> Result<Tag> {
    Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
}

#[derive(Clone, Copy)]
enum Layer {
    List(Tag, i32),
    Compound,
}
