use std::collections::HashMap;
use std::io::Read;

use crate::stream::{self, Parser};
use crate::{Error, Result, Tag};

/// Deepest nesting of compounds and lists, counting the root, that
/// [`from_reader`] will build. Real records are a handful of levels deep.
pub const MAX_DEPTH: usize = 256;

/// Value is a complete NBT value. It owns its data.
///
/// Unlike the stream values, a `Value` has no name; the names of the fields of
/// a compound are the keys of its map.
///
/// ```
/// use bedrocknbt::Value;
/// # fn main() -> bedrocknbt::Result<()> {
/// // Unnamed root compound containing the int `DataVersion` = 7.
/// let buf = [10, 0, 0, 3, 11, 0, 68, 97, 116, 97, 86, 101, 114, 115, 105, 111, 110, 7, 0, 0, 0, 0];
/// let root = bedrocknbt::from_bytes(&buf)?.expect("input was not empty");
///
/// assert_eq!(root.get("DataVersion"), Some(&Value::Int(7)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Value>),
    Compound(HashMap<String, Value>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// The tag this value would be written with.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    /// Get a field of a compound. `None` if this is not a compound or the
    /// field does not exist.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_compound()?.get(name)
    }

    /// Follow a path of compound field names starting at this value. Stops at
    /// the first step that is missing or that is not a compound.
    ///
    /// An empty path returns this value.
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |value, step| value.get(step))
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any of the integral tags, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v.into()),
            Value::Short(v) => Some(v.into()),
            Value::Int(v) => Some(v.into()),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }
}

/// Read a complete NBT tree from the reader.
///
/// Returns `Ok(None)` if the reader is empty, meaning there is no root tag at
/// all. Bedrock records always have a compound root; any other root is an
/// error, as is input that ends part way through the tree.
pub fn from_reader<R: Read>(reader: R) -> Result<Option<Value>> {
    let mut parser = Parser::new(reader);

    match parser.next() {
        Err(e) if e.is_eof() => Ok(None),
        Err(e) => Err(e),
        // The root name is always empty in Bedrock records and is dropped.
        Ok(stream::Value::Compound(_)) => read_compound(&mut parser).map(Some),
        Ok(other) => Err(Error::bespoke(format!(
            "expected root compound, found {:?}",
            other
        ))),
    }
}

/// Read a complete NBT tree from a byte slice. See [`from_reader`].
pub fn from_bytes(input: &[u8]) -> Result<Option<Value>> {
    from_reader(input)
}

fn read_compound<R: Read>(parser: &mut Parser<R>) -> Result<Value> {
    let mut map = HashMap::new();

    loop {
        let next = parser.next().map_err(inside_tree)?;
        let (name, value) = match next {
            stream::Value::CompoundEnd => return Ok(Value::Compound(map)),
            stream::Value::ListEnd => return Err(Error::bespoke("list end inside compound")),
            other => {
                let name = name_of(&other).unwrap_or_default();
                (name, read_value(parser, other)?)
            }
        };
        map.insert(name, value);
    }
}

fn read_list<R: Read>(parser: &mut Parser<R>, size: i32) -> Result<Value> {
    let mut values = Vec::with_capacity(size.clamp(0, 1024) as usize);

    loop {
        match parser.next().map_err(inside_tree)? {
            stream::Value::ListEnd => return Ok(Value::List(values)),
            stream::Value::CompoundEnd => {
                return Err(Error::bespoke("compound end inside list"))
            }
            other => values.push(read_value(parser, other)?),
        }
    }
}

fn read_value<R: Read>(parser: &mut Parser<R>, value: stream::Value) -> Result<Value> {
    use stream::Value as S;

    Ok(match value {
        S::Byte(_, v) => Value::Byte(v),
        S::Short(_, v) => Value::Short(v),
        S::Int(_, v) => Value::Int(v),
        S::Long(_, v) => Value::Long(v),
        S::Float(_, v) => Value::Float(v),
        S::Double(_, v) => Value::Double(v),
        S::ByteArray(_, v) => Value::ByteArray(v),
        S::String(_, v) => Value::String(v),
        S::IntArray(_, v) => Value::IntArray(v),
        S::LongArray(_, v) => Value::LongArray(v),
        S::Compound(_) => {
            check_depth(parser)?;
            read_compound(parser)?
        }
        S::List(_, _, size) => {
            check_depth(parser)?;
            read_list(parser, size)?
        }
        S::CompoundEnd | S::ListEnd => {
            return Err(Error::bespoke("unexpected end of collection"))
        }
    })
}

// Each nested collection costs a stack frame here, so corrupt input must not
// be allowed to nest without bound.
fn check_depth<R: Read>(parser: &Parser<R>) -> Result<()> {
    match parser.depth() {
        depth if depth > MAX_DEPTH => Err(Error::too_deep(depth)),
        _ => Ok(()),
    }
}

fn name_of(value: &stream::Value) -> Option<String> {
    use stream::Value as S;

    match value {
        S::Byte(n, _)
        | S::Short(n, _)
        | S::Int(n, _)
        | S::Long(n, _)
        | S::Float(n, _)
        | S::Double(n, _)
        | S::ByteArray(n, _)
        | S::String(n, _)
        | S::List(n, _, _)
        | S::Compound(n)
        | S::IntArray(n, _)
        | S::LongArray(n, _) => n.clone(),
        S::CompoundEnd | S::ListEnd => None,
    }
}

// Running out of input inside the tree is never a natural end.
fn inside_tree(e: Error) -> Error {
    if e.is_eof() {
        Error::unexpected_eof()
    } else {
        e
    }
}
