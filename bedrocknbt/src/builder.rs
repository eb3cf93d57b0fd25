//! Hand-assembled little-endian NBT for tests.
//!
//! Enabled for this crate's own tests, and for other crates with the `builder`
//! feature.

use crate::Tag;

/// Builder for little-endian NBT data, used to create test data. It
/// specifically does *not* guarantee the resulting data is valid NBT, since
/// invalid NBT is useful for testing.
#[derive(Default)]
pub struct Builder {
    payload: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            payload: Vec::new(),
        }
    }

    pub fn tag(mut self, t: Tag) -> Self {
        self.payload.push(t as u8);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        let len: u16 = name.len().try_into().expect("test name beyond u16");
        self.payload.extend_from_slice(&len.to_le_bytes());
        self.payload.extend_from_slice(name.as_bytes());
        self
    }

    /// The unnamed root compound every Bedrock record starts with.
    pub fn start_root(self) -> Self {
        self.start_compound("")
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.tag(Tag::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.tag(Tag::End)
    }

    pub fn start_list(self, name: &str, element_tag: Tag, size: i32) -> Self {
        self.tag(Tag::List)
            .name(name)
            .tag(element_tag)
            .int_payload(size)
    }

    pub fn byte(self, name: &str, b: i8) -> Self {
        self.tag(Tag::Byte).name(name).byte_payload(b)
    }

    pub fn short(self, name: &str, v: i16) -> Self {
        self.tag(Tag::Short).name(name).short_payload(v)
    }

    pub fn int(self, name: &str, v: i32) -> Self {
        self.tag(Tag::Int).name(name).int_payload(v)
    }

    pub fn long(self, name: &str, v: i64) -> Self {
        self.tag(Tag::Long).name(name).long_payload(v)
    }

    pub fn float(self, name: &str, v: f32) -> Self {
        self.tag(Tag::Float).name(name).float_payload(v)
    }

    pub fn double(self, name: &str, v: f64) -> Self {
        self.tag(Tag::Double).name(name).double_payload(v)
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.tag(Tag::String).name(name).string_payload(s)
    }

    pub fn byte_array(self, name: &str, bs: &[i8]) -> Self {
        let mut b = self
            .tag(Tag::ByteArray)
            .name(name)
            .int_payload(bs.len().try_into().unwrap());
        for v in bs {
            b = b.byte_payload(*v);
        }
        b
    }

    pub fn int_array(self, name: &str, arr: &[i32]) -> Self {
        let mut b = self
            .tag(Tag::IntArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap());
        for v in arr {
            b = b.int_payload(*v);
        }
        b
    }

    pub fn long_array(self, name: &str, arr: &[i64]) -> Self {
        let mut b = self
            .tag(Tag::LongArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap());
        for v in arr {
            b = b.long_payload(*v);
        }
        b
    }

    pub fn string_payload(self, s: &str) -> Self {
        self.name(s)
    }

    pub fn byte_payload(mut self, b: i8) -> Self {
        self.payload.push(b as u8);
        self
    }

    pub fn short_payload(mut self, v: i16) -> Self {
        self.payload.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn int_payload(mut self, v: i32) -> Self {
        self.payload.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn long_payload(mut self, v: i64) -> Self {
        self.payload.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn float_payload(mut self, v: f32) -> Self {
        self.payload.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn double_payload(mut self, v: f64) -> Self {
        self.payload.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Straight up add some bytes to the payload. For very corner-case tests
    /// that are not worth a specific builder method.
    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.payload.extend_from_slice(bs);
        self
    }

    /// This is a no-op, but can make code clearer by showing the points where a
    /// compound in a list has logically started.
    pub fn start_anon_compound(self) -> Self {
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
